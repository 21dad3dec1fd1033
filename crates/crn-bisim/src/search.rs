//! Search for interpretations satisfying the delimiting, atomic and
//! permissive conditions.
//!
//! The search runs in three phases over a [`DelimitingTable`] rebuilt at
//! every node:
//!
//! 1. **Columns.** Every formal reaction needs an implementing reaction.
//!    The formal reaction with the fewest candidates is matched against
//!    each of them in turn, assigning the unassigned species involved.
//! 2. **Rows.** Every implementation reaction must be formal or trivial.
//!    Rows that still contain unassigned species are matched against formal
//!    reactions or left to be trivial.
//! 3. **Equations.** When every remaining row may only be trivial, missing
//!    atoms are placed first and the rest is solved as a linear system per
//!    formal species.
//!
//! Complete candidates are deduplicated, re-checked and handed to the
//! permissive checker. Every result extends the seed interpretation.

use crate::conditions::{missing_atom, missing_atoms};
use crate::enumerate::{arrangements, partitions};
use crate::outcome::{
    BisimOutcome, Blocker, Failure, FailureKind, PermissiveWitness, Rejection, SearchStats,
};
use crate::permissive::{check_permissive, Context, PermissiveStrategy, PermissiveVerdict};
use crate::solver::solve_affine;
use crate::table::{lift, DelimitingTable, SideDiff};
use ahash::AHashSet;
use crn_ir::{CrnPair, FormalId, ImplId, Interpretation, MixedReaction, Multiset, Species};
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Configuration for a verification run.
#[derive(Debug, Clone, Default)]
pub struct BisimConfig {
    /// Permissive checker run on complete candidates.
    pub permissive: PermissiveStrategy,
    /// Bound on the permissive search (steps or rounds). `None` uses each
    /// strategy's own default.
    pub permissive_depth: Option<usize>,
    /// Whether to explore the first column's branches in parallel.
    pub parallel: bool,
    /// Number of threads for parallel search (0 = use all available).
    pub num_threads: usize,
    /// If set, shuffle the order trivial reactions are explored in by the
    /// permissive checkers.
    pub shuffle_seed: Option<u64>,
}

/// One assignment of a column or row match.
type Extension = Vec<(ImplId, Multiset<FormalId>)>;

/// What the search learned about failing branches.
#[derive(Debug, Clone)]
struct Diagnostics {
    best_partial: Interpretation,
    max_depth: usize,
    blocker: Option<Blocker>,
    refuted: Option<PermissiveWitness>,
    indeterminate: Option<PermissiveWitness>,
    stats: SearchStats,
}

impl Diagnostics {
    fn new(seed: &Interpretation) -> Self {
        Diagnostics {
            best_partial: seed.clone(),
            max_depth: 0,
            blocker: None,
            refuted: None,
            indeterminate: None,
            stats: SearchStats::default(),
        }
    }

    fn reached(&mut self, depth: usize, intr: &Interpretation) {
        if depth > self.max_depth {
            self.max_depth = depth;
            self.best_partial = intr.clone();
            self.blocker = None;
        }
    }

    fn blocked(&mut self, depth: usize, blocker: Blocker) {
        if depth >= self.max_depth {
            self.blocker = Some(blocker);
        }
    }

    fn merge(&mut self, other: Diagnostics) {
        self.stats.merge(&other.stats);
        if other.max_depth > self.max_depth {
            self.max_depth = other.max_depth;
            self.best_partial = other.best_partial;
            self.blocker = other.blocker;
        }
        if self.refuted.is_none() {
            self.refuted = other.refuted;
        }
        if self.indeterminate.is_none() {
            self.indeterminate = other.indeterminate;
        }
    }

    fn into_failure(self) -> Failure {
        let kind = if self.indeterminate.is_some() {
            FailureKind::Indeterminate
        } else if self.refuted.is_some() {
            FailureKind::PermissiveRefuted
        } else {
            FailureKind::SearchExhausted
        };
        Failure {
            kind,
            best_partial: self.best_partial,
            reached_depth: self.max_depth,
            blocker: self.blocker,
            witness: self.indeterminate.or(self.refuted),
            stats: self.stats,
        }
    }
}

type Sink<'s> = &'s mut dyn FnMut(&Interpretation) -> ControlFlow<()>;

struct Search<'a, 's> {
    pair: &'a CrnPair,
    config: &'a BisimConfig,
    formal: Vec<MixedReaction>,
    formal_reactants: Vec<Multiset<FormalId>>,
    /// Complete candidates already checked.
    tried: AHashSet<Interpretation>,
    /// Interpretations that already entered row search.
    seen_partials: AHashSet<Interpretation>,
    diag: Diagnostics,
    /// Bisimulations handed to the sink.
    found: usize,
    sink: Sink<'s>,
    stop: Option<Arc<AtomicBool>>,
}

impl<'a, 's> Search<'a, 's> {
    fn new(pair: &'a CrnPair, config: &'a BisimConfig, sink: Sink<'s>) -> Self {
        Search {
            pair,
            config,
            formal: pair.formal.iter().map(lift).collect(),
            formal_reactants: pair.formal.iter().map(|r| r.reactants.clone()).collect(),
            tried: AHashSet::new(),
            seen_partials: AHashSet::new(),
            diag: Diagnostics::new(&pair.seed),
            found: 0,
            sink,
            stop: None,
        }
    }

    fn into_diagnostics(self) -> Diagnostics {
        self.diag
    }

    fn cancelled(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn substitute(&self, intr: &Interpretation) -> Vec<MixedReaction> {
        self.pair
            .implementation
            .iter()
            .map(|rxn| intr.substitute_reaction(rxn))
            .collect()
    }

    fn reject(&mut self, why: Rejection, depth: usize, blocker: Option<Blocker>) {
        match why {
            Rejection::Delimiting => self.diag.stats.delimiting_rejections += 1,
            Rejection::Atomic => self.diag.stats.atomic_rejections += 1,
        }
        if let Some(blocker) = blocker {
            self.diag.blocked(depth, blocker);
        }
    }

    fn run(&mut self) -> ControlFlow<()> {
        let seed = self.pair.seed.clone();
        if seed.is_complete() {
            debug!("seed interpretation is complete, checking it directly");
            return self.accept(seed, 0);
        }
        let unsolved = (0..self.formal.len()).collect();
        self.column(seed, unsolved, 0)
    }

    /// The unsolved formal reaction with the fewest candidate rows.
    fn pick_column(table: &DelimitingTable, unsolved: &[usize]) -> Option<usize> {
        unsolved
            .iter()
            .copied()
            .min_by_key(|&j| table.column_count(j))
    }

    /// Ways to extend the interpretation so that `irxn` implements formal
    /// reaction `c` exactly.
    fn extensions(&self, irxn: &MixedReaction, c: usize) -> Vec<Extension> {
        let frxn = &self.formal[c];
        let left = SideDiff::new(&irxn.reactants, &frxn.reactants);
        let right = SideDiff::new(&irxn.products, &frxn.products);
        if left.formal_surplus || right.formal_surplus {
            return Vec::new();
        }
        let left_keys = left.keys();
        let right_keys = right.keys();
        let rights: Vec<Vec<Multiset<FormalId>>> =
            partitions(&right.deficit, &right.weights()).collect();

        let mut out = Vec::new();
        for (lp, rp) in partitions(&left.deficit, &left.weights()).cartesian_product(rights.iter()) {
            let mut ext: Extension = left_keys.iter().copied().zip(lp.iter().cloned()).collect();
            let mut consistent = true;
            for (k, image) in right_keys.iter().zip(rp) {
                match left_keys.iter().position(|l| l == k) {
                    Some(pos) if lp[pos] != *image => {
                        consistent = false;
                        break;
                    }
                    Some(_) => {}
                    None => ext.push((*k, image.clone())),
                }
            }
            if consistent {
                out.push(ext);
            }
        }
        out
    }

    fn column(&mut self, intr: Interpretation, unsolved: Vec<usize>, depth: usize) -> ControlFlow<()> {
        if self.cancelled() {
            return ControlFlow::Break(());
        }
        self.diag.stats.column_nodes += 1;
        self.diag.reached(depth, &intr);

        let substituted = self.substitute(&intr);
        let table = DelimitingTable::build(&self.formal, &substituted);
        if let Some(blocker) = table.violation() {
            trace!(depth, ?blocker, "column search: delimiting violation");
            self.reject(Rejection::Delimiting, depth, Some(blocker));
            return ControlFlow::Continue(());
        }

        let Some(c) = Self::pick_column(&table, &unsolved) else {
            if !self.seen_partials.insert(intr.clone()) {
                self.diag.stats.duplicates += 1;
                return ControlFlow::Continue(());
            }
            let rows = (0..substituted.len())
                .filter(|&i| substituted[i].species().any(|s| !s.is_formal()))
                .collect();
            return self.row(intr, rows, depth, false);
        };

        trace!(depth, formal_reaction = c, candidates = table.column_count(c), "column search");
        let rest: Vec<usize> = unsolved.iter().copied().filter(|&j| j != c).collect();
        let rows: Vec<usize> = table.compatible_rows(c).collect();
        for k in rows {
            for ext in self.extensions(&substituted[k], c) {
                self.column(intr.extended(ext), rest.clone(), depth + 1)?;
            }
        }
        ControlFlow::Continue(())
    }

    /// `equations_failed` is set once the equation solver has found nothing
    /// for exactly this interpretation.
    fn row(
        &mut self,
        intr: Interpretation,
        unsolved: Vec<usize>,
        depth: usize,
        equations_failed: bool,
    ) -> ControlFlow<()> {
        if self.cancelled() {
            return ControlFlow::Break(());
        }
        self.diag.stats.row_nodes += 1;

        let substituted = self.substitute(&intr);
        let table = DelimitingTable::build(&self.formal, &substituted);
        if let Some(blocker) = table.violation() {
            trace!(depth, ?blocker, "row search: delimiting violation");
            self.reject(Rejection::Delimiting, depth, Some(blocker));
            return ControlFlow::Continue(());
        }

        if unsolved.is_empty() {
            if intr.is_complete() {
                return self.accept(intr, depth);
            }
            if equations_failed {
                return ControlFlow::Continue(());
            }
            return self.equations(&intr, depth);
        }
        self.diag.reached(depth, &intr);

        let mut equations_failed = equations_failed;
        let maybe_trivial = unsolved.iter().filter(|&&i| table.may_be_trivial(i)).count();
        if maybe_trivial == unsolved.len() && !equations_failed {
            let before = self.found;
            self.equations(&intr, depth)?;
            if self.found == before {
                equations_failed = true;
            }
        }

        let Some(k) = unsolved
            .iter()
            .copied()
            .filter(|&i| table.row_count(i) > 0)
            .min_by_key(|&i| table.row_count(i))
        else {
            return ControlFlow::Continue(());
        };
        trace!(depth, implementation_reaction = k, candidates = table.row_count(k), "row search");

        let rest: Vec<usize> = unsolved.iter().copied().filter(|&i| i != k).collect();
        if table.may_be_trivial(k) {
            self.row(intr.clone(), rest.clone(), depth, equations_failed)?;
        }
        let columns: Vec<usize> = table.compatible_columns(k).collect();
        for c in columns {
            for ext in self.extensions(&substituted[k], c) {
                self.row(intr.extended(ext), rest.clone(), depth + 1, false)?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Complete `intr` assuming every row with unassigned species is
    /// trivial: place missing atoms, then solve one linear system per
    /// formal species for the remaining images.
    ///
    /// Only the first solution of each system is tried, so species that
    /// appear only in trivial rows get one completion, not every one.
    fn equations(&mut self, intr: &Interpretation, depth: usize) -> ControlFlow<()> {
        self.diag.stats.equation_attempts += 1;
        let substituted = self.substitute(intr);
        let unknown: Vec<usize> = (0..substituted.len())
            .filter(|&i| substituted[i].species().any(|s| !s.is_formal()))
            .collect();
        let open: Vec<ImplId> = intr.unassigned().collect();
        let atoms: Vec<FormalId> = missing_atoms(intr, self.pair.num_formal_species()).collect();
        trace!(
            depth,
            unknown = unknown.len(),
            open = open.len(),
            missing_atoms = atoms.len(),
            "equations"
        );

        for chosen in arrangements(open.clone(), atoms.len()) {
            let with_atoms = intr.extended(
                chosen
                    .iter()
                    .copied()
                    .zip(atoms.iter().map(|&f| Multiset::singleton(f))),
            );
            let substituted = self.substitute(&with_atoms);
            let table = DelimitingTable::build(&self.formal, &substituted);
            if let Some(blocker) = table.violation() {
                self.reject(Rejection::Delimiting, depth, Some(blocker));
                continue;
            }
            if let Some(&i) = unknown.iter().find(|&&i| !table.may_be_trivial(i)) {
                self.reject(
                    Rejection::Delimiting,
                    depth,
                    Some(Blocker::ImplementationReaction(i)),
                );
                continue;
            }

            let rest: Vec<ImplId> = open.iter().copied().filter(|u| !chosen.contains(u)).collect();
            if rest.is_empty() {
                self.accept(with_atoms, depth)?;
                continue;
            }

            let mut images = vec![Multiset::new(); rest.len()];
            let mut solvable = true;
            for f in (0..self.pair.num_formal_species()).map(FormalId::new) {
                let system: Vec<Vec<i64>> = unknown
                    .iter()
                    .map(|&i| {
                        let rxn = &substituted[i];
                        let mut row: Vec<i64> = rest
                            .iter()
                            .map(|&u| rxn.net_consumption(Species::Impl(u)))
                            .collect();
                        row.push(rxn.net_consumption(Species::Formal(f)));
                        row
                    })
                    .collect();
                match solve_affine(&system) {
                    Some(x) => {
                        for (image, &n) in images.iter_mut().zip(&x) {
                            image.add(f, n);
                        }
                    }
                    None => {
                        trace!(formal = ?f, "equations: no solution");
                        solvable = false;
                        break;
                    }
                }
            }
            if solvable {
                debug!(depth, assigned = rest.len(), "equations: solved remaining species");
                self.accept(with_atoms.extended(rest.into_iter().zip(images)), depth)?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Check a complete candidate and report it if it is a bisimulation.
    fn accept(&mut self, intr: Interpretation, depth: usize) -> ControlFlow<()> {
        self.diag.stats.candidates += 1;
        if !self.tried.insert(intr.clone()) {
            self.diag.stats.duplicates += 1;
            return ControlFlow::Continue(());
        }

        let substituted = self.substitute(&intr);
        let table = DelimitingTable::build(&self.formal, &substituted);
        if let Some(blocker) = table.violation() {
            self.reject(Rejection::Delimiting, depth, Some(blocker));
            return ControlFlow::Continue(());
        }
        if let Some(f) = missing_atom(&intr, self.pair.num_formal_species()) {
            trace!(formal = self.pair.species.formal_name(f), "candidate is not atomic");
            self.reject(Rejection::Atomic, depth, None);
            return ControlFlow::Continue(());
        }

        let verdict = {
            let mut ctx = Context::new(&self.pair.implementation, &intr, &table);
            if let Some(seed) = self.config.shuffle_seed {
                ctx.shuffle_trivial(seed);
            }
            check_permissive(
                &ctx,
                &self.formal_reactants,
                self.config.permissive,
                self.config.permissive_depth,
            )
        };
        match verdict {
            PermissiveVerdict::Satisfied { depth: needed } => {
                debug!(depth, permissive_depth = needed, "found bisimulation");
                self.found += 1;
                (self.sink)(&intr)
            }
            PermissiveVerdict::Refuted {
                formal_reaction,
                witness,
            } => {
                self.diag.stats.permissive_refutations += 1;
                self.diag.refuted.get_or_insert(PermissiveWitness {
                    formal_reaction,
                    state: witness,
                    interpretation: intr,
                });
                ControlFlow::Continue(())
            }
            PermissiveVerdict::Indeterminate {
                formal_reaction,
                witness,
            } => {
                self.diag.stats.permissive_indeterminate += 1;
                self.diag.indeterminate.get_or_insert(PermissiveWitness {
                    formal_reaction,
                    state: witness,
                    interpretation: intr,
                });
                ControlFlow::Continue(())
            }
        }
    }

    /// Expand the root column node. `None` when there is no formal reaction
    /// to branch on.
    fn root_children(&mut self) -> Option<(Vec<usize>, Vec<Interpretation>)> {
        let intr = self.pair.seed.clone();
        let unsolved: Vec<usize> = (0..self.formal.len()).collect();
        self.diag.stats.column_nodes += 1;

        let substituted = self.substitute(&intr);
        let table = DelimitingTable::build(&self.formal, &substituted);
        if let Some(blocker) = table.violation() {
            self.reject(Rejection::Delimiting, 0, Some(blocker));
            return Some((Vec::new(), Vec::new()));
        }
        let c = Self::pick_column(&table, &unsolved)?;
        let rest = unsolved.into_iter().filter(|&j| j != c).collect();
        let children = table
            .compatible_rows(c)
            .flat_map(|k| self.extensions(&substituted[k], c))
            .map(|ext| intr.extended(ext))
            .collect();
        Some((rest, children))
    }
}

/// Search for one bisimulation extending `pair.seed`.
pub fn verify(pair: &CrnPair, config: &BisimConfig) -> BisimOutcome {
    info!(
        formal_reactions = pair.formal.len(),
        implementation_reactions = pair.implementation.len(),
        formal_species = pair.num_formal_species(),
        implementation_species = pair.num_impl_species(),
        strategy = %config.permissive,
        parallel = config.parallel,
        "starting bisimulation search"
    );

    let (found, diag) = if config.parallel && !pair.seed.is_complete() {
        verify_parallel(pair, config)
    } else {
        let mut found = None;
        let mut sink = |intr: &Interpretation| {
            found = Some(intr.clone());
            ControlFlow::Break(())
        };
        let mut search = Search::new(pair, config, &mut sink);
        let _ = search.run();
        let diag = search.into_diagnostics();
        (found, diag)
    };

    match found {
        Some(interpretation) => {
            info!(
                candidates = diag.stats.candidates,
                column_nodes = diag.stats.column_nodes,
                row_nodes = diag.stats.row_nodes,
                "bisimulation found"
            );
            BisimOutcome::Bisimilar {
                interpretation,
                stats: diag.stats,
            }
        }
        None => {
            let failure = diag.into_failure();
            info!(
                kind = %failure.kind,
                reached_depth = failure.reached_depth,
                candidates = failure.stats.candidates,
                "no bisimulation"
            );
            BisimOutcome::NotBisimilar(failure)
        }
    }
}

/// Branch on the first column in parallel. The lowest-index branch that
/// finds a bisimulation wins; the others are cancelled.
fn verify_parallel(pair: &CrnPair, config: &BisimConfig) -> (Option<Interpretation>, Diagnostics) {
    if config.num_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_threads)
            .build_global()
        {
            debug!(error = %e, "thread pool already initialized, using existing pool");
        }
    }

    let mut ignore = |_: &Interpretation| ControlFlow::Continue(());
    let mut root = Search::new(pair, config, &mut ignore);
    let Some((rest, children)) = root.root_children() else {
        debug!("no formal reactions to branch on, searching sequentially");
        let mut found = None;
        let mut sink = |intr: &Interpretation| {
            found = Some(intr.clone());
            ControlFlow::Break(())
        };
        let mut search = Search::new(pair, config, &mut sink);
        let _ = search.run();
        let diag = search.into_diagnostics();
        return (found, diag);
    };
    let mut diag = root.into_diagnostics();
    info!(branches = children.len(), threads = rayon::current_num_threads(), "parallel search");

    let stop = Arc::new(AtomicBool::new(false));
    let results: Vec<(Option<Interpretation>, Diagnostics)> = children
        .par_iter()
        .enumerate()
        .map(|(branch, child)| {
            let mut found = None;
            let mut sink = |intr: &Interpretation| {
                found = Some(intr.clone());
                stop.store(true, Ordering::Relaxed);
                ControlFlow::Break(())
            };
            let mut search = Search::new(pair, config, &mut sink);
            search.stop = Some(Arc::clone(&stop));
            let _ = search.column(child.clone(), rest.clone(), 1);
            let branch_diag = search.into_diagnostics();
            trace!(branch, found = found.is_some(), "parallel branch finished");
            (found, branch_diag)
        })
        .collect();

    let mut winner = None;
    for (found, branch_diag) in results {
        diag.merge(branch_diag);
        if winner.is_none() {
            winner = found;
        }
    }
    (winner, diag)
}

/// Call `f` on every bisimulation extending `pair.seed`, without
/// duplicates, until it breaks. Always sequential.
pub fn for_each_bisimulation<F>(pair: &CrnPair, config: &BisimConfig, mut f: F) -> SearchStats
where
    F: FnMut(&Interpretation) -> ControlFlow<()>,
{
    let mut search = Search::new(pair, config, &mut f);
    let _ = search.run();
    let found = search.found;
    let stats = search.into_diagnostics().stats;
    debug!(found, candidates = stats.candidates, "enumeration finished");
    stats
}

/// Every bisimulation extending `pair.seed`.
pub fn bisimulations(pair: &CrnPair, config: &BisimConfig) -> Vec<Interpretation> {
    let mut out = Vec::new();
    for_each_bisimulation(pair, config, |intr| {
        out.push(intr.clone());
        ControlFlow::Continue(())
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(pair: &CrnPair, intr: &Interpretation, species: &str) -> Vec<String> {
        let id = pair.species.implementation(species).unwrap();
        intr.get(id)
            .unwrap()
            .elements()
            .map(|f| pair.species.formal_name(f).to_string())
            .collect()
    }

    #[test]
    fn test_identical_crns() {
        let pair = CrnPair::builder()
            .formal_reaction(&["A", "B"], &["C"])
            .implementation_reaction(&["a", "b"], &["c"])
            .build()
            .unwrap();
        let outcome = verify(&pair, &BisimConfig::default());
        let intr = outcome.interpretation().unwrap();
        assert_eq!(image(&pair, intr, "c"), vec!["C"]);

        // a and b may swap roles
        let all = bisimulations(&pair, &BisimConfig::default());
        assert_eq!(all.len(), 2);
        let mut images: Vec<_> = all
            .iter()
            .map(|i| (image(&pair, i, "a"), image(&pair, i, "b")))
            .collect();
        images.sort();
        assert_eq!(
            images,
            vec![
                (vec!["A".to_string()], vec!["B".to_string()]),
                (vec!["B".to_string()], vec!["A".to_string()]),
            ]
        );
    }

    #[test]
    fn test_complete_seed_skips_search() {
        let pair = CrnPair::builder()
            .formal_reaction(&["A"], &["B"])
            .implementation_reaction(&["a"], &["b"])
            .assign("a", &["A"])
            .assign("b", &["B"])
            .build()
            .unwrap();
        let outcome = verify(&pair, &BisimConfig::default());
        assert!(outcome.is_bisimilar());
        assert_eq!(outcome.stats().column_nodes, 0);
        assert_eq!(outcome.stats().row_nodes, 0);
        assert_eq!(outcome.stats().candidates, 1);
    }

    #[test]
    fn test_missing_implementation() {
        let pair = CrnPair::builder()
            .formal_reaction(&["A"], &["B"])
            .formal_species("C")
            .implementation_reaction(&["a"], &["b"])
            .build()
            .unwrap();
        let outcome = verify(&pair, &BisimConfig::default());
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::SearchExhausted);
    }

    #[test]
    fn test_extensions_agree_on_shared_species() {
        // x + a -> x + b against A -> B: x must be the same on both sides
        let pair = CrnPair::builder()
            .formal_reaction(&["A"], &["B"])
            .implementation_reaction(&["x", "a"], &["x", "b"])
            .build()
            .unwrap();
        let config = BisimConfig::default();
        let mut ignore = |_: &Interpretation| ControlFlow::Continue(());
        let search = Search::new(&pair, &config, &mut ignore);
        let substituted = search.substitute(&pair.seed);
        let exts = search.extensions(&substituted[0], 0);
        assert!(!exts.is_empty());
        for ext in &exts {
            let x = pair.species.implementation("x").unwrap();
            let images: Vec<_> = ext.iter().filter(|(k, _)| *k == x).collect();
            assert_eq!(images.len(), 1);
        }
    }

    #[test]
    fn test_parallel_agrees_with_sequential() {
        let pair = CrnPair::builder()
            .formal_reaction(&["A"], &["B"])
            .formal_reaction(&["B"], &["A"])
            .implementation_reaction(&["a"], &["b"])
            .implementation_reaction(&["b"], &["a"])
            .build()
            .unwrap();
        let sequential = verify(&pair, &BisimConfig::default());
        let parallel = verify(
            &pair,
            &BisimConfig {
                parallel: true,
                ..BisimConfig::default()
            },
        );
        assert!(sequential.is_bisimilar());
        assert!(parallel.is_bisimilar());
    }
}
