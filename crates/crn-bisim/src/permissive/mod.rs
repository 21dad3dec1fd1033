//! The permissive condition: from every minimal implementation state of a
//! formal reaction's reactants, trivial reactions can always lead to a state
//! where an implementation of that formal reaction is enabled.
//!
//! Three interchangeable strategies share one [`Context`]: a bounded
//! reaction-step search, a loop search over null-species pickups, and a
//! graph reachability fixed point. [`PermissiveStrategy::Smart`] cascades
//! from the first to the last.

pub mod graph_search;
pub mod loop_search;
pub mod reaction_search;
pub mod smart;

use crate::error::BisimError;
use crate::table::DelimitingTable;
use crn_ir::{FormalId, ImplId, ImplReaction, Interpretation, Multiset};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Depth cap of the reaction-step search when none is configured.
pub const DEFAULT_REACTION_SEARCH_DEPTH: usize = 1000;

/// Which permissive checker to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PermissiveStrategy {
    /// Reachability fixed point over minimal states.
    #[default]
    GraphSearch,
    /// Midpoint search with null-species pickups.
    LoopSearch,
    /// Depth-bounded search over concrete states.
    ReactionSearch,
    /// Reaction search, falling back to graph search when it hits its bound.
    Smart,
}

impl FromStr for PermissiveStrategy {
    type Err = BisimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "graphsearch" | "default" => Ok(PermissiveStrategy::GraphSearch),
            "loopsearch" => Ok(PermissiveStrategy::LoopSearch),
            "reactionsearch" | "bruteforce" => Ok(PermissiveStrategy::ReactionSearch),
            "smart" => Ok(PermissiveStrategy::Smart),
            other => Err(BisimError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for PermissiveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermissiveStrategy::GraphSearch => "graphsearch",
            PermissiveStrategy::LoopSearch => "loopsearch",
            PermissiveStrategy::ReactionSearch => "reactionsearch",
            PermissiveStrategy::Smart => "smart",
        };
        f.write_str(name)
    }
}

/// Result of checking a complete interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissiveVerdict {
    /// Every formal reaction is always eventually enabled. `depth` is the
    /// deepest search (steps or rounds) any formal reaction needed.
    Satisfied { depth: usize },
    /// Formal reaction `formal_reaction` can never be enabled from `witness`.
    Refuted {
        formal_reaction: usize,
        witness: Multiset<ImplId>,
    },
    /// The search bound was reached before deciding `formal_reaction`.
    Indeterminate {
        formal_reaction: usize,
        witness: Multiset<ImplId>,
    },
}

impl PermissiveVerdict {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, PermissiveVerdict::Satisfied { .. })
    }
}

/// Per-formal-reaction result of one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reach {
    Enabled { depth: usize },
    Unreachable(Multiset<ImplId>),
    Bounded(Multiset<ImplId>),
}

/// Everything a strategy needs about one complete interpretation.
pub struct Context<'a> {
    pub implementation: &'a [ImplReaction],
    pub interpretation: &'a Interpretation,
    /// Implementation reactions that interpret as trivial, in exploration order.
    pub trivial: Vec<usize>,
    /// Implementation species interpreted as the empty multiset.
    pub nulls: Vec<ImplId>,
    table: &'a DelimitingTable,
}

impl<'a> Context<'a> {
    pub fn new(
        implementation: &'a [ImplReaction],
        interpretation: &'a Interpretation,
        table: &'a DelimitingTable,
    ) -> Self {
        Context {
            implementation,
            interpretation,
            trivial: table.trivial_rows().collect(),
            nulls: interpretation.null_species().collect(),
            table,
        }
    }

    /// Reorder trivial reactions with a seeded shuffle.
    pub fn shuffle_trivial(&mut self, seed: u64) {
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;
        let mut rng = StdRng::seed_from_u64(seed);
        self.trivial.shuffle(&mut rng);
        debug!(seed, order = ?self.trivial, "permissive: shuffled trivial reactions");
    }

    /// Implementation reactions that interpret as formal reaction `j`.
    pub fn implementing(&self, j: usize) -> Vec<usize> {
        self.table.compatible_rows(j).collect()
    }

    pub fn trivial_reactions(&self) -> impl Iterator<Item = &ImplReaction> + '_ {
        self.trivial.iter().map(move |&i| &self.implementation[i])
    }

    pub fn is_null(&self, species: ImplId) -> bool {
        self.nulls.binary_search(&species).is_ok()
    }

    /// Minimal implementation states interpreting to at least `formal`.
    pub fn minimal_states(&self, formal: &Multiset<FormalId>) -> Vec<Multiset<ImplId>> {
        let mut raw = Vec::new();
        self.supersets(formal, Multiset::new(), &mut raw);

        let mut out: Vec<Multiset<ImplId>> = Vec::new();
        for state in raw {
            if out.contains(&state) {
                continue;
            }
            let reducible = state.keys().any(|k| {
                let mut smaller = state.clone();
                smaller.remove(k, 1);
                formal.leq(&self.interpretation.interpret_formal(&smaller))
            });
            if !reducible {
                out.push(state);
            }
        }
        out
    }

    /// Cover the first formal species still needed by any implementation
    /// species whose image contains it, then recurse on the remainder.
    fn supersets(
        &self,
        needed: &Multiset<FormalId>,
        chosen: Multiset<ImplId>,
        out: &mut Vec<Multiset<ImplId>>,
    ) {
        let Some(first) = needed.keys().next() else {
            out.push(chosen);
            return;
        };
        for (k, image) in self.interpretation.assigned() {
            if image.contains(first) {
                let mut next = chosen.clone();
                next.add(k, 1);
                self.supersets(&needed.difference(image), next, out);
            }
        }
    }
}

/// `need` minus what is available in unbounded supply is empty.
pub(crate) fn covered(unbounded: &Multiset<ImplId>, need: &Multiset<ImplId>) -> bool {
    need.all_keys(|k| unbounded.contains(k))
}

/// Check every formal reaction of `formal_reactants` with `strategy`.
///
/// `depth` caps the search (steps for reaction search, rounds for loop and
/// graph search). The reaction search defaults to
/// [`DEFAULT_REACTION_SEARCH_DEPTH`].
pub fn check_permissive(
    ctx: &Context<'_>,
    formal_reactants: &[Multiset<FormalId>],
    strategy: PermissiveStrategy,
    depth: Option<usize>,
) -> PermissiveVerdict {
    let mut deepest = 0;
    for (j, reactants) in formal_reactants.iter().enumerate() {
        let points = ctx.minimal_states(reactants);
        let reach = match strategy {
            PermissiveStrategy::GraphSearch => graph_search::check(ctx, j, &points, depth),
            PermissiveStrategy::LoopSearch => loop_search::check(ctx, j, &points, depth),
            PermissiveStrategy::ReactionSearch => reaction_search::check(
                ctx,
                j,
                &points,
                depth.unwrap_or(DEFAULT_REACTION_SEARCH_DEPTH),
            ),
            PermissiveStrategy::Smart => smart::check(ctx, j, &points, depth),
        };
        match reach {
            Reach::Enabled { depth } => deepest = deepest.max(depth),
            Reach::Unreachable(witness) => {
                debug!(formal_reaction = j, %strategy, "permissive: refuted");
                return PermissiveVerdict::Refuted {
                    formal_reaction: j,
                    witness,
                };
            }
            Reach::Bounded(witness) => {
                info!(formal_reaction = j, %strategy, ?depth, "permissive: search bound reached");
                return PermissiveVerdict::Indeterminate {
                    formal_reaction: j,
                    witness,
                };
            }
        }
    }
    PermissiveVerdict::Satisfied { depth: deepest }
}
