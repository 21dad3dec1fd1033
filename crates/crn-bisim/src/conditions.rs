//! Atomic and modularity conditions on complete interpretations.

use ahash::AHashSet;
use crn_ir::{FormalId, ImplId, ImplReaction, Interpretation};
use tracing::trace;

/// Formal species no implementation species interprets to exactly.
pub fn missing_atoms(intr: &Interpretation, num_formal: usize) -> impl Iterator<Item = FormalId> + '_ {
    (0..num_formal)
        .map(FormalId::new)
        .filter(move |&f| !intr.assigned().any(|(i, _)| intr.is_atom_of(i, f)))
}

pub fn missing_atom(intr: &Interpretation, num_formal: usize) -> Option<FormalId> {
    missing_atoms(intr, num_formal).next()
}

/// Every formal species has an implementation species interpreting to it alone.
pub fn is_atomic(intr: &Interpretation, num_formal: usize) -> bool {
    missing_atom(intr, num_formal).is_none()
}

/// Whether a species can decompose, through trivial reactions, into common
/// species or species whose image avoids the common formal species.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BreakStatus {
    Proven,
    /// `reach`: species with an image containing ours reachable from this
    /// one. `produce`: null species producible in a loop back to it.
    Pending {
        reach: AHashSet<ImplId>,
        produce: AHashSet<ImplId>,
    },
}

/// The modularity condition for one module under a complete interpretation.
///
/// `common_impl` are implementation species shared with other modules and
/// `common_formal` the formal species shared with other modules. Every
/// common implementation species must interpret into common formal species,
/// and every other species must be able to break down into common species
/// or species whose image avoids the common formal species.
pub fn passes_modularity(
    implementation: &[ImplReaction],
    intr: &Interpretation,
    common_impl: &AHashSet<ImplId>,
    common_formal: &AHashSet<FormalId>,
) -> bool {
    let image = |k: ImplId| intr.get(k).cloned().unwrap_or_default();

    let leaks = common_impl
        .iter()
        .any(|&c| image(c).keys().any(|f| !common_formal.contains(&f)));
    if leaks {
        trace!("modularity: common species interprets outside common formal species");
        return false;
    }

    let mut status: Vec<BreakStatus> = (0..intr.num_species())
        .map(ImplId::new)
        .map(|k| {
            if common_impl.contains(&k) || image(k).all_keys(|f| !common_formal.contains(&f)) {
                BreakStatus::Proven
            } else {
                BreakStatus::Pending {
                    reach: AHashSet::new(),
                    produce: AHashSet::new(),
                }
            }
        })
        .collect();

    let trivial: Vec<&ImplReaction> = implementation
        .iter()
        .filter(|rxn| intr.is_trivial(rxn))
        .collect();

    let mut changed = true;
    let mut rounds = 0;
    while changed {
        changed = false;
        rounds += 1;
        for k in (0..status.len()).map(ImplId::new) {
            for rxn in &trivial {
                let BreakStatus::Pending { produce, .. } = &status[k.index()] else {
                    break;
                };
                if !rxn.reactants.contains(k) {
                    continue;
                }
                let mut others = rxn.reactants.clone();
                others.remove(k, 1);
                if !others.all_keys(|o| produce.contains(&o)) {
                    continue;
                }

                let own = image(k);
                let mut nulls = AHashSet::new();
                let mut successors = Vec::new();
                let mut proven = false;
                for p in rxn.products.keys() {
                    let img = image(p);
                    if img.is_empty() {
                        nulls.insert(p);
                    } else if !own.leq(&img) || status[p.index()] == BreakStatus::Proven {
                        proven = true;
                        break;
                    } else {
                        successors.push(p);
                    }
                }
                if proven {
                    status[k.index()] = BreakStatus::Proven;
                    changed = true;
                    break;
                }

                for p in successors {
                    let (p_reach, p_produce) = match &status[p.index()] {
                        BreakStatus::Pending { reach, produce } => (reach.clone(), produce.clone()),
                        BreakStatus::Proven => continue,
                    };
                    let BreakStatus::Pending { reach, produce } = &mut status[k.index()] else {
                        break;
                    };
                    if reach.insert(p) {
                        changed = true;
                    }
                    if !p_reach.iter().all(|x| reach.contains(x)) {
                        reach.extend(p_reach.iter().copied());
                        changed = true;
                    }
                    if p_reach.contains(&k) {
                        let loopable: AHashSet<ImplId> = nulls.iter().chain(p_produce.iter()).copied().collect();
                        if !loopable.iter().all(|x| produce.contains(x)) {
                            produce.extend(loopable);
                            changed = true;
                        }
                    }
                }
            }
        }
    }

    let pending = status
        .iter()
        .filter(|s| **s != BreakStatus::Proven)
        .count();
    trace!(rounds, pending, "modularity: fixed point");
    pending == 0
}
