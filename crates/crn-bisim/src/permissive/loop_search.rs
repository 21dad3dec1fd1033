//! Loop search: paths between minimal states, split at minimal-state
//! midpoints, with null species that a point can produce by looping back
//! to itself treated as available in unbounded supply.

use super::{covered, Context, Reach};
use crate::enumerate::subsets;
use crn_ir::{ImplId, Multiset};
use tracing::{trace, warn};

struct LoopSearch<'c, 'a> {
    ctx: &'c Context<'a>,
    goals: Vec<usize>,
    points: &'c [Multiset<ImplId>],
}

/// Smallest `k` with `2^k >= n`.
fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// With a cap, paths of up to `cap` steps are considered and failure is
/// [`Reach::Bounded`]. Without one, path length is bounded by the number of
/// points and failure is [`Reach::Unreachable`].
pub fn check(ctx: &Context<'_>, j: usize, points: &[Multiset<ImplId>], cap: Option<usize>) -> Reach {
    let rounds = ceil_log2(cap.unwrap_or(points.len()));
    let search = LoopSearch {
        ctx,
        goals: ctx.implementing(j),
        points,
    };
    trace!(formal_reaction = j, points = points.len(), rounds, "loop search");

    for start in points {
        if !search.exits(start, rounds) {
            if cap.is_some() {
                warn!(formal_reaction = j, rounds, "loop search: round bound reached without an exit");
                return Reach::Bounded(start.clone());
            }
            return Reach::Unreachable(start.clone());
        }
    }
    Reach::Enabled {
        depth: rounds as usize,
    }
}

impl LoopSearch<'_, '_> {
    /// Can `start` reach an enabling state, possibly after pumping nulls?
    fn exits(&self, start: &Multiset<ImplId>, rounds: u32) -> bool {
        let none = Multiset::new();
        if self.reach(start, None, &none, &none, rounds) {
            return true;
        }

        let mut unbounded = Multiset::new();
        loop {
            let mut grew = false;
            for &null in &self.ctx.nulls {
                if unbounded.contains(null) {
                    continue;
                }
                if self.reach(start, Some(start), &Multiset::singleton(null), &unbounded, rounds) {
                    unbounded.add(null, 1);
                    grew = true;
                }
            }
            if grew && self.reach(start, None, &none, &unbounded, rounds) {
                return true;
            }
            let via_other = self.points.iter().any(|mid| {
                mid != start
                    && self.reach(start, Some(mid), &none, &unbounded, rounds)
                    && self.reach(mid, None, &none, &unbounded, rounds)
            });
            if via_other {
                return true;
            }
            if !grew {
                return false;
            }
        }
    }

    /// Is there a path of at most `2^k` trivial steps from `start` to a state
    /// containing `goal + pickup` (or, with no goal, enabling the formal
    /// reaction), given unbounded copies of `unbounded`?
    fn reach(
        &self,
        start: &Multiset<ImplId>,
        goal: Option<&Multiset<ImplId>>,
        pickup: &Multiset<ImplId>,
        unbounded: &Multiset<ImplId>,
        k: u32,
    ) -> bool {
        if self.arrived(start, goal, pickup, unbounded) {
            return true;
        }
        if k == 0 {
            return self.ctx.trivial_reactions().any(|rxn| {
                covered(unbounded, &rxn.reactants.difference(start)) && {
                    let after = start.difference(&rxn.reactants).sum(&rxn.products);
                    self.arrived(&after, goal, pickup, unbounded)
                }
            });
        }
        if self.reach(start, goal, pickup, unbounded, k - 1) {
            return true;
        }
        for part in subsets(pickup) {
            let rest = pickup.difference(&part);
            for mid in self.points {
                if mid == start || goal == Some(mid) {
                    continue;
                }
                if self.reach(start, Some(mid), &part, unbounded, k - 1)
                    && self.reach(mid, goal, &rest, unbounded, k - 1)
                {
                    return true;
                }
            }
        }
        false
    }

    fn arrived(
        &self,
        state: &Multiset<ImplId>,
        goal: Option<&Multiset<ImplId>>,
        pickup: &Multiset<ImplId>,
        unbounded: &Multiset<ImplId>,
    ) -> bool {
        match goal {
            Some(goal) => covered(unbounded, &goal.sum(pickup).difference(state)),
            None => self.goals.iter().any(|&g| {
                covered(
                    unbounded,
                    &self.ctx.implementation[g].reactants.difference(state),
                )
            }),
        }
    }
}
