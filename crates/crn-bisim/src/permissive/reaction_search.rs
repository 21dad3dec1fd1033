//! Depth-bounded search over concrete implementation states.

use super::{Context, Reach};
use ahash::AHashMap;
use crn_ir::{ImplId, Multiset};
use tracing::trace;

enum Search {
    Found { depth: usize },
    Exhausted,
    Capped,
}

/// Every point of formal reaction `j` must reach, within `cap` trivial
/// steps, a state enabling one of its implementations.
pub fn check(ctx: &Context<'_>, j: usize, points: &[Multiset<ImplId>], cap: usize) -> Reach {
    let goals = ctx.implementing(j);
    let mut deepest = 0;
    for point in points {
        match search(ctx, &goals, point, cap) {
            Search::Found { depth } => deepest = deepest.max(depth),
            Search::Exhausted => return Reach::Unreachable(point.clone()),
            Search::Capped => return Reach::Bounded(point.clone()),
        }
    }
    Reach::Enabled { depth: deepest }
}

fn search(ctx: &Context<'_>, goals: &[usize], start: &Multiset<ImplId>, cap: usize) -> Search {
    // shallowest depth each state was reached at, scoped to this start state
    let mut visited: AHashMap<Multiset<ImplId>, usize> = AHashMap::new();
    let mut stack = vec![(start.clone(), 0usize)];
    let mut capped = false;

    while let Some((state, depth)) = stack.pop() {
        if depth > cap {
            capped = true;
            continue;
        }
        match visited.get(&state) {
            Some(&seen) if seen <= depth => continue,
            _ => {
                visited.insert(state.clone(), depth);
            }
        }
        if goals
            .iter()
            .any(|&g| ctx.implementation[g].enabled_in(&state))
        {
            trace!(depth, visited = visited.len(), "reaction search: enabled");
            return Search::Found { depth };
        }
        // reversed so the first trivial reaction is explored first
        for &t in ctx.trivial.iter().rev() {
            let rxn = &ctx.implementation[t];
            if rxn.enabled_in(&state) {
                stack.push((rxn.fire(&state), depth + 1));
            }
        }
    }
    trace!(visited = visited.len(), capped, "reaction search: exhausted");
    if capped {
        Search::Capped
    } else {
        Search::Exhausted
    }
}
