//! Reachability fixed point over the minimal states of one formal reaction.
//!
//! For every point we track whether it is known to enable the formal
//! reaction, which null species it can produce in unbounded amounts by
//! looping back to itself, and which other points it can reach. All three
//! only grow, so the iteration reaches a fixed point.

use super::{covered, Context, Reach};
use crn_ir::{ImplId, Multiset};
use tracing::trace;

struct Point {
    done: bool,
    loopable: Multiset<ImplId>,
    reaches: Vec<bool>,
}

/// `cap` bounds the number of rounds; a fixed point not reached within the
/// cap is reported as [`Reach::Bounded`].
pub fn check(ctx: &Context<'_>, j: usize, states: &[Multiset<ImplId>], cap: Option<usize>) -> Reach {
    let goals = ctx.implementing(j);
    let n = states.len();
    let mut points: Vec<Point> = (0..n)
        .map(|_| Point {
            done: false,
            loopable: Multiset::new(),
            reaches: vec![false; n],
        })
        .collect();

    let mut rounds = 0;
    let mut changed = true;
    while changed {
        if cap.is_some_and(|c| rounds >= c) {
            break;
        }
        changed = false;
        rounds += 1;

        for i in 0..n {
            if points[i].done {
                continue;
            }
            let state = &states[i];
            let enabled = goals.iter().any(|&g| {
                covered(&points[i].loopable, &ctx.implementation[g].reactants.difference(state))
            });
            if enabled {
                points[i].done = true;
                changed = true;
                continue;
            }

            for rxn in ctx.trivial_reactions() {
                if !covered(&points[i].loopable, &rxn.reactants.difference(state)) {
                    continue;
                }
                let after = state.difference(&rxn.reactants).sum(&rxn.products);
                let produced_nulls: Multiset<ImplId> =
                    after.keys().filter(|&k| ctx.is_null(k)).collect();

                for p in 0..n {
                    if !states[p].leq(&after) {
                        continue;
                    }
                    if points[p].done {
                        points[i].done = true;
                        changed = true;
                        break;
                    }
                    if points[p].reaches[i] {
                        // i -> p -> i is a loop producing these nulls
                        let gained = points[p].loopable.sum(&produced_nulls);
                        let merged = union(&points[i].loopable, &gained);
                        if merged != points[i].loopable {
                            points[i].loopable = merged;
                            changed = true;
                        }
                    }
                    if !points[i].reaches[p] {
                        points[i].reaches[p] = true;
                        changed = true;
                    }
                    for q in 0..n {
                        if points[p].reaches[q] && !points[i].reaches[q] {
                            points[i].reaches[q] = true;
                            changed = true;
                        }
                    }
                }
                if points[i].done {
                    break;
                }
            }
        }
    }

    trace!(formal_reaction = j, points = n, rounds, changed, "graph search: fixed point");
    match points.iter().position(|p| !p.done) {
        None => Reach::Enabled { depth: rounds },
        Some(i) if changed => Reach::Bounded(states[i].clone()),
        Some(i) => Reach::Unreachable(states[i].clone()),
    }
}

/// Set union of the keys of two multisets, as a multiset of ones.
fn union(a: &Multiset<ImplId>, b: &Multiset<ImplId>) -> Multiset<ImplId> {
    let mut out: Multiset<ImplId> = a.keys().collect();
    for k in b.keys() {
        if !out.contains(k) {
            out.add(k, 1);
        }
    }
    out
}
