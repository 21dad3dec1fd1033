//! Smart mode: the reaction-step search is usually fastest; when it hits
//! its depth bound, fall back to the graph search, which always reaches a
//! fixed point.

use super::{graph_search, reaction_search, Context, Reach, DEFAULT_REACTION_SEARCH_DEPTH};
use crn_ir::{ImplId, Multiset};
use tracing::info;

pub fn check(ctx: &Context<'_>, j: usize, points: &[Multiset<ImplId>], depth: Option<usize>) -> Reach {
    let cap = depth.unwrap_or(DEFAULT_REACTION_SEARCH_DEPTH);
    match reaction_search::check(ctx, j, points, cap) {
        Reach::Bounded(_) => {
            info!(formal_reaction = j, cap, "smart: reaction search bounded, trying graph search");
            graph_search::check(ctx, j, points, None)
        }
        decided => decided,
    }
}
