//! Name-based, serializable view of a [`BisimOutcome`].

use crate::outcome::{BisimOutcome, Blocker, FailureKind, SearchStats};
use crate::search::BisimConfig;
use crn_ir::{CrnPair, NamedInterpretation};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub bisimilar: bool,
    pub strategy: String,
    pub interpretation: Option<NamedInterpretation>,
    pub failure: Option<FailureReport>,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub kind: FailureKind,
    pub reason: String,
    pub reached_depth: usize,
    pub best_partial: NamedInterpretation,
    pub blocker: Option<Blocker>,
    /// The blocking reaction, formatted.
    pub blocking_reaction: Option<String>,
    pub witness: Option<WitnessReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WitnessReport {
    pub formal_reaction: String,
    pub state: String,
    pub interpretation: NamedInterpretation,
}

impl VerificationReport {
    pub fn new(pair: &CrnPair, config: &BisimConfig, outcome: &BisimOutcome) -> Self {
        let failure = outcome.failure().map(|failure| FailureReport {
            kind: failure.kind,
            reason: failure.kind.to_string(),
            reached_depth: failure.reached_depth,
            best_partial: failure.best_partial.to_named(&pair.species),
            blocker: failure.blocker,
            blocking_reaction: failure.blocker.map(|b| match b {
                Blocker::ImplementationReaction(i) => pair.format_impl_reaction(i),
                Blocker::FormalReaction(j) => pair.format_formal_reaction(j),
            }),
            witness: failure.witness.as_ref().map(|w| WitnessReport {
                formal_reaction: pair.format_formal_reaction(w.formal_reaction),
                state: pair.format_impl_state(&w.state),
                interpretation: w.interpretation.to_named(&pair.species),
            }),
        });
        VerificationReport {
            bisimilar: outcome.is_bisimilar(),
            strategy: config.permissive.to_string(),
            interpretation: outcome.interpretation().map(|i| i.to_named(&pair.species)),
            failure,
            stats: outcome.stats().clone(),
        }
    }
}
