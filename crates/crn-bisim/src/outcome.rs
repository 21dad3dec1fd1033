//! Search results and diagnostics.

use crn_ir::{ImplId, Interpretation, Multiset};
use serde::Serialize;
use std::fmt;

/// Counters accumulated over one verification run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub column_nodes: usize,
    pub row_nodes: usize,
    pub equation_attempts: usize,
    pub candidates: usize,
    pub duplicates: usize,
    pub delimiting_rejections: usize,
    pub atomic_rejections: usize,
    pub permissive_refutations: usize,
    pub permissive_indeterminate: usize,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.column_nodes += other.column_nodes;
        self.row_nodes += other.row_nodes;
        self.equation_attempts += other.equation_attempts;
        self.candidates += other.candidates;
        self.duplicates += other.duplicates;
        self.delimiting_rejections += other.delimiting_rejections;
        self.atomic_rejections += other.atomic_rejections;
        self.permissive_refutations += other.permissive_refutations;
        self.permissive_indeterminate += other.permissive_indeterminate;
    }
}

/// Why a candidate interpretation was dropped during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Some implementation reaction is neither formal nor trivial, or some
    /// formal reaction has no implementation left.
    Delimiting,
    /// Some formal species has no implementation species mapping to exactly it.
    Atomic,
}

/// The reaction that made the deepest failing branch fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Blocker {
    ImplementationReaction(usize),
    FormalReaction(usize),
}

/// An implementation state from which formal reaction `formal_reaction`
/// could not be shown to become enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissiveWitness {
    pub formal_reaction: usize,
    pub state: Multiset<ImplId>,
    pub interpretation: Interpretation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FailureKind {
    /// No interpretation satisfies the delimiting and atomic conditions.
    SearchExhausted,
    /// Every candidate failed the permissive condition, at least one provably.
    PermissiveRefuted,
    /// Some candidate hit the permissive search bound; a larger bound may succeed.
    Indeterminate,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::SearchExhausted => write!(f, "search exhausted"),
            FailureKind::PermissiveRefuted => write!(f, "permissive condition refuted"),
            FailureKind::Indeterminate => write!(f, "permissive check indeterminate"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub kind: FailureKind,
    /// Deepest partial interpretation reached, for debugging.
    pub best_partial: Interpretation,
    pub reached_depth: usize,
    pub blocker: Option<Blocker>,
    pub witness: Option<PermissiveWitness>,
    pub stats: SearchStats,
}

#[derive(Debug, Clone)]
pub enum BisimOutcome {
    Bisimilar {
        interpretation: Interpretation,
        stats: SearchStats,
    },
    NotBisimilar(Failure),
}

impl BisimOutcome {
    pub fn is_bisimilar(&self) -> bool {
        matches!(self, BisimOutcome::Bisimilar { .. })
    }

    pub fn interpretation(&self) -> Option<&Interpretation> {
        match self {
            BisimOutcome::Bisimilar { interpretation, .. } => Some(interpretation),
            BisimOutcome::NotBisimilar(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            BisimOutcome::Bisimilar { .. } => None,
            BisimOutcome::NotBisimilar(failure) => Some(failure),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            BisimOutcome::Bisimilar { stats, .. } => stats,
            BisimOutcome::NotBisimilar(failure) => &failure.stats,
        }
    }
}

