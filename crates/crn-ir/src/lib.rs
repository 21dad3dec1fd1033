//! Core data model for CRN bisimulation: interned species, multisets,
//! reactions, partial interpretations and the verification problem.

pub mod error;
pub mod interpretation;
pub mod multiset;
pub mod problem;
pub mod reaction;
pub mod species;

pub use error::{IrError, IrResult};
pub use interpretation::{Interpretation, NamedInterpretation};
pub use multiset::{leq, scale, Multiset};
pub use problem::{format_state, CrnPair, CrnPairBuilder, ReactionSpec};
pub use reaction::{FormalReaction, ImplReaction, MixedReaction, Reaction};
pub use species::{FormalId, ImplId, Species, SpeciesTable};
