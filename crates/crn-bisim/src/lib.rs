//! CRN bisimulation checker.
//!
//! Searches for an interpretation of implementation species as multisets of
//! formal species under which the implementation CRN is a bisimulation of
//! the formal CRN: every implementation reaction is formal or trivial,
//! every formal reaction is implemented, every formal species has an atom,
//! and every formal reaction remains eventually enabled (the permissive
//! condition).

pub mod conditions;
pub mod enumerate;
pub mod error;
pub mod modular;
pub mod outcome;
pub mod permissive;
pub mod report;
pub mod search;
pub mod solver;
pub mod table;

pub use conditions::{is_atomic, passes_modularity};
pub use error::{BisimError, BisimResult};
pub use modular::{verify_modular, ModularOutcome, ModularProblem};
pub use outcome::{BisimOutcome, Blocker, Failure, FailureKind, PermissiveWitness, SearchStats};
pub use permissive::{PermissiveStrategy, PermissiveVerdict};
pub use report::VerificationReport;
pub use search::{bisimulations, for_each_bisimulation, verify, BisimConfig};
