use crn_ir::IrError;
use thiserror::Error;

/// Errors in the verification input. Search outcomes, including failure to
/// find a bisimulation, are values of [`BisimOutcome`](crate::BisimOutcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BisimError {
    #[error(transparent)]
    Ir(#[from] IrError),

    #[error("unknown permissive strategy '{0}' (expected graphsearch, loopsearch, reactionsearch or smart)")]
    UnknownStrategy(String),

    #[error("implementation species '{species}' is shared between modules but has no seeded interpretation")]
    UnseededSharedSpecies { species: String },

    #[error("{formal} formal modules given for {implementation} implementation modules")]
    ModuleCountMismatch { formal: usize, implementation: usize },
}

pub type BisimResult<T> = Result<T, BisimError>;
