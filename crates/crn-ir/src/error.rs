use thiserror::Error;

/// Errors raised while assembling a [`CrnPair`](crate::CrnPair).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IrError {
    #[error("implementation reaction {index} has identical reactants and products")]
    IdentityReaction { index: usize },

    #[error("interpretation of '{species}' mentions unknown formal species '{formal}'")]
    UnknownFormalSpecies { species: String, formal: String },

    #[error("interpretation given for '{species}', which is not an implementation species")]
    UnknownImplementationSpecies { species: String },

    #[error("conflicting interpretations given for '{species}'")]
    ConflictingAssignment { species: String },
}

pub type IrResult<T> = Result<T, IrError>;
