//! Error types for query conversion.

use crate::parser::ParseError;

/// Errors that abort a conversion. No partial statement is ever returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// A hierarchize mode other than PRE or POST.
    #[error("Unsupported hierarchize mode: '{0}' (expected PRE or POST)")]
    UnsupportedHierarchizeMode(String),

    #[error("Unsupported sort order: '{0}' (expected ASC, DESC, BASC or BDESC)")]
    UnsupportedSortOrder(String),

    /// A raw expression or filter condition failed to parse.
    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("Union requires at least two selections, got {0}")]
    UnionArity(usize),
}

pub type ConvertResult<T> = Result<T, ConvertError>;
