use thiserror::Error;

/// Structural malformation found while reading the token stream.
///
/// Every variant carries the index of the offending token (or the token count
/// when the input ended early). A parse that fails with any of these yields
/// no partial graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("node '{handle}' opened at token {opened_at} is never closed (input ends at token {end})")]
    UnclosedScope { handle: String, opened_at: usize, end: usize },

    #[error("unbalanced ')' at token {index}: no open node to close")]
    UnexpectedClose { index: usize },

    /// Only with `Options::reject_stray_tokens`.
    #[error("stray token '{token}' at {index} outside any node")]
    StrayToken { index: usize, token: String },

    #[error("truncated definition of node '{handle}' at token {index}: expected separator and non-empty concept")]
    TruncatedNode { index: usize, handle: String },

    /// The input ended after a relation label, or (with
    /// `Options::reject_stray_tokens`) another relation followed it.
    #[error("relation at token {index} has no value")]
    MissingValue { index: usize },

    #[error("expected '/' at token {index}, found '{found}'")]
    MissingSeparator { index: usize, found: String },

    #[error("token '{token}' at {index} cannot carry a closing ')'")]
    ClosedStructuralToken { index: usize, token: String },

    #[error("nesting deeper than {limit} at token {index}")]
    TooDeep { index: usize, limit: usize },
}

impl ParseError {
    /// Token index the diagnostic points at.
    pub fn index(&self) -> usize {
        match self {
            ParseError::UnclosedScope { end, .. } => *end,
            ParseError::UnexpectedClose { index }
            | ParseError::StrayToken { index, .. }
            | ParseError::TruncatedNode { index, .. }
            | ParseError::MissingValue { index }
            | ParseError::MissingSeparator { index, .. }
            | ParseError::ClosedStructuralToken { index, .. }
            | ParseError::TooDeep { index, .. } => *index,
        }
    }
}
