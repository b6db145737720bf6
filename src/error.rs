//! Fatal error taxonomy (spec.md §7). Per-file classification failures are
//! *not* represented here — those are "do no harm" fallbacks tracked by
//! `FormatContext::error_count` (spec.md §6.2, §7), never a `Result::Err`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("option `{option}` conflicts with `{other}`: {reason}")]
    OptionConflict {
        option: &'static str,
        other: &'static str,
        reason: String,
    },

    #[error("input contains an embedded NUL byte at offset {offset}")]
    EncodingCorruption { offset: usize },

    #[error("unmatched delimiter `{text}` ({kind:?}) at line {line}, column {column}")]
    UnmatchedDelimiter {
        kind: crate::token::TokenKind,
        text: String,
        line: u32,
        column: u32,
    },

    #[error("malformed options document: {0}")]
    OptionsParse(#[from] serde_json::Error),
}

pub type FormatResult<T> = Result<T, FormatError>;
