//!
//! IPP error
//!
use crate::parser::IppParseError;

/// Errors surfaced by the encoder and the value constructors
#[derive(Debug, thiserror::Error)]
pub enum IppError {
    #[error(transparent)]
    /// Parsing error
    ParseError(#[from] IppParseError),

    #[error("Value out of range: {0}")]
    /// Numeric input does not fit the wire representation
    ValueOutOfRange(i64),

    #[error("Invalid enum value: {0}")]
    /// Enum label not present in the given domain
    InvalidEnumValue(String),

    #[error("Non-ASCII octet in {0} value")]
    /// ASCII-only value kind received an octet above 0x7f
    NonAsciiValue(&'static str),

    #[error("Empty language")]
    /// Language part of a with-language value is empty
    EmptyLanguage,

    #[error("Invalid date-time field: {0}")]
    /// Date-time field outside its RFC 2579 range
    InvalidDateTime(&'static str),

    #[error("Negative resolution")]
    /// Resolution with a negative cross-feed or feed component
    NegativeResolution,

    #[error("Invalid IPP version: {0}")]
    /// Version with a zero major number
    InvalidVersion(u16),

    #[error("Request id must be non-zero")]
    /// Zero request id on encode
    InvalidRequestId,

    #[error("Attribute name too long: {0} octets")]
    /// Attribute name does not fit a 16-bit signed length
    NameTooLong(usize),
}
