//! Error types for the codec.

use crate::wire::WireType;
use thiserror::Error;

pub type Result<T, E = CodecError> = std::result::Result<T, E>;

/// Every failure aborts the current encode or decode call.
///
/// There are no numeric codes on the wire; these are local signals only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// A read of `need` bytes at `at` would cross `limit`.
    #[error("truncated input: {need} bytes needed at offset {at}, limit is {limit}")]
    Truncated { at: usize, need: usize, limit: usize },

    /// A NUL-terminated name ran into the document end.
    #[error("unterminated element name starting at offset {at}")]
    Unterminated { at: usize },

    #[error("invalid document length {len} at offset {at}")]
    InvalidDocumentLength { at: usize, len: u32 },

    /// The element loop finished somewhere other than the declared end.
    #[error("document length mismatch: expected end {expected}, cursor at {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unknown wire tag 0x{0:02x}")]
    UnknownTag(u8),

    #[error("unsupported wire tag {0:?}")]
    UnsupportedTag(WireType),

    #[error("cannot decode {target} from wire tag {tag:?}")]
    TagMismatch { target: &'static str, tag: WireType },

    #[error("invalid UTF-8 at offset {at}")]
    InvalidUtf8 { at: usize },

    #[error("object document is missing the reserved key {0:?}")]
    MissingMetadata(&'static str),

    #[error("documents nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("unknown property {0:?}")]
    UnknownProperty(String),

    #[error("no instance available for nested object {name:?} version {version:?}")]
    NoInstance {
        name: Option<String>,
        version: Option<i64>,
    },

    #[error("invalid base64 payload: {0}")]
    Base64(String),

    /// Reserved: a field type without a wire mapping.
    #[error("type {0} has no wire mapping")]
    TypeUnavailable(&'static str),

    #[error("{what} of {len} bytes does not fit a u32 length prefix")]
    TooLarge { what: &'static str, len: usize },

    #[error("identity mismatch: {expected_name}@{expected_version} vs {actual_name}@{actual_version}")]
    IdentityMismatch {
        expected_name: String,
        expected_version: i64,
        actual_name: String,
        actual_version: i64,
    },

    /// Element names are NUL-terminated on the wire.
    #[error("element name {0:?} contains a NUL byte")]
    InvalidKey(String),

    #[error("all 32 deserialization option bits are taken; cannot declare {0:?}")]
    OptionsExhausted(String),
}

impl CodecError {
    /// Whether this error came from structurally invalid or unacceptable input.
    pub fn is_parse_failure(&self) -> bool {
        !matches!(
            self,
            Self::TypeUnavailable(_)
                | Self::TooLarge { .. }
                | Self::IdentityMismatch { .. }
                | Self::InvalidKey(_)
                | Self::OptionsExhausted(_)
        )
    }

    pub(crate) fn tag_mismatch<T>(tag: WireType) -> Self {
        Self::TagMismatch {
            target: std::any::type_name::<T>(),
            tag,
        }
    }
}
