use crate::error::{CodecError, Result};
use derive_more::{Deref, From};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::mem;

/// The tag byte that closes a document.
pub const TERMINATOR: u8 = 0x00;

/// The raw tag byte as read off the wire, before it is known to be valid.
#[derive(From, Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct WireTypeInt(u8);
impl From<WireType> for WireTypeInt {
    fn from(wire_type: WireType) -> Self {
        Self(wire_type as u8)
    }
}

/// Discriminants are the on-wire tag values and must never be renumbered.
///
/// `ObjectId` and `Decimal128` are recognised so that their tags are not
/// mistaken for garbage, but no field can encode or decode them and the parser
/// cannot skip them.
#[repr(u8)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum WireType {
    Double = 0x01,
    Str = 0x02,
    Document = 0x03,
    Array = 0x04,
    Binary = 0x05,
    ObjectId = 0x07,
    Bool = 0x08,
    UtcDateTime = 0x09,
    Null = 0x0A,
    Int32 = 0x10,
    Timestamp = 0x11,
    Int64 = 0x12,
    Decimal128 = 0x13,
}
impl TryFrom<WireTypeInt> for WireType {
    type Error = CodecError;
    fn try_from(int: WireTypeInt) -> Result<Self> {
        WireType::from_u8(*int).ok_or(CodecError::UnknownTag(*int))
    }
}

impl WireType {
    /// Payload size for tags whose payload size does not depend on its content.
    pub fn fixed_payload_len(self) -> Option<usize> {
        match self {
            Self::Double | Self::UtcDateTime | Self::Timestamp | Self::Int64 => {
                Some(mem::size_of::<u64>())
            }
            Self::Int32 => Some(mem::size_of::<u32>()),
            Self::Bool => Some(mem::size_of::<u8>()),
            Self::Null => Some(0),
            Self::Str | Self::Document | Self::Array | Self::Binary => None,
            Self::ObjectId | Self::Decimal128 => None,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, Self::ObjectId | Self::Decimal128)
    }

    /// Tags whose payload is a nested document.
    pub fn is_document(self) -> bool {
        matches!(self, Self::Document | Self::Array)
    }
}
