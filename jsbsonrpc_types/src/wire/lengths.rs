use crate::error::{CodecError, Result};
use derive_more::Deref;
use std::mem;

/// Total length of a document, counting its own prefix and the terminator.
#[derive(Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct DocLen(u32);
impl DocLen {
    /// The smallest document: a length prefix and a terminator.
    pub const MIN: u32 = (mem::size_of::<u32>() + 1) as u32;

    pub fn new_manual(len: u32) -> Self {
        Self(len)
    }
    pub fn from_written(len: usize) -> Result<Self> {
        let int = u32::try_from(len).map_err(|_| CodecError::TooLarge {
            what: "document",
            len,
        })?;
        Ok(Self(int))
    }
}

/// The length prefix of a string or binary payload.
#[derive(Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct PayloadLen(u32);
impl PayloadLen {
    pub fn new_manual(len: u32) -> Self {
        Self(len)
    }
    pub fn from_body(what: &'static str, body_len: usize) -> Result<Self> {
        let int = u32::try_from(body_len).map_err(|_| CodecError::TooLarge {
            what,
            len: body_len,
        })?;
        Ok(Self(int))
    }
}
