//! Per-type wire rules for field values.
//!
//! | Rust type | Encoded as | Decodes from |
//! |---|---|---|
//! | `i8` `u8` `i16` `u16` `i32` `u32` | Int32 | Int32 Int64 Bool Double UtcDateTime Timestamp |
//! | `i64` `u64` | Int64 | same |
//! | `f32` `f64` | Double | same |
//! | `bool` | Bool | Bool Int32 Int64 |
//! | `String` | Str | Str |
//! | `Vec<T>` | Array | Array |
//! | `BTreeMap<String, T>` | Document | Document |
//! | [`Blob<T>`] | Binary | Binary, or Str holding Base64 (`legacy-base64` feature) |
//!
//! Numeric decodes are plain `as` casts: integers wrap, floats saturate.
//! No range checks are made.

mod blob;
mod collections;
mod primitive;


pub use blob::*;

use crate::error::Result;
use crate::wire::{DocWriter, WireReader, WireType, WriteLen};

/// How a field's payload relates to the document structure.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum FieldKind {
    /// A scalar, string or blob.
    Primitive,
    /// A list or map, encoded as a nested array or document.
    Collection,
    /// An owned object of a fixed type, encoded as its own document.
    NestedObject,
    /// An object whose concrete type is chosen from the wire metadata.
    DynamicNestedObject,
}

/// A value that can be written as one element and read back from one payload.
pub trait WireValue: Default {
    const KIND: FieldKind;

    /// Writes tag, `key` and payload.
    fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen>;

    /// Reads one payload of `tag`, whose header the parser already consumed.
    ///
    /// Must advance `r` by exactly the payload size, or fail.
    /// Returns the number of bytes consumed.
    fn decode_payload(&mut self, tag: WireType, r: &mut WireReader<'_>, end: usize)
        -> Result<usize>;

    /// Resets to the type's zero or empty value.
    fn clear(&mut self) {
        *self = Self::default();
    }
}
