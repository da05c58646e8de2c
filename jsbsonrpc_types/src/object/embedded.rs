use crate::codec::{FieldKind, WireValue};
use crate::error::{CodecError, Result};
use crate::object::{Reflect, Serializable};
use crate::wire::{DocWriter, WireReader, WireType, WriteLen};
use derive_more::{Deref, DerefMut, From};

/// An owned nested object of a fixed type, written as a Document element.
#[derive(From, Deref, DerefMut, Default)]
pub struct Embedded<O>(pub O);

impl<O: Reflect + Default> WireValue for Embedded<O> {
    const KIND: FieldKind = FieldKind::NestedObject;

    fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        w.element(WireType::Document, key, |w| {
            self.0.encode_document(w)?;
            Ok(())
        })
    }

    fn decode_payload(&mut self, tag: WireType, r: &mut WireReader<'_>, end: usize) -> Result<usize> {
        if tag != WireType::Document {
            return Err(CodecError::tag_mismatch::<Self>(tag));
        }
        self.0.decode_document(r, end)
    }

    /// The nested object is cleared field by field, not replaced.
    fn clear(&mut self) {
        self.0.clear_all();
    }
}
