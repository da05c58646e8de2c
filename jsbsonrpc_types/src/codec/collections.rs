use crate::codec::{FieldKind, WireValue};
use crate::error::{CodecError, Result};
use crate::wire::{Consumed, DocWriter, ElementConsumer, WireReader, WireType, WriteLen};
use std::collections::BTreeMap;

/* Ordered list. */

/// Appends every element in arrival order. Element names are ignored.
struct ListConsumer<'a, T> {
    items: &'a mut Vec<T>,
}
impl<'a, T: WireValue> ElementConsumer for ListConsumer<'a, T> {
    fn consume(
        &mut self,
        tag: WireType,
        _name: &str,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<Consumed> {
        let mut item = T::default();
        if tag != WireType::Null {
            item.decode_payload(tag, r, end)?;
        }
        self.items.push(item);
        Ok(Consumed::Handled)
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    const KIND: FieldKind = FieldKind::Collection;

    fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        w.element(WireType::Array, key, |w| {
            let mark = w.begin_document();
            for (idx, item) in self.iter().enumerate() {
                item.encode_element(&idx.to_string(), w)?;
            }
            w.end_document(mark)?;
            Ok(())
        })
    }

    fn decode_payload(&mut self, tag: WireType, r: &mut WireReader<'_>, end: usize) -> Result<usize> {
        if tag != WireType::Array {
            return Err(CodecError::tag_mismatch::<Self>(tag));
        }
        self.clear();
        r.parse_document(end, &mut ListConsumer { items: self })
    }
}

/* Name-keyed map. */

/// Inserts every element under its name. A repeated name overwrites.
struct MapConsumer<'a, T> {
    entries: &'a mut BTreeMap<String, T>,
}
impl<'a, T: WireValue> ElementConsumer for MapConsumer<'a, T> {
    fn consume(
        &mut self,
        tag: WireType,
        name: &str,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<Consumed> {
        let mut value = T::default();
        if tag != WireType::Null {
            value.decode_payload(tag, r, end)?;
        }
        self.entries.insert(name.to_owned(), value);
        Ok(Consumed::Handled)
    }
}

impl<T: WireValue> WireValue for BTreeMap<String, T> {
    const KIND: FieldKind = FieldKind::Collection;

    fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        w.element(WireType::Document, key, |w| {
            let mark = w.begin_document();
            for (name, value) in self.iter() {
                value.encode_element(name, w)?;
            }
            w.end_document(mark)?;
            Ok(())
        })
    }

    fn decode_payload(&mut self, tag: WireType, r: &mut WireReader<'_>, end: usize) -> Result<usize> {
        if tag != WireType::Document {
            return Err(CodecError::tag_mismatch::<Self>(tag));
        }
        self.clear();
        r.parse_document(end, &mut MapConsumer { entries: self })
    }
}
