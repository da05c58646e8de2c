use crate::codec::{FieldKind, WireValue};
use crate::error::{CodecError, Result};
use crate::object::dynamic::{decode_polymorphic, encode_polymorphic};
use crate::object::{ObjectFactory, Serializable};
use crate::wire::{Consumed, DocWriter, ElementConsumer, WireReader, WireType, WriteLen};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type Entry = Option<Box<dyn Serializable>>;

fn decode_entry(
    factory: Option<&dyn ObjectFactory>,
    tag: WireType,
    r: &mut WireReader<'_>,
    end: usize,
) -> Result<Entry> {
    let mut entry = None;
    decode_polymorphic(factory, &mut entry, tag, r, end)?;
    Ok(entry)
}

/* Ordered list. */

/// A list of objects whose concrete types are chosen element by element.
///
/// Each element is written as an embedded object document, or Null for an
/// empty entry. Every decoded element is created through the one factory.
#[derive(Default)]
pub struct DynamicList {
    items: Vec<Entry>,
    factory: Option<Arc<dyn ObjectFactory>>,
}

impl DynamicList {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_factory(factory: Arc<dyn ObjectFactory>) -> Self {
        Self {
            items: vec![],
            factory: Some(factory),
        }
    }
    pub fn set_factory(&mut self, factory: Arc<dyn ObjectFactory>) {
        self.factory = Some(factory);
    }

    pub fn push(&mut self, object: Box<dyn Serializable>) {
        self.items.push(Some(object));
    }
    pub fn push_null(&mut self) {
        self.items.push(None);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `None` when out of range or when the entry is null.
    pub fn get(&self, idx: usize) -> Option<&dyn Serializable> {
        self.items.get(idx).and_then(|entry| entry.as_deref())
    }
    pub fn downcast_ref<T: Serializable>(&self, idx: usize) -> Option<&T> {
        self.get(idx)
            .and_then(|obj| obj.as_any().downcast_ref::<T>())
    }
    pub fn iter(&self) -> impl Iterator<Item = Option<&dyn Serializable>> {
        self.items.iter().map(|entry| entry.as_deref())
    }
}

struct DynamicListConsumer<'a> {
    items: &'a mut Vec<Entry>,
    factory: Option<&'a dyn ObjectFactory>,
}
impl<'a> ElementConsumer for DynamicListConsumer<'a> {
    fn consume(
        &mut self,
        tag: WireType,
        _name: &str,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<Consumed> {
        let entry = decode_entry(self.factory, tag, r, end)?;
        self.items.push(entry);
        Ok(Consumed::Handled)
    }
}

impl WireValue for DynamicList {
    const KIND: FieldKind = FieldKind::Collection;

    fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        w.element(WireType::Array, key, |w| {
            let mark = w.begin_document();
            for (idx, entry) in self.items.iter().enumerate() {
                encode_polymorphic(entry.as_deref(), &idx.to_string(), w)?;
            }
            w.end_document(mark)?;
            Ok(())
        })
    }

    fn decode_payload(&mut self, tag: WireType, r: &mut WireReader<'_>, end: usize) -> Result<usize> {
        if tag != WireType::Array {
            return Err(CodecError::tag_mismatch::<Self>(tag));
        }
        self.items.clear();
        r.parse_document(
            end,
            &mut DynamicListConsumer {
                items: &mut self.items,
                factory: self.factory.as_deref(),
            },
        )
    }

    /// Drops the elements. The factory stays.
    fn clear(&mut self) {
        self.items.clear();
    }
}

impl fmt::Debug for DynamicList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<Option<&str>> = self
            .iter()
            .map(|obj| obj.map(|obj| obj.type_name()))
            .collect();
        f.debug_struct("DynamicList")
            .field("items", &names)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}

/* Name-keyed map. */

/// A name-keyed map of objects whose concrete types are chosen per entry.
#[derive(Default)]
pub struct DynamicMap {
    entries: BTreeMap<String, Entry>,
    factory: Option<Arc<dyn ObjectFactory>>,
}

impl DynamicMap {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_factory(factory: Arc<dyn ObjectFactory>) -> Self {
        Self {
            entries: BTreeMap::new(),
            factory: Some(factory),
        }
    }
    pub fn set_factory(&mut self, factory: Arc<dyn ObjectFactory>) {
        self.factory = Some(factory);
    }

    /// Returns the entry previously held under `name`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        object: Box<dyn Serializable>,
    ) -> Option<Box<dyn Serializable>> {
        self.entries.insert(name.into(), Some(object)).flatten()
    }
    pub fn insert_null(&mut self, name: impl Into<String>) {
        self.entries.insert(name.into(), None);
    }
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Serializable>> {
        self.entries.remove(name).flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Serializable> {
        self.entries.get(name).and_then(|entry| entry.as_deref())
    }
    pub fn downcast_ref<T: Serializable>(&self, name: &str) -> Option<&T> {
        self.get(name)
            .and_then(|obj| obj.as_any().downcast_ref::<T>())
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&dyn Serializable>)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.as_deref()))
    }
}

struct DynamicMapConsumer<'a> {
    entries: &'a mut BTreeMap<String, Entry>,
    factory: Option<&'a dyn ObjectFactory>,
}
impl<'a> ElementConsumer for DynamicMapConsumer<'a> {
    fn consume(
        &mut self,
        tag: WireType,
        name: &str,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<Consumed> {
        let entry = decode_entry(self.factory, tag, r, end)?;
        self.entries.insert(name.to_owned(), entry);
        Ok(Consumed::Handled)
    }
}

impl WireValue for DynamicMap {
    const KIND: FieldKind = FieldKind::Collection;

    fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        w.element(WireType::Document, key, |w| {
            let mark = w.begin_document();
            for (name, entry) in self.entries.iter() {
                encode_polymorphic(entry.as_deref(), name, w)?;
            }
            w.end_document(mark)?;
            Ok(())
        })
    }

    fn decode_payload(&mut self, tag: WireType, r: &mut WireReader<'_>, end: usize) -> Result<usize> {
        if tag != WireType::Document {
            return Err(CodecError::tag_mismatch::<Self>(tag));
        }
        self.entries.clear();
        r.parse_document(
            end,
            &mut DynamicMapConsumer {
                entries: &mut self.entries,
                factory: self.factory.as_deref(),
            },
        )
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for DynamicMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<(&str, Option<&str>)> = self
            .iter()
            .map(|(name, obj)| (name, obj.map(|obj| obj.type_name())))
            .collect();
        f.debug_struct("DynamicMap")
            .field("entries", &names)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}
