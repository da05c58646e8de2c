use crate::codec::{FieldKind, WireValue};
use crate::error::Result;
use crate::object::{DynamicSlot, Slot};
use crate::wire::{DocWriter, WireReader, WireType, WriteLen};
use std::sync::Arc;

/// Type-erased access to one `Slot<T>` inside an `O`.
trait SlotAccess<O>: Send + Sync {
    fn slot_addr(&self, owner: &O) -> *const ();
    fn encode(&self, owner: &O, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen>;
    fn decode(&self, owner: &mut O, tag: WireType, r: &mut WireReader<'_>, end: usize)
        -> Result<usize>;
    fn clear(&self, owner: &mut O);
    fn is_null(&self, owner: &O) -> bool;
}

struct SlotAccessor<O, T> {
    get: fn(&O) -> &Slot<T>,
    get_mut: fn(&mut O) -> &mut Slot<T>,
}

impl<O, T: WireValue> SlotAccess<O> for SlotAccessor<O, T> {
    fn slot_addr(&self, owner: &O) -> *const () {
        (self.get)(owner) as *const Slot<T> as *const ()
    }
    fn encode(&self, owner: &O, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        (self.get)(owner).encode_element(key, w)
    }
    fn decode(
        &self,
        owner: &mut O,
        tag: WireType,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<usize> {
        (self.get_mut)(owner).decode_payload(tag, r, end)
    }
    fn clear(&self, owner: &mut O) {
        (self.get_mut)(owner).clear();
    }
    fn is_null(&self, owner: &O) -> bool {
        (self.get)(owner).is_null()
    }
}

enum FieldAccess<O> {
    Slot(Arc<dyn SlotAccess<O>>),
    Dynamic {
        get: fn(&O) -> &DynamicSlot,
        get_mut: fn(&mut O) -> &mut DynamicSlot,
    },
}
impl<O> Clone for FieldAccess<O> {
    fn clone(&self) -> Self {
        match self {
            Self::Slot(acc) => Self::Slot(Arc::clone(acc)),
            Self::Dynamic { get, get_mut } => Self::Dynamic {
                get: *get,
                get_mut: *get_mut,
            },
        }
    }
}

/// One bound field: its wire name, its kind, and how to reach its storage.
///
/// Descriptors hold accessor functions, not references, so the owning object
/// may move freely.
pub struct FieldDescriptor<O> {
    name: Arc<str>,
    kind: FieldKind,
    access: FieldAccess<O>,
}
impl<O> Clone for FieldDescriptor<O> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            kind: self.kind,
            access: self.access.clone(),
        }
    }
}

impl<O> FieldDescriptor<O> {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    fn slot_addr(&self, owner: &O) -> *const () {
        match &self.access {
            FieldAccess::Slot(acc) => acc.slot_addr(owner),
            FieldAccess::Dynamic { get, .. } => get(owner) as *const DynamicSlot as *const (),
        }
    }

    pub fn encode(&self, owner: &O, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        match &self.access {
            FieldAccess::Slot(acc) => acc.encode(owner, &self.name, w),
            FieldAccess::Dynamic { get, .. } => get(owner).encode_element(&self.name, w),
        }
    }

    /// Decodes one payload of `tag` into this field of `owner`.
    pub fn decode(
        &self,
        owner: &mut O,
        tag: WireType,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<usize> {
        match &self.access {
            FieldAccess::Slot(acc) => acc.decode(owner, tag, r, end),
            FieldAccess::Dynamic { get_mut, .. } => get_mut(owner).decode_payload(tag, r, end),
        }
    }

    pub fn clear(&self, owner: &mut O) {
        match &self.access {
            FieldAccess::Slot(acc) => acc.clear(owner),
            FieldAccess::Dynamic { get_mut, .. } => get_mut(owner).clear(),
        }
    }

    pub fn is_null(&self, owner: &O) -> bool {
        match &self.access {
            FieldAccess::Slot(acc) => acc.is_null(owner),
            FieldAccess::Dynamic { get, .. } => get(owner).is_null(),
        }
    }
}

/// The ordered fields of one object. Declaration order is wire order.
pub struct FieldRegistry<O> {
    fields: Vec<FieldDescriptor<O>>,
}
impl<O> Default for FieldRegistry<O> {
    fn default() -> Self {
        Self { fields: vec![] }
    }
}
impl<O> Clone for FieldRegistry<O> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<O: 'static> FieldRegistry<O> {
    /// Appends `desc` unless a field already bound in `owner` shares its storage.
    ///
    /// Returns whether the descriptor was added.
    fn push_unique(&mut self, owner: &O, desc: FieldDescriptor<O>) -> bool {
        let addr = desc.slot_addr(owner);
        if self.fields.iter().any(|f| f.slot_addr(owner) == addr) {
            return false;
        }
        self.fields.push(desc);
        true
    }

    pub(crate) fn bind_slot<T: WireValue + 'static>(
        &mut self,
        owner: &O,
        name: &str,
        get: fn(&O) -> &Slot<T>,
        get_mut: fn(&mut O) -> &mut Slot<T>,
    ) -> bool {
        let desc = FieldDescriptor {
            name: Arc::from(name),
            kind: T::KIND,
            access: FieldAccess::Slot(Arc::new(SlotAccessor { get, get_mut })),
        };
        self.push_unique(owner, desc)
    }

    pub(crate) fn bind_dynamic(
        &mut self,
        owner: &O,
        name: &str,
        get: fn(&O) -> &DynamicSlot,
        get_mut: fn(&mut O) -> &mut DynamicSlot,
    ) -> bool {
        let desc = FieldDescriptor {
            name: Arc::from(name),
            kind: FieldKind::DynamicNestedObject,
            access: FieldAccess::Dynamic { get, get_mut },
        };
        self.push_unique(owner, desc)
    }
}

impl<O> FieldRegistry<O> {
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor<O>> {
        self.fields.iter()
    }
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
    /// First field bound under `name`. Names are compared byte-exact.
    pub fn find(&self, name: &str) -> Option<&FieldDescriptor<O>> {
        self.fields.iter().find(|f| &*f.name == name)
    }
}
