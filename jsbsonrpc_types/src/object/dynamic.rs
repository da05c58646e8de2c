use crate::error::{CodecError, Result};
use crate::object::{peek_metadata, Serializable};
use crate::wire::{DocWriter, WireReader, WireType, WriteLen};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Produces empty objects to decode polymorphic fields into.
pub trait ObjectFactory: Send + Sync {
    /// Fallback when [`ObjectFactory::create_for`] declines.
    fn create(&self) -> Option<Box<dyn Serializable>>;

    /// An instance of the concrete type named on the wire.
    fn create_for(&self, _name: &str, _version: i64) -> Option<Box<dyn Serializable>> {
        None
    }
}

/// A nested object whose concrete type is chosen while decoding.
///
/// An empty slot is written as a Null element.
#[derive(Default)]
pub struct DynamicSlot {
    object: Option<Box<dyn Serializable>>,
    factory: Option<Arc<dyn ObjectFactory>>,
}

impl DynamicSlot {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_factory(factory: Arc<dyn ObjectFactory>) -> Self {
        Self {
            object: None,
            factory: Some(factory),
        }
    }
    pub fn set_factory(&mut self, factory: Arc<dyn ObjectFactory>) {
        self.factory = Some(factory);
    }

    pub fn get(&self) -> Option<&dyn Serializable> {
        self.object.as_deref()
    }
    pub fn get_mut(&mut self) -> Option<&mut (dyn Serializable + 'static)> {
        self.object.as_deref_mut()
    }
    pub fn set(&mut self, object: Box<dyn Serializable>) {
        self.object = Some(object);
    }
    pub fn take(&mut self) -> Option<Box<dyn Serializable>> {
        self.object.take()
    }
    pub fn downcast_ref<T: Serializable>(&self) -> Option<&T> {
        self.get().and_then(|obj| obj.as_any().downcast_ref::<T>())
    }
    pub fn downcast_mut<T: Serializable>(&mut self) -> Option<&mut T> {
        self.get_mut()
            .and_then(|obj| obj.as_any_mut().downcast_mut::<T>())
    }

    pub fn is_null(&self) -> bool {
        self.object.is_none()
    }

    /// Clears the held object in place. The slot keeps it.
    pub fn clear(&mut self) {
        if let Some(obj) = self.object.as_deref_mut() {
            obj.clear_all();
        }
    }

    pub(crate) fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        encode_polymorphic(self.object.as_deref(), key, w)
    }

    pub(crate) fn decode_payload(
        &mut self,
        tag: WireType,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<usize> {
        if tag != WireType::Null && tag != WireType::Document {
            return Err(CodecError::tag_mismatch::<Self>(tag));
        }
        decode_polymorphic(self.factory.as_deref(), &mut self.object, tag, r, end)
    }
}

/// Writes `obj` as a Document element, or a Null element when absent.
pub(crate) fn encode_polymorphic(
    obj: Option<&dyn Serializable>,
    key: &str,
    w: &mut DocWriter<'_>,
) -> Result<WriteLen> {
    match obj {
        None => w.element(WireType::Null, key, |_| Ok(())),
        Some(obj) => w.element(WireType::Document, key, |w| {
            obj.encode_document(w)?;
            Ok(())
        }),
    }
}

/// Decodes one Null or Document payload into `object`.
///
/// The wire metadata is peeked first. A factory instance replaces whatever
/// `object` holds; without one the held instance is decoded into.
pub(crate) fn decode_polymorphic(
    factory: Option<&dyn ObjectFactory>,
    object: &mut Option<Box<dyn Serializable>>,
    tag: WireType,
    r: &mut WireReader<'_>,
    end: usize,
) -> Result<usize> {
    match tag {
        WireType::Null => {
            *object = None;
            Ok(0)
        }
        WireType::Document => {
            let meta = peek_metadata(r, end)?;
            if let Some(obj) =
                factory.and_then(|f| instantiate(f, meta.name.as_deref(), meta.version))
            {
                *object = Some(obj);
            }
            match object.as_deref_mut() {
                Some(obj) => obj.decode_document(r, end),
                None => Err(CodecError::NoInstance {
                    name: meta.name,
                    version: meta.version,
                }),
            }
        }
        _ => Err(CodecError::tag_mismatch::<Option<Box<dyn Serializable>>>(tag)),
    }
}

fn instantiate(
    factory: &dyn ObjectFactory,
    name: Option<&str>,
    version: Option<i64>,
) -> Option<Box<dyn Serializable>> {
    let by_identity = match (name, version) {
        (Some(name), Some(version)) => factory.create_for(name, version),
        _ => None,
    };
    let obj = by_identity.or_else(|| factory.create());
    match &obj {
        Some(obj) => debug!(
            wire_name = name,
            wire_version = version,
            created = obj.type_name(),
            "created polymorphic instance"
        ),
        None => warn!(
            wire_name = name,
            wire_version = version,
            "factory declined to create an instance"
        ),
    }
    obj
}

impl fmt::Debug for DynamicSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicSlot")
            .field("object", &self.object.as_deref().map(|o| o.type_name()))
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}
