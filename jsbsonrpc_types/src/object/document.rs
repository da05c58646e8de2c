use crate::codec::{FieldKind, WireValue};
use crate::config::{standard_options, ConfigMask, DeserOption};
use crate::error::{CodecError, Result};
use crate::object::{DynamicSlot, ObjectCore, Slot};
use crate::wire::{
    Consumed, DecodeLimits, DocWriter, ElementConsumer, WireReader, WireType, WriteLen,
};
use std::any::Any;
use std::mem;
use tracing::{debug, trace};

/// Reserved key carrying the object's type name, as a Str.
pub const NAME_KEY: &str = "@jsbsonrpcsname";
/// Reserved key carrying the object's version, as an Int64.
pub const VERSION_KEY: &str = "@jsbsonrpcsver";

/// Implemented by each concrete object type.
///
/// The type embeds an [`ObjectCore`] and binds its [`Slot`]s in its
/// constructor. Everything else comes from the blanket [`Serializable`] impl.
pub trait Reflect: Any + Sized {
    fn object_core(&self) -> &ObjectCore<Self>;
    fn object_core_mut(&mut self) -> &mut ObjectCore<Self>;

    /// Receives the type name found on the wire. The object's own name is
    /// never changed by a decode.
    fn on_wire_name(&mut self, _name: &str) {}
    fn on_wire_version(&mut self, _version: i64) {}

    /// Binds the slot reached through `get`/`get_mut` under `name`.
    ///
    /// Fields are written in binding order. Binding a slot that is already
    /// bound does nothing.
    fn bind<T: WireValue + 'static>(
        &mut self,
        name: &str,
        get: fn(&Self) -> &Slot<T>,
        get_mut: fn(&mut Self) -> &mut Slot<T>,
    ) -> &mut Self {
        let mut fields = mem::take(&mut self.object_core_mut().fields);
        if !fields.bind_slot(self, name, get, get_mut) {
            trace!(name, "slot already bound");
        }
        self.object_core_mut().fields = fields;
        self
    }

    fn bind_dynamic(
        &mut self,
        name: &str,
        get: fn(&Self) -> &DynamicSlot,
        get_mut: fn(&mut Self) -> &mut DynamicSlot,
    ) -> &mut Self {
        let mut fields = mem::take(&mut self.object_core_mut().fields);
        if !fields.bind_dynamic(self, name, get, get_mut) {
            trace!(name, "slot already bound");
        }
        self.object_core_mut().fields = fields;
        self
    }
}

/// The object-safe view of a serializable object.
pub trait Serializable: Any {
    fn type_name(&self) -> &str;
    fn version(&self) -> i64;

    fn config(&self) -> ConfigMask;
    fn set_config(&mut self, config: ConfigMask);
    fn configure(&mut self, option: &DeserOption, enabled: bool);

    fn decode_limits(&self) -> DecodeLimits;
    fn set_decode_limits(&mut self, limits: DecodeLimits);

    fn field_names(&self) -> Vec<&str>;
    fn field_kind(&self, name: &str) -> Option<FieldKind>;
    fn is_field_null(&self, name: &str) -> Option<bool>;

    /// Writes this object as one complete document.
    fn encode_document(&self, w: &mut DocWriter<'_>) -> Result<WriteLen>;

    /// Reads one document at the reader's cursor into this object.
    ///
    /// Fields absent from the document keep their values.
    fn decode_document(&mut self, r: &mut WireReader<'_>, limit: usize) -> Result<usize>;

    /// Clears every field in binding order. Nested objects are cleared in place.
    fn clear_all(&mut self);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Appends the encoded object to `buf`. Returns the bytes written.
    fn encode(&self, buf: &mut Vec<u8>) -> Result<usize> {
        let mut w = DocWriter::new(buf);
        let w_len = self.encode_document(&mut w)?;
        Ok(*w_len)
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = vec![];
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Decodes the document starting at `offset`. Returns the bytes consumed.
    fn decode(&mut self, buf: &[u8], offset: usize) -> Result<usize> {
        let mut r = WireReader::with_limits(buf, offset, self.decode_limits());
        self.decode_document(&mut r, buf.len())
    }

    /// Overwrites this object with the state of `src`, by encoding `src` and
    /// decoding the result.
    ///
    /// Both objects must have the same name and version. The option mask is
    /// copied once the decode has succeeded.
    fn assign_from(&mut self, src: &dyn Serializable) -> Result<()> {
        if self.type_name() != src.type_name() || self.version() != src.version() {
            return Err(CodecError::IdentityMismatch {
                expected_name: self.type_name().to_owned(),
                expected_version: self.version(),
                actual_name: src.type_name().to_owned(),
                actual_version: src.version(),
            });
        }
        let bytes = src.to_bytes()?;
        self.decode(&bytes, 0)?;
        self.set_config(src.config());
        Ok(())
    }
}

impl<O: Reflect> Serializable for O {
    fn type_name(&self) -> &str {
        self.object_core().name()
    }
    fn version(&self) -> i64 {
        self.object_core().version()
    }

    fn config(&self) -> ConfigMask {
        self.object_core().config()
    }
    fn set_config(&mut self, config: ConfigMask) {
        self.object_core_mut().set_config(config);
    }
    fn configure(&mut self, option: &DeserOption, enabled: bool) {
        self.object_core_mut().configure(option, enabled);
    }

    fn decode_limits(&self) -> DecodeLimits {
        self.object_core().limits()
    }
    fn set_decode_limits(&mut self, limits: DecodeLimits) {
        self.object_core_mut().set_limits(limits);
    }

    fn field_names(&self) -> Vec<&str> {
        self.object_core().fields().iter().map(|f| f.name()).collect()
    }
    fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.object_core().fields().find(name).map(|f| f.kind())
    }
    fn is_field_null(&self, name: &str) -> Option<bool> {
        self.object_core().fields().find(name).map(|f| f.is_null(self))
    }

    fn encode_document(&self, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        let core = self.object_core();
        let mark = w.begin_document();
        w.element(WireType::Str, NAME_KEY, |w| w.put_str_payload(core.name()))?;
        core.version().encode_element(VERSION_KEY, w)?;
        for field in core.fields().iter() {
            field.encode(self, w)?;
        }
        w.end_document(mark)
    }

    fn decode_document(&mut self, r: &mut WireReader<'_>, limit: usize) -> Result<usize> {
        let strict = self
            .config()
            .is_enabled(&standard_options().fail_on_unknown_properties);
        let mut consumer = ObjectConsumer {
            target: self,
            strict,
            name_seen: false,
            version_seen: false,
        };
        let doc_len = r.parse_document(limit, &mut consumer)?;
        if !consumer.name_seen {
            return Err(CodecError::MissingMetadata(NAME_KEY));
        }
        if !consumer.version_seen {
            return Err(CodecError::MissingMetadata(VERSION_KEY));
        }
        Ok(doc_len)
    }

    fn clear_all(&mut self) {
        let fields = self.object_core().fields().clone();
        for field in fields.iter() {
            field.clear(self);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Routes the elements of an object document to the object's fields.
struct ObjectConsumer<'a, O> {
    target: &'a mut O,
    strict: bool,
    name_seen: bool,
    version_seen: bool,
}

impl<'a, O: Reflect> ElementConsumer for ObjectConsumer<'a, O> {
    fn consume(
        &mut self,
        tag: WireType,
        name: &str,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<Consumed> {
        match name {
            NAME_KEY => {
                let mut wire_name = String::new();
                wire_name.decode_payload(tag, r, end)?;
                self.target.on_wire_name(&wire_name);
                self.name_seen = true;
            }
            VERSION_KEY => {
                // Any numeric tag; JSON-sourced documents may carry an Int32.
                let mut version = 0i64;
                version.decode_payload(tag, r, end)?;
                self.target.on_wire_version(version);
                self.version_seen = true;
            }
            _ => {
                let field = self.target.object_core().fields().find(name).cloned();
                match field {
                    Some(field) => {
                        field.decode(self.target, tag, r, end)?;
                    }
                    None if self.strict => {
                        debug!(name, object = self.target.type_name(), "rejected unknown property");
                        return Err(CodecError::UnknownProperty(name.to_owned()));
                    }
                    None => return Ok(Consumed::Declined),
                }
            }
        }
        Ok(Consumed::Handled)
    }
}
