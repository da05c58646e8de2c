use crate::error::{JsonBridgeError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsbsonrpc_types::error::{self as codec, CodecError};
use jsbsonrpc_types::object::Serializable;
use jsbsonrpc_types::wire::{Consumed, DecodeLimits, ElementConsumer, WireReader, WireType};
use serde_json::{Map, Number, Value};

/// Collects the elements of one document, in wire order.
#[derive(Default)]
struct JsonConsumer {
    entries: Vec<(String, Value)>,
}

impl JsonConsumer {
    fn nested(r: &mut WireReader<'_>, end: usize) -> codec::Result<Self> {
        let mut sub = Self::default();
        r.parse_document(end, &mut sub)?;
        Ok(sub)
    }

    /// Repeated names keep the last value.
    fn into_object(self) -> Value {
        Value::Object(self.entries.into_iter().collect::<Map<_, _>>())
    }

    fn into_array(self) -> Value {
        Value::Array(self.entries.into_iter().map(|(_, val)| val).collect())
    }
}

impl ElementConsumer for JsonConsumer {
    fn consume(
        &mut self,
        tag: WireType,
        name: &str,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> codec::Result<Consumed> {
        let val = match tag {
            // JSON has no NaN or infinities; those become null.
            WireType::Double => Number::from_f64(r.read_f64(end)?).map_or(Value::Null, Value::Number),
            WireType::Str => Value::String(r.read_string(end)?),
            WireType::Document => Self::nested(r, end)?.into_object(),
            WireType::Array => Self::nested(r, end)?.into_array(),
            WireType::Binary => {
                let (_subtype, body) = r.read_binary(end)?;
                Value::String(STANDARD.encode(body))
            }
            WireType::Bool => Value::Bool(r.read_u8(end)? != 0),
            WireType::UtcDateTime | WireType::Timestamp => Value::from(r.read_u64(end)?),
            WireType::Null => Value::Null,
            WireType::Int32 => Value::from(r.read_i32(end)?),
            WireType::Int64 => Value::from(r.read_i64(end)?),
            // The parser rejects these when asked to skip them.
            WireType::ObjectId | WireType::Decimal128 => return Ok(Consumed::Declined),
        };
        self.entries.push((name.to_owned(), val));
        Ok(Consumed::Handled)
    }
}

fn bridge_error(err: CodecError) -> JsonBridgeError {
    match err {
        CodecError::UnsupportedTag(tag) => JsonBridgeError::TypeNotSupported(tag),
        err => JsonBridgeError::Codec(err),
    }
}

/// Converts the document at `offset` to a JSON object.
pub fn document_to_json(buf: &[u8], offset: usize) -> Result<Value> {
    document_to_json_with_limits(buf, offset, DecodeLimits::default())
}

pub fn document_to_json_with_limits(
    buf: &[u8],
    offset: usize,
    limits: DecodeLimits,
) -> Result<Value> {
    let mut r = WireReader::with_limits(buf, offset, limits);
    let mut root = JsonConsumer::default();
    r.parse_document(buf.len(), &mut root).map_err(bridge_error)?;
    Ok(root.into_object())
}

/// The JSON form of `obj`, reserved keys included.
pub fn object_to_json(obj: &dyn Serializable) -> Result<Value> {
    let buf = obj.to_bytes()?;
    document_to_json_with_limits(&buf, 0, obj.decode_limits())
}

pub fn object_to_json_string(obj: &dyn Serializable) -> Result<String> {
    let val = object_to_json(obj)?;
    Ok(serde_json::to_string(&val)?)
}
