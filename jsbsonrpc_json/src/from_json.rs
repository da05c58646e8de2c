use crate::error::{JsonBridgeError, Result};
use jsbsonrpc_types::codec::WireValue;
use jsbsonrpc_types::error as codec;
use jsbsonrpc_types::object::{Serializable, NAME_KEY, VERSION_KEY};
use jsbsonrpc_types::wire::{DocWriter, WireType, WriteLen};
use serde_json::{Map, Number, Value};

fn as_object(val: &Value) -> Result<&Map<String, Value>> {
    match val {
        Value::Object(map) => Ok(map),
        _ => Err(JsonBridgeError::Convert(format!(
            "a document must come from a JSON object, not {}",
            kind_name(val)
        ))),
    }
}

fn kind_name(val: &Value) -> &'static str {
    match val {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Integers take the narrowest of Int32 and Int64. A `u64` above
/// `i64::MAX` is written bit-for-bit as Int64. Everything else is a Double.
fn write_number(key: &str, num: &Number, w: &mut DocWriter<'_>) -> codec::Result<WriteLen> {
    if let Some(int) = num.as_i64() {
        return match i32::try_from(int) {
            Ok(narrow) => narrow.encode_element(key, w),
            Err(_) => int.encode_element(key, w),
        };
    }
    if let Some(uint) = num.as_u64() {
        return uint.encode_element(key, w);
    }
    num.as_f64().unwrap_or(f64::NAN).encode_element(key, w)
}

fn write_value(key: &str, val: &Value, w: &mut DocWriter<'_>) -> codec::Result<WriteLen> {
    match val {
        Value::Null => w.element(WireType::Null, key, |_| Ok(())),
        Value::Bool(b) => b.encode_element(key, w),
        Value::Number(num) => write_number(key, num, w),
        Value::String(s) => s.encode_element(key, w),
        Value::Array(items) => w.element(WireType::Array, key, |w| {
            let mark = w.begin_document();
            for (idx, item) in items.iter().enumerate() {
                write_value(&idx.to_string(), item, w)?;
            }
            w.end_document(mark)?;
            Ok(())
        }),
        Value::Object(map) => w.element(WireType::Document, key, |w| {
            write_members(map, w)?;
            Ok(())
        }),
    }
}

fn write_members(map: &Map<String, Value>, w: &mut DocWriter<'_>) -> codec::Result<WriteLen> {
    let mark = w.begin_document();
    for (key, val) in map {
        write_value(key, val, w)?;
    }
    w.end_document(mark)
}

/// Appends the document form of a JSON object to `buf`. Returns the bytes written.
pub fn json_to_document(val: &Value, buf: &mut Vec<u8>) -> Result<usize> {
    let map = as_object(val)?;
    let w_len = write_members(map, &mut DocWriter::new(buf))?;
    Ok(*w_len)
}

/// Decodes a JSON object into `obj`.
///
/// Reserved keys absent from the JSON are taken from `obj` itself, so plain
/// field maps are accepted.
pub fn object_from_json(obj: &mut dyn Serializable, val: &Value) -> Result<()> {
    let map = as_object(val)?;

    let mut buf = vec![];
    let mut w = DocWriter::new(&mut buf);
    let mark = w.begin_document();
    if !map.contains_key(NAME_KEY) {
        w.element(WireType::Str, NAME_KEY, |w| w.put_str_payload(obj.type_name()))?;
    }
    if !map.contains_key(VERSION_KEY) {
        obj.version().encode_element(VERSION_KEY, &mut w)?;
    }
    for (key, val) in map {
        write_value(key, val, &mut w)?;
    }
    w.end_document(mark)?;

    obj.decode(&buf, 0)?;
    Ok(())
}

pub fn object_from_json_str(obj: &mut dyn Serializable, text: &str) -> Result<()> {
    let val: Value = serde_json::from_str(text)?;
    object_from_json(obj, &val)
}
