use crate::codec::{FieldKind, WireValue};
use crate::error::{CodecError, Result};
use crate::wire::{DocWriter, WireReader, WireType, WriteLen};

/// A numeric payload as it appears on the wire, before conversion to the
/// field's native type.
#[derive(Clone, Copy, Debug)]
enum WireNumber {
    Int32(i32),
    Int64(i64),
    Bool(u8),
    Double(f64),
    Time(u64),
}

/// Reads any numeric payload. `None` means the tag is not numeric and nothing
/// was consumed.
fn read_number(tag: WireType, r: &mut WireReader<'_>, end: usize) -> Result<Option<WireNumber>> {
    let num = match tag {
        WireType::Int32 => WireNumber::Int32(r.read_i32(end)?),
        WireType::Int64 => WireNumber::Int64(r.read_i64(end)?),
        WireType::Bool => WireNumber::Bool(r.read_u8(end)?),
        WireType::Double => WireNumber::Double(r.read_f64(end)?),
        WireType::UtcDateTime | WireType::Timestamp => WireNumber::Time(r.read_u64(end)?),
        _ => return Ok(None),
    };
    Ok(Some(num))
}

/* Integers and floats. Narrow integers are widened to Int32 on the wire. */
macro_rules! impl_wire_number {
    ($($ty:ty => $tag:ident as $wide:ty),* $(,)?) => {$(
        impl WireValue for $ty {
            const KIND: FieldKind = FieldKind::Primitive;

            fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
                let wide = *self as $wide;
                w.element(WireType::$tag, key, |w| {
                    w.put_bytes(&wide.to_le_bytes());
                    Ok(())
                })
            }

            fn decode_payload(
                &mut self,
                tag: WireType,
                r: &mut WireReader<'_>,
                end: usize,
            ) -> Result<usize> {
                let start = r.pos();
                *self = match read_number(tag, r, end)? {
                    Some(WireNumber::Int32(v)) => v as $ty,
                    Some(WireNumber::Int64(v)) => v as $ty,
                    Some(WireNumber::Bool(v)) => v as $ty,
                    Some(WireNumber::Double(v)) => v as $ty,
                    Some(WireNumber::Time(v)) => v as $ty,
                    None => return Err(CodecError::tag_mismatch::<$ty>(tag)),
                };
                Ok(r.pos() - start)
            }
        }
    )*};
}

impl_wire_number!(
    i8 => Int32 as i32,
    u8 => Int32 as u32,
    i16 => Int32 as i32,
    u16 => Int32 as u32,
    i32 => Int32 as i32,
    u32 => Int32 as u32,
    i64 => Int64 as i64,
    u64 => Int64 as u64,
    f32 => Double as f64,
    f64 => Double as f64,
);

impl WireValue for bool {
    const KIND: FieldKind = FieldKind::Primitive;

    fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        w.element(WireType::Bool, key, |w| {
            w.put_u8(u8::from(*self));
            Ok(())
        })
    }

    fn decode_payload(&mut self, tag: WireType, r: &mut WireReader<'_>, end: usize) -> Result<usize> {
        let start = r.pos();
        *self = match tag {
            WireType::Bool => r.read_u8(end)? != 0,
            WireType::Int32 => r.read_i32(end)? != 0,
            WireType::Int64 => r.read_i64(end)? != 0,
            _ => return Err(CodecError::tag_mismatch::<bool>(tag)),
        };
        Ok(r.pos() - start)
    }
}

impl WireValue for String {
    const KIND: FieldKind = FieldKind::Primitive;

    fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        w.element(WireType::Str, key, |w| w.put_str_payload(self))
    }

    fn decode_payload(&mut self, tag: WireType, r: &mut WireReader<'_>, end: usize) -> Result<usize> {
        if tag != WireType::Str {
            return Err(CodecError::tag_mismatch::<String>(tag));
        }
        let start = r.pos();
        *self = r.read_string(end)?;
        Ok(r.pos() - start)
    }
}
