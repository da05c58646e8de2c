use crate::codec::{FieldKind, WireValue};
use crate::error::{CodecError, Result};
use crate::wire::{DocWriter, WireReader, WireType, WriteLen};
use derive_more::{Deref, DerefMut, From, Into};
use std::fmt::Debug;
use std::mem;

/// A fixed-width number that can be packed into a binary payload.
pub trait BlobElem: Copy + Default + Debug + 'static {
    const WIDTH: usize;
    fn put_le(self, w: &mut DocWriter<'_>);
    /// `bytes.len()` is always `WIDTH`.
    fn from_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_blob_elem {
    ($($ty:ty),* $(,)?) => {$(
        impl BlobElem for $ty {
            const WIDTH: usize = mem::size_of::<$ty>();
            fn put_le(self, w: &mut DocWriter<'_>) {
                w.put_bytes(&self.to_le_bytes());
            }
            fn from_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; mem::size_of::<$ty>()];
                buf.copy_from_slice(bytes);
                <$ty>::from_le_bytes(buf)
            }
        }
    )*};
}

impl_blob_elem!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// A contiguous buffer of numbers, encoded as one binary payload.
///
/// The payload length is in bytes. A payload whose length is not a multiple
/// of `T::WIDTH` decodes to `floor(len / WIDTH)` elements; the leftover bytes
/// are consumed and dropped.
#[derive(From, Into, Deref, DerefMut, PartialEq, Clone, Default, Debug)]
pub struct Blob<T>(pub Vec<T>);

impl<T: BlobElem> Blob<T> {
    fn fill_from(&mut self, bytes: &[u8]) {
        self.0 = bytes.chunks_exact(T::WIDTH).map(T::from_le).collect();
    }
}

impl<T: BlobElem> WireValue for Blob<T> {
    const KIND: FieldKind = FieldKind::Primitive;

    fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        w.element(WireType::Binary, key, |w| {
            w.put_binary_header(self.0.len() * T::WIDTH)?;
            for elem in self.0.iter() {
                elem.put_le(w);
            }
            Ok(())
        })
    }

    fn decode_payload(&mut self, tag: WireType, r: &mut WireReader<'_>, end: usize) -> Result<usize> {
        let start = r.pos();
        match tag {
            WireType::Binary => {
                let (_subtype, body) = r.read_binary(end)?;
                self.fill_from(body);
            }
            #[cfg(feature = "legacy-base64")]
            WireType::Str => {
                use base64::Engine;
                let text = r.read_str_bytes(end)?;
                let body = base64::engine::general_purpose::STANDARD
                    .decode(text)
                    .map_err(|e| CodecError::Base64(e.to_string()))?;
                self.fill_from(&body);
            }
            _ => return Err(CodecError::tag_mismatch::<Self>(tag)),
        }
        Ok(r.pos() - start)
    }
}
