use crate::error::{CodecError, Result};
use crate::wire::{DocLen, PayloadLen, WireType, WireTypeInt, TERMINATOR};
use derive_more::{Deref, From};

/// Binary payloads are always written with the generic subtype.
pub const BINARY_SUBTYPE_GENERIC: u8 = 0x00;

#[derive(Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct WriteLen(usize);
impl WriteLen {
    pub fn new_manual(len: usize) -> Self {
        Self(len)
    }
}

/// Position of a length prefix that is backpatched once its document is closed.
#[derive(Clone, Copy, Debug)]
pub struct DocMark(usize);

/// Appends encoded elements to a growing buffer.
///
/// Documents are written with a placeholder length that
/// [`DocWriter::end_document`] backpatches.
#[derive(From)]
pub struct DocWriter<'w> {
    buf: &'w mut Vec<u8>,
}

impl<'w> DocWriter<'w> {
    pub fn new(buf: &'w mut Vec<u8>) -> Self {
        Self { buf }
    }

    pub fn written(&self) -> usize {
        self.buf.len()
    }

    /// Writes one complete element: header, then whatever `body` appends.
    pub fn element<F>(&mut self, tag: WireType, key: &str, body: F) -> Result<WriteLen>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let start = self.buf.len();
        self.put_element_header(tag, key)?;
        body(self)?;
        Ok(WriteLen(self.buf.len() - start))
    }

    fn put_element_header(&mut self, tag: WireType, key: &str) -> Result<()> {
        if key.as_bytes().contains(&0) {
            return Err(CodecError::InvalidKey(key.to_owned()));
        }
        self.buf.push(*WireTypeInt::from(tag));
        self.buf.extend_from_slice(key.as_bytes());
        self.buf.push(0);
        Ok(())
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
    pub fn put_u8(&mut self, v: u8) {
        self.buf.push(v);
    }
    pub fn put_i32(&mut self, v: i32) {
        self.put_bytes(&v.to_le_bytes());
    }
    pub fn put_i64(&mut self, v: i64) {
        self.put_bytes(&v.to_le_bytes());
    }
    pub fn put_f64(&mut self, v: f64) {
        self.put_bytes(&v.to_le_bytes());
    }

    /// `u32 length including NUL`, UTF-8 bytes, NUL.
    pub fn put_str_payload(&mut self, s: &str) -> Result<()> {
        let len = PayloadLen::from_body("string", s.len() + 1)?;
        self.put_bytes(&len.to_le_bytes());
        self.put_bytes(s.as_bytes());
        self.buf.push(0);
        Ok(())
    }

    /// `u32 byte length` and subtype. The caller appends exactly `byte_len` bytes.
    pub fn put_binary_header(&mut self, byte_len: usize) -> Result<()> {
        let len = PayloadLen::from_body("binary payload", byte_len)?;
        self.put_bytes(&len.to_le_bytes());
        self.buf.push(BINARY_SUBTYPE_GENERIC);
        Ok(())
    }

    pub fn begin_document(&mut self) -> DocMark {
        let mark = DocMark(self.buf.len());
        self.buf.extend_from_slice(&[0u8; 4]);
        mark
    }

    /// Writes the terminator and backpatches the length prefix at `mark`.
    pub fn end_document(&mut self, mark: DocMark) -> Result<WriteLen> {
        self.buf.push(TERMINATOR);
        let len = self.buf.len() - mark.0;
        let doc_len = DocLen::from_written(len)?;
        self.buf[mark.0..mark.0 + 4].copy_from_slice(&doc_len.to_le_bytes());
        Ok(WriteLen(len))
    }
}
