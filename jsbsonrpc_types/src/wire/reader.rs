use crate::error::{CodecError, Result};
use std::mem;
use std::str;

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Bounds applied while decoding untrusted input.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct DecodeLimits {
    /// How many documents may be open at once, the outermost one included.
    pub max_depth: usize,
}
impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A bounds-checked cursor over an encoded buffer.
///
/// Every read takes a `limit`, the exclusive end of the enclosing document.
/// A read that would cross the limit (or the buffer end) fails without
/// moving the cursor.
#[derive(Clone, Debug)]
pub struct WireReader<'b> {
    buf: &'b [u8],
    pos: usize,
    depth: usize,
    limits: DecodeLimits,
}

impl<'b> WireReader<'b> {
    pub fn new(buf: &'b [u8], pos: usize) -> Self {
        Self::with_limits(buf, pos, DecodeLimits::default())
    }

    pub fn with_limits(buf: &'b [u8], pos: usize, limits: DecodeLimits) -> Self {
        Self {
            buf,
            pos,
            depth: 0,
            limits,
        }
    }

    pub fn buf(&self) -> &'b [u8] {
        self.buf
    }
    pub fn pos(&self) -> usize {
        self.pos
    }
    pub fn depth(&self) -> usize {
        self.depth
    }
    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    fn bound(&self, limit: usize) -> usize {
        limit.min(self.buf.len())
    }

    pub(crate) fn enter_document(&mut self) -> Result<()> {
        if self.depth >= self.limits.max_depth {
            return Err(CodecError::TooDeep(self.limits.max_depth));
        }
        self.depth += 1;
        Ok(())
    }
    pub(crate) fn leave_document(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn read_bytes(&mut self, len: usize, limit: usize) -> Result<&'b [u8]> {
        let bound = self.bound(limit);
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= bound)
            .ok_or(CodecError::Truncated {
                at: self.pos,
                need: len,
                limit: bound,
            })?;
        let buf = self.buf;
        let bytes = &buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn advance(&mut self, len: usize, limit: usize) -> Result<()> {
        self.read_bytes(len, limit)?;
        Ok(())
    }

    fn read_array<const LEN: usize>(&mut self, limit: usize) -> Result<[u8; LEN]> {
        let bytes = self.read_bytes(LEN, limit)?;
        let mut buf = [0u8; LEN];
        buf.copy_from_slice(bytes);
        Ok(buf)
    }

    pub fn read_u8(&mut self, limit: usize) -> Result<u8> {
        Ok(u8::from_le_bytes(self.read_array(limit)?))
    }
    pub fn read_i32(&mut self, limit: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array(limit)?))
    }
    pub fn read_u32(&mut self, limit: usize) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array(limit)?))
    }
    pub fn read_i64(&mut self, limit: usize) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array(limit)?))
    }
    pub fn read_u64(&mut self, limit: usize) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array(limit)?))
    }
    pub fn read_f64(&mut self, limit: usize) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array(limit)?))
    }

    /// Reads a NUL-terminated element name. The NUL is consumed but not returned.
    pub fn read_name(&mut self, limit: usize) -> Result<&'b str> {
        let at = self.pos;
        let buf = self.buf;
        let window = buf.get(at..self.bound(limit)).unwrap_or_default();
        let nul = window
            .iter()
            .position(|b| *b == 0)
            .ok_or(CodecError::Unterminated { at })?;
        let name = str::from_utf8(&window[..nul]).map_err(|_| CodecError::InvalidUtf8 { at })?;
        self.pos += nul + 1;
        Ok(name)
    }

    /// Reads a string payload and returns its bytes with one trailing NUL stripped.
    pub fn read_str_bytes(&mut self, limit: usize) -> Result<&'b [u8]> {
        let len = self.read_u32(limit)?;
        let body = self.read_bytes(len as usize, limit)?;
        match body.split_last() {
            Some((&0, head)) => Ok(head),
            _ => Ok(body),
        }
    }

    pub fn read_string(&mut self, limit: usize) -> Result<String> {
        let at = self.pos;
        let bytes = self.read_str_bytes(limit)?;
        let s = str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 { at })?;
        Ok(s.to_owned())
    }

    /// Reads a binary payload, returning its subtype and body.
    pub fn read_binary(&mut self, limit: usize) -> Result<(u8, &'b [u8])> {
        let len = self.read_u32(limit)?;
        let subtype = self.read_u8(limit)?;
        let body = self.read_bytes(len as usize, limit)?;
        Ok((subtype, body))
    }

    /// Peeks the length prefix of the document starting at the cursor.
    pub fn peek_doc_len(&self, limit: usize) -> Result<u32> {
        let mut peek = self.clone();
        peek.read_u32(limit)
    }

    pub(crate) fn doc_len_prefix_size() -> usize {
        mem::size_of::<u32>()
    }
}
