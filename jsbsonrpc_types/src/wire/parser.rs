use crate::error::{CodecError, Result};
use crate::wire::{DocLen, WireReader, WireType, WireTypeInt, TERMINATOR};
use tracing::trace;


/// What a consumer did with the element it was offered.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Consumed {
    /// The consumer read exactly one payload for the element's tag.
    Handled,
    /// The parser must skip the payload.
    Declined,
}

/// Receives the elements of one document, in wire order.
pub trait ElementConsumer {
    /// `end` is the exclusive end of the document holding this element.
    ///
    /// On [`Consumed::Handled`] the reader must sit right after the payload.
    /// On [`Consumed::Declined`] the reader must not have moved.
    fn consume(
        &mut self,
        tag: WireType,
        name: &str,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<Consumed>;
}

/// Skips everything.
pub struct SkipAll;
impl ElementConsumer for SkipAll {
    fn consume(
        &mut self,
        _: WireType,
        _: &str,
        _: &mut WireReader<'_>,
        _: usize,
    ) -> Result<Consumed> {
        Ok(Consumed::Declined)
    }
}

impl<'b> WireReader<'b> {
    /// Frames the document at the cursor and feeds its elements to `consumer`.
    ///
    /// `limit` bounds the whole document; for a nested document it is the end
    /// of the enclosing one. Returns the document's declared length.
    pub fn parse_document(
        &mut self,
        limit: usize,
        consumer: &mut dyn ElementConsumer,
    ) -> Result<usize> {
        self.enter_document()?;
        let res = self.parse_document_(limit, consumer);
        self.leave_document();
        res
    }

    fn parse_document_(
        &mut self,
        limit: usize,
        consumer: &mut dyn ElementConsumer,
    ) -> Result<usize> {
        /* length */
        let start = self.pos();
        let doc_len = self.read_u32(limit)?;
        if doc_len < DocLen::MIN {
            return Err(CodecError::InvalidDocumentLength {
                at: start,
                len: doc_len,
            });
        }
        let bound = limit.min(self.buf().len());
        let end = start
            .checked_add(doc_len as usize)
            .filter(|end| *end <= bound)
            .ok_or(CodecError::Truncated {
                at: start,
                need: doc_len as usize,
                limit: bound,
            })?;

        /* elements */
        while self.pos() < end {
            let tag_int = WireTypeInt::from(self.read_u8(end)?);
            if *tag_int == TERMINATOR {
                break;
            }
            let tag = WireType::try_from(tag_int)?;
            let name = self.read_name(end)?;

            let before = self.pos();
            match consumer.consume(tag, name, self, end)? {
                Consumed::Handled => {}
                Consumed::Declined => {
                    debug_assert_eq!(before, self.pos());
                    let skipped = self.skip_payload(tag, end)?;
                    trace!(name, ?tag, skipped, "skipped element");
                }
            }
        }

        /* finish */
        if self.pos() != end {
            return Err(CodecError::LengthMismatch {
                expected: end,
                actual: self.pos(),
            });
        }
        Ok(doc_len as usize)
    }

    /// Advances past the payload of `tag` without materializing it.
    ///
    /// The sizes here must agree with what each decoder consumes.
    pub fn skip_payload(&mut self, tag: WireType, limit: usize) -> Result<usize> {
        let start = self.pos();
        if let Some(len) = tag.fixed_payload_len() {
            self.advance(len, limit)?;
            return Ok(len);
        }
        match tag {
            WireType::Str => {
                let len = self.read_u32(limit)?;
                self.advance(len as usize, limit)?;
            }
            WireType::Document | WireType::Array => {
                let len = self.read_u32(limit)?;
                if len < DocLen::MIN {
                    return Err(CodecError::InvalidDocumentLength { at: start, len });
                }
                self.advance(len as usize - Self::doc_len_prefix_size(), limit)?;
            }
            WireType::Binary => {
                let len = self.read_u32(limit)?;
                self.advance(1 + len as usize, limit)?;
            }
            _ => return Err(CodecError::UnsupportedTag(tag)),
        }
        Ok(self.pos() - start)
    }
}
