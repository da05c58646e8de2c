use crate::codec::WireValue;
use crate::error::Result;
use crate::object::{NAME_KEY, VERSION_KEY};
use crate::wire::{Consumed, ElementConsumer, WireReader, WireType};

/// The identity an encoded object declares about itself.
#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct Metadata {
    pub name: Option<String>,
    pub version: Option<i64>,
    /// The document's declared total length.
    pub doc_len: usize,
}
impl Metadata {
    pub fn both_present(&self) -> bool {
        self.name.is_some() && self.version.is_some()
    }
}

struct MetadataConsumer {
    meta: Metadata,
}
impl ElementConsumer for MetadataConsumer {
    fn consume(
        &mut self,
        tag: WireType,
        name: &str,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<Consumed> {
        match name {
            NAME_KEY => {
                let mut val = String::new();
                val.decode_payload(tag, r, end)?;
                self.meta.name = Some(val);
            }
            VERSION_KEY => {
                let mut val = 0i64;
                val.decode_payload(tag, r, end)?;
                self.meta.version = Some(val);
            }
            _ => return Ok(Consumed::Declined),
        }
        Ok(Consumed::Handled)
    }
}

/// Reads the reserved keys of the document at `offset`, skipping all else.
///
/// The whole document is still validated. Missing keys are reported as
/// `None`, not as errors.
pub fn read_metadata(buf: &[u8], offset: usize) -> Result<Metadata> {
    let r = WireReader::new(buf, offset);
    peek_metadata(&r, buf.len())
}

/// Like [`read_metadata`], from the cursor of `r`, which is left in place.
pub(crate) fn peek_metadata(r: &WireReader<'_>, limit: usize) -> Result<Metadata> {
    let mut peek = r.clone();
    let mut consumer = MetadataConsumer {
        meta: Metadata::default(),
    };
    let doc_len = peek.parse_document(limit, &mut consumer)?;
    consumer.meta.doc_len = doc_len;
    Ok(consumer.meta)
}
