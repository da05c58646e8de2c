use crate::codec::WireValue;
use crate::error::Result;
use crate::wire::{DocWriter, WireReader, WireType, WriteLen};
use derive_more::Deref;

/// Storage for one field's value, plus its null flag.
///
/// A null slot is written as a Null element. Decoding a Null element clears
/// the value and sets the flag; any other assignment clears the flag.
#[derive(Deref, PartialEq, Clone, Default, Debug)]
pub struct Slot<T> {
    #[deref]
    value: T,
    null: bool,
}

impl<T> From<T> for Slot<T> {
    fn from(value: T) -> Self {
        Self { value, null: false }
    }
}

impl<T: WireValue> Slot<T> {
    pub fn new(value: T) -> Self {
        Self::from(value)
    }

    pub fn value(&self) -> &T {
        &self.value
    }
    /// Clears the null flag.
    pub fn value_mut(&mut self) -> &mut T {
        self.null = false;
        &mut self.value
    }
    pub fn set(&mut self, value: T) {
        self.null = false;
        self.value = value;
    }
    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.null
    }
    pub fn set_null(&mut self) {
        self.value.clear();
        self.null = true;
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub(crate) fn encode_element(&self, key: &str, w: &mut DocWriter<'_>) -> Result<WriteLen> {
        if self.null {
            return w.element(WireType::Null, key, |_| Ok(()));
        }
        self.value.encode_element(key, w)
    }

    pub(crate) fn decode_payload(
        &mut self,
        tag: WireType,
        r: &mut WireReader<'_>,
        end: usize,
    ) -> Result<usize> {
        if tag == WireType::Null {
            self.set_null();
            return Ok(0);
        }
        let r_len = self.value.decode_payload(tag, r, end)?;
        self.null = false;
        Ok(r_len)
    }
}
