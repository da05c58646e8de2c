//! Deserialization options.
//!
//! An option is a named boolean switch that owns one bit of a 32-bit mask.
//! Bits are handed out in declaration order and never reused. Every object
//! carries its own [`ConfigMask`], seeded from a registry's default mask.

use crate::error::{CodecError, Result};
use derive_more::{Deref, From};
use std::sync::{Mutex, OnceLock, PoisonError};

pub const FAIL_ON_UNKNOWN_PROPERTIES: &str = "FAIL_ON_UNKNOWN_PROPERTIES";

#[derive(From, Deref, PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct ConfigMask(u32);
impl ConfigMask {
    pub fn is_enabled(self, option: &DeserOption) -> bool {
        self.0 & option.mask() != 0
    }
    pub fn set(&mut self, option: &DeserOption, enabled: bool) {
        if enabled {
            self.0 |= option.mask();
        } else {
            self.0 &= !option.mask();
        }
    }
    pub fn with(mut self, option: &DeserOption, enabled: bool) -> Self {
        self.set(option, enabled);
        self
    }
}

/// A handle to a declared option. Handles stay valid for the registry's lifetime.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DeserOption {
    name: String,
    bit: u8,
    default_value: bool,
}
impl DeserOption {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn bit(&self) -> u8 {
        self.bit
    }
    pub fn mask(&self) -> u32 {
        1 << self.bit
    }
    pub fn default_value(&self) -> bool {
        self.default_value
    }
}

/// Every registry starts with [`FAIL_ON_UNKNOWN_PROPERTIES`] at bit 0, which
/// is the bit decoders test. Declared options take bits 1 and up.
#[derive(Debug)]
pub struct OptionRegistry {
    options: Mutex<Vec<DeserOption>>,
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self {
            options: Mutex::new(vec![fail_on_unknown_properties()]),
        }
    }
}

impl OptionRegistry {
    pub const MAX_OPTIONS: usize = u32::BITS as usize;

    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next free bit. Declarations are serialized, so concurrent
    /// callers still receive unique bits.
    pub fn declare(&self, name: impl Into<String>, default_value: bool) -> Result<DeserOption> {
        let name = name.into();
        let mut options = self.options.lock().unwrap_or_else(PoisonError::into_inner);
        if options.len() >= Self::MAX_OPTIONS {
            return Err(CodecError::OptionsExhausted(name));
        }
        let option = DeserOption {
            name,
            bit: options.len() as u8,
            default_value,
        };
        options.push(option.clone());
        Ok(option)
    }

    /// OR of the bits of every option whose default is `true`.
    /// Folded on each call, so later declarations are reflected.
    pub fn default_mask(&self) -> ConfigMask {
        let options = self.options.lock().unwrap_or_else(PoisonError::into_inner);
        let mask = options
            .iter()
            .filter(|opt| opt.default_value)
            .fold(0u32, |mask, opt| mask | opt.mask());
        ConfigMask(mask)
    }

    pub fn options(&self) -> Vec<DeserOption> {
        self.options
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.options
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// The process-wide registry and the options the codec itself consults.
#[derive(Debug)]
pub struct StandardOptions {
    pub registry: OptionRegistry,
    /// Reject documents that carry a name no field is bound to.
    /// Off by default: unknown names are skipped.
    pub fail_on_unknown_properties: DeserOption,
}

fn fail_on_unknown_properties() -> DeserOption {
    DeserOption {
        name: FAIL_ON_UNKNOWN_PROPERTIES.to_owned(),
        bit: 0,
        default_value: false,
    }
}

impl StandardOptions {
    fn new() -> Self {
        Self {
            registry: OptionRegistry::new(),
            fail_on_unknown_properties: fail_on_unknown_properties(),
        }
    }
}

pub fn standard_options() -> &'static StandardOptions {
    static STANDARD: OnceLock<StandardOptions> = OnceLock::new();
    STANDARD.get_or_init(StandardOptions::new)
}
