use crate::config::{standard_options, ConfigMask, DeserOption};
use crate::object::FieldRegistry;
use crate::wire::DecodeLimits;

/// Identity, options and field table embedded in every serializable object.
pub struct ObjectCore<O> {
    name: String,
    version: i64,
    config: ConfigMask,
    limits: DecodeLimits,
    pub(crate) fields: FieldRegistry<O>,
}

impl<O> ObjectCore<O> {
    /// Starts with the standard registry's default option mask.
    pub fn new(name: impl Into<String>, version: i64) -> Self {
        let mask = standard_options().registry.default_mask();
        Self::with_options(name, version, mask)
    }

    pub fn with_options(name: impl Into<String>, version: i64, config: ConfigMask) -> Self {
        Self {
            name: name.into(),
            version,
            config,
            limits: DecodeLimits::default(),
            fields: FieldRegistry::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn config(&self) -> ConfigMask {
        self.config
    }
    pub fn set_config(&mut self, config: ConfigMask) {
        self.config = config;
    }
    /// Turns one option on or off, leaving the rest alone.
    pub fn configure(&mut self, option: &DeserOption, enabled: bool) {
        self.config.set(option, enabled);
    }
    pub fn is_enabled(&self, option: &DeserOption) -> bool {
        self.config.is_enabled(option)
    }

    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }
    pub fn set_limits(&mut self, limits: DecodeLimits) {
        self.limits = limits;
    }

    pub fn fields(&self) -> &FieldRegistry<O> {
        &self.fields
    }
}
