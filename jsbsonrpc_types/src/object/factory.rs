use crate::object::{ObjectFactory, Serializable};
use std::collections::HashMap;

type Constructor = Box<dyn Fn() -> Box<dyn Serializable> + Send + Sync>;

/// An [`ObjectFactory`] that looks constructors up by wire name.
///
/// A constructor registered for a specific version wins over one registered
/// for the name alone.
#[derive(Default)]
pub struct FactoryRegistry {
    by_version: HashMap<(String, i64), Constructor>,
    by_name: HashMap<String, Constructor>,
    fallback: Option<Constructor>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, ctor: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Serializable> + Send + Sync + 'static,
    {
        self.by_name.insert(name.into(), Box::new(ctor));
        self
    }

    pub fn register_version<F>(&mut self, name: impl Into<String>, version: i64, ctor: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Serializable> + Send + Sync + 'static,
    {
        self.by_version.insert((name.into(), version), Box::new(ctor));
        self
    }

    /// Used when the wire names nothing registered, or carries no identity.
    pub fn set_fallback<F>(&mut self, ctor: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Serializable> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(ctor));
        self
    }
}

impl ObjectFactory for FactoryRegistry {
    fn create(&self) -> Option<Box<dyn Serializable>> {
        self.fallback.as_ref().map(|ctor| ctor())
    }

    fn create_for(&self, name: &str, version: i64) -> Option<Box<dyn Serializable>> {
        self.by_version
            .get(&(name.to_owned(), version))
            .or_else(|| self.by_name.get(name))
            .map(|ctor| ctor())
    }
}
