//! A self-describing binary codec for reflected objects.
//!
//! Objects bind their fields by name and are written as length-prefixed
//! documents of tagged elements. See [`wire`] for the byte layout and
//! [`object`] for the object model.

pub mod codec;
pub mod config;
pub mod error;
pub mod object;
pub mod wire;
