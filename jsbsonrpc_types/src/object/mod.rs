//! Objects with reflected fields.
//!
//! A concrete type embeds an [`ObjectCore`], holds each field in a [`Slot`]
//! (or a [`DynamicSlot`] for polymorphic children), and binds the slots by
//! name in its constructor. A [`DynamicList`] or [`DynamicMap`] in a slot
//! holds several polymorphic children. [`Reflect`] is the only trait it implements by
//! hand; [`Serializable`] follows.
//!
//! An encoded object is a document whose first two elements are
//! [`NAME_KEY`] and [`VERSION_KEY`], followed by the bound fields in binding
//! order.

mod document;
mod dynamic;
mod dynamic_collections;
mod embedded;
mod factory;
mod metadata;
mod object_core;
mod registry;
mod slot;


pub use document::*;
pub use dynamic::*;
pub use dynamic_collections::*;
pub use embedded::*;
pub use factory::*;
pub use metadata::*;
pub use object_core::*;
pub use registry::*;
pub use slot::*;
