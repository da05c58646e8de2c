//! Conversion between encoded documents and `serde_json` trees.
//!
//! Works at the document level and knows nothing of field bindings; objects
//! pass through their encoded form.

mod error;
mod from_json;
mod to_json;


pub use error::*;
pub use from_json::*;
pub use to_json::*;
