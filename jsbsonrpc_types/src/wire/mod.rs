//! # Wire format
//!
//! Every value lives inside a document. Documents nest; the top-level one
//! holds an object, nested ones hold lists, maps and other objects.
//!
//! All integers are little-endian. All lengths are `u32`.
//!
//! ```text
//! struct Document {
//!     total_len:      u32,        // counts itself and the terminator
//!     elements:       [Element],
//!     terminator:     u8,         // 0x00
//! }
//!
//! struct Element {
//!     tag:            u8,         // see `WireType`
//!     name:           [u8],       // UTF-8, no embedded NUL
//!     name_nul:       u8,
//!     payload:        ...,        // depends on tag
//! }
//!
//! payload Double | UtcDateTime | Timestamp | Int64 {
//!     body:           [u8; 8],
//! }
//! payload Int32 {
//!     body:           [u8; 4],
//! }
//! payload Bool {
//!     body:           u8,
//! }
//! payload Null {
//!     // (empty)
//! }
//! payload Str {
//!     len:            u32,        // counts the trailing NUL
//!     body:           [u8; len - 1],
//!     nul:            u8,
//! }
//! payload Binary {
//!     len:            u32,
//!     subtype:        u8,         // always 0x00 when written
//!     body:           [u8; len],
//! }
//! payload Document | Array {
//!     body:           Document,   // array element names are "0", "1", ...
//! }
//! ```
//!
//! Because each document carries its own length, a reader can always skip a
//! payload it does not understand, given only its tag.

mod lengths;
mod parser;
mod reader;
mod wire_type;
mod writer;

pub use lengths::*;
pub use parser::*;
pub use reader::*;
pub use wire_type::*;
pub use writer::*;
