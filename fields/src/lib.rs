//! Byte-aligned field primitives for world map messages.
//!
//! This crate provides [`FieldWriter`] and [`FieldReader`] for encoding and
//! decoding the scalar fields that make up a message body: little-endian
//! integers, booleans, varints, length-prefixed strings and fixed-size ids.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked, strings against a caller limit.
//! - **No domain knowledge** - This crate knows nothing about regions, items, or requests.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use fields::{FieldReader, FieldWriter};
//!
//! let mut writer = FieldWriter::new();
//! writer.write_u16(1000);
//! writer.write_str("Ahern").unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = FieldReader::new(&bytes);
//! assert_eq!(reader.read_u16().unwrap(), 1000);
//! assert_eq!(reader.read_str(255).unwrap(), "Ahern");
//! ```

mod error;
mod reader;
mod writer;

pub use error::{FieldError, FieldResult};
pub use reader::FieldReader;
pub use writer::FieldWriter;
