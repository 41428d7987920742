//! Runtime primitives for the shapewire binary codec: type shapes, dynamic
//! values, the byte stream adapter, and the length relay queue.
//!
//! ```
//! use shapewire_schema::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_i32(7);
//! writer.write_f64(3.5);
//! let bytes = writer.data();
//! assert_eq!(bytes.len(), 12);
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_i32(), Ok(7));
//! assert_eq!(reader.read_f64(), Ok(3.5));
//! ```

pub mod error;
pub mod relay;
pub mod shape;
pub mod stream;
pub mod value;

pub use error::*;
pub use relay::*;
pub use shape::*;
pub use stream::*;
pub use value::*;
