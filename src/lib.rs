//! Columnar file writing with Dremel-style nesting metadata
//!
//! `parquet-file` builds nested columnar files from the ground up: an
//! Avro-style schema tree is converted into a flat column list, callers
//! append values with their repetition and definition levels tracked per
//! value, and a file writer lays out data pages and the footer byte for
//! byte.
//!
//! # Key Components
//!
//! - **Column store**: one [`column::Column`] per schema node
//!   - Containers group children; leaves buffer raw values
//!   - Record descriptors track byte and level spans per logical record
//!   - Pages carry RLE level streams next to plain-encoded values
//!
//! - **Schema conversion**: [`convert::SchemaConverter`]
//!   - Walks records, unions, arrays, and primitives depth first
//!   - Collapses a union of null and one type into a single OPTIONAL column
//!   - Assigns maximum repetition and definition levels at construction
//!
//! - **File writing**: [`writer::FileWriter`]
//!   - Exclusive file creation with the magic header written up front
//!   - Flattens the column tree into the footer's schema element list
//!   - Enforces record-count agreement across leaves before paging
//!
//! # Design Philosophy
//!
//! The writer is single-threaded and single-pass: one row group, plain
//! encoding, no compression. Fatal conditions stop the write immediately
//! rather than recovering into a partially consistent file.

pub mod basic;
pub mod column;
pub mod convert;
pub mod error;
pub mod metadata;
pub mod rle;
pub mod schema;
pub mod writer;

pub use basic::{Compression, Encoding, PageType, PhysicalType, Repetition};
pub use column::{Column, DEFAULT_BUFFER_CAPACITY};
pub use convert::{convert, SchemaConverter};
pub use error::{ErrorContext, ParquetError, Result};
pub use schema::{AvroNode, AvroPrimitive, AvroSchema};
pub use writer::{FileWriter, TrackedWrite, DATA_BYTES_PER_ROW_GROUP, PARQUET_MAGIC};
