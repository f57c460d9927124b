use std::fmt;
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use bytes::{BufMut, BytesMut};
use thrift::protocol::TCompactOutputProtocol;
use tracing::{debug, trace, warn};

use crate::basic::{Compression, Encoding, PageType, PhysicalType, Repetition};
use crate::error::{ParquetError, Result};
use crate::metadata::{ColumnMetaData, DataPageHeader, PageHeader};
use crate::rle::encode_levels;
use crate::writer::TrackedWrite;

/// Default value buffer capacity for leaf columns, in bytes
pub const DEFAULT_BUFFER_CAPACITY: usize = 1_024_000;

fn dotted(path: &[String]) -> String {
    path.join(".")
}

/// A page's byte count as the header's signed 32-bit size field
fn page_size_field(size: u64, path: &[String]) -> Result<i32> {
    i32::try_from(size).map_err(|_| {
        ParquetError::data_validation(format!(
            "column {} holds a {} byte page, too large for the page header size field",
            dotted(path),
            size
        ))
    })
}

/// A payload's byte count as its 4-byte little-endian length prefix
fn length_prefix(len: u64, path: &[String]) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        ParquetError::data_validation(format!(
            "a {} byte payload for column {} does not fit its 4 byte length prefix",
            len,
            dotted(path)
        ))
    })
}

/// Byte and level spans of one logical record. A repeated batch is a
/// single record; a null is a record zero bytes wide.
#[derive(Debug, Clone, Copy)]
struct RecordMetadata {
    level_start: usize,
    level_end: usize,
    byte_start: usize,
    byte_end: usize,
}

/// A node in the column tree: either a container grouping child columns or
/// a leaf buffering values with their repetition and definition levels.
///
/// Identity (path), repetition mode, and for leaves the physical type and
/// maximum levels are fixed at construction; a column changes only through
/// the append operations and a final [`flush`](Column::flush).
#[derive(Debug)]
pub struct Column {
    path: Vec<String>,
    repetition: Repetition,
    kind: ColumnKind,
}

#[derive(Debug)]
enum ColumnKind {
    Container { children: Vec<Column> },
    Leaf(Box<LeafState>),
}

#[derive(Debug)]
struct LeafState {
    physical_type: PhysicalType,
    encoding: Encoding,
    compression: Compression,
    max_repetition_level: u16,
    max_definition_level: u16,
    bytes_per_value: u8,
    capacity: usize,
    buffer: BytesMut,
    repetition_levels: Vec<u16>,
    definition_levels: Vec<u16>,
    records: Vec<RecordMetadata>,
    num_values: u64,
    /// Page body plus page header bytes, set by flush
    uncompressed_size: u64,
    /// File offset of the data page, set by flush
    data_page_offset: Option<u64>,
}

impl LeafState {
    fn ensure_capacity(&self, additional: usize, path: &[String]) -> Result<()> {
        if self.buffer.len() + additional > self.capacity {
            return Err(ParquetError::invalid_argument(format!(
                "writing {} bytes to column {} would exceed its {} byte buffer capacity ({} bytes used)",
                additional,
                dotted(path),
                self.capacity,
                self.buffer.len()
            )));
        }
        Ok(())
    }

    fn data_size(&self) -> u64 {
        match self.physical_type {
            PhysicalType::ByteArray => self
                .records
                .iter()
                .map(|r| (r.byte_end - r.byte_start) as u64)
                .sum(),
            _ => self.bytes_per_value as u64 * self.num_values,
        }
    }
}

impl Column {
    /// Create a container column grouping child columns
    pub fn container(path: Vec<String>, repetition: Repetition) -> Column {
        Column {
            path,
            repetition,
            kind: ColumnKind::Container {
                children: Vec::new(),
            },
        }
    }

    /// Create a leaf column with the default buffer capacity
    pub fn leaf(
        path: Vec<String>,
        physical_type: PhysicalType,
        max_repetition_level: u16,
        max_definition_level: u16,
        repetition: Repetition,
        encoding: Encoding,
        compression: Compression,
    ) -> Column {
        Column::leaf_with_capacity(
            path,
            physical_type,
            max_repetition_level,
            max_definition_level,
            repetition,
            encoding,
            compression,
            DEFAULT_BUFFER_CAPACITY,
        )
    }

    /// Create a leaf column with an explicit buffer capacity
    #[allow(clippy::too_many_arguments)]
    pub fn leaf_with_capacity(
        path: Vec<String>,
        physical_type: PhysicalType,
        max_repetition_level: u16,
        max_definition_level: u16,
        repetition: Repetition,
        encoding: Encoding,
        compression: Compression,
        capacity: usize,
    ) -> Column {
        Column {
            path,
            repetition,
            kind: ColumnKind::Leaf(Box::new(LeafState {
                physical_type,
                encoding,
                compression,
                max_repetition_level,
                max_definition_level,
                bytes_per_value: physical_type.bytes_per_value(),
                capacity,
                buffer: BytesMut::with_capacity(capacity.min(DEFAULT_BUFFER_CAPACITY)),
                repetition_levels: Vec::new(),
                definition_levels: Vec::new(),
                records: Vec::new(),
                num_values: 0,
                uncompressed_size: 0,
                data_page_offset: None,
            })),
        }
    }

    /// Last path segment, or the empty string for an empty path
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or("")
    }

    /// Path segments from just below the schema root down to this column
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Path segments joined with dots
    pub fn full_schema_path(&self) -> String {
        dotted(&self.path)
    }

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, ColumnKind::Leaf(_))
    }

    /// Child columns; empty for leaves
    pub fn children(&self) -> &[Column] {
        match &self.kind {
            ColumnKind::Container { children } => children,
            ColumnKind::Leaf(_) => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Column] {
        match &mut self.kind {
            ColumnKind::Container { children } => children,
            ColumnKind::Leaf(_) => &mut [],
        }
    }

    /// Mutable access to the direct child named `name`
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Column> {
        match &mut self.kind {
            ColumnKind::Container { children } => {
                children.iter_mut().find(|child| child.name() == name)
            }
            ColumnKind::Leaf(_) => None,
        }
    }

    pub fn physical_type(&self) -> Option<PhysicalType> {
        match &self.kind {
            ColumnKind::Leaf(leaf) => Some(leaf.physical_type),
            ColumnKind::Container { .. } => None,
        }
    }

    pub fn encoding(&self) -> Option<Encoding> {
        match &self.kind {
            ColumnKind::Leaf(leaf) => Some(leaf.encoding),
            ColumnKind::Container { .. } => None,
        }
    }

    pub fn compression(&self) -> Option<Compression> {
        match &self.kind {
            ColumnKind::Leaf(leaf) => Some(leaf.compression),
            ColumnKind::Container { .. } => None,
        }
    }

    pub fn max_repetition_level(&self) -> Option<u16> {
        match &self.kind {
            ColumnKind::Leaf(leaf) => Some(leaf.max_repetition_level),
            ColumnKind::Container { .. } => None,
        }
    }

    pub fn max_definition_level(&self) -> Option<u16> {
        match &self.kind {
            ColumnKind::Leaf(leaf) => Some(leaf.max_definition_level),
            ColumnKind::Container { .. } => None,
        }
    }

    /// Number of logical records appended so far; zero for containers
    pub fn num_records(&self) -> usize {
        match &self.kind {
            ColumnKind::Leaf(leaf) => leaf.records.len(),
            ColumnKind::Container { .. } => 0,
        }
    }

    /// Number of buffered values; nulls contribute nothing
    pub fn num_values(&self) -> u64 {
        match &self.kind {
            ColumnKind::Leaf(leaf) => leaf.num_values,
            ColumnKind::Container { .. } => 0,
        }
    }

    /// Byte span of record `index` in the value buffer
    pub fn record_byte_size(&self, index: usize) -> Result<u64> {
        let records: &[RecordMetadata] = match &self.kind {
            ColumnKind::Leaf(leaf) => &leaf.records,
            ColumnKind::Container { .. } => &[],
        };
        let record = records.get(index).ok_or_else(|| {
            ParquetError::invalid_argument(format!(
                "record {} requested from column {}, which has {} records",
                index,
                self.full_schema_path(),
                records.len()
            ))
        })?;
        Ok((record.byte_end - record.byte_start) as u64)
    }

    /// Raw value bytes this column would contribute to a page. Containers
    /// hold no data; byte-array columns sum their record spans.
    pub fn data_size_in_bytes(&self) -> u64 {
        match &self.kind {
            ColumnKind::Leaf(leaf) => leaf.data_size(),
            ColumnKind::Container { .. } => 0,
        }
    }

    /// Attach one child to a container
    pub fn add_child(&mut self, child: Column) -> Result<()> {
        match &mut self.kind {
            ColumnKind::Container { children } => {
                children.push(child);
                Ok(())
            }
            ColumnKind::Leaf(_) => Err(ParquetError::schema(format!(
                "cannot add a child to leaf column {}",
                dotted(&self.path)
            ))),
        }
    }

    /// Replace a container's children, warning if any already exist
    pub fn set_children(&mut self, new_children: Vec<Column>) -> Result<()> {
        match &mut self.kind {
            ColumnKind::Container { children } => {
                if !children.is_empty() {
                    warn!(
                        "clearing {} pre-existing children in column {}",
                        children.len(),
                        dotted(&self.path)
                    );
                }
                *children = new_children;
                Ok(())
            }
            ColumnKind::Leaf(_) => Err(ParquetError::schema(format!(
                "cannot set children on leaf column {}",
                dotted(&self.path)
            ))),
        }
    }

    /// Append `count` independent fixed-width values from `data`. Each
    /// value becomes its own record with the given repetition level and
    /// the column's maximum definition level. Repeated continuation data
    /// must go through [`add_repeated_batch`](Column::add_repeated_batch).
    pub fn add_records(&mut self, data: &[u8], repetition_level: u16, count: usize) -> Result<()> {
        let leaf = match &mut self.kind {
            ColumnKind::Leaf(leaf) => leaf,
            ColumnKind::Container { .. } => {
                return Err(ParquetError::invalid_argument(format!(
                    "add_records called on container column {}",
                    dotted(&self.path)
                )));
            }
        };
        if leaf.physical_type == PhysicalType::ByteArray {
            return Err(ParquetError::invalid_argument(format!(
                "add_records stores fixed width values; use add_variable_length for byte array column {}",
                dotted(&self.path)
            )));
        }
        if repetition_level >= leaf.max_repetition_level {
            return Err(ParquetError::invalid_argument(format!(
                "repetition level {} must be below the maximum {} for column {}; repeated data goes through add_repeated_batch",
                repetition_level,
                leaf.max_repetition_level,
                dotted(&self.path)
            )));
        }
        let width = leaf.bytes_per_value as usize;
        if data.len() != width * count {
            return Err(ParquetError::invalid_argument(format!(
                "expected {} bytes for {} values of {} in column {}, got {}",
                width * count,
                count,
                leaf.physical_type,
                dotted(&self.path),
                data.len()
            )));
        }
        leaf.ensure_capacity(data.len(), &self.path)?;

        for value in data.chunks_exact(width) {
            let level_index = leaf.definition_levels.len();
            let byte_start = leaf.buffer.len();
            leaf.buffer.extend_from_slice(value);
            leaf.repetition_levels.push(repetition_level);
            leaf.definition_levels.push(leaf.max_definition_level);
            leaf.records.push(RecordMetadata {
                level_start: level_index,
                level_end: level_index + 1,
                byte_start,
                byte_end: byte_start + width,
            });
        }
        leaf.num_values += count as u64;
        Ok(())
    }

    /// Append one fixed-width value `count` times, each occurrence its own
    /// record, with the same level semantics as
    /// [`add_records`](Column::add_records)
    pub fn add_value_as_records(
        &mut self,
        value: &[u8],
        repetition_level: u16,
        count: usize,
    ) -> Result<()> {
        let leaf = match &mut self.kind {
            ColumnKind::Leaf(leaf) => leaf,
            ColumnKind::Container { .. } => {
                return Err(ParquetError::invalid_argument(format!(
                    "add_value_as_records called on container column {}",
                    dotted(&self.path)
                )));
            }
        };
        if leaf.physical_type == PhysicalType::ByteArray {
            return Err(ParquetError::invalid_argument(format!(
                "add_value_as_records stores fixed width values; use add_variable_length for byte array column {}",
                dotted(&self.path)
            )));
        }
        if repetition_level >= leaf.max_repetition_level {
            return Err(ParquetError::invalid_argument(format!(
                "repetition level {} must be below the maximum {} for column {}",
                repetition_level,
                leaf.max_repetition_level,
                dotted(&self.path)
            )));
        }
        let width = leaf.bytes_per_value as usize;
        if value.len() != width {
            return Err(ParquetError::invalid_argument(format!(
                "value of {} bytes does not match the {} byte width of {} column {}",
                value.len(),
                width,
                leaf.physical_type,
                dotted(&self.path)
            )));
        }
        leaf.ensure_capacity(width * count, &self.path)?;

        for _ in 0..count {
            let level_index = leaf.definition_levels.len();
            let byte_start = leaf.buffer.len();
            leaf.buffer.extend_from_slice(value);
            leaf.repetition_levels.push(repetition_level);
            leaf.definition_levels.push(leaf.max_definition_level);
            leaf.records.push(RecordMetadata {
                level_start: level_index,
                level_end: level_index + 1,
                byte_start,
                byte_end: byte_start + width,
            });
        }
        leaf.num_values += count as u64;
        Ok(())
    }

    /// Append `count` values from `data` as ONE record: the first value
    /// carries the given repetition level, the rest the maximum. Only
    /// REPEATED columns accept batches.
    pub fn add_repeated_batch(
        &mut self,
        data: &[u8],
        repetition_level: u16,
        count: usize,
    ) -> Result<()> {
        if self.repetition != Repetition::Repeated {
            return Err(ParquetError::invalid_argument(format!(
                "add_repeated_batch requires a REPEATED column; {} is {}",
                dotted(&self.path),
                self.repetition
            )));
        }
        let leaf = match &mut self.kind {
            ColumnKind::Leaf(leaf) => leaf,
            ColumnKind::Container { .. } => {
                return Err(ParquetError::invalid_argument(format!(
                    "add_repeated_batch called on container column {}",
                    dotted(&self.path)
                )));
            }
        };
        if leaf.physical_type == PhysicalType::ByteArray {
            return Err(ParquetError::invalid_argument(format!(
                "add_repeated_batch stores fixed width values; use add_variable_length for byte array column {}",
                dotted(&self.path)
            )));
        }
        if count == 0 {
            return Err(ParquetError::invalid_argument(format!(
                "a repeated batch for column {} must contain at least one value",
                dotted(&self.path)
            )));
        }
        if repetition_level > leaf.max_repetition_level {
            return Err(ParquetError::invalid_argument(format!(
                "repetition level {} exceeds the maximum {} for column {}",
                repetition_level,
                leaf.max_repetition_level,
                dotted(&self.path)
            )));
        }
        let width = leaf.bytes_per_value as usize;
        if data.len() != width * count {
            return Err(ParquetError::invalid_argument(format!(
                "expected {} bytes for {} values of {} in column {}, got {}",
                width * count,
                count,
                leaf.physical_type,
                dotted(&self.path),
                data.len()
            )));
        }
        leaf.ensure_capacity(data.len(), &self.path)?;

        let level_start = leaf.definition_levels.len();
        let byte_start = leaf.buffer.len();
        leaf.buffer.extend_from_slice(data);
        leaf.repetition_levels.push(repetition_level);
        leaf.repetition_levels
            .extend(std::iter::repeat(leaf.max_repetition_level).take(count - 1));
        leaf.definition_levels
            .extend(std::iter::repeat(leaf.max_definition_level).take(count));
        leaf.records.push(RecordMetadata {
            level_start,
            level_end: level_start + count,
            byte_start,
            byte_end: byte_start + data.len(),
        });
        leaf.num_values += count as u64;
        Ok(())
    }

    /// Append `count` zero-byte records marking absent values, each with
    /// the given level pair. Only OPTIONAL columns take nulls, and the
    /// definition level must sit below the maximum.
    pub fn add_nulls(
        &mut self,
        repetition_level: u16,
        definition_level: u16,
        count: usize,
    ) -> Result<()> {
        if self.repetition != Repetition::Optional {
            return Err(ParquetError::invalid_argument(format!(
                "add_nulls requires an OPTIONAL column; {} is {}",
                dotted(&self.path),
                self.repetition
            )));
        }
        let leaf = match &mut self.kind {
            ColumnKind::Leaf(leaf) => leaf,
            ColumnKind::Container { .. } => {
                return Err(ParquetError::invalid_argument(format!(
                    "add_nulls called on container column {}",
                    dotted(&self.path)
                )));
            }
        };
        if definition_level >= leaf.max_definition_level {
            return Err(ParquetError::invalid_argument(format!(
                "a null's definition level {} must be below the maximum {} for column {}",
                definition_level,
                leaf.max_definition_level,
                dotted(&self.path)
            )));
        }

        for _ in 0..count {
            let level_index = leaf.definition_levels.len();
            let byte_offset = leaf.buffer.len();
            leaf.repetition_levels.push(repetition_level);
            leaf.definition_levels.push(definition_level);
            leaf.records.push(RecordMetadata {
                level_start: level_index,
                level_end: level_index + 1,
                byte_start: byte_offset,
                byte_end: byte_offset,
            });
        }
        Ok(())
    }

    /// Append one variable-length byte-array record, stored as a 4-byte
    /// little-endian length prefix followed by the payload
    pub fn add_variable_length(&mut self, data: &[u8], repetition_level: u16) -> Result<()> {
        let leaf = match &mut self.kind {
            ColumnKind::Leaf(leaf) => leaf,
            ColumnKind::Container { .. } => {
                return Err(ParquetError::invalid_argument(format!(
                    "add_variable_length called on container column {}",
                    dotted(&self.path)
                )));
            }
        };
        if leaf.physical_type != PhysicalType::ByteArray {
            return Err(ParquetError::invalid_argument(format!(
                "add_variable_length requires a byte array column; {} is {}",
                dotted(&self.path),
                leaf.physical_type
            )));
        }
        if data.is_empty() {
            return Err(ParquetError::invalid_argument(format!(
                "variable length payloads for column {} must not be empty",
                dotted(&self.path)
            )));
        }
        let prefix = length_prefix(data.len() as u64, &self.path)?;
        leaf.ensure_capacity(4 + data.len(), &self.path)?;

        let level_index = leaf.definition_levels.len();
        let byte_start = leaf.buffer.len();
        leaf.buffer.put_u32_le(prefix);
        leaf.buffer.extend_from_slice(data);
        leaf.repetition_levels.push(repetition_level);
        leaf.definition_levels.push(leaf.max_definition_level);
        leaf.records.push(RecordMetadata {
            level_start: level_index,
            level_end: level_index + 1,
            byte_start,
            byte_end: byte_start + 4 + data.len(),
        });
        leaf.num_values += 1;
        Ok(())
    }

    /// Write this leaf's data page at the sink's current offset: compact
    /// thrift page header, the level blocks that apply (each prefixed with
    /// its 4-byte little-endian length), then the raw values. Records the
    /// page offset and the total uncompressed size for
    /// [`metadata`](Column::metadata).
    pub fn flush<W: Write>(&mut self, sink: &mut TrackedWrite<W>) -> Result<()> {
        let repetition = self.repetition;
        let leaf = match &mut self.kind {
            ColumnKind::Leaf(leaf) => leaf,
            ColumnKind::Container { .. } => {
                return Err(ParquetError::invalid_argument(format!(
                    "flush called on container column {}",
                    dotted(&self.path)
                )));
            }
        };
        if leaf.encoding != Encoding::Plain {
            return Err(ParquetError::unsupported(format!(
                "column {} uses {} encoding; only {} pages can be written",
                dotted(&self.path),
                leaf.encoding,
                Encoding::Plain
            )));
        }
        if leaf.compression != Compression::Uncompressed {
            return Err(ParquetError::unsupported(format!(
                "column {} uses {} compression; only {} pages can be written",
                dotted(&self.path),
                leaf.compression,
                Compression::Uncompressed
            )));
        }

        let offset = sink.position();
        leaf.data_page_offset = Some(offset);

        let data_size = leaf.data_size();
        debug_assert_eq!(data_size as usize, leaf.buffer.len());
        debug_assert_eq!(leaf.repetition_levels.len(), leaf.definition_levels.len());
        debug_assert_eq!(
            leaf.records
                .iter()
                .map(|r| r.level_end - r.level_start)
                .sum::<usize>(),
            leaf.definition_levels.len()
        );

        let repetition_level_bytes = if repetition == Repetition::Repeated {
            encode_levels(&leaf.repetition_levels, leaf.max_repetition_level)?
        } else {
            Vec::new()
        };
        let definition_level_bytes =
            if matches!(repetition, Repetition::Repeated | Repetition::Optional) {
                encode_levels(&leaf.definition_levels, leaf.max_definition_level)?
            } else {
                Vec::new()
            };
        trace!(
            "column {}: {} repetition level bytes, {} definition level bytes for {} level entries",
            dotted(&self.path),
            repetition_level_bytes.len(),
            definition_level_bytes.len(),
            leaf.definition_levels.len()
        );

        let mut page_size =
            data_size + repetition_level_bytes.len() as u64 + definition_level_bytes.len() as u64;
        if !repetition_level_bytes.is_empty() {
            page_size += 4;
        }
        if !definition_level_bytes.is_empty() {
            page_size += 4;
        }

        let page_size_i32 = page_size_field(page_size, &self.path)?;
        let header = PageHeader {
            page_type: PageType::DataPage,
            uncompressed_page_size: page_size_i32,
            compressed_page_size: page_size_i32,
            data_page_header: Some(DataPageHeader {
                num_values: leaf.definition_levels.len() as i32,
                encoding: leaf.encoding,
                definition_level_encoding: Encoding::Rle,
                repetition_level_encoding: Encoding::Rle,
            }),
        };
        {
            let mut protocol = TCompactOutputProtocol::new(&mut *sink);
            header.write(&mut protocol)?;
        }
        let header_size = sink.position() - offset;
        leaf.uncompressed_size = page_size + header_size;

        if !repetition_level_bytes.is_empty() {
            sink.write_u32::<LittleEndian>(repetition_level_bytes.len() as u32)?;
            sink.write_all(&repetition_level_bytes)?;
        }
        if !definition_level_bytes.is_empty() {
            sink.write_u32::<LittleEndian>(definition_level_bytes.len() as u32)?;
            sink.write_all(&definition_level_bytes)?;
        }
        sink.write_all(&leaf.buffer)?;

        debug!(
            "wrote column {} at offset {}: {} records, {} values, {} data bytes, {} header bytes",
            dotted(&self.path),
            offset,
            leaf.records.len(),
            leaf.definition_levels.len(),
            data_size,
            header_size
        );
        Ok(())
    }

    /// Footer metadata for this column's chunk; valid only after flush
    pub fn metadata(&self) -> Result<ColumnMetaData> {
        let leaf = match &self.kind {
            ColumnKind::Leaf(leaf) => leaf,
            ColumnKind::Container { .. } => {
                return Err(ParquetError::invalid_argument(format!(
                    "metadata requested for container column {}",
                    self.full_schema_path()
                )));
            }
        };
        let data_page_offset = leaf.data_page_offset.ok_or_else(|| {
            ParquetError::invalid_argument(format!(
                "metadata requested for column {} before it was flushed",
                self.full_schema_path()
            ))
        })?;
        Ok(ColumnMetaData {
            physical_type: leaf.physical_type,
            encodings: vec![leaf.encoding],
            path_in_schema: self.path.clone(),
            codec: leaf.compression,
            num_values: leaf.definition_levels.len() as i64,
            total_uncompressed_size: leaf.uncompressed_size as i64,
            total_compressed_size: leaf.uncompressed_size as i64,
            data_page_offset: data_page_offset as i64,
        })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ColumnKind::Container { children } => write!(
                f,
                "{}/{}/{} children",
                self.full_schema_path(),
                self.repetition,
                children.len()
            ),
            ColumnKind::Leaf(leaf) => write!(
                f,
                "{}/{}/{}/{} records/{} values/{} bytes per value",
                self.full_schema_path(),
                self.repetition,
                leaf.physical_type,
                leaf.records.len(),
                leaf.num_values,
                leaf.bytes_per_value
            ),
        }
    }
}
