use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};
use thrift::protocol::TCompactOutputProtocol;
use tracing::{debug, info, warn};

use crate::column::Column;
use crate::error::{ErrorContext, ParquetError, Result};
use crate::metadata::{ColumnChunk, FileMetaData, RowGroup, SchemaElement};

/// Magic bytes opening and closing every file
pub const PARQUET_MAGIC: &[u8] = b"PAR1";

/// Data bytes one row group should hold, used only for the sizing estimate
pub const DATA_BYTES_PER_ROW_GROUP: u64 = 81_920_000;

const FORMAT_VERSION: i32 = 1;

/// [`Write`] wrapper counting the bytes that pass through it, so byte
/// offsets and thrift struct sizes are measured rather than predicted
#[derive(Debug)]
pub struct TrackedWrite<W: Write> {
    inner: W,
    bytes_written: u64,
}

impl<W: Write> TrackedWrite<W> {
    pub fn new(inner: W) -> Self {
        TrackedWrite {
            inner,
            bytes_written: 0,
        }
    }

    /// Bytes written so far, which is the offset the next write lands at
    pub fn position(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for TrackedWrite<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.bytes_written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Writes one file: magic header up front, one data page per leaf column,
/// and a footer carrying the flattened schema and a single row group.
///
/// The writer owns its column tree once [`set_schema`](FileWriter::set_schema)
/// has been called; data is fed through
/// [`column_mut`](FileWriter::column_mut) and the file is completed by
/// [`flush`](FileWriter::flush), which consumes the writer.
#[derive(Debug)]
pub struct FileWriter {
    path: PathBuf,
    sink: TrackedWrite<BufWriter<std::fs::File>>,
    metadata: FileMetaData,
    root: Option<Column>,
}

impl FileWriter {
    /// Create `path` exclusively and write the magic header. Fails if the
    /// file already exists.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<FileWriter> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut sink = TrackedWrite::new(BufWriter::new(file));
        sink.write_all(PARQUET_MAGIC)?;
        debug!("created {}", path.display());
        Ok(FileWriter {
            path,
            sink,
            metadata: FileMetaData {
                version: FORMAT_VERSION,
                schema: Vec::new(),
                num_rows: 0,
                row_groups: Vec::new(),
                created_by: Some(format!("parquet-file version {}", env!("CARGO_PKG_VERSION"))),
            },
            root: None,
        })
    }

    /// Commit a column tree as this file's schema, flattening it depth
    /// first into the footer's element list. Replaces any earlier schema
    /// with a warning.
    pub fn set_schema(&mut self, root: Column) {
        if self.root.is_some() {
            warn!("replacing the schema already set on {}", self.path.display());
        }
        let mut elements = Vec::new();
        flatten(&root, &mut elements);
        self.metadata.schema = elements;
        self.root = Some(root);
    }

    /// The committed schema tree
    pub fn root(&self) -> Option<&Column> {
        self.root.as_ref()
    }

    /// Mutable access to the column at `path`, segments joined by dots and
    /// not including the root's own name
    pub fn column_mut(&mut self, path: &str) -> Result<&mut Column> {
        let root = self.root.as_mut().ok_or_else(|| {
            ParquetError::schema("no schema has been set; column lookup requires one")
        })?;
        let mut current = root;
        for segment in path.split('.') {
            current = match current.child_mut(segment) {
                Some(child) => child,
                None => {
                    return Err(ParquetError::invalid_argument(format!(
                        "no column at path {} in this schema",
                        path
                    )));
                }
            };
        }
        Ok(current)
    }

    /// Total bytes record `index` occupies across all leaf columns
    pub fn record_byte_size(&self, index: usize) -> Result<u64> {
        let root = self.root.as_ref().ok_or_else(|| {
            ParquetError::schema("no schema has been set; record sizes require one")
        })?;
        let mut leaves = Vec::new();
        collect_leaves_below(root, &mut leaves);
        let mut total = 0;
        for leaf in leaves {
            total += leaf.record_byte_size(index)?;
        }
        Ok(total)
    }

    /// How many row groups the buffered data would fill at
    /// [`DATA_BYTES_PER_ROW_GROUP`]. The write path always emits exactly
    /// one row group regardless; this is a sizing estimate for callers.
    pub fn estimated_row_groups(&self) -> Result<u64> {
        let root = self.root.as_ref().ok_or_else(|| {
            ParquetError::schema("no schema has been set; sizing requires one")
        })?;
        let mut leaves = Vec::new();
        collect_leaves_below(root, &mut leaves);
        let data_bytes: u64 = leaves.iter().map(|c| c.data_size_in_bytes()).sum();
        Ok(data_bytes.div_ceil(DATA_BYTES_PER_ROW_GROUP))
    }

    /// Write every leaf column's page and the closing footer, consuming
    /// the writer. Consistency failures surface before any page bytes go
    /// out; the file handle closes when the writer drops.
    pub fn flush(mut self) -> Result<()> {
        let mut root = self.root.take().ok_or_else(|| {
            ParquetError::schema("flush requires a schema; call set_schema first")
        })?;

        let offset = self.sink.position();
        if offset != PARQUET_MAGIC.len() as u64 {
            return Err(ParquetError::data_validation(format!(
                "file {} is at offset {} instead of {}; something else has written to it",
                self.path.display(),
                offset,
                PARQUET_MAGIC.len()
            )));
        }

        let mut elements = Vec::new();
        flatten(&root, &mut elements);
        if elements.len() != self.metadata.schema.len() {
            return Err(ParquetError::data_validation(format!(
                "the column tree flattens to {} schema elements but {} were committed; the tree changed after set_schema",
                elements.len(),
                self.metadata.schema.len()
            )));
        }

        let mut leaves = Vec::new();
        collect_leaves_below_mut(&mut root, &mut leaves);
        if leaves.is_empty() {
            return Err(ParquetError::schema(format!(
                "the schema of {} has no leaf columns below the root; there is nothing to write",
                self.path.display()
            )));
        }
        let num_records = leaves[0].num_records();
        for leaf in &leaves {
            if leaf.num_records() != num_records {
                return Err(ParquetError::data_validation(format!(
                    "column {} holds {} records but column {} holds {}; all columns must describe the same rows",
                    leaves[0].full_schema_path(),
                    num_records,
                    leaf.full_schema_path(),
                    leaf.num_records()
                )));
            }
        }
        if num_records == 0 {
            warn!("writing {} with zero records", self.path.display());
        }

        let data_bytes: u64 = leaves.iter().map(|c| c.data_size_in_bytes()).sum();
        debug!(
            "{} data bytes across {} leaf columns; {} row groups estimated, 1 written",
            data_bytes,
            leaves.len(),
            data_bytes.div_ceil(DATA_BYTES_PER_ROW_GROUP)
        );

        let file_path = self.path.display().to_string();
        let mut chunks = Vec::with_capacity(leaves.len());
        let mut total_byte_size: i64 = 0;
        for leaf in &mut leaves {
            leaf.flush(&mut self.sink)?;
            let meta = leaf.metadata()?;
            total_byte_size += meta.total_uncompressed_size;
            chunks.push(ColumnChunk {
                file_path: Some(file_path.clone()),
                file_offset: meta.data_page_offset,
                meta_data: Some(meta),
            });
        }
        self.metadata.num_rows = num_records as i64;
        self.metadata.row_groups = vec![RowGroup {
            columns: chunks,
            total_byte_size,
            num_rows: num_records as i64,
        }];

        let footer_start = self.sink.position();
        {
            let mut protocol = TCompactOutputProtocol::new(&mut self.sink);
            self.metadata.write(&mut protocol)?;
        }
        let footer_size = self.sink.position() - footer_start;
        self.sink.write_u32::<LittleEndian>(footer_size as u32)?;
        self.sink.write_all(PARQUET_MAGIC)?;
        self.sink
            .flush()
            .with_context(|| format!("failed to flush {}", self.path.display()))?;

        info!(
            "wrote {}: {} rows, {} leaf columns, {} byte footer",
            self.path.display(),
            num_records,
            leaves.len(),
            footer_size
        );
        Ok(())
    }
}

/// Preorder flattening; containers carry a child count, leaves a physical
/// type, never both
fn flatten(column: &Column, elements: &mut Vec<SchemaElement>) {
    elements.push(SchemaElement {
        name: column.name().to_string(),
        repetition: column.repetition(),
        physical_type: column.physical_type(),
        num_children: if column.is_leaf() {
            None
        } else {
            Some(column.children().len() as i32)
        },
    });
    for child in column.children() {
        flatten(child, elements);
    }
}

/// Leaves strictly below `column` in schema traversal order. The node
/// itself never counts, so a tree whose root is a bare leaf yields none.
fn collect_leaves_below<'a>(column: &'a Column, out: &mut Vec<&'a Column>) {
    for child in column.children() {
        if child.is_leaf() {
            out.push(child);
        } else {
            collect_leaves_below(child, out);
        }
    }
}

fn collect_leaves_below_mut<'a>(column: &'a mut Column, out: &mut Vec<&'a mut Column>) {
    for child in column.children_mut() {
        if child.is_leaf() {
            out.push(child);
        } else {
            collect_leaves_below_mut(child, out);
        }
    }
}
