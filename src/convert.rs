use tracing::warn;

use crate::basic::{Compression, Encoding, PhysicalType, Repetition};
use crate::column::Column;
use crate::error::{ParquetError, Result};
use crate::schema::{AvroNode, AvroPrimitive, AvroSchema};

/// Physical type stored by a column for each Avro primitive
fn physical_type_for(primitive: AvroPrimitive) -> PhysicalType {
    match primitive {
        AvroPrimitive::Boolean => PhysicalType::Boolean,
        AvroPrimitive::Int => PhysicalType::Int32,
        AvroPrimitive::Long => PhysicalType::Int64,
        AvroPrimitive::Float => PhysicalType::Float,
        AvroPrimitive::Double => PhysicalType::Double,
        AvroPrimitive::Bytes | AvroPrimitive::String => PhysicalType::ByteArray,
    }
}

/// Walks an Avro schema tree depth-first and builds the equivalent column
/// tree, assigning repetition modes and maximum nesting levels on the way
/// down. Each walk produces a complete tree; a later walk replaces it.
#[derive(Debug, Default)]
pub struct SchemaConverter {
    root: Option<Column>,
}

impl SchemaConverter {
    pub fn new() -> SchemaConverter {
        SchemaConverter { root: None }
    }

    /// Convert a schema document into a column tree
    pub fn walk(&mut self, schema: &AvroSchema) -> Result<()> {
        if self.root.is_some() {
            warn!("schema converter already holds a column tree; replacing it");
        }
        self.root = Some(convert_root(schema.root())?);
        Ok(())
    }

    /// The completed tree from the last walk
    pub fn root(&self) -> Option<&Column> {
        self.root.as_ref()
    }

    /// Take ownership of the completed tree, leaving the converter empty
    pub fn take_root(&mut self) -> Option<Column> {
        self.root.take()
    }
}

/// One-shot conversion of a schema document
pub fn convert(schema: &AvroSchema) -> Result<Column> {
    let mut converter = SchemaConverter::new();
    converter.walk(schema)?;
    converter
        .take_root()
        .ok_or_else(|| ParquetError::internal("schema conversion produced no root column"))
}

/// The root record's qualified name becomes the only path segment of the
/// root column and is excluded from every descendant path.
fn convert_root(root: &AvroNode) -> Result<Column> {
    let name = match root {
        AvroNode::Record { name, .. } => name.clone(),
        other => {
            return Err(ParquetError::schema(format!(
                "a schema must be rooted at a record, not a {}",
                other.type_name()
            )));
        }
    };
    let mut column = Column::container(vec![name], Repetition::Required);
    let mut children = Vec::with_capacity(root.field_count());
    for index in 0..root.field_count() {
        let (field_name, node) = match root.field_at(index) {
            Some(field) => field,
            None => {
                return Err(ParquetError::internal(format!(
                    "record field {} disappeared during conversion",
                    index
                )));
            }
        };
        children.push(convert_field(
            node,
            vec![field_name.to_string()],
            false,
            0,
            0,
        )?);
    }
    column.set_children(children)?;
    Ok(column)
}

/// Convert one field. `repeated_depth` and `defined_depth` count the
/// REPEATED and OPTIONAL-or-REPEATED ancestors above this node; the node
/// itself is added here when its own repetition mode calls for it.
fn convert_field(
    node: &AvroNode,
    path: Vec<String>,
    optional: bool,
    repeated_depth: u16,
    defined_depth: u16,
) -> Result<Column> {
    match node {
        AvroNode::Union { branches } => {
            // Arriving with the flag already set means the parent was a
            // union too
            if optional {
                return Err(ParquetError::unsupported(format!(
                    "field {} nests a union inside a union",
                    path.join(".")
                )));
            }
            let inner = non_null_branch(branches, &path)?;
            convert_field(inner, path, true, repeated_depth, defined_depth)
        }
        AvroNode::Array { items } => {
            // A column has exactly one repetition mode, so REPEATED wins
            // over an optional wrapper
            convert_array(items, path, repeated_depth, defined_depth)
        }
        AvroNode::Record { fields, .. } => {
            let repetition = if optional {
                Repetition::Optional
            } else {
                Repetition::Required
            };
            let child_defined_depth = if optional {
                defined_depth + 1
            } else {
                defined_depth
            };
            let mut column = Column::container(path.clone(), repetition);
            let mut children = Vec::with_capacity(fields.len());
            for index in 0..node.field_count() {
                let (field_name, child) = match node.field_at(index) {
                    Some(field) => field,
                    None => {
                        return Err(ParquetError::internal(format!(
                            "record field {} disappeared during conversion",
                            index
                        )));
                    }
                };
                let mut child_path = path.clone();
                child_path.push(field_name.to_string());
                children.push(convert_field(
                    child,
                    child_path,
                    false,
                    repeated_depth,
                    child_defined_depth,
                )?);
            }
            column.set_children(children)?;
            Ok(column)
        }
        AvroNode::Primitive(primitive) => {
            let repetition = if optional {
                Repetition::Optional
            } else {
                Repetition::Required
            };
            let max_definition = if optional {
                defined_depth + 1
            } else {
                defined_depth
            };
            Ok(Column::leaf(
                path,
                physical_type_for(*primitive),
                repeated_depth,
                max_definition,
                repetition,
                Encoding::Plain,
                Compression::Uncompressed,
            ))
        }
        AvroNode::Symbolic { name } => Err(ParquetError::unsupported(format!(
            "field {} references type {} recursively; symbolic references cannot be expanded",
            path.join("."),
            name
        ))),
        AvroNode::Null => Err(ParquetError::schema(format!(
            "field {} is typed null outside a union",
            path.join(".")
        ))),
    }
}

fn convert_array(
    items: &AvroNode,
    path: Vec<String>,
    repeated_depth: u16,
    defined_depth: u16,
) -> Result<Column> {
    match items {
        AvroNode::Primitive(primitive) => Ok(Column::leaf(
            path,
            physical_type_for(*primitive),
            repeated_depth + 1,
            defined_depth + 1,
            Repetition::Repeated,
            Encoding::Plain,
            Compression::Uncompressed,
        )),
        other => Err(ParquetError::unsupported(format!(
            "field {} is an array of {}; only arrays of primitives are supported",
            path.join("."),
            other.type_name()
        ))),
    }
}

fn non_null_branch<'a>(branches: &'a [AvroNode], path: &[String]) -> Result<&'a AvroNode> {
    if branches.len() != 2 {
        return Err(ParquetError::unsupported(format!(
            "field {} is a union of {} branches; only unions of null and one other type are supported",
            path.join("."),
            branches.len()
        )));
    }
    match (&branches[0], &branches[1]) {
        (AvroNode::Null, AvroNode::Null) => Err(ParquetError::unsupported(format!(
            "field {} is a union of two null branches",
            path.join(".")
        ))),
        (AvroNode::Null, other) | (other, AvroNode::Null) => Ok(other),
        _ => Err(ParquetError::unsupported(format!(
            "field {} is a union without a null branch; only unions of null and one other type are supported",
            path.join(".")
        ))),
    }
}
