use indexmap::IndexMap;

use crate::error::{ParquetError, Result};

/// Scalar types that map directly onto a physical column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvroPrimitive {
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl AvroPrimitive {
    pub fn type_name(&self) -> &'static str {
        match self {
            AvroPrimitive::Boolean => "boolean",
            AvroPrimitive::Int => "int",
            AvroPrimitive::Long => "long",
            AvroPrimitive::Float => "float",
            AvroPrimitive::Double => "double",
            AvroPrimitive::Bytes => "bytes",
            AvroPrimitive::String => "string",
        }
    }
}

/// One node of an Avro schema tree
#[derive(Debug, Clone, PartialEq)]
pub enum AvroNode {
    /// Named record with ordered fields
    Record {
        name: String,
        fields: IndexMap<String, AvroNode>,
    },
    /// Union of alternative branches
    Union { branches: Vec<AvroNode> },
    /// Array of homogeneous items
    Array { items: Box<AvroNode> },
    /// Scalar leaf
    Primitive(AvroPrimitive),
    /// Named reference to a type declared elsewhere in the document
    Symbolic { name: String },
    /// The null type; meaningful only inside a union
    Null,
}

impl AvroNode {
    /// Build a record node, rejecting duplicate field names
    pub fn record<S: Into<String>>(name: S, fields: Vec<(String, AvroNode)>) -> Result<AvroNode> {
        let name = name.into();
        let mut table = IndexMap::with_capacity(fields.len());
        for (field_name, node) in fields {
            if table.insert(field_name.clone(), node).is_some() {
                return Err(ParquetError::schema(format!(
                    "record {} declares field {} more than once",
                    name, field_name
                )));
            }
        }
        Ok(AvroNode::Record {
            name,
            fields: table,
        })
    }

    pub fn array(items: AvroNode) -> AvroNode {
        AvroNode::Array {
            items: Box::new(items),
        }
    }

    pub fn union(branches: Vec<AvroNode>) -> AvroNode {
        AvroNode::Union { branches }
    }

    /// The usual Avro spelling of a nullable type: a union of null and `node`
    pub fn optional(node: AvroNode) -> AvroNode {
        AvroNode::union(vec![AvroNode::Null, node])
    }

    pub fn symbolic<S: Into<String>>(name: S) -> AvroNode {
        AvroNode::Symbolic { name: name.into() }
    }

    /// Lowercase Avro name of this node's kind, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            AvroNode::Record { .. } => "record",
            AvroNode::Union { .. } => "union",
            AvroNode::Array { .. } => "array",
            AvroNode::Primitive(primitive) => primitive.type_name(),
            AvroNode::Symbolic { .. } => "symbolic",
            AvroNode::Null => "null",
        }
    }

    /// Declared name for records and symbolic references
    pub fn name(&self) -> Option<&str> {
        match self {
            AvroNode::Record { name, .. } => Some(name),
            AvroNode::Symbolic { name } => Some(name),
            _ => None,
        }
    }

    /// Number of record fields; zero for every other kind
    pub fn field_count(&self) -> usize {
        match self {
            AvroNode::Record { fields, .. } => fields.len(),
            _ => 0,
        }
    }

    /// Record field at `index` in declaration order
    pub fn field_at(&self, index: usize) -> Option<(&str, &AvroNode)> {
        match self {
            AvroNode::Record { fields, .. } => {
                fields.get_index(index).map(|(name, node)| (name.as_str(), node))
            }
            _ => None,
        }
    }
}

/// A complete schema document, rooted at a record
#[derive(Debug, Clone, PartialEq)]
pub struct AvroSchema {
    root: AvroNode,
}

impl AvroSchema {
    pub fn new(root: AvroNode) -> Result<AvroSchema> {
        match &root {
            AvroNode::Record { .. } => Ok(AvroSchema { root }),
            other => Err(ParquetError::schema(format!(
                "a schema must be rooted at a record, not a {}",
                other.type_name()
            ))),
        }
    }

    pub fn root(&self) -> &AvroNode {
        &self.root
    }
}
