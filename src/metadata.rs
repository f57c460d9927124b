use thrift::protocol::{
    TFieldIdentifier, TListIdentifier, TOutputProtocol, TStructIdentifier, TType,
};

use crate::basic::{Compression, Encoding, PageType, PhysicalType, Repetition};
use crate::error::Result;

/// One flattened schema tree node in the file footer. Containers carry a
/// child count and leaves carry a physical type; the format forbids both.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaElement {
    pub name: String,
    pub repetition: Repetition,
    pub physical_type: Option<PhysicalType>,
    pub num_children: Option<i32>,
}

impl SchemaElement {
    pub fn write(&self, o_prot: &mut dyn TOutputProtocol) -> Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("SchemaElement"))?;
        if let Some(physical_type) = self.physical_type {
            o_prot.write_field_begin(&TFieldIdentifier::new("type", TType::I32, 1))?;
            o_prot.write_i32(physical_type as i32)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_begin(&TFieldIdentifier::new("repetition_type", TType::I32, 3))?;
        o_prot.write_i32(self.repetition as i32)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("name", TType::String, 4))?;
        o_prot.write_string(&self.name)?;
        o_prot.write_field_end()?;
        if let Some(num_children) = self.num_children {
            o_prot.write_field_begin(&TFieldIdentifier::new("num_children", TType::I32, 5))?;
            o_prot.write_i32(num_children)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()?;
        Ok(())
    }
}

/// Header fields specific to data pages
#[derive(Debug, Clone, PartialEq)]
pub struct DataPageHeader {
    pub num_values: i32,
    pub encoding: Encoding,
    pub definition_level_encoding: Encoding,
    pub repetition_level_encoding: Encoding,
}

impl DataPageHeader {
    pub fn write(&self, o_prot: &mut dyn TOutputProtocol) -> Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("DataPageHeader"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_values", TType::I32, 1))?;
        o_prot.write_i32(self.num_values)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("encoding", TType::I32, 2))?;
        o_prot.write_i32(self.encoding as i32)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "definition_level_encoding",
            TType::I32,
            3,
        ))?;
        o_prot.write_i32(self.definition_level_encoding as i32)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "repetition_level_encoding",
            TType::I32,
            4,
        ))?;
        o_prot.write_i32(self.repetition_level_encoding as i32)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()?;
        Ok(())
    }
}

/// Header preceding every page's body
#[derive(Debug, Clone, PartialEq)]
pub struct PageHeader {
    pub page_type: PageType,
    pub uncompressed_page_size: i32,
    pub compressed_page_size: i32,
    pub data_page_header: Option<DataPageHeader>,
}

impl PageHeader {
    pub fn write(&self, o_prot: &mut dyn TOutputProtocol) -> Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("PageHeader"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("type", TType::I32, 1))?;
        o_prot.write_i32(self.page_type as i32)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "uncompressed_page_size",
            TType::I32,
            2,
        ))?;
        o_prot.write_i32(self.uncompressed_page_size)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "compressed_page_size",
            TType::I32,
            3,
        ))?;
        o_prot.write_i32(self.compressed_page_size)?;
        o_prot.write_field_end()?;
        if let Some(ref data_page_header) = self.data_page_header {
            o_prot.write_field_begin(&TFieldIdentifier::new(
                "data_page_header",
                TType::Struct,
                5,
            ))?;
            data_page_header.write(o_prot)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()?;
        Ok(())
    }
}

/// Per-chunk column description embedded in the footer
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetaData {
    pub physical_type: PhysicalType,
    pub encodings: Vec<Encoding>,
    pub path_in_schema: Vec<String>,
    pub codec: Compression,
    pub num_values: i64,
    pub total_uncompressed_size: i64,
    pub total_compressed_size: i64,
    pub data_page_offset: i64,
}

impl ColumnMetaData {
    pub fn write(&self, o_prot: &mut dyn TOutputProtocol) -> Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("ColumnMetaData"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("type", TType::I32, 1))?;
        o_prot.write_i32(self.physical_type as i32)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("encodings", TType::List, 2))?;
        o_prot.write_list_begin(&TListIdentifier::new(TType::I32, self.encodings.len() as i32))?;
        for encoding in &self.encodings {
            o_prot.write_i32(*encoding as i32)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("path_in_schema", TType::List, 3))?;
        o_prot.write_list_begin(&TListIdentifier::new(
            TType::String,
            self.path_in_schema.len() as i32,
        ))?;
        for segment in &self.path_in_schema {
            o_prot.write_string(segment)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("codec", TType::I32, 4))?;
        o_prot.write_i32(self.codec as i32)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_values", TType::I64, 5))?;
        o_prot.write_i64(self.num_values)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "total_uncompressed_size",
            TType::I64,
            6,
        ))?;
        o_prot.write_i64(self.total_uncompressed_size)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new(
            "total_compressed_size",
            TType::I64,
            7,
        ))?;
        o_prot.write_i64(self.total_compressed_size)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("data_page_offset", TType::I64, 9))?;
        o_prot.write_i64(self.data_page_offset)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()?;
        Ok(())
    }
}

/// One column chunk reference inside a row group
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnChunk {
    pub file_path: Option<String>,
    pub file_offset: i64,
    pub meta_data: Option<ColumnMetaData>,
}

impl ColumnChunk {
    pub fn write(&self, o_prot: &mut dyn TOutputProtocol) -> Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("ColumnChunk"))?;
        if let Some(ref file_path) = self.file_path {
            o_prot.write_field_begin(&TFieldIdentifier::new("file_path", TType::String, 1))?;
            o_prot.write_string(file_path)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_begin(&TFieldIdentifier::new("file_offset", TType::I64, 2))?;
        o_prot.write_i64(self.file_offset)?;
        o_prot.write_field_end()?;
        if let Some(ref meta_data) = self.meta_data {
            o_prot.write_field_begin(&TFieldIdentifier::new("meta_data", TType::Struct, 3))?;
            meta_data.write(o_prot)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()?;
        Ok(())
    }
}

/// A horizontal slice of the file: every column chunk for one span of rows
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    pub columns: Vec<ColumnChunk>,
    pub total_byte_size: i64,
    pub num_rows: i64,
}

impl RowGroup {
    pub fn write(&self, o_prot: &mut dyn TOutputProtocol) -> Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("RowGroup"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("columns", TType::List, 1))?;
        o_prot.write_list_begin(&TListIdentifier::new(
            TType::Struct,
            self.columns.len() as i32,
        ))?;
        for column in &self.columns {
            column.write(o_prot)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("total_byte_size", TType::I64, 2))?;
        o_prot.write_i64(self.total_byte_size)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_rows", TType::I64, 3))?;
        o_prot.write_i64(self.num_rows)?;
        o_prot.write_field_end()?;
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()?;
        Ok(())
    }
}

/// The file footer
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetaData {
    pub version: i32,
    pub schema: Vec<SchemaElement>,
    pub num_rows: i64,
    pub row_groups: Vec<RowGroup>,
    pub created_by: Option<String>,
}

impl FileMetaData {
    pub fn write(&self, o_prot: &mut dyn TOutputProtocol) -> Result<()> {
        o_prot.write_struct_begin(&TStructIdentifier::new("FileMetaData"))?;
        o_prot.write_field_begin(&TFieldIdentifier::new("version", TType::I32, 1))?;
        o_prot.write_i32(self.version)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("schema", TType::List, 2))?;
        o_prot.write_list_begin(&TListIdentifier::new(
            TType::Struct,
            self.schema.len() as i32,
        ))?;
        for element in &self.schema {
            element.write(o_prot)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("num_rows", TType::I64, 3))?;
        o_prot.write_i64(self.num_rows)?;
        o_prot.write_field_end()?;
        o_prot.write_field_begin(&TFieldIdentifier::new("row_groups", TType::List, 4))?;
        o_prot.write_list_begin(&TListIdentifier::new(
            TType::Struct,
            self.row_groups.len() as i32,
        ))?;
        for row_group in &self.row_groups {
            row_group.write(o_prot)?;
        }
        o_prot.write_list_end()?;
        o_prot.write_field_end()?;
        if let Some(ref created_by) = self.created_by {
            o_prot.write_field_begin(&TFieldIdentifier::new("created_by", TType::String, 6))?;
            o_prot.write_string(created_by)?;
            o_prot.write_field_end()?;
        }
        o_prot.write_field_stop()?;
        o_prot.write_struct_end()?;
        Ok(())
    }
}
