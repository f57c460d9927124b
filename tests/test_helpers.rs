use std::io::Cursor;
use std::ops::Range;

use parquet_file::{Column, Compression, Encoding, PhysicalType, Repetition};
use thrift::protocol::{TCompactInputProtocol, TInputProtocol, TType};

// =============================================================================
// Column tree builders
// =============================================================================

/// Leaf column constructed the way callers build simple flat schemas by
/// hand: maximum levels of one in both dimensions
pub fn leaf_of(name: &str, physical_type: PhysicalType, repetition: Repetition) -> Column {
    Column::leaf(
        vec![name.to_string()],
        physical_type,
        1,
        1,
        repetition,
        Encoding::Plain,
        Compression::Uncompressed,
    )
}

pub fn int32_leaf(name: &str, repetition: Repetition) -> Column {
    leaf_of(name, PhysicalType::Int32, repetition)
}

/// Required root container holding the given children
pub fn required_root(children: Vec<Column>) -> Column {
    let mut root = Column::container(vec!["root".to_string()], Repetition::Required);
    root.set_children(children).unwrap();
    root
}

/// Little-endian bytes of a run of sequential int32 values
pub fn le_int32s(values: Range<i32>) -> Vec<u8> {
    values.flat_map(|v| v.to_le_bytes()).collect()
}

// =============================================================================
// Wire format decoding
// =============================================================================

#[derive(Debug)]
pub struct DecodedSchemaElement {
    pub physical_type: Option<i32>,
    pub repetition: Option<i32>,
    pub name: String,
    pub num_children: Option<i32>,
}

#[derive(Debug)]
pub struct DecodedColumnMeta {
    pub physical_type: i32,
    pub encodings: Vec<i32>,
    pub path_in_schema: Vec<String>,
    pub codec: i32,
    pub num_values: i64,
    pub total_uncompressed_size: i64,
    pub total_compressed_size: i64,
    pub data_page_offset: i64,
}

#[derive(Debug)]
pub struct DecodedChunk {
    pub file_path: Option<String>,
    pub file_offset: i64,
    pub meta: Option<DecodedColumnMeta>,
}

#[derive(Debug)]
pub struct DecodedRowGroup {
    pub columns: Vec<DecodedChunk>,
    pub total_byte_size: i64,
    pub num_rows: i64,
}

#[derive(Debug)]
pub struct DecodedFooter {
    pub version: i32,
    pub schema: Vec<DecodedSchemaElement>,
    pub num_rows: i64,
    pub row_groups: Vec<DecodedRowGroup>,
    pub created_by: Option<String>,
}

#[derive(Debug)]
pub struct DecodedPageHeader {
    pub page_type: i32,
    pub uncompressed_page_size: i32,
    pub compressed_page_size: i32,
    pub num_values: i32,
    pub encoding: i32,
    pub definition_level_encoding: i32,
    pub repetition_level_encoding: i32,
    /// Compact-encoded header length in bytes
    pub header_size: usize,
}

/// Check the framing of a finished file and decode its footer metadata
pub fn read_footer(bytes: &[u8]) -> DecodedFooter {
    assert!(bytes.len() >= 12, "file of {} bytes cannot be complete", bytes.len());
    assert_eq!(&bytes[..4], b"PAR1", "missing magic header");
    assert_eq!(&bytes[bytes.len() - 4..], b"PAR1", "missing magic trailer");

    let length_at = bytes.len() - 8;
    let footer_len =
        u32::from_le_bytes(bytes[length_at..length_at + 4].try_into().unwrap()) as usize;
    assert!(footer_len <= length_at - 4, "footer length {} overruns the file", footer_len);

    let footer = &bytes[length_at - footer_len..length_at];
    let mut cursor = Cursor::new(footer);
    let mut protocol = TCompactInputProtocol::new(&mut cursor);
    read_file_metadata(&mut protocol)
}

/// Decode the page header starting at `offset`
pub fn read_page_header(bytes: &[u8], offset: usize) -> DecodedPageHeader {
    let mut cursor = Cursor::new(&bytes[offset..]);
    let mut header = DecodedPageHeader {
        page_type: -1,
        uncompressed_page_size: -1,
        compressed_page_size: -1,
        num_values: -1,
        encoding: -1,
        definition_level_encoding: -1,
        repetition_level_encoding: -1,
        header_size: 0,
    };
    {
        let mut protocol = TCompactInputProtocol::new(&mut cursor);
        protocol.read_struct_begin().unwrap();
        loop {
            let field = protocol.read_field_begin().unwrap();
            if field.field_type == TType::Stop {
                break;
            }
            match field.id {
                Some(1) => header.page_type = protocol.read_i32().unwrap(),
                Some(2) => header.uncompressed_page_size = protocol.read_i32().unwrap(),
                Some(3) => header.compressed_page_size = protocol.read_i32().unwrap(),
                Some(5) => read_data_page_header(&mut protocol, &mut header),
                _ => protocol.skip(field.field_type).unwrap(),
            }
            protocol.read_field_end().unwrap();
        }
        protocol.read_struct_end().unwrap();
    }
    header.header_size = cursor.position() as usize;
    header
}

fn read_data_page_header(protocol: &mut dyn TInputProtocol, header: &mut DecodedPageHeader) {
    protocol.read_struct_begin().unwrap();
    loop {
        let field = protocol.read_field_begin().unwrap();
        if field.field_type == TType::Stop {
            break;
        }
        match field.id {
            Some(1) => header.num_values = protocol.read_i32().unwrap(),
            Some(2) => header.encoding = protocol.read_i32().unwrap(),
            Some(3) => header.definition_level_encoding = protocol.read_i32().unwrap(),
            Some(4) => header.repetition_level_encoding = protocol.read_i32().unwrap(),
            _ => protocol.skip(field.field_type).unwrap(),
        }
        protocol.read_field_end().unwrap();
    }
    protocol.read_struct_end().unwrap();
}

fn read_file_metadata(protocol: &mut dyn TInputProtocol) -> DecodedFooter {
    let mut footer = DecodedFooter {
        version: -1,
        schema: Vec::new(),
        num_rows: -1,
        row_groups: Vec::new(),
        created_by: None,
    };
    protocol.read_struct_begin().unwrap();
    loop {
        let field = protocol.read_field_begin().unwrap();
        if field.field_type == TType::Stop {
            break;
        }
        match field.id {
            Some(1) => footer.version = protocol.read_i32().unwrap(),
            Some(2) => {
                let list = protocol.read_list_begin().unwrap();
                for _ in 0..list.size {
                    footer.schema.push(read_schema_element(protocol));
                }
                protocol.read_list_end().unwrap();
            }
            Some(3) => footer.num_rows = protocol.read_i64().unwrap(),
            Some(4) => {
                let list = protocol.read_list_begin().unwrap();
                for _ in 0..list.size {
                    footer.row_groups.push(read_row_group(protocol));
                }
                protocol.read_list_end().unwrap();
            }
            Some(6) => footer.created_by = Some(protocol.read_string().unwrap()),
            _ => protocol.skip(field.field_type).unwrap(),
        }
        protocol.read_field_end().unwrap();
    }
    protocol.read_struct_end().unwrap();
    footer
}

fn read_schema_element(protocol: &mut dyn TInputProtocol) -> DecodedSchemaElement {
    let mut element = DecodedSchemaElement {
        physical_type: None,
        repetition: None,
        name: String::new(),
        num_children: None,
    };
    protocol.read_struct_begin().unwrap();
    loop {
        let field = protocol.read_field_begin().unwrap();
        if field.field_type == TType::Stop {
            break;
        }
        match field.id {
            Some(1) => element.physical_type = Some(protocol.read_i32().unwrap()),
            Some(3) => element.repetition = Some(protocol.read_i32().unwrap()),
            Some(4) => element.name = protocol.read_string().unwrap(),
            Some(5) => element.num_children = Some(protocol.read_i32().unwrap()),
            _ => protocol.skip(field.field_type).unwrap(),
        }
        protocol.read_field_end().unwrap();
    }
    protocol.read_struct_end().unwrap();
    element
}

fn read_row_group(protocol: &mut dyn TInputProtocol) -> DecodedRowGroup {
    let mut group = DecodedRowGroup {
        columns: Vec::new(),
        total_byte_size: -1,
        num_rows: -1,
    };
    protocol.read_struct_begin().unwrap();
    loop {
        let field = protocol.read_field_begin().unwrap();
        if field.field_type == TType::Stop {
            break;
        }
        match field.id {
            Some(1) => {
                let list = protocol.read_list_begin().unwrap();
                for _ in 0..list.size {
                    group.columns.push(read_column_chunk(protocol));
                }
                protocol.read_list_end().unwrap();
            }
            Some(2) => group.total_byte_size = protocol.read_i64().unwrap(),
            Some(3) => group.num_rows = protocol.read_i64().unwrap(),
            _ => protocol.skip(field.field_type).unwrap(),
        }
        protocol.read_field_end().unwrap();
    }
    protocol.read_struct_end().unwrap();
    group
}

fn read_column_chunk(protocol: &mut dyn TInputProtocol) -> DecodedChunk {
    let mut chunk = DecodedChunk {
        file_path: None,
        file_offset: -1,
        meta: None,
    };
    protocol.read_struct_begin().unwrap();
    loop {
        let field = protocol.read_field_begin().unwrap();
        if field.field_type == TType::Stop {
            break;
        }
        match field.id {
            Some(1) => chunk.file_path = Some(protocol.read_string().unwrap()),
            Some(2) => chunk.file_offset = protocol.read_i64().unwrap(),
            Some(3) => chunk.meta = Some(read_column_meta_data(protocol)),
            _ => protocol.skip(field.field_type).unwrap(),
        }
        protocol.read_field_end().unwrap();
    }
    protocol.read_struct_end().unwrap();
    chunk
}

fn read_column_meta_data(protocol: &mut dyn TInputProtocol) -> DecodedColumnMeta {
    let mut meta = DecodedColumnMeta {
        physical_type: -1,
        encodings: Vec::new(),
        path_in_schema: Vec::new(),
        codec: -1,
        num_values: -1,
        total_uncompressed_size: -1,
        total_compressed_size: -1,
        data_page_offset: -1,
    };
    protocol.read_struct_begin().unwrap();
    loop {
        let field = protocol.read_field_begin().unwrap();
        if field.field_type == TType::Stop {
            break;
        }
        match field.id {
            Some(1) => meta.physical_type = protocol.read_i32().unwrap(),
            Some(2) => {
                let list = protocol.read_list_begin().unwrap();
                for _ in 0..list.size {
                    meta.encodings.push(protocol.read_i32().unwrap());
                }
                protocol.read_list_end().unwrap();
            }
            Some(3) => {
                let list = protocol.read_list_begin().unwrap();
                for _ in 0..list.size {
                    meta.path_in_schema.push(protocol.read_string().unwrap());
                }
                protocol.read_list_end().unwrap();
            }
            Some(4) => meta.codec = protocol.read_i32().unwrap(),
            Some(5) => meta.num_values = protocol.read_i64().unwrap(),
            Some(6) => meta.total_uncompressed_size = protocol.read_i64().unwrap(),
            Some(7) => meta.total_compressed_size = protocol.read_i64().unwrap(),
            Some(9) => meta.data_page_offset = protocol.read_i64().unwrap(),
            _ => protocol.skip(field.field_type).unwrap(),
        }
        protocol.read_field_end().unwrap();
    }
    protocol.read_struct_end().unwrap();
    meta
}
