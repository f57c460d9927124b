use std::fmt;

/// Physical types for leaf column values, with Parquet wire ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    Boolean = 0,
    Int32 = 1,
    Int64 = 2,
    Int96 = 3,
    Float = 4,
    Double = 5,
    ByteArray = 6,
}

impl PhysicalType {
    /// Width of one plain-encoded value in bytes; zero for the
    /// variable-length byte-array type.
    pub fn bytes_per_value(self) -> u8 {
        match self {
            PhysicalType::Int32 | PhysicalType::Float => 4,
            PhysicalType::Int64 | PhysicalType::Double => 8,
            PhysicalType::Int96 => 12,
            PhysicalType::ByteArray => 0,
            // TODO: booleans should be bit packed; they are stored one
            // byte per value for now.
            PhysicalType::Boolean => 1,
        }
    }
}

impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhysicalType::Boolean => "BOOLEAN",
            PhysicalType::Int32 => "INT32",
            PhysicalType::Int64 => "INT64",
            PhysicalType::Int96 => "INT96",
            PhysicalType::Float => "FLOAT",
            PhysicalType::Double => "DOUBLE",
            PhysicalType::ByteArray => "BYTE_ARRAY",
        };
        write!(f, "{}", name)
    }
}

/// Repetition mode of a column: how many values one parent occurrence
/// may contribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repetition {
    /// Exactly one value
    Required = 0,
    /// Zero or one value
    Optional = 1,
    /// Zero or more values
    Repeated = 2,
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Repetition::Required => "REQUIRED",
            Repetition::Optional => "OPTIONAL",
            Repetition::Repeated => "REPEATED",
        };
        write!(f, "{}", name)
    }
}

/// Value encodings, with Parquet wire ids. Only plain encoding is
/// writable today; RLE appears in page headers for level streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Plain = 0,
    PlainDictionary = 2,
    Rle = 3,
    BitPacked = 4,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::Plain => "PLAIN",
            Encoding::PlainDictionary => "PLAIN_DICTIONARY",
            Encoding::Rle => "RLE",
            Encoding::BitPacked => "BIT_PACKED",
        };
        write!(f, "{}", name)
    }
}

/// Compression codecs, with Parquet wire ids. Only uncompressed data is
/// writable today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    Uncompressed = 0,
    Snappy = 1,
    Gzip = 2,
    Lzo = 3,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compression::Uncompressed => "UNCOMPRESSED",
            Compression::Snappy => "SNAPPY",
            Compression::Gzip => "GZIP",
            Compression::Lzo => "LZO",
        };
        write!(f, "{}", name)
    }
}

/// Page types, with Parquet wire ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageType {
    DataPage = 0,
    IndexPage = 1,
    DictionaryPage = 2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_widths() {
        assert_eq!(PhysicalType::Int32.bytes_per_value(), 4);
        assert_eq!(PhysicalType::Float.bytes_per_value(), 4);
        assert_eq!(PhysicalType::Int64.bytes_per_value(), 8);
        assert_eq!(PhysicalType::Double.bytes_per_value(), 8);
        assert_eq!(PhysicalType::Int96.bytes_per_value(), 12);
        assert_eq!(PhysicalType::Boolean.bytes_per_value(), 1);
        assert_eq!(PhysicalType::ByteArray.bytes_per_value(), 0);
    }

    #[test]
    fn test_wire_ids() {
        assert_eq!(PhysicalType::ByteArray as i32, 6);
        assert_eq!(Repetition::Repeated as i32, 2);
        assert_eq!(Encoding::Rle as i32, 3);
        assert_eq!(Compression::Uncompressed as i32, 0);
        assert_eq!(PageType::DataPage as i32, 0);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(PhysicalType::Int32.to_string(), "INT32");
        assert_eq!(Repetition::Optional.to_string(), "OPTIONAL");
        assert_eq!(Encoding::Plain.to_string(), "PLAIN");
        assert_eq!(Compression::Gzip.to_string(), "GZIP");
    }
}
