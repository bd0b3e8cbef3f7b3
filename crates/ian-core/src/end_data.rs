//! Trailing records after the vertex table.
//!
//! Their meaning is unknown. They look like bounding volume centres: three
//! floats followed by 20 bytes that are `0xCD` in every observed file. The
//! records are kept as opaque values.

use crate::layout::END_DATA_PADDING_SIZE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndDataRecord {
    pub values: [f32; 3],
    pub padding: [u8; END_DATA_PADDING_SIZE],
}

/// Result of scanning the end data region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndData {
    pub records: Vec<EndDataRecord>,
    /// Where the scan started, or `None` when the file declares no end data.
    pub offset: Option<usize>,
    /// Set when the offset stored in the header pointed past the end of the
    /// buffer and was replaced by the end of the vertex table.
    pub offset_corrected: bool,
    /// Bytes after the last full record.
    pub trailing_bytes: usize,
}

impl EndData {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
