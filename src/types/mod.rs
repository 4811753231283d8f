pub mod error;
pub mod label;
pub mod node;
pub mod page;
pub mod property;

// Common type aliases
pub type PageId = u32;
pub type RecordId = u32;

// Page layout: 2-byte length counter followed by the data region
pub const PAGE_SIZE: usize = 4096;
pub const PAGE_LENGTH_OFFSET: usize = 0;
pub const PAGE_LENGTH_SIZE: usize = 2;
pub const PAGE_DATA_OFFSET: usize = PAGE_LENGTH_OFFSET + PAGE_LENGTH_SIZE;
pub const PAGE_DATA_SIZE: usize = PAGE_SIZE - PAGE_DATA_OFFSET; // 4094

/// Anchor value meaning "no record" for property and relationship links.
pub const NO_RECORD: RecordId = u32::MAX;

pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
