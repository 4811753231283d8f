use thiserror::Error;

use crate::types::{PageId, RecordId};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page is full (page_id: {page_id})")]
    PageFull { page_id: PageId },

    #[error("Write of {len} bytes at offset {offset} exceeds data region of page {page_id}")]
    OutOfPageBounds {
        page_id: PageId,
        offset: usize,
        len: usize,
    },

    #[error("Invalid page size: {expected} bytes, got {actual} bytes")]
    InvalidPageSize { expected: usize, actual: usize },

    #[error("Corrupted page: page_id={page_id}, reason={reason}")]
    CorruptedPage { page_id: PageId, reason: String },

    #[error("Invalid {record} record size: {expected} bytes, got {actual} bytes")]
    InvalidRecordSize {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Page cache capacity must be at least one page")]
    InvalidCacheCapacity,

    #[error("Page {page_id} is not resident in the page cache")]
    PageNotCached { page_id: PageId },

    #[error("Node {id} not found")]
    NodeNotFound { id: RecordId },

    #[error("Node {external_id} already holds the maximum number of direct labels")]
    LabelOverflow { external_id: u32 },

    #[error("Label is {len} bytes long (max: {max})")]
    LabelTooLong { len: usize, max: usize },

    #[error("Invalid label: {reason}")]
    InvalidLabel { reason: String },

    #[error("Overflow chain for label slot {slot} is full")]
    LabelChainFull { slot: u8 },

    #[error("Invalid label slot {slot} (max: {max})")]
    InvalidLabelSlot { slot: u8, max: usize },

    #[error("No label stored at {page_number}:{slot_number}")]
    LabelNotFound { page_number: u8, slot_number: u8 },

    #[error("Property page is full")]
    PropertyPageFull,

    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
