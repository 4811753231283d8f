use crate::types::{
    PAGE_DATA_OFFSET, PAGE_DATA_SIZE, PAGE_LENGTH_OFFSET, PAGE_SIZE, PageId,
    error::DatabaseError,
};

/*
 * Page Layout on Disk
 * ┌─────────────────────────────────────────────────────────────────┐
 * │  data_length(2, little endian)                                  │
 * ├─────────────────────────────────────────────────────────────────┤
 * │                    DATA REGION (4094 bytes)                     │
 * │  [record 0][record 1][record 2] ...            [zero padding]   │
 * └─────────────────────────────────────────────────────────────────┘
 *
 * data_length tracks the highest byte written so far, whether the write
 * came through append or set_at_offset. It never decreases.
 */

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub page_number: PageId,
    bytes: Vec<u8>,
}

impl Page {
    pub fn new(page_number: PageId) -> Self {
        Self {
            page_number,
            bytes: vec![0; PAGE_SIZE],
        }
    }

    /// Builds a page from its on-disk image.
    pub fn from_bytes(page_number: PageId, bytes: &[u8]) -> Result<Self, DatabaseError> {
        if bytes.len() != PAGE_SIZE {
            return Err(DatabaseError::InvalidPageSize {
                expected: PAGE_SIZE,
                actual: bytes.len(),
            });
        }

        let page = Self {
            page_number,
            bytes: bytes.to_vec(),
        };

        // No write can end on the last byte of the data region.
        if page.data_length() as usize >= PAGE_DATA_SIZE {
            return Err(DatabaseError::CorruptedPage {
                page_id: page_number,
                reason: format!("Invalid data length: {}", page.data_length()),
            });
        }

        Ok(page)
    }

    /// Full fixed-size image, length header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn data_length(&self) -> u16 {
        u16::from_le_bytes([
            self.bytes[PAGE_LENGTH_OFFSET],
            self.bytes[PAGE_LENGTH_OFFSET + 1],
        ])
    }

    fn set_data_length(&mut self, length: u16) {
        self.bytes[PAGE_LENGTH_OFFSET..PAGE_DATA_OFFSET].copy_from_slice(&length.to_le_bytes());
    }

    pub fn data(&self) -> &[u8] {
        &self.bytes[PAGE_DATA_OFFSET..]
    }

    pub fn available_space(&self) -> usize {
        // The last byte of the data region is never writable.
        (PAGE_DATA_SIZE - 1).saturating_sub(self.data_length() as usize)
    }

    pub fn can_fit(&self, len: usize) -> bool {
        self.data_length() as usize + len < PAGE_DATA_SIZE
    }

    /// Writes `data` at the current length and returns the offset it landed at.
    pub fn append(&mut self, data: &[u8]) -> Result<u16, DatabaseError> {
        if !self.can_fit(data.len()) {
            return Err(DatabaseError::PageFull {
                page_id: self.page_number,
            });
        }

        let offset = self.data_length();
        self.set_at_offset(data, offset as usize)?;
        Ok(offset)
    }

    /// Writes `data` at `offset` within the data region, raising the length if
    /// the write ends past it.
    pub fn set_at_offset(&mut self, data: &[u8], offset: usize) -> Result<(), DatabaseError> {
        let end = match offset.checked_add(data.len()) {
            Some(end) if end < PAGE_DATA_SIZE => end,
            _ => {
                return Err(DatabaseError::OutOfPageBounds {
                    page_id: self.page_number,
                    offset,
                    len: data.len(),
                });
            }
        };

        let start = PAGE_DATA_OFFSET + offset;
        self.bytes[start..start + data.len()].copy_from_slice(data);

        if end > self.data_length() as usize {
            self.set_data_length(end as u16);
        }

        Ok(())
    }

    pub fn data_at_offset(&self, offset: usize, len: usize) -> Result<&[u8], DatabaseError> {
        if offset.checked_add(len).is_none_or(|end| end > PAGE_DATA_SIZE) {
            return Err(DatabaseError::OutOfPageBounds {
                page_id: self.page_number,
                offset,
                len,
            });
        }

        let start = PAGE_DATA_OFFSET + offset;
        Ok(&self.bytes[start..start + len])
    }
}
