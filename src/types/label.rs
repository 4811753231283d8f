use std::fmt;

use crate::types::error::DatabaseError;

pub const LABEL_TEXT_OFFSET: usize = 0;
pub const LABEL_TEXT_SIZE: usize = 17;
pub const LABEL_CHAIN_OFFSET: usize = LABEL_TEXT_OFFSET + LABEL_TEXT_SIZE;
pub const LABEL_CHAIN_SIZE: usize = 1;
pub const LABEL_SIZE: usize = LABEL_CHAIN_OFFSET + LABEL_CHAIN_SIZE; // 18

/// Stable location of a label inside the label dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelAddress {
    pub page_number: u8,
    pub slot_number: u8,
}

impl LabelAddress {
    pub fn new(page_number: u8, slot_number: u8) -> Self {
        Self {
            page_number,
            slot_number,
        }
    }
}

impl fmt::Display for LabelAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.page_number, self.slot_number)
    }
}

/*
 * NodeLabel record (18 bytes)
 * ┌──────────────────────────────────────┬──────────────────┐
 * │ text(17, zero padded)                │ chain_length(1)  │
 * └──────────────────────────────────────┴──────────────────┘
 *
 * chain_length is only meaningful for the record in page 0 of a slot:
 * it counts the pages (page 0 included) holding labels for that slot.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLabel {
    text: [u8; LABEL_TEXT_SIZE],
    pub chain_length: u8,
}

impl NodeLabel {
    pub fn new(text: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            text: Self::pad_text(text)?,
            chain_length: 0,
        })
    }

    /// Validates `text` and returns it zero padded to the fixed field width.
    pub fn pad_text(text: &str) -> Result<[u8; LABEL_TEXT_SIZE], DatabaseError> {
        let raw = text.as_bytes();
        if raw.is_empty() {
            return Err(DatabaseError::InvalidLabel {
                reason: "label text is empty".to_string(),
            });
        }
        if raw.len() > LABEL_TEXT_SIZE {
            return Err(DatabaseError::LabelTooLong {
                len: raw.len(),
                max: LABEL_TEXT_SIZE,
            });
        }
        if raw.contains(&0) {
            return Err(DatabaseError::InvalidLabel {
                reason: "label text contains a NUL byte".to_string(),
            });
        }

        let mut padded = [0u8; LABEL_TEXT_SIZE];
        padded[..raw.len()].copy_from_slice(raw);
        Ok(padded)
    }

    /// The stored text, padding included.
    pub fn text_bytes(&self) -> &[u8; LABEL_TEXT_SIZE] {
        &self.text
    }

    pub fn text(&self) -> String {
        let end = self
            .text
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(LABEL_TEXT_SIZE);
        String::from_utf8_lossy(&self.text[..end]).into_owned()
    }

    pub fn is_text(&self, padded: &[u8; LABEL_TEXT_SIZE]) -> bool {
        &self.text == padded
    }

    pub fn is_empty(&self) -> bool {
        self.text.iter().all(|&b| b == 0)
    }

    pub fn to_bytes(&self) -> [u8; LABEL_SIZE] {
        let mut buffer = [0u8; LABEL_SIZE];
        buffer[LABEL_TEXT_OFFSET..LABEL_CHAIN_OFFSET].copy_from_slice(&self.text);
        buffer[LABEL_CHAIN_OFFSET] = self.chain_length;
        buffer
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatabaseError> {
        if bytes.len() != LABEL_SIZE {
            return Err(DatabaseError::InvalidRecordSize {
                record: "label",
                expected: LABEL_SIZE,
                actual: bytes.len(),
            });
        }

        let mut text = [0u8; LABEL_TEXT_SIZE];
        text.copy_from_slice(&bytes[LABEL_TEXT_OFFSET..LABEL_CHAIN_OFFSET]);

        Ok(Self {
            text,
            chain_length: bytes[LABEL_CHAIN_OFFSET],
        })
    }
}
