use crate::types::{NO_RECORD, RecordId, error::DatabaseError, read_u32_le};

pub const NODE_PROP_IN_USE_OFFSET: usize = 0;
pub const NODE_PROP_KEY_OFFSET: usize = NODE_PROP_IN_USE_OFFSET + 1;
pub const NODE_PROP_VALUE_OFFSET: usize = NODE_PROP_KEY_OFFSET + 4;
pub const NODE_PROP_NEXT_PROP_OFFSET: usize = NODE_PROP_VALUE_OFFSET + 4;
pub const NODE_PROP_SIZE: usize = NODE_PROP_NEXT_PROP_OFFSET + 4; // 13

/// Property record: in_use(1) | key_id(4) | value_id(4) | next_prop(4).
///
/// `next_prop` is carried on disk but nothing links records through it yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeProp {
    pub in_use: bool,
    pub key_id: u32,
    pub value_id: u32,
    pub next_prop: RecordId,
}

impl Default for NodeProp {
    fn default() -> Self {
        Self {
            in_use: true,
            key_id: 0,
            value_id: 0,
            next_prop: NO_RECORD,
        }
    }
}

impl NodeProp {
    pub fn new(key_id: u32, value_id: u32) -> Self {
        Self {
            key_id,
            value_id,
            ..Self::default()
        }
    }

    pub fn to_bytes(&self) -> [u8; NODE_PROP_SIZE] {
        let mut buffer = [0u8; NODE_PROP_SIZE];
        buffer[NODE_PROP_IN_USE_OFFSET] = self.in_use as u8;
        buffer[NODE_PROP_KEY_OFFSET..NODE_PROP_VALUE_OFFSET]
            .copy_from_slice(&self.key_id.to_le_bytes());
        buffer[NODE_PROP_VALUE_OFFSET..NODE_PROP_NEXT_PROP_OFFSET]
            .copy_from_slice(&self.value_id.to_le_bytes());
        buffer[NODE_PROP_NEXT_PROP_OFFSET..NODE_PROP_SIZE]
            .copy_from_slice(&self.next_prop.to_le_bytes());
        buffer
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatabaseError> {
        if bytes.len() != NODE_PROP_SIZE {
            return Err(DatabaseError::InvalidRecordSize {
                record: "property",
                expected: NODE_PROP_SIZE,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            in_use: bytes[NODE_PROP_IN_USE_OFFSET] != 0,
            key_id: read_u32_le(bytes, NODE_PROP_KEY_OFFSET),
            value_id: read_u32_le(bytes, NODE_PROP_VALUE_OFFSET),
            next_prop: read_u32_le(bytes, NODE_PROP_NEXT_PROP_OFFSET),
        })
    }
}
