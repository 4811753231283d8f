use crate::types::{
    NO_RECORD, PAGE_DATA_SIZE, RecordId, error::DatabaseError, label::LabelAddress, read_u32_le,
};

pub const NODE_IN_USE_OFFSET: usize = 0;
pub const NODE_EXTERNAL_ID_OFFSET: usize = NODE_IN_USE_OFFSET + 1;
pub const NODE_FIRST_PROP_OFFSET: usize = NODE_EXTERNAL_ID_OFFSET + 4;
pub const NODE_FIRST_REL_OFFSET: usize = NODE_FIRST_PROP_OFFSET + 4;
pub const NODE_LABELS_OFFSET: usize = NODE_FIRST_REL_OFFSET + 4;
pub const NODE_LABEL_SLOTS: usize = 3;
pub const NODE_EXTRA_LABELS_OFFSET: usize = NODE_LABELS_OFFSET + NODE_LABEL_SLOTS * 2;
pub const NODE_SIZE: usize = NODE_EXTRA_LABELS_OFFSET + 1; // 20

pub const NODES_PER_PAGE: usize = PAGE_DATA_SIZE / NODE_SIZE; // 204

// An empty label slot is encoded as page 0xFF, slot 0x00.
const EMPTY_LABEL_PAGE: u8 = 0xFF;

/*
 * Node record (20 bytes)
 * ┌────────┬─────────────┬───────────────┬──────────────┬───────────────────┬──────────────┐
 * │ in_use │ external_id │ first_prop(4) │ first_rel(4) │ labels(3 x 2)     │ extra_labels │
 * │  (1)   │     (4)     │               │              │ page(1) | slot(1) │     (1)      │
 * └────────┴─────────────┴───────────────┴──────────────┴───────────────────┴──────────────┘
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub in_use: bool,
    pub external_id: u32,
    pub first_prop: RecordId,
    pub first_rel: RecordId,
    labels: [Option<LabelAddress>; NODE_LABEL_SLOTS],
    pub extra_labels: u8,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            in_use: true,
            external_id: 0,
            first_prop: NO_RECORD,
            first_rel: NO_RECORD,
            labels: [None; NODE_LABEL_SLOTS],
            extra_labels: 0,
        }
    }
}

impl Node {
    pub fn new(external_id: u32) -> Self {
        Self {
            external_id,
            ..Self::default()
        }
    }

    pub fn set_in_use(&mut self, in_use: bool) {
        self.in_use = in_use;
    }

    pub fn set_external_id(&mut self, external_id: u32) {
        self.external_id = external_id;
    }

    /// Attaches a label. Adding an address the node already carries is a no-op.
    pub fn add_label(&mut self, address: LabelAddress) -> Result<(), DatabaseError> {
        if address.page_number == EMPTY_LABEL_PAGE {
            return Err(DatabaseError::InvalidLabel {
                reason: format!("page {} is reserved for empty slots", EMPTY_LABEL_PAGE),
            });
        }

        for slot in self.labels.iter_mut() {
            match slot {
                Some(existing) if *existing == address => return Ok(()),
                Some(_) => continue,
                None => {
                    *slot = Some(address);
                    return Ok(());
                }
            }
        }

        Err(DatabaseError::LabelOverflow {
            external_id: self.external_id,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = LabelAddress> + '_ {
        self.labels.iter().flatten().copied()
    }

    pub fn label_slots(&self) -> &[Option<LabelAddress>; NODE_LABEL_SLOTS] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn to_bytes(&self) -> [u8; NODE_SIZE] {
        let mut buffer = [0u8; NODE_SIZE];

        buffer[NODE_IN_USE_OFFSET] = self.in_use as u8;
        buffer[NODE_EXTERNAL_ID_OFFSET..NODE_FIRST_PROP_OFFSET]
            .copy_from_slice(&self.external_id.to_le_bytes());
        buffer[NODE_FIRST_PROP_OFFSET..NODE_FIRST_REL_OFFSET]
            .copy_from_slice(&self.first_prop.to_le_bytes());
        buffer[NODE_FIRST_REL_OFFSET..NODE_LABELS_OFFSET]
            .copy_from_slice(&self.first_rel.to_le_bytes());

        for (i, slot) in self.labels.iter().enumerate() {
            let offset = NODE_LABELS_OFFSET + i * 2;
            let (page_number, slot_number) = match slot {
                Some(address) => (address.page_number, address.slot_number),
                None => (EMPTY_LABEL_PAGE, 0x00),
            };
            buffer[offset] = page_number;
            buffer[offset + 1] = slot_number;
        }

        buffer[NODE_EXTRA_LABELS_OFFSET] = self.extra_labels;
        buffer
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatabaseError> {
        if bytes.len() != NODE_SIZE {
            return Err(DatabaseError::InvalidRecordSize {
                record: "node",
                expected: NODE_SIZE,
                actual: bytes.len(),
            });
        }

        let mut labels = [None; NODE_LABEL_SLOTS];
        for (i, slot) in labels.iter_mut().enumerate() {
            let offset = NODE_LABELS_OFFSET + i * 2;
            if bytes[offset] != EMPTY_LABEL_PAGE {
                *slot = Some(LabelAddress::new(bytes[offset], bytes[offset + 1]));
            }
        }

        Ok(Self {
            in_use: bytes[NODE_IN_USE_OFFSET] != 0,
            external_id: read_u32_le(bytes, NODE_EXTERNAL_ID_OFFSET),
            first_prop: read_u32_le(bytes, NODE_FIRST_PROP_OFFSET),
            first_rel: read_u32_le(bytes, NODE_FIRST_REL_OFFSET),
            labels,
            extra_labels: bytes[NODE_EXTRA_LABELS_OFFSET],
        })
    }
}
