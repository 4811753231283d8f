use tracing::{debug, info};

use crate::{
    storage::pager::Pager,
    types::{
        PageId,
        error::DatabaseError,
        label::{LABEL_SIZE, LABEL_TEXT_SIZE, LabelAddress, NodeLabel},
    },
};

// Prime closest to PAGE_DATA_SIZE / LABEL_SIZE (4094 / 18).
pub const LABEL_TABLE_SIZE: usize = 227;

// Page 0xFF would read back as an empty label slot in a node record.
const MAX_CHAIN_LENGTH: u8 = 0xFF;

/// DJB2 over the zero-padded label text, reduced to a table slot.
pub fn slot_for(padded: &[u8; LABEL_TEXT_SIZE]) -> u8 {
    let hash = padded.iter().fold(5381u32, |hash, &byte| {
        (hash << 5).wrapping_add(hash).wrapping_add(byte as u32)
    });
    (hash % LABEL_TABLE_SIZE as u32) as u8
}

/*
 * Label dictionary layout
 *
 *   page 0:  [slot 0][slot 1] ... [slot 226]   hash table, chain_length per slot
 *   page 1:  [slot 0][slot 1] ... [slot 226]   first overflow entry of each slot
 *   page 2:  ...
 *
 * A label hashing to slot s lives at (p, s) for some p < chain_length of
 * (0, s). Chains of different slots share overflow pages without interfering.
 */
pub struct NodeLabelStore<'a> {
    pager: &'a mut Pager,
}

impl<'a> NodeLabelStore<'a> {
    pub fn new(pager: &'a mut Pager) -> Self {
        Self { pager }
    }

    fn slot_offset(slot: u8) -> usize {
        slot as usize * LABEL_SIZE
    }

    fn read_record(&mut self, page_number: PageId, slot: u8) -> Result<NodeLabel, DatabaseError> {
        let page = self.pager.get_page(page_number)?;
        NodeLabel::from_bytes(page.data_at_offset(Self::slot_offset(slot), LABEL_SIZE)?)
    }

    fn write_record(
        &mut self,
        page_number: PageId,
        slot: u8,
        label: &NodeLabel,
    ) -> Result<(), DatabaseError> {
        let page = self.pager.get_page(page_number)?;
        page.set_at_offset(&label.to_bytes(), Self::slot_offset(slot))?;
        self.pager.flush_page(page_number)
    }

    /// Walks the chain of the slot `padded` hashes to. Returns the slot, the
    /// head record from page 0 and the address of `padded` if present.
    fn search(
        &mut self,
        padded: &[u8; LABEL_TEXT_SIZE],
    ) -> Result<(u8, NodeLabel, Option<LabelAddress>), DatabaseError> {
        let slot = slot_for(padded);
        let head = self.read_record(0, slot)?;

        if head.chain_length == 0 {
            return Ok((slot, head, None));
        }
        if head.is_text(padded) {
            return Ok((slot, head, Some(LabelAddress::new(0, slot))));
        }

        for page_number in 1..head.chain_length {
            let label = self.read_record(page_number as PageId, slot)?;
            if label.is_text(padded) {
                return Ok((slot, head, Some(LabelAddress::new(page_number, slot))));
            }
        }

        Ok((slot, head, None))
    }

    /// Stores `text` if it is not present yet and returns its address.
    pub fn insert(&mut self, text: &str) -> Result<LabelAddress, DatabaseError> {
        let padded = NodeLabel::pad_text(text)?;
        let (slot, mut head, found) = self.search(&padded)?;

        if let Some(address) = found {
            return Ok(address);
        }

        if head.chain_length == 0 {
            let mut label = NodeLabel::new(text)?;
            label.chain_length = 1;
            self.write_record(0, slot, &label)?;
            debug!(label = text, slot, "label_store.insert");
            return Ok(LabelAddress::new(0, slot));
        }

        let page_number = head.chain_length;
        if page_number >= MAX_CHAIN_LENGTH {
            return Err(DatabaseError::LabelChainFull { slot });
        }

        // Overflow records leave their chain_length byte at zero.
        self.write_record(page_number as PageId, slot, &NodeLabel::new(text)?)?;

        head.chain_length += 1;
        self.write_record(0, slot, &head)?;

        info!(
            label = text,
            slot,
            page = page_number,
            chain_length = head.chain_length,
            "label_store.chain_grow"
        );
        Ok(LabelAddress::new(page_number, slot))
    }

    /// Looks `text` up without inserting it.
    pub fn find(&mut self, text: &str) -> Result<Option<LabelAddress>, DatabaseError> {
        let padded = NodeLabel::pad_text(text)?;
        Ok(self.search(&padded)?.2)
    }

    pub fn get(&mut self, address: LabelAddress) -> Result<NodeLabel, DatabaseError> {
        let LabelAddress {
            page_number,
            slot_number,
        } = address;

        if slot_number as usize >= LABEL_TABLE_SIZE {
            return Err(DatabaseError::InvalidLabelSlot {
                slot: slot_number,
                max: LABEL_TABLE_SIZE - 1,
            });
        }

        let label = self.read_record(page_number as PageId, slot_number)?;
        let unused = if page_number == 0 {
            label.chain_length == 0
        } else {
            label.is_empty()
        };
        if unused {
            return Err(DatabaseError::LabelNotFound {
                page_number,
                slot_number,
            });
        }

        Ok(label)
    }

    /// Pages in use by the chain of `slot`, page 0 included.
    pub fn chain_length(&mut self, slot: u8) -> Result<u8, DatabaseError> {
        if slot as usize >= LABEL_TABLE_SIZE {
            return Err(DatabaseError::InvalidLabelSlot {
                slot,
                max: LABEL_TABLE_SIZE - 1,
            });
        }
        Ok(self.read_record(0, slot)?.chain_length)
    }
}
