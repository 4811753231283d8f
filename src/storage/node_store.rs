use tracing::{debug, info};

use crate::{
    storage::pager::Pager,
    types::{
        PageId, RecordId,
        error::DatabaseError,
        node::{NODE_SIZE, NODES_PER_PAGE, Node},
    },
};

/// Append-only store of fixed-size node records.
///
/// Node ids are global: `id = page * NODES_PER_PAGE + slot`.
pub struct NodeStore<'a> {
    pager: &'a mut Pager,
}

impl<'a> NodeStore<'a> {
    pub fn new(pager: &'a mut Pager) -> Self {
        Self { pager }
    }

    fn locate(id: RecordId) -> (PageId, usize) {
        let page_number = id / NODES_PER_PAGE as RecordId;
        let slot = id as usize % NODES_PER_PAGE;
        (page_number, slot * NODE_SIZE)
    }

    /// Appends `node` to the tail page, starting a new page when the tail is full.
    pub fn insert(&mut self, node: &Node) -> Result<RecordId, DatabaseError> {
        let mut page_number = self.pager.last_page();
        let mut slot = self.used_slots(page_number)?;

        if slot >= NODES_PER_PAGE {
            page_number += 1;
            slot = self.used_slots(page_number)?;
            info!(page = page_number, "node_store.rollover");
        }

        let page = self.pager.get_page(page_number)?;
        page.set_at_offset(&node.to_bytes(), slot * NODE_SIZE)?;
        self.pager.flush_page(page_number)?;

        let id = page_number * NODES_PER_PAGE as RecordId + slot as RecordId;
        debug!(id, external_id = node.external_id, "node_store.insert");
        Ok(id)
    }

    fn used_slots(&mut self, page_number: PageId) -> Result<usize, DatabaseError> {
        let length = self.pager.get_page(page_number)?.data_length() as usize;
        Ok(length.div_ceil(NODE_SIZE))
    }

    /// Returns an owned copy of the node stored under `id`.
    pub fn get(&mut self, id: RecordId) -> Result<Node, DatabaseError> {
        let (page_number, offset) = Self::locate(id);
        if page_number > self.pager.last_page() {
            return Err(DatabaseError::NodeNotFound { id });
        }

        let page = self.pager.get_page(page_number)?;
        if offset + NODE_SIZE > page.data_length() as usize {
            return Err(DatabaseError::NodeNotFound { id });
        }
        Node::from_bytes(page.data_at_offset(offset, NODE_SIZE)?)
    }

    /// Overwrites the record under `id` and flushes its page.
    pub fn update(&mut self, id: RecordId, node: &Node) -> Result<(), DatabaseError> {
        let (page_number, offset) = Self::locate(id);
        if page_number > self.pager.last_page() {
            return Err(DatabaseError::NodeNotFound { id });
        }

        let page = self.pager.get_page(page_number)?;
        if offset + NODE_SIZE > page.data_length() as usize {
            return Err(DatabaseError::NodeNotFound { id });
        }
        page.set_at_offset(&node.to_bytes(), offset)?;
        self.pager.flush_page(page_number)?;
        debug!(id, "node_store.update");
        Ok(())
    }

    /// Number of records written so far.
    pub fn count(&mut self) -> Result<usize, DatabaseError> {
        if self.pager.page_count() == 0 {
            return Ok(0);
        }
        let last_page = self.pager.last_page();
        let tail = self.used_slots(last_page)?;
        Ok(last_page as usize * NODES_PER_PAGE + tail)
    }
}
