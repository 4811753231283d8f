use tracing::debug;

use crate::{
    storage::pager::Pager,
    types::{
        RecordId,
        error::DatabaseError,
        property::{NODE_PROP_SIZE, NodeProp},
    },
};

const PROPERTY_PAGE: u32 = 0;

/// Append-only log of property records, kept in page 0 of its file.
///
/// The key and value pagers are reserved for the key/value payload files; no
/// operation reads or writes them yet.
pub struct NodePropStore<'a> {
    pager: &'a mut Pager,
    key_pager: &'a mut Pager,
    value_pager: &'a mut Pager,
}

impl<'a> NodePropStore<'a> {
    pub fn new(
        pager: &'a mut Pager,
        key_pager: &'a mut Pager,
        value_pager: &'a mut Pager,
    ) -> Self {
        Self {
            pager,
            key_pager,
            value_pager,
        }
    }

    /// Appends `prop` and returns its index within the property page.
    pub fn insert(&mut self, prop: &NodeProp) -> Result<RecordId, DatabaseError> {
        let page = self.pager.get_page(PROPERTY_PAGE)?;
        let offset = page.data_length() as usize;
        if !page.can_fit(NODE_PROP_SIZE) {
            return Err(DatabaseError::PropertyPageFull);
        }

        page.set_at_offset(&prop.to_bytes(), offset)?;
        self.pager.flush_page(PROPERTY_PAGE)?;

        let id = (offset / NODE_PROP_SIZE) as RecordId;
        debug!(id, key_id = prop.key_id, value_id = prop.value_id, "property_store.insert");
        Ok(id)
    }

    pub fn count(&mut self) -> Result<usize, DatabaseError> {
        let page = self.pager.get_page(PROPERTY_PAGE)?;
        Ok(page.data_length() as usize / NODE_PROP_SIZE)
    }

    pub fn key_pager(&mut self) -> &mut Pager {
        &mut *self.key_pager
    }

    pub fn value_pager(&mut self) -> &mut Pager {
        &mut *self.value_pager
    }
}
