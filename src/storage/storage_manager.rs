use tracing::info;

use crate::{
    storage::{
        config::StoreConfig, label_store::NodeLabelStore, node_store::NodeStore,
        pager::Pager, property_store::NodePropStore,
    },
    types::{
        RecordId,
        error::DatabaseError,
        label::NodeLabel,
        node::{NODE_LABEL_SLOTS, Node},
        property::NodeProp,
    },
};

/// Owns one pager per store file and hands out store views over them.
pub struct GraphStore {
    pub config: StoreConfig,
    nodes: Pager,
    labels: Pager,
    properties: Pager,
    property_keys: Pager,
    property_values: Pager,
}

impl GraphStore {
    pub fn open(config: StoreConfig) -> Result<Self, DatabaseError> {
        config.validate()?;

        let node_path = config.node_path();
        if node_path.exists() {
            info!(path = %config.base_path.display(), "Opening existing graph store");
        } else {
            info!(path = %config.base_path.display(), "Creating new graph store");
        }

        Ok(Self {
            nodes: Pager::open(node_path, config.node_cache_pages)?,
            labels: Pager::open(config.label_path(), config.label_cache_pages)?,
            properties: Pager::open(config.property_path(), config.property_cache_pages)?,
            property_keys: Pager::open(config.property_key_path(), config.key_cache_pages)?,
            property_values: Pager::open(config.property_value_path(), config.value_cache_pages)?,
            config,
        })
    }

    pub fn node_store(&mut self) -> NodeStore<'_> {
        NodeStore::new(&mut self.nodes)
    }

    pub fn label_store(&mut self) -> NodeLabelStore<'_> {
        NodeLabelStore::new(&mut self.labels)
    }

    pub fn property_store(&mut self) -> NodePropStore<'_> {
        NodePropStore::new(
            &mut self.properties,
            &mut self.property_keys,
            &mut self.property_values,
        )
    }

    /// Resolves every label to its dictionary address and stores the node.
    ///
    /// Label texts are validated and deduplicated before the dictionary is
    /// touched, so a rejected node leaves no labels behind.
    pub fn insert_node(&mut self, external_id: u32, labels: &[&str]) -> Result<RecordId, DatabaseError> {
        let mut distinct: Vec<&str> = Vec::with_capacity(NODE_LABEL_SLOTS);
        let mut padded = Vec::with_capacity(NODE_LABEL_SLOTS);
        for text in labels {
            let bytes = NodeLabel::pad_text(text)?;
            if padded.contains(&bytes) {
                continue;
            }
            if distinct.len() == NODE_LABEL_SLOTS {
                return Err(DatabaseError::LabelOverflow { external_id });
            }
            padded.push(bytes);
            distinct.push(*text);
        }

        let mut node = Node::new(external_id);
        for text in distinct {
            let address = self.label_store().insert(text)?;
            node.add_label(address)?;
        }
        self.node_store().insert(&node)
    }

    pub fn get_node(&mut self, id: RecordId) -> Result<Node, DatabaseError> {
        self.node_store().get(id)
    }

    pub fn node_labels(&mut self, id: RecordId) -> Result<Vec<NodeLabel>, DatabaseError> {
        let node = self.get_node(id)?;
        let mut label_store = self.label_store();
        node.labels()
            .map(|address| label_store.get(address))
            .collect()
    }

    pub fn insert_property(&mut self, prop: &NodeProp) -> Result<RecordId, DatabaseError> {
        self.property_store().insert(prop)
    }
}
