pub mod config;
pub mod eviction;
pub mod file_handler;
pub mod label_store;
pub mod node_store;
pub mod pager;
pub mod property_store;
pub mod storage_manager;
