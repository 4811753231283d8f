pub mod art;
pub mod storage;
pub mod types;
pub mod utils;
