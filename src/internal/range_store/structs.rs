pub mod memory_range_store;
pub mod session_key;
pub mod session_records;
pub mod sled_range_store;
pub mod store_error;

pub use memory_range_store::MemoryRangeStore;
pub use session_key::SessionKey;
pub use session_records::{RecordKeys, SessionRecords};
pub use sled_range_store::SledRangeStore;
pub use store_error::StoreError;
