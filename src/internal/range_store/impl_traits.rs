pub mod impl_memory_store;
pub mod impl_sled_store;
