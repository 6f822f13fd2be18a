pub mod range_store;

pub use range_store::RangeStore;
