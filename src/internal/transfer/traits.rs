pub mod range_client;

pub use range_client::{RangeClient, RangeResponse};
