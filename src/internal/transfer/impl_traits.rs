pub mod reqwest_range_client;

pub use reqwest_range_client::ReqwestRangeClient;
