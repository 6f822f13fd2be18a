pub mod byte_range;
pub mod range_endpoint;
pub mod range_reply;
pub mod range_server;
pub mod serve_error;
pub mod server_config;

pub use byte_range::{ByteRange, content_range_header, parse_range_header};
pub use range_endpoint::RangeEndpoint;
pub use range_reply::RangeReply;
pub use range_server::RangeServer;
pub use serve_error::ServeError;
pub use server_config::ServerConfig;
