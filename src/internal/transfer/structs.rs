pub mod artifact;
pub mod chunk_fetch_engine;
pub mod content_range;
pub mod engine_config;
pub mod progress_snapshot;
pub mod reassembler;
pub mod terminal_state;
pub mod transfer_error;

pub use artifact::Artifact;
pub use chunk_fetch_engine::ChunkFetchEngine;
pub use content_range::{ContentRange, parse_content_range};
pub use engine_config::{DEFAULT_CHUNK_SIZE, EngineConfig};
pub use progress_snapshot::ProgressSnapshot;
pub use reassembler::Reassembler;
pub use terminal_state::TerminalState;
pub use transfer_error::TransferError;
