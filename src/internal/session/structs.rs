pub mod delivery_mode;
pub mod reactive_state;
pub mod session_controller;
pub mod session_controller_builder;
pub mod session_status;

pub use delivery_mode::DeliveryMode;
pub use reactive_state::SessionReactiveState;
pub use session_controller::SessionController;
pub use session_controller_builder::SessionControllerBuilder;
pub use session_status::SessionStatus;
