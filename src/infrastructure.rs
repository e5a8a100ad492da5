// Infrastructure layer modules
pub mod config;
pub mod event_bus_ops;
pub mod logging;

// Re-exports
pub use config::ForwarderConfig;
pub use event_bus_ops::{AwsEventBusOps, EventBusOps, PublishError};
pub use logging::init_logging;
