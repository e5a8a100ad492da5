// Domain layer modules
pub mod inbound_envelope;
pub mod outbound_event;

// Re-exports
pub use inbound_envelope::{DecodeError, InboundEnvelope, decode_base64_text};
pub use outbound_event::{OutboundEvent, PublishResponse, PublishResultEntry};
