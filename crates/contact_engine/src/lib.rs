//! Contact engine: submission transport, wire codec and effect execution.
mod controller;
mod decode;
mod encode;
mod engine;
mod transport;
mod types;

pub use controller::{ContactFormController, CANCELLED_MESSAGE};
pub use decode::{decode_body, DecodeError};
pub use encode::{encode_fields, FORM_CONTENT_TYPE};
pub use engine::EngineHandle;
pub use transport::{ReqwestTransport, SubmissionTransport, TransportSettings};
pub use types::{EngineEvent, FailureKind, TransportError};
