//! Platform-independent core for self-service flows: the flow record model,
//! the node projection used for rendering, URL parameters, submission
//! payloads, the error taxonomy, and the controller driving acquisition and
//! submission for one page.

pub mod controller;
pub mod error;
pub mod nodes;
pub mod params;
pub mod payload;
pub mod types;

pub use controller::{
    AcquireOutcome, FlowController, FlowKind, FlowTransport, SessionSync, SubmitOutcome,
};
pub use error::FlowError;
pub use nodes::FlowNodes;
pub use params::FlowParams;
pub use payload::SubmissionPayload;
pub use types::{CompletedFlow, FlowRecord};
