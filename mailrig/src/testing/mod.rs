//! Test doubles for exercising clients and the pipeline without AWS.

mod mocks;

pub use mocks::{MockTransport, RecordedCall};
