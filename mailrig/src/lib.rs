//! # Mailrig
//!
//! A provisioning toolkit for AWS email event infrastructure.
//!
//! Mailrig wires together the resources outbound email tracking needs —
//! a dead-letter queue, a main event queue, a pub/sub topic, a queue
//! subscription, and an SES configuration set with an event destination —
//! through a single idempotent pipeline:
//!
//! - **Ordered steps**: nine steps with explicit dependencies, executed
//!   sequentially and aborted on the first fatal failure
//! - **Idempotent re-runs**: "already exists" is never an error anywhere;
//!   a partially failed run can be retried as-is
//! - **Credential probing**: identity verification, region discovery, and
//!   read-only permission probes that never raise into their caller
//! - **Signed transport**: a narrow SigV4 HTTP client for the control-plane
//!   operations the pipeline needs, stubbed out entirely in tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mailrig::prelude::*;
//! use std::sync::Arc;
//!
//! let transport = Arc::new(HttpTransport::new()?);
//! let config = ProvisionConfig::new("My App", "AKIA...", "secret...");
//!
//! let outputs = Provisioner::new(transport).run(&config).await?;
//! persist(outputs.into_map());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod api;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod naming;
pub mod pipeline;
pub mod policy;
pub mod regions;
pub mod signing;
pub mod testing;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::api::ses::{SesClient, TRACKED_EVENT_TYPES};
    pub use crate::api::sts::CallerIdentity;
    pub use crate::config::{Credentials, ProvisionConfig, ProvisioningContext};
    pub use crate::credentials::{
        validate_format, CredentialsValidator, PermissionReport, ProbeOutcome,
    };
    pub use crate::errors::{ApiError, TransportError, VerifyError, VerifyErrorKind};
    pub use crate::pipeline::{
        ConfigurationSetHandle, ProvisionOutputs, Provisioner, QueueHandle,
        ResourceHandle, StepError, StepId, SubscriptionHandle, TopicHandle,
    };
    pub use crate::transport::{
        AwsRequest, AwsResponse, AwsTransport, HttpTransport, Method, TransportConfig,
    };
}
