//! REST clients for the Cloud Run Admin v2 and Cloud Scheduler v1 APIs.
//!
//! [`CloudRunJobs`] and [`CloudScheduler`] implement the `gruns-core` API traits on top of
//! `reqwest`, authenticating every request with a bearer token from a [`TokenSource`].
mod auth;
pub use auth::{GcloudToken, StaticToken, TokenHandle, TokenSource};

mod error;
pub use error::CloudError;

mod http;
pub use http::RestClient;

mod operation;
pub use operation::{LongRunningOperation, OperationStatus};

mod run;
pub use run::{CloudRunJobs, RUN_ENDPOINT};

mod scheduler;
pub use scheduler::{CloudScheduler, SCHEDULER_ENDPOINT};
