//! Conversions from job definitions to the desired remote state.
mod env;
pub use env::to_wire_env;

mod execution;
pub use execution::{DesiredExecution, EXECUTION_ENVIRONMENT, LAUNCH_STAGE};

mod trigger;
pub use trigger::{DesiredTrigger, OAUTH_SCOPE, TRIGGER_HTTP_METHOD, TRIGGER_USER_AGENT};
