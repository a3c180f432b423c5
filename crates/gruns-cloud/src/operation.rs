use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::CloudError;

/// `google.longrunning.Operation` as returned by create and delete calls.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongRunningOperation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<OperationStatus>,
    #[serde(default)]
    pub response: Option<Value>,
}

/// `google.rpc.Status` of a failed operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl LongRunningOperation {
    /// Turn a finished operation into its result: the error it carries, or its decoded
    /// response when one is present.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<Option<T>, CloudError> {
        if let Some(status) = self.error {
            return Err(CloudError::Operation {
                name: self.name,
                code: status.code,
                message: status.message,
            });
        }
        self.response
            .map(serde_json::from_value)
            .transpose()
            .map_err(CloudError::from)
    }
}
