use serde::de::{DeserializeOwned, Error as _};
use serde::Deserialize;
use serde_json::Value;

use super::item::{lenient, lenient_list, lenient_text, ClusterItemView, ItemView};
use crate::error::{ClientError, ClientResult};

/// Body of `POST /recommend`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RecommendResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub viewed_item: Option<ItemView>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub recommendations: Vec<ItemView>,
    /// Set instead of the data fields when the backend rejects the item id
    #[serde(default, deserialize_with = "lenient_text")]
    pub error: Option<String>,
}

/// Body of `GET /cluster-items/{item_id}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ClusterItemsResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub cluster_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Vec<ClusterItemView>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub error: Option<String>,
}

/// Common handling for backend bodies that may carry an `error` field
pub trait BackendBody: DeserializeOwned + Sized {
    fn backend_error(&self) -> Option<&str>;

    /// Parses a raw body. Any JSON object is accepted; absent fields default.
    fn from_body(body: &str) -> ClientResult<Self> {
        let value: Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(ClientError::Decode(serde_json::Error::custom(format!(
                "expected a JSON object, got {}",
                json_type_name(&value)
            ))));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Turns a body carrying an `error` field into a backend error
    fn into_result(self) -> ClientResult<Self> {
        match self.backend_error() {
            Some(message) => Err(ClientError::Backend(message.to_string())),
            None => Ok(self),
        }
    }
}

impl BackendBody for RecommendResponse {
    fn backend_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl BackendBody for ClusterItemsResponse {
    fn backend_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
