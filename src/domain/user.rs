use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    /// Legacy "from" column recording where the account was sourced.
    pub origin: Option<String>,
    pub age: i32,
    /// The single entry of the opaque settings map exposed to callers.
    pub key: Option<String>,
}

impl User {
    /// Pull the exposed `key` entry out of the raw settings map; anything
    /// non-string stays opaque.
    pub fn key_from_settings(settings: &Value) -> Option<String> {
        settings.get("key").and_then(Value::as_str).map(str::to_owned)
    }
}

/// One row of a bulk add.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub last_name: String,
    pub age: i32,
}
