use serde::{Deserialize, Serialize};

/// The greeting record returned by the JSON endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloData {
    pub username: String,
    pub age: i32,
}

impl HelloData {
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: username.into(),
            age,
        }
    }
}
