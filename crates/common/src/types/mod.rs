use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Acknowledgement body returned by successful mutations.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SuccessAck {
    pub success: bool,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SuccessAck {
    pub fn ok() -> Self {
        Self { success: true, id: None }
    }

    pub fn created(id: impl Into<String>) -> Self {
        Self { success: true, id: Some(id.into()) }
    }
}
