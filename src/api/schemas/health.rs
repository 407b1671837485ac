use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inquiries: Option<usize>,
}
