//! Tweet detail (conversation thread) response model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::timeline::Timeline;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetDetailResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TweetDetailData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetDetailData {
    #[serde(
        rename = "threaded_conversation_with_injections_v2",
        skip_serializing_if = "Option::is_none"
    )]
    pub conversation: Option<Timeline>,
}
