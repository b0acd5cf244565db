//! User lookup response models.
//!
//! Every field is optional: the API omits members freely depending on the
//! caller's entitlements, and absence must reserialize as absence for the
//! fidelity comparison to hold (hence `skip_serializing_if` throughout).

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UserData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResults>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<UserResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResult {
    #[serde(rename = "__typename", skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_blue_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy: Option<UserLegacy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliates_highlighted_label: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_blocked_by: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_blocking: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLegacy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friends_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favourites_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listed_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url_https: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_banner_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_tweet_ids_str: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Value>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_members_reserialize_as_absent() {
        let raw = r#"{"data": {"user": {"result": {"rest_id": "42"}}}}"#;
        let model: UserResponse = serde_json::from_str(raw).unwrap();
        let tree = serde_json::to_value(model).unwrap();
        assert_eq!(tree, json!({"data": {"user": {"result": {"rest_id": "42"}}}}));
    }

    #[test]
    fn legacy_fields_survive_the_round_trip() {
        let raw = json!({
            "data": {"user": {"result": {
                "__typename": "User",
                "rest_id": "44196397",
                "is_blue_verified": true,
                "legacy": {
                    "screen_name": "alice",
                    "name": "Alice",
                    "followers_count": 128,
                    "pinned_tweet_ids_str": ["1234"]
                }
            }}}
        });
        let model: UserResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(model).unwrap(), raw);
    }
}
