//! Ad-hoc scenario configuration.

use serde::{Deserialize, Serialize};

fn default_screen_name() -> String {
    "x".to_owned()
}

fn default_user_ids() -> Vec<String> {
    ["25073877", "2455740283", "900282258736545792"]
        .map(str::to_owned)
        .to_vec()
}

fn default_tweet_ids() -> Vec<String> {
    ["1349129669258448897", "1720975693524377759", "1810188416812019999"]
        .map(str::to_owned)
        .to_vec()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioConfig {
    /// Handle for the self-lookup check; the decoded response must echo it.
    #[serde(default = "default_screen_name")]
    pub screen_name: String,

    /// User identifiers for the user-tweets sweep.
    #[serde(default = "default_user_ids")]
    pub user_ids: Vec<String>,

    /// Tweet identifiers for the tweet-detail sweep.
    #[serde(default = "default_tweet_ids")]
    pub tweet_ids: Vec<String>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            screen_name: default_screen_name(),
            user_ids: default_user_ids(),
            tweet_ids: default_tweet_ids(),
        }
    }
}
