//! Timeline response models: the paginated surfaces.
//!
//! Timelines arrive as instruction lists; entries inside an
//! `TimelineAddEntries` instruction carry either content items, modules, or
//! pagination cursors. The cursor variant is what the explorer feeds back
//! into the next request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Instruction list shared by every timeline-shaped response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<Instruction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(rename = "responseObjects", skip_serializing_if = "Option::is_none")]
    pub response_objects: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Instruction {
    TimelineAddEntries {
        entries: Vec<Entry>,
    },
    TimelinePinEntry {
        entry: Entry,
    },
    TimelineReplaceEntry {
        entry_id_to_replace: String,
        entry: Entry,
    },
    TimelineClearCache,
    TimelineTerminateTimeline {
        direction: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "entryId")]
    pub entry_id: String,
    #[serde(rename = "sortIndex")]
    pub sort_index: String,
    pub content: EntryContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "entryType")]
pub enum EntryContent {
    TimelineTimelineItem {
        #[serde(rename = "__typename")]
        typename: String,
        #[serde(rename = "itemContent")]
        item_content: Value,
        #[serde(rename = "clientEventInfo", skip_serializing_if = "Option::is_none")]
        client_event_info: Option<Value>,
    },
    TimelineTimelineModule {
        #[serde(rename = "__typename")]
        typename: String,
        items: Vec<Value>,
        #[serde(rename = "displayType")]
        display_type: String,
        #[serde(rename = "clientEventInfo", skip_serializing_if = "Option::is_none")]
        client_event_info: Option<Value>,
    },
    TimelineTimelineCursor {
        #[serde(rename = "__typename")]
        typename: String,
        value: String,
        #[serde(rename = "cursorType")]
        cursor_type: String,
        #[serde(rename = "stopOnEmptyResponse", skip_serializing_if = "Option::is_none")]
        stop_on_empty_response: Option<bool>,
    },
}

// ── Per-endpoint envelopes ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTweetsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UserTweetsData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTweetsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<TimelineOwner>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineOwner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TimelineOwnerResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineOwnerResult {
    #[serde(rename = "__typename", skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<TimelineWrapper>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineWrapper {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeTimelineResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HomeData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<Home>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Home {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_timeline_urt: Option<Timeline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTimelineResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ListData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<ListTweets>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTweets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweets_timeline: Option<TimelineWrapper>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn timeline_with_cursor() -> serde_json::Value {
        json!({
            "data": {"user": {"result": {
                "__typename": "User",
                "rest_id": "42",
                "timeline": {"timeline": {"instructions": [
                    {"type": "TimelineClearCache"},
                    {"type": "TimelineAddEntries", "entries": [
                        {
                            "entryId": "tweet-100",
                            "sortIndex": "100",
                            "content": {
                                "entryType": "TimelineTimelineItem",
                                "__typename": "TimelineTimelineItem",
                                "itemContent": {"tweet_results": {}}
                            }
                        },
                        {
                            "entryId": "cursor-bottom-0",
                            "sortIndex": "0",
                            "content": {
                                "entryType": "TimelineTimelineCursor",
                                "__typename": "TimelineTimelineCursor",
                                "value": "DAABCgABGg",
                                "cursorType": "Bottom",
                                "stopOnEmptyResponse": true
                            }
                        }
                    ]}
                ]}}
            }}}
        })
    }

    #[test]
    fn user_tweets_round_trips_exactly() {
        let raw = timeline_with_cursor();
        let model: UserTweetsResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(model).unwrap(), raw);
    }

    #[test]
    fn instruction_tag_is_preserved() {
        let model: Instruction =
            serde_json::from_value(json!({"type": "TimelineTerminateTimeline", "direction": "Top"}))
                .unwrap();
        assert_eq!(
            serde_json::to_value(model).unwrap(),
            json!({"type": "TimelineTerminateTimeline", "direction": "Top"})
        );
    }

    #[test]
    fn unknown_instruction_type_fails_to_decode() {
        let result: Result<Instruction, _> =
            serde_json::from_value(json!({"type": "TimelineBrandNewInstruction"}));
        assert!(result.is_err());
    }

    #[test]
    fn cursor_entry_decodes_into_the_cursor_variant() {
        let entry: Entry = serde_json::from_value(json!({
            "entryId": "cursor-top-1",
            "sortIndex": "1",
            "content": {
                "entryType": "TimelineTimelineCursor",
                "__typename": "TimelineTimelineCursor",
                "value": "HBaAgIS0qp",
                "cursorType": "Top"
            }
        }))
        .unwrap();
        match entry.content {
            EntryContent::TimelineTimelineCursor { value, cursor_type, .. } => {
                assert_eq!(value, "HBaAgIS0qp");
                assert_eq!(cursor_type, "Top");
            }
            other => panic!("expected cursor content, got {other:?}"),
        }
    }
}
