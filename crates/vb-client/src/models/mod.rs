//! Typed response models and the closed decoding registry.
//!
//! [`ModelKind`] enumerates every response model this client understands.
//! Decoding is always dispatched through it: a type tag with no variant is
//! a distinct, handleable error, never an unchecked lookup. Decoded models
//! are held as their reserialized tree ([`DecodedModel`]) — exactly the
//! representation the match engine compares against the raw payload.

pub mod timeline;
pub mod tweet;
pub mod user;

use serde_json::Value;

use crate::error::ClientError;

/// Every response model variant in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    User,
    UserTweets,
    TweetDetail,
    HomeTimeline,
    ListLatestTweetsTimeline,
}

impl ModelKind {
    pub const ALL: [Self; 5] = [
        Self::User,
        Self::UserTweets,
        Self::TweetDetail,
        Self::HomeTimeline,
        Self::ListLatestTweetsTimeline,
    ];

    /// The type tag recorded alongside captured payloads.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::User => "UserResponse",
            Self::UserTweets => "UserTweetsResponse",
            Self::TweetDetail => "TweetDetailResponse",
            Self::HomeTimeline => "HomeTimelineResponse",
            Self::ListLatestTweetsTimeline => "ListLatestTweetsTimelineResponse",
        }
    }

    /// Look a tag up in the closed registry.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Decode a raw body as this variant and reserialize it to a tree.
    ///
    /// # Errors
    ///
    /// [`ClientError::Decode`] when the body does not match the variant's
    /// schema.
    pub fn decode(self, raw: &str) -> Result<DecodedModel, ClientError> {
        let tree = match self {
            Self::User => reserialize::<user::UserResponse>(self, raw)?,
            Self::UserTweets => reserialize::<timeline::UserTweetsResponse>(self, raw)?,
            Self::TweetDetail => reserialize::<tweet::TweetDetailResponse>(self, raw)?,
            Self::HomeTimeline => reserialize::<timeline::HomeTimelineResponse>(self, raw)?,
            Self::ListLatestTweetsTimeline => {
                reserialize::<timeline::ListTimelineResponse>(self, raw)?
            }
        };
        Ok(DecodedModel { kind: self, tree })
    }
}

/// Decode a raw body by string type tag.
///
/// # Errors
///
/// [`ClientError::UnknownTypeTag`] for tags outside the registry,
/// [`ClientError::Decode`] when the body does not decode.
pub fn decode_tagged(tag: &str, raw: &str) -> Result<DecodedModel, ClientError> {
    ModelKind::from_tag(tag)
        .ok_or_else(|| ClientError::UnknownTypeTag(tag.to_owned()))?
        .decode(raw)
}

fn reserialize<T>(kind: ModelKind, raw: &str) -> Result<Value, ClientError>
where
    T: serde::de::DeserializeOwned + serde::Serialize,
{
    let model: T = serde_json::from_str(raw).map_err(|source| ClientError::Decode {
        type_tag: kind.tag().to_owned(),
        source,
    })?;
    serde_json::to_value(model).map_err(|source| ClientError::Decode {
        type_tag: kind.tag().to_owned(),
        source,
    })
}

/// A decoded model held as its reserialized value tree.
#[derive(Debug, Clone)]
pub struct DecodedModel {
    kind: ModelKind,
    tree: Value,
}

impl DecodedModel {
    #[must_use]
    pub const fn kind(&self) -> ModelKind {
        self.kind
    }

    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// The reserialized representation, as the match engine sees it.
    #[must_use]
    pub const fn tree(&self) -> &Value {
        &self.tree
    }

    /// Whether the payload carries an explicit API-level error member.
    /// Such responses decode fine but still count as failures.
    #[must_use]
    pub fn has_error_payload(&self) -> bool {
        self.tree.get("errors").is_some_and(|errors| !errors.is_null())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tags_round_trip_through_the_registry() {
        for kind in ModelKind::ALL {
            assert_eq!(ModelKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn unknown_tag_is_a_distinct_error() {
        let err = decode_tagged("MysteryResponse", "{}").unwrap_err();
        assert!(matches!(err, ClientError::UnknownTypeTag(tag) if tag == "MysteryResponse"));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_tagged("UserResponse", "not json").unwrap_err();
        assert!(matches!(err, ClientError::Decode { type_tag, .. } if type_tag == "UserResponse"));
    }

    #[test]
    fn error_payload_is_detected() {
        let model = decode_tagged(
            "UserResponse",
            r#"{"errors": [{"message": "rate limit exceeded"}]}"#,
        )
        .unwrap();
        assert!(model.has_error_payload());
    }

    #[test]
    fn clean_payload_has_no_error_member() {
        let model = decode_tagged("UserResponse", r#"{"data": {}}"#).unwrap();
        assert!(!model.has_error_payload());
    }
}
