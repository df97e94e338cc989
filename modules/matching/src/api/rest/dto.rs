use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::contract::model::Like;
use crate::domain::events::MatchingDomainEvent;

/// REST DTO for a like edge. The wire format is camelCase to stay
/// compatible with the reference API; `listingId` carries the string form
/// of the target (`buyer-<uuid>` for buyer likes).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub listing_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Like> for LikeDto {
    fn from(like: Like) -> Self {
        Self {
            id: like.id,
            user_id: like.actor_id,
            listing_id: like.target.to_string(),
            created_at: like.created_at,
        }
    }
}

/// Compact participant representation embedded in match and message views.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

/// The listing a match is scoped to. For buyer matches this is synthesized
/// from the buyer's profile, so the card UI renders either kind the same way.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchListingDto {
    pub id: String,
    pub title: String,
    pub neighborhood: String,
    pub price: u32,
    pub synthetic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchViewDto {
    pub id: Uuid,
    pub users: Vec<MatchUserDto>,
    pub listing: MatchListingDto,
    pub matched_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    /// Present when the boundary resolved the sender for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<MatchUserDto>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

// --- requests ---

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PostMessageReq {
    pub content: String,
}

// --- responses ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LikeResponse {
    pub like: LikeDto,
    pub matched: bool,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_view: Option<MatchViewDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuyerLikeResponse {
    pub matched: bool,
    #[serde(rename = "match")]
    pub match_view: Option<MatchViewDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnlikeResponse {
    pub removed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchesResponse {
    pub matches: Vec<MatchViewDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub match_view: MatchViewDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessagesResponse {
    pub messages: Vec<MessageDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: MessageDto,
}

/// Transport-level SSE payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(title = "MatchEvent", description = "Server-sent match/message event")]
pub struct MatchEvent {
    pub kind: String,
    pub match_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<Uuid>,
    #[schema(format = "date-time")]
    pub at: DateTime<Utc>,
}

impl From<&MatchingDomainEvent> for MatchEvent {
    fn from(e: &MatchingDomainEvent) -> Self {
        match e {
            MatchingDomainEvent::MatchCreated { match_id, at, .. } => Self {
                kind: "match_created".into(),
                match_id: *match_id,
                message_id: None,
                sender_id: None,
                at: *at,
            },
            MatchingDomainEvent::MessageCreated {
                match_id,
                message_id,
                sender_id,
                at,
            } => Self {
                kind: "message_created".into(),
                match_id: *match_id,
                message_id: Some(*message_id),
                sender_id: Some(*sender_id),
                at: *at,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::LikeTarget;

    #[test]
    fn like_dto_uses_target_string_form() {
        let buyer = Uuid::new_v4();
        let like = Like {
            id: Uuid::new_v4(),
            actor_id: Uuid::new_v4(),
            target: LikeTarget::Buyer(buyer),
            created_at: Utc::now(),
        };
        let dto = LikeDto::from(like);
        assert_eq!(dto.listing_id, format!("buyer-{buyer}"));

        let value = serde_json::to_value(&dto).unwrap();
        assert!(value.get("userId").is_some());
        assert!(value.get("listingId").is_some());
    }

    #[test]
    fn like_response_renames_match_field() {
        let like = Like {
            id: Uuid::new_v4(),
            actor_id: Uuid::new_v4(),
            target: LikeTarget::Listing(Uuid::new_v4()),
            created_at: Utc::now(),
        };
        let resp = LikeResponse {
            like: like.into(),
            matched: false,
            match_view: None,
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["matched"], false);
        // absent match is omitted, not null
        assert!(value.get("match").is_none());
        assert!(value.get("match_view").is_none());
    }

    #[test]
    fn maps_domain_events_to_transport() {
        let match_id = Uuid::new_v4();
        let at = Utc::now();

        let created = MatchingDomainEvent::MatchCreated {
            match_id,
            users: [Uuid::new_v4(), Uuid::new_v4()],
            listing: LikeTarget::Listing(Uuid::new_v4()),
            at,
        };
        let out = MatchEvent::from(&created);
        assert_eq!(out.kind, "match_created");
        assert_eq!(out.match_id, match_id);
        assert_eq!(out.message_id, None);
        assert_eq!(out.at, at);

        let message_id = Uuid::new_v4();
        let sender_id = Uuid::new_v4();
        let message = MatchingDomainEvent::MessageCreated {
            match_id,
            message_id,
            sender_id,
            at,
        };
        let out = MatchEvent::from(&message);
        assert_eq!(out.kind, "message_created");
        assert_eq!(out.message_id, Some(message_id));
        assert_eq!(out.sender_id, Some(sender_id));
    }
}
