use anyhow::{anyhow, Context, Result};

use crate::contract::model::{Like, LikeTarget, Match, Message, UserPair};
use crate::infra::storage::records::{StoredLike, StoredMatch, StoredMessage};

pub fn like_to_record(like: &Like) -> StoredLike {
    StoredLike {
        id: like.id,
        user_id: like.actor_id,
        listing_id: like.target.to_string(),
        created_at: like.created_at,
    }
}

pub fn like_from_record(rec: StoredLike) -> Result<Like> {
    let target: LikeTarget = rec
        .listing_id
        .parse()
        .with_context(|| format!("like {}", rec.id))?;
    Ok(Like {
        id: rec.id,
        actor_id: rec.user_id,
        target,
        created_at: rec.created_at,
    })
}

pub fn match_to_record(m: &Match) -> StoredMatch {
    StoredMatch {
        id: m.id,
        users: m.pair.users().to_vec(),
        listing_id: m.listing.to_string(),
        matched_at: m.matched_at,
        last_message_at: m.last_message_at,
    }
}

pub fn match_from_record(rec: StoredMatch) -> Result<Match> {
    let [a, b] = <[uuid::Uuid; 2]>::try_from(rec.users.as_slice())
        .map_err(|_| anyhow!("match {} must have exactly 2 users", rec.id))?;
    let pair = UserPair::new(a, b)
        .map_err(|_| anyhow!("match {} must have two distinct users", rec.id))?;
    let listing: LikeTarget = rec
        .listing_id
        .parse()
        .with_context(|| format!("match {}", rec.id))?;
    Ok(Match {
        id: rec.id,
        pair,
        listing,
        matched_at: rec.matched_at,
        last_message_at: rec.last_message_at,
    })
}

pub fn message_to_record(message: &Message) -> StoredMessage {
    StoredMessage {
        id: message.id,
        match_id: message.match_id,
        sender_id: message.sender_id,
        content: message.content.clone(),
        created_at: message.created_at,
        read: message.read,
    }
}

pub fn message_from_record(rec: StoredMessage) -> Message {
    Message {
        id: rec.id,
        match_id: rec.match_id,
        sender_id: rec.sender_id,
        content: rec.content,
        created_at: rec.created_at,
        read: rec.read,
    }
}
