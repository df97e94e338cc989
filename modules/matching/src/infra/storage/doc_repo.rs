//! Docstore-backed repository implementation for the engine port.
//!
//! Every uniqueness-sensitive operation re-checks existence inside a single
//! `commit`, which runs under the document write lock: two racing callers
//! serialize, the loser sees the winner's row and gets it back instead of
//! inserting a duplicate.

use std::sync::Arc;

use async_trait::async_trait;
use docstore::DocStore;
use uuid::Uuid;

use crate::contract::model::{Like, LikeTarget, Match, Message, UserPair};
use crate::domain::repo::MatchingRepository;
use crate::infra::storage::mapper::{
    like_from_record, like_to_record, match_from_record, match_to_record, message_from_record,
    message_to_record,
};
use crate::infra::storage::records::{StoredLike, StoredMatch, StoredMessage};

const LIKES: &str = "likes";
const MATCHES: &str = "matches";
const MESSAGES: &str = "messages";

pub struct DocMatchingRepository {
    store: Arc<DocStore>,
}

impl DocMatchingRepository {
    pub fn new(store: Arc<DocStore>) -> Self {
        Self { store }
    }

    async fn likes(&self) -> anyhow::Result<Vec<StoredLike>> {
        Ok(self.store.view(|c| c.get(LIKES)).await?)
    }

    async fn matches(&self) -> anyhow::Result<Vec<StoredMatch>> {
        Ok(self.store.view(|c| c.get(MATCHES)).await?)
    }
}

#[async_trait]
impl MatchingRepository for DocMatchingRepository {
    async fn upsert_like(&self, like: Like) -> anyhow::Result<(Like, bool)> {
        let rec = like_to_record(&like);
        let (stored, created) = self
            .store
            .commit(move |c| {
                let mut likes: Vec<StoredLike> = c.get(LIKES)?;
                if let Some(existing) = likes
                    .iter()
                    .find(|l| l.user_id == rec.user_id && l.listing_id == rec.listing_id)
                {
                    return Ok((existing.clone(), false));
                }
                likes.push(rec.clone());
                c.set(LIKES, &likes)?;
                Ok((rec, true))
            })
            .await?;
        Ok((like_from_record(stored)?, created))
    }

    async fn has_liked(&self, actor: Uuid, target: LikeTarget) -> anyhow::Result<bool> {
        let key = target.to_string();
        Ok(self
            .likes()
            .await?
            .iter()
            .any(|l| l.user_id == actor && l.listing_id == key))
    }

    async fn likes_by_actor(&self, actor: Uuid) -> anyhow::Result<Vec<Like>> {
        self.likes()
            .await?
            .into_iter()
            .filter(|l| l.user_id == actor)
            .map(like_from_record)
            .collect()
    }

    async fn remove_like(&self, actor: Uuid, target: LikeTarget) -> anyhow::Result<bool> {
        let key = target.to_string();
        let removed = self
            .store
            .commit(move |c| {
                let mut likes: Vec<StoredLike> = c.get(LIKES)?;
                let before = likes.len();
                likes.retain(|l| !(l.user_id == actor && l.listing_id == key));
                let removed = likes.len() != before;
                if removed {
                    c.set(LIKES, &likes)?;
                }
                Ok(removed)
            })
            .await?;
        Ok(removed)
    }

    async fn insert_match_if_absent(&self, m: Match) -> anyhow::Result<(Match, bool)> {
        let rec = match_to_record(&m);
        let (stored, created) = self
            .store
            .commit(move |c| {
                let mut matches: Vec<StoredMatch> = c.get(MATCHES)?;
                if let Some(existing) = matches
                    .iter()
                    .find(|x| x.users == rec.users && x.listing_id == rec.listing_id)
                {
                    return Ok((existing.clone(), false));
                }
                matches.push(rec.clone());
                c.set(MATCHES, &matches)?;
                Ok((rec, true))
            })
            .await?;
        Ok((match_from_record(stored)?, created))
    }

    async fn find_match_by_id(&self, id: Uuid) -> anyhow::Result<Option<Match>> {
        self.matches()
            .await?
            .into_iter()
            .find(|m| m.id == id)
            .map(match_from_record)
            .transpose()
    }

    async fn find_match_for_pair(
        &self,
        pair: UserPair,
        listing: LikeTarget,
    ) -> anyhow::Result<Option<Match>> {
        let users = pair.users().to_vec();
        let key = listing.to_string();
        self.matches()
            .await?
            .into_iter()
            .find(|m| m.users == users && m.listing_id == key)
            .map(match_from_record)
            .transpose()
    }

    async fn matches_for_user(&self, user: Uuid) -> anyhow::Result<Vec<Match>> {
        self.matches()
            .await?
            .into_iter()
            .filter(|m| m.users.contains(&user))
            .map(match_from_record)
            .collect()
    }

    async fn append_message(
        &self,
        message: Message,
    ) -> anyhow::Result<Option<(Message, Match)>> {
        let rec = message_to_record(&message);
        let out = self
            .store
            .commit(move |c| {
                let mut matches: Vec<StoredMatch> = c.get(MATCHES)?;
                let Some(m) = matches.iter_mut().find(|m| m.id == rec.match_id) else {
                    return Ok(None);
                };
                // Monotonic bump; a concurrent later message never moves it back.
                if rec.created_at > m.last_message_at {
                    m.last_message_at = rec.created_at;
                }
                let updated = m.clone();

                let mut messages: Vec<StoredMessage> = c.get(MESSAGES)?;
                messages.push(rec.clone());
                c.set(MESSAGES, &messages)?;
                c.set(MATCHES, &matches)?;
                Ok(Some((rec, updated)))
            })
            .await?;

        match out {
            Some((msg, m)) => Ok(Some((message_from_record(msg), match_from_record(m)?))),
            None => Ok(None),
        }
    }

    async fn messages_for_match(&self, match_id: Uuid) -> anyhow::Result<Vec<Message>> {
        Ok(self
            .store
            .view(|c| c.get::<StoredMessage>(MESSAGES))
            .await?
            .into_iter()
            .filter(|m| m.match_id == match_id)
            .map(message_from_record)
            .collect())
    }
}
