use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{
    Like, LikeResult, LikeTarget, Match, MatchPolicy, Message, UserPair,
};
use crate::domain::error::DomainError;
use crate::domain::events::MatchingDomainEvent;
use crate::domain::ports::{DirectoryPort, EventPublisher};
use crate::domain::repo::MatchingRepository;

/// The match engine: turns a stream of unilateral likes into at most one
/// match per (pair, listing), and gates the per-match conversation.
/// Depends only on the repository and directory ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn MatchingRepository>,
    directory: Arc<dyn DirectoryPort>,
    events: Arc<dyn EventPublisher<MatchingDomainEvent>>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub policy: MatchPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::Reciprocal,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn MatchingRepository>,
        directory: Arc<dyn DirectoryPort>,
        events: Arc<dyn EventPublisher<MatchingDomainEvent>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            directory,
            events,
            config,
        }
    }

    /// The single entry point for interest declarations. Validates the
    /// target, records the like idempotently, evaluates the active policy
    /// and find-or-creates the match on confirmed mutuality.
    #[instrument(
        name = "matching.service.like",
        skip(self),
        fields(actor = %actor, target = %target)
    )]
    pub async fn like(&self, actor: Uuid, target: LikeTarget) -> Result<LikeResult, DomainError> {
        // Validation precedes any mutation.
        let counterpart = self.validate_target(actor, target).await?;

        let candidate = Like {
            id: Uuid::new_v4(),
            actor_id: actor,
            target,
            created_at: Utc::now(),
        };
        let (like, created) = self
            .repo
            .upsert_like(candidate)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        if !created {
            debug!("duplicate like, returning existing edge {}", like.id);
        }

        let confirmed = match target {
            // Buyer likes match immediately, under either policy.
            LikeTarget::Buyer(_) => true,
            LikeTarget::Listing(_) => match self.config.policy {
                MatchPolicy::AlwaysMatch => true,
                MatchPolicy::Reciprocal => self.has_reciprocal_like(actor, counterpart).await?,
            },
        };

        if !confirmed {
            debug!("no reciprocal like yet, pair stays one-sided");
            return Ok(LikeResult {
                like,
                matched: None,
            });
        }

        let pair =
            UserPair::new(actor, counterpart).map_err(|_| DomainError::IdenticalUsers)?;
        let now = Utc::now();
        let candidate = Match {
            id: Uuid::new_v4(),
            pair,
            listing: target,
            matched_at: now,
            last_message_at: now,
        };
        let (m, created) = self
            .repo
            .insert_match_if_absent(candidate)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        if created {
            info!("match {} formed, scoped to {}", m.id, m.listing);
            self.events.publish(&MatchingDomainEvent::MatchCreated {
                match_id: m.id,
                users: m.pair.users(),
                listing: m.listing,
                at: m.matched_at,
            });
        } else {
            debug!("pair already matched, returning match {}", m.id);
        }

        Ok(LikeResult {
            like,
            matched: Some(m),
        })
    }

    /// Delete the like edge. An already-formed match deliberately survives:
    /// `Matched` is a terminal state.
    #[instrument(
        name = "matching.service.unlike",
        skip(self),
        fields(actor = %actor, target = %target)
    )]
    pub async fn unlike(&self, actor: Uuid, target: LikeTarget) -> Result<bool, DomainError> {
        let removed = self
            .repo
            .remove_like(actor, target)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        debug!("unlike removed={removed}");
        Ok(removed)
    }

    /// Existence check on the ledger.
    pub async fn has_liked(&self, actor: Uuid, target: LikeTarget) -> Result<bool, DomainError> {
        self.repo
            .has_liked(actor, target)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    /// Every like the actor holds; used for the saved list and by the
    /// directory's browse exclusions.
    pub async fn likes_by_actor(&self, actor: Uuid) -> Result<Vec<Like>, DomainError> {
        self.repo
            .likes_by_actor(actor)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    /// The caller's matches, most recent conversation activity first.
    #[instrument(name = "matching.service.matches_for", skip(self))]
    pub async fn matches_for(&self, user: Uuid) -> Result<Vec<Match>, DomainError> {
        let mut matches = self
            .repo
            .matches_for_user(user)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        matches.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
        Ok(matches)
    }

    /// Load a match, enforcing that the requester is one of its two users.
    #[instrument(name = "matching.service.get_match", skip(self), fields(match_id = %id))]
    pub async fn get_match(&self, id: Uuid, requester: Uuid) -> Result<Match, DomainError> {
        let m = self
            .repo
            .find_match_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::match_not_found(id))?;
        if !m.pair.contains(requester) {
            return Err(DomainError::not_authorized(requester, id));
        }
        Ok(m)
    }

    /// Canonical order-independent lookup.
    pub async fn find_match_for_pair(
        &self,
        a: Uuid,
        b: Uuid,
        listing: LikeTarget,
    ) -> Result<Option<Match>, DomainError> {
        let pair = UserPair::new(a, b).map_err(|_| DomainError::IdenticalUsers)?;
        self.repo
            .find_match_for_pair(pair, listing)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    // --- conversation gating ---

    /// Messages of a match, creation time ascending. Only participants may
    /// read.
    #[instrument(name = "matching.service.list_messages", skip(self), fields(match_id = %match_id))]
    pub async fn list_messages(
        &self,
        match_id: Uuid,
        requester: Uuid,
    ) -> Result<Vec<Message>, DomainError> {
        self.get_match(match_id, requester).await?;

        let mut messages = self
            .repo
            .messages_for_match(match_id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        // Stable sort; append order breaks ties within one timestamp.
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    /// Append a message. The append and the `last_message_at` bump are one
    /// storage unit; the caller observes both or neither.
    #[instrument(
        name = "matching.service.post_message",
        skip(self, content),
        fields(match_id = %match_id, sender = %sender)
    )]
    pub async fn post_message(
        &self,
        match_id: Uuid,
        sender: Uuid,
        content: &str,
    ) -> Result<Message, DomainError> {
        self.get_match(match_id, sender).await?;

        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::empty_content());
        }

        let message = Message {
            id: Uuid::new_v4(),
            match_id,
            sender_id: sender,
            content: content.to_string(),
            created_at: Utc::now(),
            read: false,
        };
        let (message, _match) = self
            .repo
            .append_message(message)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::match_not_found(match_id))?;

        self.events.publish(&MatchingDomainEvent::MessageCreated {
            match_id,
            message_id: message.id,
            sender_id: sender,
            at: message.created_at,
        });

        info!("message {} appended to match {}", message.id, match_id);
        Ok(message)
    }

    // --- helpers ---

    /// Resolve and validate the target, returning the user on the other
    /// side of the prospective pair.
    async fn validate_target(
        &self,
        actor: Uuid,
        target: LikeTarget,
    ) -> Result<Uuid, DomainError> {
        match target {
            LikeTarget::Listing(id) => {
                let listing = self
                    .directory
                    .find_listing(id)
                    .await
                    .map_err(|e| DomainError::storage(e.to_string()))?
                    .filter(|l| l.is_active)
                    .ok_or_else(|| DomainError::target_not_found(target))?;
                if listing.owner_id == actor {
                    return Err(DomainError::self_like());
                }
                Ok(listing.owner_id)
            }
            LikeTarget::Buyer(user) => {
                if user == actor {
                    return Err(DomainError::self_like());
                }
                if !self
                    .directory
                    .is_buyer(user)
                    .await
                    .map_err(|e| DomainError::storage(e.to_string()))?
                {
                    return Err(DomainError::target_not_found(target));
                }
                Ok(user)
            }
        }
    }

    /// Reciprocity test: has the counterpart liked one of the actor's own
    /// active listings? Scanned in ascending (created_at, id) order, first
    /// hit wins, so the outcome is deterministic.
    async fn has_reciprocal_like(
        &self,
        actor: Uuid,
        counterpart: Uuid,
    ) -> Result<bool, DomainError> {
        let mut own = self
            .directory
            .active_listings_of(actor)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        own.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        for listing in own {
            if self
                .repo
                .has_liked(counterpart, LikeTarget::Listing(listing.id))
                .await
                .map_err(|e| DomainError::storage(e.to_string()))?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
