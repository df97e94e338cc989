use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{Like, LikeTarget, Match, Message, UserPair};

/// Port for the domain layer: persistence operations the engine needs.
/// The uniqueness-sensitive operations are find-or-create inside one
/// storage unit, so concurrent callers can never insert duplicates.
#[async_trait]
pub trait MatchingRepository: Send + Sync {
    // --- like ledger ---

    /// Find-or-insert the (actor, target) edge. Returns the canonical edge
    /// and whether it was newly created.
    async fn upsert_like(&self, like: Like) -> anyhow::Result<(Like, bool)>;
    async fn has_liked(&self, actor: Uuid, target: LikeTarget) -> anyhow::Result<bool>;
    /// Every edge the actor created, unordered.
    async fn likes_by_actor(&self, actor: Uuid) -> anyhow::Result<Vec<Like>>;
    /// Delete the edge. Returns true if one existed.
    async fn remove_like(&self, actor: Uuid, target: LikeTarget) -> anyhow::Result<bool>;

    // --- matches ---

    /// Find-or-create under the (pair, listing) uniqueness constraint:
    /// existence is re-checked inside the commit and an existing row is
    /// returned instead of inserting a second one.
    async fn insert_match_if_absent(&self, m: Match) -> anyhow::Result<(Match, bool)>;
    async fn find_match_by_id(&self, id: Uuid) -> anyhow::Result<Option<Match>>;
    async fn find_match_for_pair(
        &self,
        pair: UserPair,
        listing: LikeTarget,
    ) -> anyhow::Result<Option<Match>>;
    /// Every match the user participates in, unordered.
    async fn matches_for_user(&self, user: Uuid) -> anyhow::Result<Vec<Match>>;

    // --- messages ---

    /// Append a message and bump the match's `last_message_at` in the same
    /// storage unit. Returns None when the match does not exist.
    async fn append_message(&self, message: Message)
        -> anyhow::Result<Option<(Message, Match)>>;
    /// All messages of a match, unordered.
    async fn messages_for_match(&self, match_id: Uuid) -> anyhow::Result<Vec<Message>>;
}
