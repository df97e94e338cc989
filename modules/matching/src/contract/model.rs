use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// What a like points at: a real listing, or another user in their buyer
/// capacity. The buyer case reuses the listing plumbing through a synthetic
/// id, encoded as `buyer-<uuid>` in documents and URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Listing(Uuid),
    Buyer(Uuid),
}

impl LikeTarget {
    pub fn listing_id(&self) -> Option<Uuid> {
        match self {
            LikeTarget::Listing(id) => Some(*id),
            LikeTarget::Buyer(_) => None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, LikeTarget::Buyer(_))
    }
}

impl fmt::Display for LikeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LikeTarget::Listing(id) => write!(f, "{id}"),
            LikeTarget::Buyer(id) => write!(f, "buyer-{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid like target '{0}'")]
pub struct InvalidTarget(pub String);

impl FromStr for LikeTarget {
    type Err = InvalidTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("buyer-") {
            Some(rest) => Uuid::parse_str(rest).map(LikeTarget::Buyer),
            None => Uuid::parse_str(s).map(LikeTarget::Listing),
        };
        parsed.map_err(|_| InvalidTarget(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a match requires two distinct users")]
pub struct IdenticalUsers;

/// Canonical unordered pair of two distinct users. Construction sorts the
/// ids, so the same two people always map to the same pair no matter who
/// liked whom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserPair {
    lo: Uuid,
    hi: Uuid,
}

impl UserPair {
    pub fn new(a: Uuid, b: Uuid) -> Result<Self, IdenticalUsers> {
        if a == b {
            return Err(IdenticalUsers);
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { lo, hi })
    }

    /// Both members, in canonical (sorted) order.
    pub fn users(&self) -> [Uuid; 2] {
        [self.lo, self.hi]
    }

    pub fn contains(&self, user: Uuid) -> bool {
        self.lo == user || self.hi == user
    }

    pub fn other(&self, user: Uuid) -> Option<Uuid> {
        if self.lo == user {
            Some(self.hi)
        } else if self.hi == user {
            Some(self.lo)
        } else {
            None
        }
    }
}

/// A unilateral interest declaration. At most one edge per (actor, target).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub target: LikeTarget,
    pub created_at: DateTime<Utc>,
}

/// A confirmed mutual relationship between exactly two users, scoped to a
/// listing (real or synthetic). At most one per (pair, listing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: Uuid,
    pub pair: UserPair,
    pub listing: LikeTarget,
    pub matched_at: DateTime<Utc>,
    /// Monotonically non-decreasing; bumped on every new message.
    pub last_message_at: DateTime<Utc>,
}

/// A chat message within a match's conversation. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// Outcome of recording a like: the (possibly pre-existing) edge and the
/// match this like confirmed, when mutuality now holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeResult {
    pub like: Like,
    pub matched: Option<Match>,
}

/// When a like turns into a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// A listing like matches only once the owner has liked one of the
    /// actor's own active listings back.
    Reciprocal,
    /// Demo mode: every valid like matches immediately.
    AlwaysMatch,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Reciprocal => "reciprocal",
            MatchPolicy::AlwaysMatch => "always",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reciprocal" => Some(MatchPolicy::Reciprocal),
            "always" => Some(MatchPolicy::AlwaysMatch),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_order_independent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let ab = UserPair::new(a, b).unwrap();
        let ba = UserPair::new(b, a).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.users(), ba.users());
        assert!(ab.users()[0] < ab.users()[1]);
    }

    #[test]
    fn pair_rejects_identical_users() {
        let a = Uuid::new_v4();
        assert_eq!(UserPair::new(a, a), Err(IdenticalUsers));
    }

    #[test]
    fn pair_membership() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let pair = UserPair::new(a, b).unwrap();

        assert!(pair.contains(a));
        assert!(pair.contains(b));
        assert!(!pair.contains(c));
        assert_eq!(pair.other(a), Some(b));
        assert_eq!(pair.other(b), Some(a));
        assert_eq!(pair.other(c), None);
    }

    #[test]
    fn target_string_form_roundtrips() {
        let id = Uuid::new_v4();

        let listing = LikeTarget::Listing(id);
        assert_eq!(listing.to_string().parse::<LikeTarget>().unwrap(), listing);
        assert_eq!(listing.to_string(), id.to_string());

        let buyer = LikeTarget::Buyer(id);
        assert_eq!(buyer.to_string(), format!("buyer-{id}"));
        assert_eq!(buyer.to_string().parse::<LikeTarget>().unwrap(), buyer);
    }

    #[test]
    fn malformed_targets_fail_to_parse() {
        assert!("".parse::<LikeTarget>().is_err());
        assert!("buyer-".parse::<LikeTarget>().is_err());
        assert!("buyer-not-a-uuid".parse::<LikeTarget>().is_err());
        assert!("seller-123".parse::<LikeTarget>().is_err());
    }

    #[test]
    fn policy_roundtrip() {
        for policy in [MatchPolicy::Reciprocal, MatchPolicy::AlwaysMatch] {
            assert_eq!(MatchPolicy::parse(policy.as_str()), Some(policy));
        }
        assert_eq!(MatchPolicy::parse("sometimes"), None);
    }
}
