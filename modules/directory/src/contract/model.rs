use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// How a user participates in the market: looking for a room, offering one,
/// or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Buyer,
    Seller,
    Both,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "buyer" => Some(Role::Buyer),
            "seller" => Some(Role::Seller),
            "both" => Some(Role::Both),
            _ => None,
        }
    }

    /// Whether this user's listings show up on the "sellers" browse tab.
    pub fn offers_listings(&self) -> bool {
        matches!(self, Role::Seller | Role::Both)
    }
}

/// Roommate preferences carried on the user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoommatePreferences {
    pub price_min: u32,
    pub price_max: u32,
    pub num_roommates: String,
    pub preferred_genders: Vec<String>,
    pub preferred_neighborhoods: Vec<String>,
}

impl Default for RoommatePreferences {
    fn default() -> Self {
        Self {
            price_min: 0,
            price_max: 2000,
            num_roommates: "Any".to_string(),
            preferred_genders: vec!["Any".to_string()],
            preferred_neighborhoods: Vec::new(),
        }
    }
}

/// Pure user model for inter-module communication (no serde).
/// The password hash is a storage concern and never appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub profile_image: Option<String>,
    pub preferences: RoommatePreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: Role,
}

/// Partial update data for a user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub display_name: Option<String>,
    pub role: Option<Role>,
    pub profile_image: Option<String>,
    pub preferences: Option<RoommatePreferences>,
}

/// A sublet/room listing owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub neighborhood: String,
    pub price: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub images: Vec<String>,
    pub vibes: Vec<String>,
    pub prompt_question: String,
    pub prompt_answer: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    pub title: String,
    pub neighborhood: String,
    pub price: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub images: Vec<String>,
    pub vibes: Vec<String>,
    pub prompt_question: String,
    pub prompt_answer: String,
}

/// Partial update data for a listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub neighborhood: Option<String>,
    pub price: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub images: Option<Vec<String>>,
    pub vibes: Option<Vec<String>>,
    pub prompt_question: Option<String>,
    pub prompt_answer: Option<String>,
    pub is_active: Option<bool>,
}

/// Which side of the market a browse request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseKind {
    Sellers,
    Buyers,
}

impl BrowseKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sellers" => Some(BrowseKind::Sellers),
            "buyers" => Some(BrowseKind::Buyers),
            _ => None,
        }
    }
}
