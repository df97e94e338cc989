//! Storage-level records. Field names follow the reference document layout
//! (camelCase, `name`, `password`), so a seeded `db.json` reads back as-is.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: Uuid,
    pub email: String,
    /// Argon2 PHC string.
    pub password: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub preferences: StoredPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPreferences {
    #[serde(default)]
    pub price_range: StoredPriceRange,
    #[serde(default = "default_any")]
    pub num_roommates: String,
    #[serde(default = "default_genders")]
    pub preferred_genders: Vec<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
}

impl Default for StoredPreferences {
    fn default() -> Self {
        Self {
            price_range: StoredPriceRange::default(),
            num_roommates: default_any(),
            preferred_genders: default_genders(),
            preferred_locations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPriceRange {
    pub min: u32,
    pub max: u32,
}

impl Default for StoredPriceRange {
    fn default() -> Self {
        Self { min: 0, max: 2000 }
    }
}

fn default_any() -> String {
    "Any".to_string()
}

fn default_genders() -> Vec<String> {
    vec!["Any".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredListing {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub neighborhood: String,
    pub price: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub vibes: Vec<String>,
    pub prompt_question: String,
    pub prompt_answer: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
