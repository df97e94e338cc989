use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::contract::model::{
    Listing, ListingPatch, NewListing, RoommatePreferences, User,
};

/// REST DTO for user representation. The wire format is camelCase to stay
/// compatible with the reference API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub profile_image: Option<String>,
    pub preferences: PreferencesDto,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesDto {
    pub price_range: PriceRangeDto,
    pub num_roommates: String,
    pub preferred_genders: Vec<String>,
    pub preferred_locations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceRangeDto {
    pub min: u32,
    pub max: u32,
}

/// Compact owner/sender representation embedded in other payloads.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDto {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Present when the boundary resolved the owner for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserSummaryDto>,
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
}

// --- requests ---

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterReq {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesReq {
    pub price_range: Option<PriceRangeDto>,
    pub num_roommates: Option<String>,
    pub preferred_genders: Option<Vec<String>>,
    pub preferred_locations: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingReq {
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
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingReq {
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

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BrowseQuery {
    /// "sellers" or "buyers"; anything else is ignored.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// --- responses ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuyersResponse {
    pub buyers: Vec<UserDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListingResponse {
    pub listing: ListingDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListingsResponse {
    pub listings: Vec<ListingDto>,
}

// --- conversions ---

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.display_name,
            role: user.role.as_str().to_string(),
            profile_image: user.profile_image,
            preferences: user.preferences.into(),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserSummaryDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.display_name.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}

impl From<RoommatePreferences> for PreferencesDto {
    fn from(p: RoommatePreferences) -> Self {
        Self {
            price_range: PriceRangeDto {
                min: p.price_min,
                max: p.price_max,
            },
            num_roommates: p.num_roommates,
            preferred_genders: p.preferred_genders,
            preferred_locations: p.preferred_neighborhoods,
        }
    }
}

impl From<Listing> for ListingDto {
    fn from(l: Listing) -> Self {
        Self {
            id: l.id,
            owner_id: l.owner_id,
            owner: None,
            title: l.title,
            neighborhood: l.neighborhood,
            price: l.price,
            start_date: l.start_date,
            end_date: l.end_date,
            images: l.images,
            vibes: l.vibes,
            prompt_question: l.prompt_question,
            prompt_answer: l.prompt_answer,
            is_active: l.is_active,
            created_at: l.created_at,
        }
    }
}

impl ListingDto {
    pub fn with_owner(mut self, owner: &User) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

impl From<CreateListingReq> for NewListing {
    fn from(req: CreateListingReq) -> Self {
        Self {
            title: req.title,
            neighborhood: req.neighborhood,
            price: req.price,
            start_date: req.start_date,
            end_date: req.end_date,
            images: req.images,
            vibes: req.vibes,
            prompt_question: req.prompt_question,
            prompt_answer: req.prompt_answer,
        }
    }
}

impl From<UpdateListingReq> for ListingPatch {
    fn from(req: UpdateListingReq) -> Self {
        Self {
            title: req.title,
            neighborhood: req.neighborhood,
            price: req.price,
            start_date: req.start_date,
            end_date: req.end_date,
            images: req.images,
            vibes: req.vibes,
            prompt_question: req.prompt_question,
            prompt_answer: req.prompt_answer,
            is_active: req.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::Role;
    use chrono::Utc;

    #[test]
    fn user_dto_uses_camel_case_wire_names() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "a@example.com".into(),
            display_name: "Alice".into(),
            role: Role::Seller,
            profile_image: Some("img.png".into()),
            preferences: Default::default(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(UserDto::from(user)).unwrap();
        assert!(value.get("profileImage").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["role"], "seller");
        assert!(value["preferences"].get("priceRange").is_some());
    }

    #[test]
    fn listing_dto_omits_owner_until_populated() {
        let now = Utc::now();
        let listing = Listing {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Sunny room".into(),
            neighborhood: "U-District".into(),
            price: 900,
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            images: vec![],
            vibes: vec!["quiet".into()],
            prompt_question: "Ideal weekend?".into(),
            prompt_answer: "Hiking".into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(ListingDto::from(listing)).unwrap();
        assert!(value.get("owner").is_none());
        assert!(value.get("ownerId").is_some());
        assert!(value.get("promptQuestion").is_some());
    }
}
