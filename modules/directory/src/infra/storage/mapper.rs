use anyhow::{anyhow, Result};

use crate::contract::model::{Listing, Role, RoommatePreferences, User};
use crate::infra::storage::records::{
    StoredListing, StoredPreferences, StoredPriceRange, StoredUser,
};

pub fn user_to_record(user: &User, password_hash: String) -> StoredUser {
    StoredUser {
        id: user.id,
        email: user.email.clone(),
        password: password_hash,
        name: user.display_name.clone(),
        role: user.role.as_str().to_string(),
        profile_image: user.profile_image.clone(),
        preferences: StoredPreferences {
            price_range: StoredPriceRange {
                min: user.preferences.price_min,
                max: user.preferences.price_max,
            },
            num_roommates: user.preferences.num_roommates.clone(),
            preferred_genders: user.preferences.preferred_genders.clone(),
            preferred_locations: user.preferences.preferred_neighborhoods.clone(),
        },
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn user_from_record(rec: StoredUser) -> Result<User> {
    let role = Role::parse(&rec.role)
        .ok_or_else(|| anyhow!("unknown role '{}' for user {}", rec.role, rec.id))?;
    Ok(User {
        id: rec.id,
        email: rec.email,
        display_name: rec.name,
        role,
        profile_image: rec.profile_image,
        preferences: RoommatePreferences {
            price_min: rec.preferences.price_range.min,
            price_max: rec.preferences.price_range.max,
            num_roommates: rec.preferences.num_roommates,
            preferred_genders: rec.preferences.preferred_genders,
            preferred_neighborhoods: rec.preferences.preferred_locations,
        },
        created_at: rec.created_at,
        updated_at: rec.updated_at,
    })
}

pub fn listing_to_record(listing: &Listing) -> StoredListing {
    StoredListing {
        id: listing.id,
        owner_id: listing.owner_id,
        title: listing.title.clone(),
        neighborhood: listing.neighborhood.clone(),
        price: listing.price,
        start_date: listing.start_date,
        end_date: listing.end_date,
        images: listing.images.clone(),
        vibes: listing.vibes.clone(),
        prompt_question: listing.prompt_question.clone(),
        prompt_answer: listing.prompt_answer.clone(),
        is_active: listing.is_active,
        created_at: listing.created_at,
        updated_at: listing.updated_at,
    }
}

pub fn listing_from_record(rec: StoredListing) -> Listing {
    Listing {
        id: rec.id,
        owner_id: rec.owner_id,
        title: rec.title,
        neighborhood: rec.neighborhood,
        price: rec.price,
        start_date: rec.start_date,
        end_date: rec.end_date,
        images: rec.images,
        vibes: rec.vibes,
        prompt_question: rec.prompt_question,
        prompt_answer: rec.prompt_answer,
        is_active: rec.is_active,
        created_at: rec.created_at,
        updated_at: rec.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn user_record_roundtrip_preserves_everything_but_password() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "a@example.com".into(),
            display_name: "Alice".into(),
            role: Role::Both,
            profile_image: Some("img.png".into()),
            preferences: RoommatePreferences {
                price_min: 500,
                price_max: 1500,
                num_roommates: "2".into(),
                preferred_genders: vec!["Any".into()],
                preferred_neighborhoods: vec!["Capitol Hill".into()],
            },
            created_at: now,
            updated_at: now,
        };

        let rec = user_to_record(&user, "phc-hash".into());
        assert_eq!(rec.password, "phc-hash");
        assert_eq!(rec.role, "both");

        let back = user_from_record(rec).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn unknown_role_is_an_error() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "a@example.com".into(),
            display_name: "Alice".into(),
            role: Role::Buyer,
            profile_image: None,
            preferences: Default::default(),
            created_at: now,
            updated_at: now,
        };
        let mut rec = user_to_record(&user, "h".into());
        rec.role = "landlord".into();
        assert!(user_from_record(rec).is_err());
    }
}
