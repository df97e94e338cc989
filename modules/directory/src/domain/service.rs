use std::collections::HashSet;
use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{
    BrowseKind, Listing, ListingPatch, NewListing, NewUser, Role, User, UserPatch,
};
use crate::domain::error::DomainError;
use crate::domain::ports::InterestReader;
use crate::domain::repo::DirectoryRepository;

/// Domain service with business rules for users and listings.
/// Depends only on the repository and the interest port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn DirectoryRepository>,
    interest: Arc<dyn InterestReader>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_display_name_length: usize,
    pub min_password_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_display_name_length: 100,
            min_password_length: 6,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn DirectoryRepository>,
        interest: Arc<dyn InterestReader>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            interest,
            config,
        }
    }

    // --- accounts ---

    #[instrument(
        name = "directory.service.register",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn register(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Registering new user");

        self.validate_email(&new_user.email)?;
        self.validate_display_name(&new_user.display_name)?;
        if new_user.password.len() < self.config.min_password_length {
            return Err(DomainError::password_too_short(
                self.config.min_password_length,
            ));
        }

        let email = new_user.email.trim().to_ascii_lowercase();
        if self
            .repo
            .email_exists(&email)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
        {
            return Err(DomainError::email_already_exists(email));
        }

        let password_hash = hash_password(&new_user.password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            display_name: new_user.display_name,
            role: new_user.role,
            profile_image: None,
            preferences: Default::default(),
            created_at: now,
            updated_at: now,
        };

        self.repo
            .insert_user(user.clone(), password_hash)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Successfully registered user with id={}", user.id);
        Ok(user)
    }

    /// Verify credentials and return the account. Any mismatch, including an
    /// unknown email, reads as `InvalidCredentials`.
    #[instrument(name = "directory.service.authenticate", skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = email.trim().to_ascii_lowercase();
        let (user, hash) = self
            .repo
            .find_credentials(&email)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or(DomainError::InvalidCredentials)?;

        if !verify_password(password, &hash) {
            return Err(DomainError::InvalidCredentials);
        }

        debug!("Authenticated user {}", user.id);
        Ok(user)
    }

    #[instrument(name = "directory.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.repo
            .find_user_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(name = "directory.service.update_user", skip(self, patch), fields(user_id = %id))]
    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        if let Some(ref display_name) = patch.display_name {
            self.validate_display_name(display_name)?;
        }

        let mut current = self.get_user(id).await?;

        if let Some(display_name) = patch.display_name {
            current.display_name = display_name;
        }
        if let Some(role) = patch.role {
            current.role = role;
        }
        if let Some(profile_image) = patch.profile_image {
            current.profile_image = Some(profile_image);
        }
        if let Some(preferences) = patch.preferences {
            current.preferences = preferences;
        }
        current.updated_at = Utc::now();

        self.repo
            .update_user(current.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Updated user profile");
        Ok(current)
    }

    /// Pure buyers other than the viewer, for the browse-buyers tab.
    #[instrument(name = "directory.service.browse_buyers", skip(self))]
    pub async fn browse_buyers(&self, viewer: Uuid) -> Result<Vec<User>, DomainError> {
        let users = self
            .repo
            .list_users()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        Ok(users
            .into_iter()
            .filter(|u| u.role == Role::Buyer && u.id != viewer)
            .collect())
    }

    // --- listings ---

    #[instrument(name = "directory.service.create_listing", skip(self, new_listing), fields(owner = %owner))]
    pub async fn create_listing(
        &self,
        owner: Uuid,
        new_listing: NewListing,
    ) -> Result<Listing, DomainError> {
        if new_listing.title.trim().is_empty() {
            return Err(DomainError::validation("title", "cannot be empty"));
        }
        if new_listing.end_date < new_listing.start_date {
            return Err(DomainError::validation(
                "end_date",
                "must not precede start_date",
            ));
        }

        // The owner must exist before anything hangs off them.
        self.get_user(owner).await?;

        let now = Utc::now();
        let listing = Listing {
            id: Uuid::new_v4(),
            owner_id: owner,
            title: new_listing.title,
            neighborhood: new_listing.neighborhood,
            price: new_listing.price,
            start_date: new_listing.start_date,
            end_date: new_listing.end_date,
            images: new_listing.images,
            vibes: new_listing.vibes,
            prompt_question: new_listing.prompt_question,
            prompt_answer: new_listing.prompt_answer,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .insert_listing(listing.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Created listing {}", listing.id);
        Ok(listing)
    }

    #[instrument(name = "directory.service.get_listing", skip(self), fields(listing_id = %id))]
    pub async fn get_listing(&self, id: Uuid) -> Result<Listing, DomainError> {
        self.repo
            .find_listing(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::listing_not_found(id))
    }

    /// The owner's own listings, newest first.
    #[instrument(name = "directory.service.my_listings", skip(self))]
    pub async fn my_listings(&self, owner: Uuid) -> Result<Vec<Listing>, DomainError> {
        let mut listings = self
            .repo
            .listings_by_owner(owner)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    #[instrument(name = "directory.service.update_listing", skip(self, patch), fields(listing_id = %id))]
    pub async fn update_listing(
        &self,
        actor: Uuid,
        id: Uuid,
        patch: ListingPatch,
    ) -> Result<Listing, DomainError> {
        let mut current = self.get_listing(id).await?;
        if current.owner_id != actor {
            return Err(DomainError::not_owner(actor, id));
        }

        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title", "cannot be empty"));
            }
            current.title = title;
        }
        if let Some(neighborhood) = patch.neighborhood {
            current.neighborhood = neighborhood;
        }
        if let Some(price) = patch.price {
            current.price = price;
        }
        if let Some(start_date) = patch.start_date {
            current.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            current.end_date = end_date;
        }
        if let Some(images) = patch.images {
            current.images = images;
        }
        if let Some(vibes) = patch.vibes {
            current.vibes = vibes;
        }
        if let Some(prompt_question) = patch.prompt_question {
            current.prompt_question = prompt_question;
        }
        if let Some(prompt_answer) = patch.prompt_answer {
            current.prompt_answer = prompt_answer;
        }
        if let Some(is_active) = patch.is_active {
            current.is_active = is_active;
        }
        if current.end_date < current.start_date {
            return Err(DomainError::validation(
                "end_date",
                "must not precede start_date",
            ));
        }
        current.updated_at = Utc::now();

        self.repo
            .update_listing(current.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Updated listing");
        Ok(current)
    }

    #[instrument(name = "directory.service.delete_listing", skip(self), fields(listing_id = %id))]
    pub async fn delete_listing(&self, actor: Uuid, id: Uuid) -> Result<(), DomainError> {
        let current = self.get_listing(id).await?;
        if current.owner_id != actor {
            return Err(DomainError::not_owner(actor, id));
        }

        let deleted = self
            .repo
            .delete_listing(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        if !deleted {
            return Err(DomainError::listing_not_found(id));
        }

        info!("Deleted listing");
        Ok(())
    }

    /// Active listings for swiping: never the viewer's own, never one the
    /// viewer already liked, optionally filtered by the owner's market role.
    /// Newest first.
    #[instrument(name = "directory.service.browse", skip(self))]
    pub async fn browse(
        &self,
        viewer: Uuid,
        kind: Option<BrowseKind>,
    ) -> Result<Vec<Listing>, DomainError> {
        let liked: HashSet<Uuid> = self
            .interest
            .liked_listings(viewer)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .into_iter()
            .map(|l| l.listing_id)
            .collect();

        let mut listings = self
            .repo
            .active_listings()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        listings.retain(|l| l.owner_id != viewer && !liked.contains(&l.id));

        if let Some(kind) = kind {
            let users = self
                .repo
                .list_users()
                .await
                .map_err(|e| DomainError::storage(e.to_string()))?;
            let wanted: HashSet<Uuid> = users
                .into_iter()
                .filter(|u| match kind {
                    BrowseKind::Sellers => u.role.offers_listings(),
                    BrowseKind::Buyers => u.role == Role::Buyer,
                })
                .map(|u| u.id)
                .collect();
            listings.retain(|l| wanted.contains(&l.owner_id));
        }

        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!("Browse returned {} listings", listings.len());
        Ok(listings)
    }

    /// Active listings the viewer liked, most recently liked first.
    #[instrument(name = "directory.service.saved_listings", skip(self))]
    pub async fn saved_listings(&self, viewer: Uuid) -> Result<Vec<Listing>, DomainError> {
        let mut liked = self
            .interest
            .liked_listings(viewer)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        liked.sort_by(|a, b| b.liked_at.cmp(&a.liked_at));

        let mut out = Vec::with_capacity(liked.len());
        for entry in liked {
            let listing = self
                .repo
                .find_listing(entry.listing_id)
                .await
                .map_err(|e| DomainError::storage(e.to_string()))?;
            if let Some(listing) = listing {
                if listing.is_active {
                    out.push(listing);
                }
            }
        }
        Ok(out)
    }

    // --- validation helpers ---

    fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if email.is_empty() || !email.contains('@') || !email.contains('.') {
            return Err(DomainError::invalid_email(email.to_string()));
        }
        Ok(())
    }

    fn validate_display_name(&self, display_name: &str) -> Result<(), DomainError> {
        if display_name.trim().is_empty() {
            return Err(DomainError::empty_display_name());
        }
        if display_name.len() > self.config.max_display_name_length {
            return Err(DomainError::display_name_too_long(
                display_name.len(),
                self.config.max_display_name_length,
            ));
        }
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| DomainError::storage(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
