//! Docstore-backed repository implementation for the domain port.
//!
//! Reads decode whole collections under the shared lock; mutations run as
//! single `commit` units, so concurrent writers never interleave.

use std::sync::Arc;

use async_trait::async_trait;
use docstore::DocStore;
use uuid::Uuid;

use crate::contract::model::{Listing, User};
use crate::domain::repo::DirectoryRepository;
use crate::infra::storage::mapper::{
    listing_from_record, listing_to_record, user_from_record, user_to_record,
};
use crate::infra::storage::records::{StoredListing, StoredUser};

const USERS: &str = "users";
const LISTINGS: &str = "listings";

pub struct DocDirectoryRepository {
    store: Arc<DocStore>,
}

impl DocDirectoryRepository {
    pub fn new(store: Arc<DocStore>) -> Self {
        Self { store }
    }

    async fn users(&self) -> anyhow::Result<Vec<StoredUser>> {
        Ok(self.store.view(|c| c.get(USERS)).await?)
    }

    async fn listings(&self) -> anyhow::Result<Vec<StoredListing>> {
        Ok(self.store.view(|c| c.get(LISTINGS)).await?)
    }
}

#[async_trait]
impl DirectoryRepository for DocDirectoryRepository {
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.users()
            .await?
            .into_iter()
            .find(|u| u.id == id)
            .map(user_from_record)
            .transpose()
    }

    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<(User, String)>> {
        match self.users().await?.into_iter().find(|u| u.email == email) {
            Some(rec) => {
                let hash = rec.password.clone();
                Ok(Some((user_from_record(rec)?, hash)))
            }
            None => Ok(None),
        }
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        Ok(self.users().await?.iter().any(|u| u.email == email))
    }

    async fn insert_user(&self, user: User, password_hash: String) -> anyhow::Result<()> {
        let rec = user_to_record(&user, password_hash);
        self.store
            .commit(move |c| {
                let mut users: Vec<StoredUser> = c.get(USERS)?;
                users.push(rec);
                c.set(USERS, &users)
            })
            .await?;
        Ok(())
    }

    async fn update_user(&self, user: User) -> anyhow::Result<()> {
        let id = user.id;
        let updated = self
            .store
            .commit(move |c| {
                let mut users: Vec<StoredUser> = c.get(USERS)?;
                let mut found = false;
                if let Some(rec) = users.iter_mut().find(|u| u.id == user.id) {
                    // The patch never carries credentials; keep the stored hash.
                    let password = rec.password.clone();
                    *rec = user_to_record(&user, password);
                    found = true;
                }
                if found {
                    c.set(USERS, &users)?;
                }
                Ok(found)
            })
            .await?;
        anyhow::ensure!(updated, "user {id} not found");
        Ok(())
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        self.users()
            .await?
            .into_iter()
            .map(user_from_record)
            .collect()
    }

    async fn find_listing(&self, id: Uuid) -> anyhow::Result<Option<Listing>> {
        Ok(self
            .listings()
            .await?
            .into_iter()
            .find(|l| l.id == id)
            .map(listing_from_record))
    }

    async fn insert_listing(&self, listing: Listing) -> anyhow::Result<()> {
        let rec = listing_to_record(&listing);
        self.store
            .commit(move |c| {
                let mut listings: Vec<StoredListing> = c.get(LISTINGS)?;
                listings.push(rec);
                c.set(LISTINGS, &listings)
            })
            .await?;
        Ok(())
    }

    async fn update_listing(&self, listing: Listing) -> anyhow::Result<()> {
        let id = listing.id;
        let updated = self
            .store
            .commit(move |c| {
                let mut listings: Vec<StoredListing> = c.get(LISTINGS)?;
                let mut found = false;
                if let Some(rec) = listings.iter_mut().find(|l| l.id == listing.id) {
                    *rec = listing_to_record(&listing);
                    found = true;
                }
                if found {
                    c.set(LISTINGS, &listings)?;
                }
                Ok(found)
            })
            .await?;
        anyhow::ensure!(updated, "listing {id} not found");
        Ok(())
    }

    async fn delete_listing(&self, id: Uuid) -> anyhow::Result<bool> {
        let removed = self
            .store
            .commit(move |c| {
                let mut listings: Vec<StoredListing> = c.get(LISTINGS)?;
                let before = listings.len();
                listings.retain(|l| l.id != id);
                let removed = listings.len() != before;
                if removed {
                    c.set(LISTINGS, &listings)?;
                }
                Ok(removed)
            })
            .await?;
        Ok(removed)
    }

    async fn listings_by_owner(&self, owner: Uuid) -> anyhow::Result<Vec<Listing>> {
        Ok(self
            .listings()
            .await?
            .into_iter()
            .filter(|l| l.owner_id == owner)
            .map(listing_from_record)
            .collect())
    }

    async fn active_listings(&self) -> anyhow::Result<Vec<Listing>> {
        Ok(self
            .listings()
            .await?
            .into_iter()
            .filter(|l| l.is_active)
            .map(listing_from_record)
            .collect())
    }
}
