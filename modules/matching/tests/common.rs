#![allow(dead_code)] // shared helpers; each test binary uses a subset

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use docstore::DocStore;
use matching::contract::model::MatchPolicy;
use matching::domain::events::MatchingDomainEvent;
use matching::domain::ports::{DirectoryPort, EventPublisher, ListingBrief};
use matching::domain::repo::MatchingRepository;
use matching::domain::service::{Service, ServiceConfig};
use matching::infra::storage::DocMatchingRepository;
use uuid::Uuid;

/// Scripted directory standing in for the directory module.
#[derive(Default)]
pub struct FakeDirectory {
    listings: Mutex<Vec<ListingBrief>>,
    buyers: Mutex<HashSet<Uuid>>,
}

impl FakeDirectory {
    pub fn add_listing(&self, owner: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.listings.lock().unwrap().push(ListingBrief {
            id,
            owner_id: owner,
            is_active: true,
            created_at: Utc::now(),
        });
        id
    }

    pub fn deactivate(&self, id: Uuid) {
        let mut listings = self.listings.lock().unwrap();
        if let Some(l) = listings.iter_mut().find(|l| l.id == id) {
            l.is_active = false;
        }
    }

    pub fn add_buyer(&self, id: Uuid) {
        self.buyers.lock().unwrap().insert(id);
    }
}

#[async_trait]
impl DirectoryPort for FakeDirectory {
    async fn find_listing(&self, id: Uuid) -> anyhow::Result<Option<ListingBrief>> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .copied())
    }

    async fn is_buyer(&self, user: Uuid) -> anyhow::Result<bool> {
        Ok(self.buyers.lock().unwrap().contains(&user))
    }

    async fn active_listings_of(&self, owner: Uuid) -> anyhow::Result<Vec<ListingBrief>> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.owner_id == owner && l.is_active)
            .copied()
            .collect())
    }
}

/// Captures published domain events for assertions.
#[derive(Default)]
pub struct CapturingEvents {
    events: Mutex<Vec<MatchingDomainEvent>>,
}

impl CapturingEvents {
    pub fn match_created_count(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, MatchingDomainEvent::MatchCreated { .. }))
            .count()
    }

    pub fn message_created_count(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, MatchingDomainEvent::MessageCreated { .. }))
            .count()
    }
}

impl EventPublisher<MatchingDomainEvent> for CapturingEvents {
    fn publish(&self, event: &MatchingDomainEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub struct TestEnv {
    pub service: Service,
    pub directory: Arc<FakeDirectory>,
    pub events: Arc<CapturingEvents>,
    pub repo: Arc<dyn MatchingRepository>,
}

pub fn env(policy: MatchPolicy) -> TestEnv {
    let store = Arc::new(DocStore::in_memory());
    let repo: Arc<dyn MatchingRepository> = Arc::new(DocMatchingRepository::new(store));
    let directory = Arc::new(FakeDirectory::default());
    let events = Arc::new(CapturingEvents::default());
    let service = Service::new(
        repo.clone(),
        directory.clone(),
        events.clone(),
        ServiceConfig { policy },
    );
    TestEnv {
        service,
        directory,
        events,
        repo,
    }
}
