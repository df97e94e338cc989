#![allow(dead_code)] // shared helpers; each test binary uses a subset

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use directory::domain::ports::{InterestReader, LikedListing};
use directory::domain::service::{Service, ServiceConfig};
use directory::infra::storage::DocDirectoryRepository;
use docstore::DocStore;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Scripted like ledger standing in for the matching module.
#[derive(Default)]
pub struct FakeInterest {
    likes: Mutex<HashMap<Uuid, Vec<LikedListing>>>,
}

impl FakeInterest {
    pub async fn add(&self, actor: Uuid, entry: LikedListing) {
        self.likes.lock().await.entry(actor).or_default().push(entry);
    }
}

#[async_trait]
impl InterestReader for FakeInterest {
    async fn liked_listings(&self, actor: Uuid) -> anyhow::Result<Vec<LikedListing>> {
        Ok(self
            .likes
            .lock()
            .await
            .get(&actor)
            .cloned()
            .unwrap_or_default())
    }
}

pub struct TestEnv {
    pub service: Service,
    pub interest: Arc<FakeInterest>,
}

pub fn env() -> TestEnv {
    let store = Arc::new(DocStore::in_memory());
    let repo = Arc::new(DocDirectoryRepository::new(store));
    let interest = Arc::new(FakeInterest::default());
    let service = Service::new(repo, interest.clone(), ServiceConfig::default());
    TestEnv { service, interest }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
