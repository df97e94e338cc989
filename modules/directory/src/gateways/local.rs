use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::DirectoryApi,
    error::DirectoryError,
    model::{Listing, User},
};
use crate::domain::service::Service;

/// Local implementation of the DirectoryApi trait that delegates to the domain service
pub struct DirectoryLocalClient {
    service: Arc<Service>,
}

impl DirectoryLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl DirectoryApi for DirectoryLocalClient {
    async fn get_user(&self, id: Uuid) -> Result<User, DirectoryError> {
        self.service.get_user(id).await.map_err(Into::into)
    }

    async fn get_listing(&self, id: Uuid) -> Result<Listing, DirectoryError> {
        self.service.get_listing(id).await.map_err(Into::into)
    }
}
