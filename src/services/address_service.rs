use crate::models::{Address, AddressesResponse, MessageResponse};
use crate::services::api_client::{ApiClient, ApiError};

/// Endpoints /address/*
#[derive(Clone)]
pub struct AddressService {
    api: ApiClient,
}

impl AddressService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, address: &Address) -> Result<MessageResponse, ApiError> {
        self.api.post_json("/address/create", address).await
    }

    /// Última dirección guardada, si hay alguna
    pub async fn latest(&self) -> Result<Option<Address>, ApiError> {
        let response: AddressesResponse = self.api.get("/address/get").await?;
        Ok(response.latest())
    }
}
