use crate::models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::services::api_client::{ApiClient, ApiError};

/// Endpoints /users/*
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Perform login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.api.post_json("/users/login", &request).await
    }

    /// Register a new customer account; the backend emails a verification link
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.api.post_json("/users/register", request).await
    }

    /// Confirm the token from the verification email
    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse, ApiError> {
        self.api
            .get(&format!("/users/verify-email/{}", token))
            .await
    }
}
