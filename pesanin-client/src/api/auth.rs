//! `/auth/*` endpoints

use shared::client::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ProfileUpdateRequest, RegisterRequest,
};
use shared::models::User;

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    /// Exchange credentials for a token. Does not touch the auth store.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/auth/login", &req).await
    }

    /// Register a staff account (admin only)
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<User> {
        self.post("/auth/register", req).await
    }

    pub async fn profile(&self) -> ClientResult<User> {
        self.get("/auth/me").await
    }

    pub async fn update_profile(&self, req: &ProfileUpdateRequest) -> ClientResult<User> {
        self.put("/auth/profile", req).await
    }

    pub async fn change_password(&self, current: &str, new: &str) -> ClientResult<()> {
        let req = ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.put_unit("/auth/password", &req).await
    }
}
