//! Shared fixtures for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use super::api::{HttpRequest, HttpResponse, Transport};
use super::error::ApiError;
use super::models::{Location, Role, User};

pub fn sample_user() -> User {
    User {
        id: 1,
        email: "a@b.com".into(),
        phone: String::new(),
        first_name: "Awa".into(),
        last_name: "Koné".into(),
        full_name: "Awa Koné".into(),
        role: Role::Doctor,
        location: Location::Both,
        specialization: None,
        license_number: None,
        is_2fa_enabled: false,
        is_active: true,
        avatar: None,
        bio: None,
        last_login: None,
        created_at: None,
    }
}

pub fn sample_user_json() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "email": "a@b.com",
        "first_name": "Awa",
        "last_name": "Koné",
        "full_name": "Awa Koné",
        "role": "DOCTOR",
        "location": "BOTH"
    })
}

/// Transport replaying scripted responses and recording every request.
///
/// When the script runs out, further sends fail with a network error.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(status: u16, body: serde_json::Value) -> Self {
        let transport = Self::new();
        transport.push_json(status, body);
        transport
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_status(status, body.to_string());
    }

    pub fn push_status(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_error(&self, error: ApiError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".into())))
    }
}
