//! One `impl ApiClient` block per resource, mirroring the server's controllers.

mod activity_log;
mod admin;
mod auth;
mod game;
mod game_category;
pub mod helper;
mod registration;
mod team;
mod team_member;
mod team_staff;
mod user;
mod user_player;

pub use activity_log::ActivityLogQuery;
pub use admin::UserListQuery;

use reqwest::{Client, Method, RequestBuilder};
use url::Url;

use crate::client::model::error::ApiError;

/// HTTP client bound to one server. Clones share the connection pool and cookie jar.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the server at `base_url` with its own cookie store.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::new(500, format!("Invalid base URL: {}", e)))?;
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::new(500, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::new(500, format!("Invalid path {}: {}", path, e)))?;
        Ok(self.http.request(method, url))
    }

    fn get(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        self.request(Method::GET, path)
    }

    fn post(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        self.request(Method::POST, path)
    }

    fn put(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        self.request(Method::PUT, path)
    }

    fn delete(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        self.request(Method::DELETE, path)
    }
}
