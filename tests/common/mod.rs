//! Spawns the full router on an ephemeral port over a private in-memory database.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use signupboard::{
    client::ApiClient,
    model::{
        game::{CategoryInputDto, FeeInputDto, GameWithDetailsDto, UpsertGameDto},
        user::{SignUpDto, UserDto},
    },
    server::{data::user::UserRepository, router, startup, state::AppState},
};
use tokio::net::TcpListener;

pub const PASSWORD: &str = "correct-horse-1";

pub struct TestServer {
    pub base_url: String,
    pub db: DatabaseConnection,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let session = startup::connect_to_session(&db).await.unwrap();
        let app = router::router(
            AppState::new(db.clone(), "http://localhost:3000".to_string()),
            session,
            None,
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            db,
        }
    }

    /// A client without a session.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url).unwrap()
    }

    /// Signs up a fresh account and returns a client holding its session.
    pub async fn sign_up(&self, email: &str) -> (ApiClient, UserDto) {
        let client = self.client();
        let user = client
            .sign_up(&SignUpDto {
                email: email.to_string(),
                name: email.split('@').next().unwrap_or("user").to_string(),
                password: PASSWORD.to_string(),
                username: None,
            })
            .await
            .unwrap();
        (client, user)
    }

    /// Signs up an account, gives it `role` and signs in again so the client sees it.
    pub async fn sign_up_as(
        &self,
        email: &str,
        role: entity::user::UserRole,
    ) -> (ApiClient, UserDto) {
        let (client, user) = self.sign_up(email).await;

        let repo = UserRepository::new(&self.db);
        let model = repo.find_by_id(user.id).await.unwrap().unwrap();
        repo.set_role(model, role).await.unwrap();

        let user = client.sign_in(email, PASSWORD).await.unwrap();
        (client, user)
    }

    pub async fn admin(&self) -> (ApiClient, UserDto) {
        self.sign_up_as("admin@example.com", entity::user::UserRole::Admin)
            .await
    }
}

/// A game whose signup window contains now, with one category and one fee.
pub fn open_game_payload(name: &str) -> UpsertGameDto {
    let now = Utc::now();
    UpsertGameDto {
        name: Some(name.to_string()),
        region: Some("taipei".to_string()),
        venue: Some("Main Arena".to_string()),
        address: Some("No. 1, Arena Rd.".to_string()),
        signup_start: Some((now - Duration::days(1)).to_rfc3339()),
        signup_end: Some((now + Duration::days(5)).to_rfc3339()),
        game_start: Some((now + Duration::days(10)).to_rfc3339()),
        game_end: Some((now + Duration::days(11)).to_rfc3339()),
        categories: Some(vec![CategoryInputDto {
            category_name: "Open Singles".to_string(),
            conditions: None,
        }]),
        fees: Some(vec![FeeInputDto {
            fee_type: "報名費".to_string(),
            amount: 500,
            category_index: Some(0),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

pub async fn create_open_game(admin: &ApiClient, name: &str) -> GameWithDetailsDto {
    admin.create_game(&open_game_payload(name)).await.unwrap()
}
