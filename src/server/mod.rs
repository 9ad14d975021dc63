//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework, SeaORM for database operations and
//! tower-sessions for cookie sessions stored in the same SQLite database.
//!
//! # Architecture
//!
//! The server follows a layered architecture:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business rules and transactions
//! - **Data Layer** (`data/`) - Repositories over the SeaORM entities
//! - **Model Layer** (`model/`) - Validated operation parameters and domain aggregates
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrapper and the authorization guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Tracing, database, sessions and the owner account
//! - **Router** (`router`) - Route table, OpenAPI document and Swagger UI
//! - **Scheduler** (`scheduler/`) - Cron job lifting expired bans and pruning reset tokens
//!
//! # Request Flow
//!
//! 1. **Router** matches the request; the session layer loads the cookie session
//! 2. **Controller** authenticates through `AuthGuard`, converts DTOs to params
//! 3. **Service** checks ownership and business rules, opening a transaction when it writes
//!    more than one row
//! 4. **Data** runs the queries
//! 5. **Controller** converts the result to a DTO
//!
//! # Feature Gates
//!
//! This module is only available with the `server` feature flag enabled.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
