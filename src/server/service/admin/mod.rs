//! Administrative services for the dashboard.
//!
//! User management (roles, bans, deletion) and the summary counters. Callers are expected to
//! have passed `Permission::Admin`; these services enforce the rules that protect the owner
//! account.

pub mod stats;
pub mod user;
