use chrono::{Duration, Utc};
use entity::user::UserRole;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::user::UserRepository,
    model::user::{CreateUserParams, UserListQuery},
};

mod ban;
mod create;
