//! User data repository for database operations.
//!
//! Handles account creation, lookups, the admin search page, role and ban changes, and
//! the counts used by dashboard statistics.

use chrono::{DateTime, Utc};
use entity::user::UserRole;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ExprTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::user::{
    CreateUserParams, SortDirection, UserListQuery, UserSearchField, UserSortField,
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new account.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created user
    /// - `Err(DbErr)` - Database error, including a unique violation on `email`
    pub async fn create(&self, params: CreateUserParams) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();

        entity::user::ActiveModel {
            email: ActiveValue::Set(params.email),
            name: ActiveValue::Set(params.name),
            username: ActiveValue::Set(params.username),
            role: ActiveValue::Set(params.role),
            password_hash: ActiveValue::Set(params.password_hash),
            banned: ActiveValue::Set(false),
            ban_reason: ActiveValue::Set(None),
            ban_expires: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    /// Finds a user by email. Emails are stored lowercased so lookups are exact.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Returns one page of users and the total matching the search.
    pub async fn search(
        &self,
        query: &UserListQuery,
    ) -> Result<(Vec<entity::user::Model>, u64), DbErr> {
        let mut select = entity::prelude::User::find();

        if let Some(value) = &query.search_value {
            let column = match query.search_field {
                UserSearchField::Name => entity::user::Column::Name,
                UserSearchField::Email => entity::user::Column::Email,
            };
            let pattern = format!("%{}%", value.to_lowercase());
            select = select.filter(
                Expr::expr(Func::lower(Expr::col((entity::user::Entity, column)))).like(pattern),
            );
        }

        let total = select.clone().count(self.db).await?;

        let column = match query.sort_by {
            UserSortField::CreatedAt => entity::user::Column::CreatedAt,
            UserSortField::Name => entity::user::Column::Name,
            UserSortField::Email => entity::user::Column::Email,
        };
        select = match query.sort_direction {
            SortDirection::Asc => select.order_by_asc(column),
            SortDirection::Desc => select.order_by_desc(column),
        };

        let users = select
            .order_by_asc(entity::user::Column::Id)
            .offset(query.offset)
            .limit(query.limit)
            .all(self.db)
            .await?;

        Ok((users, total))
    }

    pub async fn set_role(
        &self,
        user: entity::user::Model,
        role: UserRole,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active = user.into_active_model();
        active.role = ActiveValue::Set(role);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    pub async fn set_password_hash(
        &self,
        user: entity::user::Model,
        password_hash: String,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active = user.into_active_model();
        active.password_hash = ActiveValue::Set(Some(password_hash));
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    /// Bans a user. `expires: None` bans indefinitely.
    pub async fn ban(
        &self,
        user: entity::user::Model,
        reason: String,
        expires: Option<DateTime<Utc>>,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active = user.into_active_model();
        active.banned = ActiveValue::Set(true);
        active.ban_reason = ActiveValue::Set(Some(reason));
        active.ban_expires = ActiveValue::Set(expires);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    pub async fn unban(&self, user: entity::user::Model) -> Result<entity::user::Model, DbErr> {
        let mut active = user.into_active_model();
        active.banned = ActiveValue::Set(false);
        active.ban_reason = ActiveValue::Set(None);
        active.ban_expires = ActiveValue::Set(None);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    /// Deletes a user. Teams, players, reset tokens and registrations cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::User::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    pub async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::CreatedAt.gte(since))
            .count(self.db)
            .await
    }

    /// Clears bans whose expiry has passed.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of users unbanned
    pub async fn lift_expired_bans(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::Banned, Expr::value(false))
            .col_expr(entity::user::Column::BanReason, Expr::value(Option::<String>::None))
            .col_expr(
                entity::user::Column::BanExpires,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user::Column::Banned.eq(true))
            .filter(entity::user::Column::BanExpires.is_not_null())
            .filter(entity::user::Column::BanExpires.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod test;
