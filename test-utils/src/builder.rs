use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Tables are created in the order they are added, so tables holding foreign keys must come
/// after the tables they reference. The `with_*_tables` helpers add common groups in
/// dependency order.
///
/// # Example
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Team)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed by `build()` in insertion order.
    tables: Vec<TableCreateStatement>,
    /// Whether to create a session backed by the test database.
    session: bool,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            session: false,
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to generate a SQLite CREATE TABLE statement for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds user and password reset token tables.
    pub fn with_user_tables(self) -> Self {
        self.with_table(User).with_table(PasswordResetToken)
    }

    /// Adds user, team, team member and team staff tables.
    pub fn with_team_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Team)
            .with_table(TeamMember)
            .with_table(TeamStaff)
    }

    /// Adds game, game detail, game category and game fee tables.
    pub fn with_game_tables(self) -> Self {
        self.with_table(Game)
            .with_table(GameDetail)
            .with_table(GameCategory)
            .with_table(GameFee)
    }

    /// Adds every table needed for registrations.
    ///
    /// Includes the team tables, user players, the game tables, registrations and their
    /// participants.
    pub fn with_registration_tables(self) -> Self {
        self.with_team_tables()
            .with_table(UserPlayer)
            .with_game_tables()
            .with_table(Registration)
            .with_table(RegistrationParticipant)
    }

    /// Adds every table in the schema, including the activity log.
    pub fn with_all_tables(self) -> Self {
        self.with_registration_tables().with_table(ActivityLog)
    }

    /// Creates a session store and session alongside the database.
    pub fn with_session(mut self) -> Self {
        self.session = true;
        self
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with database, tables and (optionally) session ready
    /// - `Err(TestError)` - Failed to connect, create tables or set up the session store
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        if self.session {
            setup.session().await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
