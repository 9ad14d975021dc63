use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::AppError,
    model::user::CreateUserParams,
    service::account::AccountService,
};

const DEFAULT_LOG_FILTER: &str = "signupboard=info,tower_http=info";

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session table in the application database and builds the session layer.
///
/// Sessions expire after seven days of inactivity.
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
    store.migrate().await?;

    Ok(SessionManagerLayer::new(store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::days(7))))
}

/// Ensures the account named by `OWNER_EMAIL` exists and holds the owner role.
///
/// A freshly created owner has no password, so a reset link is logged for setting one.
pub async fn bootstrap_owner(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    let Some(email) = config.owner_email.as_deref() else {
        return Ok(());
    };
    let email = email.trim().to_lowercase();

    let user_repo = UserRepository::new(db);
    let owner = match user_repo.find_by_email(&email).await? {
        Some(user) if user.role == entity::user::UserRole::Owner => user,
        Some(user) => {
            tracing::info!("Promoting {} to owner", email);
            user_repo
                .set_role(user, entity::user::UserRole::Owner)
                .await?
        }
        None => {
            tracing::info!("Creating owner account {}", email);
            let name = email.split('@').next().unwrap_or("owner").to_string();
            user_repo
                .create(CreateUserParams {
                    email: email.clone(),
                    name,
                    username: None,
                    role: entity::user::UserRole::Owner,
                    password_hash: None,
                })
                .await?
        }
    };

    if owner.password_hash.is_none() {
        let link = AccountService::new(db)
            .issue_reset_link(owner.id, &config.app_url)
            .await?;
        tracing::info!("Owner has no password yet, set one here: {}", link);
    }

    Ok(())
}
