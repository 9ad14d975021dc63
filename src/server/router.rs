use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        activity_log::{self, ACTIVITY_LOG_TAG},
        admin::{self, ADMIN_TAG},
        auth::{self, AUTH_TAG},
        game::{self, GAME_TAG},
        game_category::{self, GAME_CATEGORY_TAG},
        registration::{self, REGISTRATION_TAG},
        team::{self, TEAM_TAG},
        team_member::{self, TEAM_MEMBER_TAG},
        team_staff::{self, TEAM_STAFF_TAG},
        user::{self, USER_TAG},
        user_player::{self, USER_PLAYER_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Signupboard API",
        version = "0.1.0",
        description = "Sports event registration: games, teams, players and sign-ups"
    ),
    tags(
        (name = AUTH_TAG, description = "Email and password sessions"),
        (name = USER_TAG, description = "Credential management for the signed-in user"),
        (name = GAME_TAG, description = "Games, fees and game details"),
        (name = GAME_CATEGORY_TAG, description = "Categories within a game"),
        (name = REGISTRATION_TAG, description = "Sign-ups and their review"),
        (name = TEAM_TAG, description = "Teams owned by the signed-in user"),
        (name = TEAM_MEMBER_TAG, description = "Team members"),
        (name = TEAM_STAFF_TAG, description = "Team leaders and coaches"),
        (name = USER_PLAYER_TAG, description = "Players registered under the signed-in user"),
        (name = ADMIN_TAG, description = "User administration and dashboard counters"),
        (name = ACTIVITY_LOG_TAG, description = "Audit trail of administrative actions"),
    )
)]
struct ApiDoc;

/// Collects every controller's routes together with their OpenAPI paths.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(auth::routes())
        .merge(user::routes())
        .merge(game::routes())
        .merge(game_category::routes())
        .merge(registration::routes())
        .merge(team::routes())
        .merge(team_member::routes())
        .merge(team_staff::routes())
        .merge(user_player::routes())
        .merge(admin::routes())
        .merge(activity_log::routes())
}

/// Builds the application router.
///
/// Serves the API, the Swagger UI at `/swagger-ui` and the OpenAPI document at
/// `/api/openapi.json`. With `cors_origin` set only that origin may send credentialed
/// requests; otherwise any origin is allowed.
pub fn router(
    state: AppState,
    session_layer: SessionManagerLayer<SqliteStore>,
    cors_origin: Option<&str>,
) -> Router {
    let (router, api) = api_routes().split_for_parts();

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api))
        .layer(session_layer)
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin.and_then(|o| HeaderValue::from_str(o).ok()) else {
        return CorsLayer::permissive();
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::COOKIE])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::exact(origin))
}

/// The generated OpenAPI document, for tooling that needs it without a server.
pub fn openapi() -> utoipa::openapi::OpenApi {
    api_routes().split_for_parts().1
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests every resource shows up in the generated document.
    ///
    /// Expected: paths for games, registrations and the admin surface
    #[test]
    fn document_lists_paths() {
        let doc = openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/games"));
        assert!(paths.contains_key("/api/games/{id}/signup"));
        assert!(paths.contains_key("/api/registration/approve"));
        assert!(paths.contains_key("/api/admin/users/{id}/ban"));
        assert!(paths.contains_key("/api/activity_log"));
    }
}
