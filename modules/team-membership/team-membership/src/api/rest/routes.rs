use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch};
use axum::{Extension, Router};

use super::auth::{JwtValidator, authenticate};
use super::handlers;
use crate::domain::service::Service;

fn join_request_routes() -> Router {
    Router::new()
        .route(
            "/join-requests",
            get(handlers::list_join_requests).post(handlers::create_join_request),
        )
        .route(
            "/join-requests/{id}",
            get(handlers::get_join_request).delete(handlers::delete_join_request),
        )
        .route("/join-requests/player/me", get(handlers::list_my_join_requests))
        .route(
            "/join-requests/team/{team_id}",
            get(handlers::list_team_join_requests),
        )
        .route(
            "/join-requests/approve/{id}",
            patch(handlers::approve_join_request),
        )
        .route("/join-requests/reject/{id}", patch(handlers::reject_join_request))
        .route("/join-requests/cancel/{id}", patch(handlers::cancel_join_request))
}

fn player_team_routes() -> Router {
    Router::new()
        .route(
            "/player-teams",
            get(handlers::list_player_teams).post(handlers::create_player_team),
        )
        .route("/player-teams/inactive", get(handlers::list_all_player_teams))
        .route(
            "/player-teams/inactive/{id}",
            get(handlers::get_any_player_team),
        )
        .route(
            "/player-teams/player/{player_id}",
            get(handlers::list_teams_of_player),
        )
        .route(
            "/player-teams/status/{id}",
            patch(handlers::update_player_team_status),
        )
        .route(
            "/player-teams/{id}",
            get(handlers::get_player_team)
                .patch(handlers::update_player_team)
                .delete(handlers::delete_player_team),
        )
}

fn coach_team_routes() -> Router {
    Router::new()
        .route(
            "/coach-teams",
            get(handlers::list_coach_teams).post(handlers::create_coach_team),
        )
        .route("/coach-teams/inactive", get(handlers::list_all_coach_teams))
        .route(
            "/coach-teams/inactive/{id}",
            get(handlers::get_any_coach_team),
        )
        .route(
            "/coach-teams/coach/{coach_id}",
            get(handlers::list_teams_of_coach),
        )
        .route(
            "/coach-teams/status/{id}",
            patch(handlers::update_coach_team_status),
        )
        .route(
            "/coach-teams/{id}",
            get(handlers::get_coach_team)
                .patch(handlers::update_coach_team)
                .delete(handlers::delete_coach_team),
        )
}

/// Mount every team membership route on `router`.
///
/// All routes require a valid bearer token; role checks happen per handler.
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    validator: Arc<JwtValidator>,
) -> Router {
    let routes = join_request_routes()
        .merge(player_team_routes())
        .merge(coach_team_routes())
        .route_layer(from_fn_with_state(validator, authenticate))
        .layer(Extension(service));

    tracing::debug!("Team membership routes registered");
    router.merge(routes)
}
