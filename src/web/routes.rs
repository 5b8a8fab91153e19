// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, event_handlers, mw_auth, mw_professor, orientacao_handlers,
        player_handlers, profile_handlers, team_handlers, user_handlers,
    },
};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // Camada por rota: só os métodos que alteram dados exigem professor
    let professor = middleware::from_fn(mw_professor::require_professor);

    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/login", post(auth_handlers::handle_login))
        .route("/signup", post(auth_handlers::handle_signup));

    // --- Times ---
    let team_routes = Router::new()
        .route(
            "/",
            get(team_handlers::list_teams)
                .merge(post(team_handlers::create_team).route_layer(professor.clone())),
        )
        .route(
            "/{id}",
            get(team_handlers::get_team).merge(
                put(team_handlers::update_team)
                    .delete(team_handlers::delete_team)
                    .route_layer(professor.clone()),
            ),
        )
        .route(
            "/{id}/resultado",
            post(team_handlers::record_result).route_layer(professor.clone()),
        )
        .route("/{id}/players", get(team_handlers::team_players));

    // --- Jogadores ---
    let player_routes = Router::new()
        .route(
            "/",
            get(player_handlers::list_players)
                .merge(post(player_handlers::create_player).route_layer(professor.clone())),
        )
        .route(
            "/{id}",
            get(player_handlers::get_player).merge(
                axum::routing::patch(player_handlers::update_player)
                    .delete(player_handlers::delete_player)
                    .route_layer(professor.clone()),
            ),
        )
        .route(
            "/{id}/feedback",
            get(player_handlers::list_feedbacks)
                .merge(post(player_handlers::send_feedback).route_layer(professor.clone())),
        )
        .route(
            "/{id}/stats",
            get(player_handlers::stats_history)
                .merge(post(player_handlers::record_stats).route_layer(professor.clone())),
        );

    // --- Eventos ---
    let event_routes = Router::new()
        .route(
            "/",
            get(event_handlers::list_events)
                .merge(post(event_handlers::create_event).route_layer(professor.clone())),
        )
        .route("/today", get(event_handlers::today_events))
        .route("/upcoming", get(event_handlers::upcoming_events))
        .route(
            "/{id}",
            get(event_handlers::get_event).merge(
                put(event_handlers::update_event)
                    .delete(event_handlers::delete_event)
                    .route_layer(professor.clone()),
            ),
        );

    // --- Orientações ---
    let orientacao_routes = Router::new()
        .route("/", get(orientacao_handlers::list_orientacoes))
        .route(
            "/{id}",
            post(orientacao_handlers::send_orientacao).route_layer(professor.clone()),
        )
        .route("/{id}/lida", post(orientacao_handlers::mark_read));

    // --- Perfil ---
    let profile_routes = Router::new()
        .route(
            "/image",
            get(profile_handlers::get_image)
                .put(profile_handlers::put_image)
                .delete(profile_handlers::delete_image),
        )
        .route(
            "/settings",
            get(profile_handlers::get_settings).put(profile_handlers::put_settings),
        );

    // --- Rotas Autenticadas (Combinando tudo) ---
    let authenticated_routes = Router::new()
        .route("/logout", post(auth_handlers::handle_logout))
        .route(
            "/me",
            get(user_handlers::me_handler).put(user_handlers::update_profile_handler),
        )
        .route("/me/password", put(user_handlers::change_password_handler))
        .route(
            "/atletas",
            get(user_handlers::my_athletes_handler).route_layer(professor.clone()),
        )
        .route("/stats", get(user_handlers::dashboard_handler))
        .route("/backup", post(user_handlers::backup_handler))
        .route(
            "/diagnostico/chaves",
            get(user_handlers::storage_keys_handler).route_layer(professor),
        )
        .nest("/teams", team_routes)
        .nest("/players", player_routes)
        .nest("/events", event_routes)
        .nest("/orientacoes", orientacao_routes)
        .nest("/profile", profile_routes)
        // Aplica require_auth a TODAS as rotas acima, incluindo as aninhadas
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    // --- Router Final ---
    let api = Router::new()
        .merge(public_routes)
        .merge(authenticated_routes);

    Router::new().nest("/api", api).with_state(app_state)
}
