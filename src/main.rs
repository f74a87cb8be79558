use axum::{Router, middleware, routing::get};
use log::info;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pilot::state::AppState;
use pilot::{auth, chat, integration, message, user, webhook};

#[tokio::main]
async fn main() {
    let config = integration::Config::default();
    let env = config.env.clone();

    let state = AppState::init(config);
    let app = app(state);

    let addr = env.addr();
    info!("Starting pilot on {addr}");

    match env.ssl_config() {
        Some(ssl) => {
            axum_server::bind_openssl(addr, ssl)
                .serve(app.into_make_service())
                .await
        }
        None => {
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await
        }
    }
    .expect("Failed to start server");
}

fn app(state: AppState) -> Router {
    // Graph-backed routes refuse to run without the token cookie; auth,
    // onboarding and webhook routes manage without it.
    let protected = Router::new()
        .merge(chat::api(state.clone()))
        .merge(message::api(state.clone()))
        .layer(middleware::from_fn(auth::middleware::require_token));

    let api = Router::new()
        .merge(auth::api(state.clone()))
        .merge(user::api(state.clone()))
        .merge(webhook::api(state.clone()))
        .merge(protected);

    let cors = CorsLayer::new()
        .allow_origin(state.config.env.allow_origin())
        .allow_methods(state.config.env.allow_methods())
        .allow_headers(state.config.env.allow_headers());

    Router::new()
        .nest("/api", api)
        .route("/health", get(|| async { "OK" }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(middleware::from_fn(auth::middleware::extract_token)),
        )
}
