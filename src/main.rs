use dotenvy::dotenv;
use portfolio_views::config::Config;
use portfolio_views::{connect_store, routes, AppStateInner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_thread_names(true),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting view counter...");

    let config = Config::from_env().expect("Failed to load env");
    let port = config.port;

    let store = connect_store(&config)
        .await
        .expect("Failed to connect view store");

    let cors = routes::cors_layer(&config);
    let state = AppStateInner::new(store, config);

    let app = routes::create_routes(state, cors);

    tracing::info!("Binding to port {}...", port);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server running on port {}", port);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
