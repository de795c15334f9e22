use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use layout_aesthetics::{
    api,
    config,
    model::{AestheticModel, Device},
    ClipClient,
};

#[tokio::main]
async fn main() {
    config::Config::dotenv_load();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    config::Config::print_env_vars();

    // Model provider is built once and shared read-only
    let device = Device::select(&config.scorer_device);
    let clip = ClipClient::new(config.clip_url.clone(), config.clip_model.clone(), device);
    tracing::info!("Using CLIP backend {} ({}) on {}", clip.base_url(), config.clip_model, device);
    if let Err(e) = clip.check_backend().await {
        tracing::warn!("CLIP backend not reachable yet, images will get the fallback score: {}", e);
    }
    let model: Arc<dyn AestheticModel> = Arc::new(clip);

    let state = Arc::new(api::AppState { model });
    let app = api::router(state, config.max_body_bytes);

    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 0.0.0.0", host_str);
        std::net::IpAddr::from([0, 0, 0, 0])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_PORT '{}', falling back to 5000", port_str);
        5000
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!(
        device = %device,
        model = %config.clip_model,
        "Aesthetic scoring server endpoint: http://{}/score",
        socket_address
    );
    if let Err(e) = axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
