use log::{error, info};
use service::{config::Config, logging::Logger};
use web::AppState;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!(
        "Starting OAuth demo server on {}:{}...",
        config.interface(),
        config.port
    );

    let app_state = match AppState::from_config(&config) {
        Ok(app_state) => app_state,
        Err(e) => {
            error!("Failed to configure OAuth providers: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = web::init_server(app_state, config.interface(), config.port).await {
        error!("Server exited with error: {e}");
        std::process::exit(1);
    }
}
