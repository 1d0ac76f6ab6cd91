use blog_api::config::Config;
use blog_api::server::run_server;
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logger with environment variable support
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    info!("Starting server on http://{}:{}", config.host, config.port);

    let server = run_server(&config).await.map_err(io::Error::other)?;

    actix_web::rt::signal::ctrl_c().await?;

    server.close().await.map_err(io::Error::other)?;
    info!("Server has stopped");

    Ok(())
}
