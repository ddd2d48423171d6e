mod app;
mod client;
mod config;
mod models;
mod templates;
mod viewmodel;

use anyhow::Result;

use app::GalleryApp;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gallet=info".parse()?),
        )
        .init();

    let config = config::ServiceConfig::from_env_and_args()?;
    GalleryApp::new(config).run().await
}
