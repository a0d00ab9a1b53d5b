use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod application;
mod error;
mod presentation;
mod readline;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "drxadm=info,drx_core=info,drx_grpc=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    if let Err(e) = application::run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
