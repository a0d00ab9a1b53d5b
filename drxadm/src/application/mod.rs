pub mod handlers;
pub mod shell;

use std::sync::Arc;

use clap::Parser;
use drx_core::AdminSession;
use drx_grpc::{DecrypterConfig, GrpcDecrypter};

use crate::error::Result;
use crate::presentation::cli::{Cli, Commands};

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = DecrypterConfig::from_env();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let backend = GrpcDecrypter::connect(&config).await?;
    let session = AdminSession::new(Arc::new(backend));

    match cli.command {
        Commands::Ls => handlers::handle_ls(&session).await,
        Commands::Get { filename, out } => handlers::handle_get(&session, &filename, &out).await,
        Commands::Rm {
            common_name,
            filename,
        } => handlers::handle_rm(&session, &common_name, &filename).await,
        Commands::Purge { yes } => {
            handlers::handle_purge(&session, yes, handlers::confirm_purge).await
        }
        Commands::Shell => shell::run(session).await,
    }
}
