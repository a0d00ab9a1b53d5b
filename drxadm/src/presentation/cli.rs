use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Admin CLI for the decrypter service", long_about = None)]
pub struct Cli {
    /// Decrypter host (overrides DECRYPTER_GRPC_HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Decrypter port (overrides DECRYPTER_GRPC_PORT)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the active files of every company
    Ls,

    /// Decrypt one file and write the recovered content to disk
    Get {
        /// Name of the encrypted file on the server
        filename: String,

        /// Directory to write the recovered file into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Delete one encrypted file
    Rm {
        /// Common name of the company that owns the file
        common_name: String,

        /// Name of the encrypted file on the server
        filename: String,
    },

    /// Delete every encrypted file of every company
    Purge {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Start an interactive shell
    Shell,
}
