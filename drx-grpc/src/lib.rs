#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod pb;
pub mod remote;

// Re-exports: stable API surface
pub use client::DecrypterClient;
pub use config::DecrypterConfig;
pub use remote::GrpcDecrypter;
