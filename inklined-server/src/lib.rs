// inklined-server/src/lib.rs

use clap::Parser;

pub mod config;
pub mod context;
pub mod http;
pub mod server;

pub use config::AppConfig;
pub use context::ServerContext;
pub use server::build_router;

#[derive(Parser, Debug, Clone)]
#[command(name = "inklined")]
#[command(author, version, about = "Inklined - donation backend for the Inklined dashboard site")]
pub struct Args {
    /// Address to which the server will bind
    #[arg(long, default_value = "0.0.0.0:8700")]
    pub server_addr: String,

    /// Postgres connection URL.
    #[arg(long, default_value = "postgres://inklined@localhost:5432/inklined")]
    pub db_url: String,

    /// Directory holding the pre-scraped dashboard dataset JSON files.
    #[arg(long, default_value = "./data")]
    pub data_dir: String,

    /// Public origin used for checkout redirect URLs when the request
    /// carries no Origin header.
    #[arg(long, default_value = "http://localhost:8700")]
    pub public_url: String,
}
