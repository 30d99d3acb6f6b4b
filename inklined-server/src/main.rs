use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use inklined_core::Error;
use inklined_server::{server, AppConfig, Args};

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("inklined=info".parse().expect("valid directive"));
    fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!(
        "Inklined starting. addr={}, data_dir={}",
        args.server_addr, args.data_dir
    );

    if let Err(e) = run(args).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }
    info!("Main finished. Goodbye!");
    Ok(())
}

async fn run(args: Args) -> Result<(), Error> {
    let config = AppConfig::from_env()?;
    server::run_server(args, config).await
}
