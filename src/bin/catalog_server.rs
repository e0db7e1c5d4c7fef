use clap::Parser;
use plan_compare::adapters::catalog_server::{run_server, ServerState, DEFAULT_PORT};
use plan_compare::utils::logger;
use plan_compare::utils::validation::validate_path;
use std::net::{IpAddr, SocketAddr};

#[derive(Parser)]
#[command(name = "catalog-server")]
#[command(about = "Serve a plan catalog file over HTTP")]
struct Args {
    /// Path to the JSON plan catalog
    #[arg(short, long, default_value = "data/plans.json")]
    data: String,

    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_json_logger();

    validate_path("--data", &args.data)?;
    if !std::path::Path::new(&args.data).exists() {
        // the file is read per request, so it may appear later
        tracing::warn!("Catalog file {} does not exist yet", args.data);
    }

    let addr = SocketAddr::new(args.host, args.port);
    run_server(ServerState::new(&args.data), addr).await
}
