use clap::Parser;
use kvdrive::config::AppConfig;
use kvdrive::utils::{logger, validation::Validate};

#[derive(Debug, Parser)]
#[command(name = "kvdrive-demo")]
#[command(about = "Demo HTTP server over a hosted records and files store")]
struct Args {
    /// TOML configuration file; KVDRIVE_* environment variables are used when omitted.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[arg(long)]
    listen_addr: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_logger(args.verbose);

    tracing::info!("Starting kvdrive demo server");
    if args.verbose {
        tracing::debug!("Args: {:?}", args);
    }

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env(),
    };
    if let Some(listen_addr) = args.listen_addr {
        config.listen_addr = Some(listen_addr);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = kvdrive::server::run(config).await {
        tracing::error!("❌ Server failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    Ok(())
}
