use anyhow::Result;
use clap::{Parser, Subcommand};
use notewise_common::{logger, AppConfig};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
            return;
        }
    }
    dotenv::dotenv().ok();
}

#[derive(Parser)]
#[command(name = "notewise")]
#[command(about = "Notewise - work note cleansing and LLM summaries over HTTP", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Log to the console only
        #[arg(long)]
        console_log: bool,
    },

    /// Validate configuration and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::CheckConfig) => {
            config.validate()?;
            println!(
                "Configuration OK (platform: {}, bind: {})",
                config.platform,
                config.server_bind_address()
            );
            return Ok(());
        }
        Some(Commands::Serve {
            host,
            port,
            console_log,
        }) => {
            // CLI arguments override the environment
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }

            if console_log {
                logger::setup_console_logging(&config.log_level)?;
            } else {
                logger::setup_logging(&config.log_dir, &config.log_level)?;
            }
        }
        None => {
            logger::setup_logging(&config.log_dir, &config.log_level)?;
        }
    }

    config.validate()?;

    tracing::info!("Notewise starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Platform: {}", config.platform);
    tracing::info!("  Log dir: {}", config.log_dir.display());

    println!("Server listening on http://{}", config.server_bind_address());

    notewise_server::start_server(config).await?;

    Ok(())
}
