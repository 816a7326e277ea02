use anyhow::Result;
use callassist_common::{logger, AppConfig};
use callassist_llm::{AnthropicClient, EmailDrafter};
use callassist_server::WorkflowExecutor;
use callassist_stt::AssemblyAiClient;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

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
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "callassist")]
#[command(about = "Sales call assistant - transcribe call recordings and draft follow-up emails", long_about = None)]
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

        /// Directory for uploaded files
        #[arg(long)]
        upload_dir: Option<PathBuf>,

        /// Log to the console only
        #[arg(long)]
        no_log_file: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env before AppConfig reads the environment
    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;
    let mut console_only = false;

    if let Some(Commands::Serve {
        host,
        port,
        upload_dir,
        no_log_file,
    }) = cli.command
    {
        // CLI arguments override the environment
        if let Some(host) = host {
            config.server_host = host;
        }
        if let Some(port) = port {
            config.server_port = port;
        }
        if let Some(dir) = upload_dir {
            config.upload_dir = dir;
            config.ensure_directories()?;
        }
        console_only = no_log_file;
    }

    config.validate()?;

    if console_only {
        logger::setup_console_logging(&config.log_level)?;
    } else {
        logger::setup_logging(&config.log_dir, &config.log_level)?;
    }

    tracing::info!("Sales call assistant starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Upload dir: {}", config.upload_dir.display());
    tracing::info!("  Speech models: {}", config.speech_models.join(", "));
    tracing::info!("  LLM model: {} (max tokens: {})", config.llm_model, config.llm_max_tokens);

    for key in config.missing_api_keys() {
        tracing::warn!("{} is not set; requests needing it will report an error", key);
    }

    // Service clients are built once and shared read-only by all requests
    let transcriber = Arc::new(AssemblyAiClient::from_config(&config)?);
    let llm = Arc::new(AnthropicClient::from_config(&config)?);
    let drafter = Arc::new(EmailDrafter::new(llm, config.llm_max_tokens));
    let workflow = Arc::new(WorkflowExecutor::new(transcriber, drafter));

    println!("Server listening on http://{}", config.server_bind_address());

    callassist_server::start_server(config, workflow).await?;

    Ok(())
}
