//! Research MCP Server - Entry Point
//!
//! Serves MCP over stdio or HTTP, or runs a single tool from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use research_mcp::{
    ArxivClient, Config, PaperStore,
    server::McpServer,
    tools::{self, ToolContext},
};

#[derive(Parser, Debug)]
#[command(name = "research-mcp")]
#[command(about = "MCP server that searches arXiv and keeps a per-topic paper store")]
#[command(version)]
struct Cli {
    /// Base directory; papers are stored under <base>/data/papers
    #[arg(long, global = true, env = "MCP_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Transport mode: stdio or http
    #[arg(long, global = true, env = "MCP_TRANSPORT", ignore_case = true)]
    transport: Option<Transport>,

    /// HTTP bind address (only used with --transport http)
    #[arg(long, global = true, default_value = "127.0.0.1", env = "HOST")]
    host: std::net::Ipv4Addr,

    /// HTTP server port (only used with --transport http)
    #[arg(long, global = true, default_value = "8000", env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "MCP_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP server (default)
    Serve,
    /// Search arXiv for a topic and store the results
    Search {
        /// Topic to search for
        topic: String,
        /// Maximum number of results
        #[arg(long, short = 'n')]
        max_results: Option<u32>,
    },
    /// Show a stored paper
    Info {
        /// arXiv identifier
        paper_id: String,
    },
    /// Show store statistics
    Stats,
    /// List stored topics
    Topics,
    /// List the papers stored under a topic
    List {
        /// Topic label
        topic: String,
    },
    /// Search stored paper titles
    Find {
        /// Text to look for in titles
        query: String,
    },
    /// Export a stored paper (json, bibtex or plain)
    Export {
        /// arXiv identifier
        paper_id: String,
        /// Output format
        #[arg(default_value = "json")]
        format: String,
    },
    /// Remove topics with no stored papers
    Cleanup,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Transport {
    /// Standard input/output
    #[default]
    Stdio,
    /// JSON-RPC over HTTP POST
    Http,
}

impl Transport {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
        }
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let log_level = if log_level == "warning" { "warn" } else { log_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout belongs to the stdio transport.
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(base_dir) = &cli.base_dir {
        let defaults = Config::new(base_dir);
        config.papers_dir = defaults.papers_dir;
        config.base_dir = defaults.base_dir;
    }
    if let Some(transport) = cli.transport {
        config.transport = transport.as_str().to_string();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.to_lowercase();
    }

    config.validate()?;
    Ok(config)
}

/// Tool name and arguments for a one-shot subcommand.
fn tool_call(command: &Command) -> Option<(&'static str, Value)> {
    let call = match command {
        Command::Serve => return None,
        Command::Search { topic, max_results } => {
            ("search_papers", json!({ "topic": topic, "max_results": max_results }))
        }
        Command::Info { paper_id } => ("extract_info", json!({ "paper_id": paper_id })),
        Command::Stats => ("get_database_stats", json!({})),
        Command::Topics => ("list_topics", json!({})),
        Command::List { topic } => ("list_topic_papers", json!({ "topic": topic })),
        Command::Find { query } => ("search_papers_by_title", json!({ "query": query })),
        Command::Export { paper_id, format } => {
            ("export_paper", json!({ "paper_id": paper_id, "format": format }))
        }
        Command::Cleanup => ("cleanup_empty_topics", json!({})),
    };
    Some(call)
}

async fn run_once(ctx: &ToolContext, name: &str, args: Value) -> anyhow::Result<()> {
    let all = tools::register_all_tools();
    let tool = all
        .iter()
        .find(|t| t.name() == name)
        .ok_or_else(|| anyhow::anyhow!("tool {name} is not registered"))?;

    let output = tools::invoke(tool.as_ref(), ctx, args).await?;
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config.log_level, cli.json_logs);
    config.ensure_dirs()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        papers_dir = %config.papers_dir.display(),
        "Starting research MCP server"
    );

    let config = Arc::new(config);
    let store = Arc::new(PaperStore::new(&config));
    let source = Arc::new(ArxivClient::new(&config)?);
    let ctx = ToolContext::new(Arc::clone(&config), store, source);

    if let Some((name, args)) = cli.command.as_ref().and_then(tool_call) {
        return run_once(&ctx, name, args).await;
    }

    let server = McpServer::new(ctx);
    match config.transport.as_str() {
        "http" => {
            tracing::info!(host = %cli.host, port = cli.port, "Running in HTTP mode");
            server.run_http(cli.host.octets(), cli.port).await?;
        }
        _ => {
            tracing::info!("Running in stdio mode");
            server.run_stdio().await?;
        }
    }

    Ok(())
}
