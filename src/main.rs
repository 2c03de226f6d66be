use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use finassist::cli::{load_grounding, Commands};
use finassist::{
    AskAssistantUseCase, AssistResult, AssistantConfig, ChatMessage, HttpChatbotTransport,
    IdentityProvider, StaticIdentityProvider, SupabaseIdentityProvider,
};

#[derive(Parser)]
#[command(name = "finassist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Assistant backend base URL (overrides FINASSIST_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Language the answer should be written in
    #[arg(short, long, global = true, default_value = "en")]
    lang: String,

    /// JSON file forwarded to the backend as grounding data
    #[arg(short, long, global = true)]
    grounding: Option<PathBuf>,

    /// Act as this user instead of resolving a Supabase session
    #[arg(short, long, global = true)]
    user_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = AssistantConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    info!("Using finance assistant at {}", config.base_url());

    let grounding = match &cli.grounding {
        Some(path) => Some(load_grounding(path)?),
        None => None,
    };

    let transport = Arc::new(HttpChatbotTransport::new(config)?);
    let use_case = AskAssistantUseCase::new(identity_provider(cli.user_id), transport);

    match cli.command {
        Commands::Ask { message } => {
            let history = vec![ChatMessage::user(message)];
            let result = use_case.execute(&history, &cli.lang, grounding.as_ref()).await;
            print_result(&result)?;
        }
        Commands::Chat => {
            run_chat(&use_case, &cli.lang, grounding.as_ref()).await?;
        }
    }

    Ok(())
}

fn identity_provider(user_id: Option<String>) -> Arc<dyn IdentityProvider> {
    if let Some(id) = user_id {
        info!("Using static identity {id}");
        return Arc::new(StaticIdentityProvider::logged_in(id));
    }

    match SupabaseIdentityProvider::from_env() {
        Some(provider) => {
            info!("Resolving user through Supabase");
            Arc::new(provider)
        }
        None => {
            warn!("No --user-id given and SUPABASE_URL/SUPABASE_ANON_KEY not set");
            Arc::new(StaticIdentityProvider::logged_out())
        }
    }
}

async fn run_chat(
    use_case: &AskAssistantUseCase,
    lang: &str,
    grounding: Option<&Value>,
) -> Result<()> {
    let mut history: Vec<ChatMessage> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        history.push(ChatMessage::user(line));

        let result = use_case.execute(&history, lang, grounding).await;
        if let Some(reply) = result
            .payload()
            .and_then(|p| p.get("reply"))
            .and_then(Value::as_str)
        {
            history.push(ChatMessage::assistant(reply));
        }
        print_result(&result)?;
    }

    Ok(())
}

fn print_result(result: &AssistResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
