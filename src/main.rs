use anyhow::Result;
use clap::Parser;
use console::Term;
use tracing_subscriber::EnvFilter;

use coordinates::conversation::Conversation;
use coordinates::providers::anthropic::AnthropicProvider;
use coordinates::providers::configs::anthropic::AnthropicProviderConfig;
use coordinates::tools::Toolbox;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Anthropic API key (can also be set via ANTHROPIC_API_KEY environment variable)
    #[arg(short, long)]
    api_key: Option<String>,

    /// API host (can also be set via ANTHROPIC_API_HOST environment variable)
    #[arg(long)]
    host: Option<String>,

    /// Model to use
    #[arg(short, long, default_value = "claude-3-5-sonnet-20240620")]
    model: String,

    /// System prompt sent with every request
    #[arg(long)]
    system: Option<String>,

    /// Upper bound on tokens generated per reply
    #[arg(long, default_value_t = 1024)]
    max_tokens: i32,

    /// Message to start the conversation with
    #[arg(default_value = "Where is San Francisco?")]
    message: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout carries the transcript
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AnthropicProviderConfig::resolve(cli.api_key, cli.host)?;
    let provider = AnthropicProvider::new(config)?;
    let toolbox = Toolbox::with_defaults()?;

    let mut conversation = Conversation::new(&provider, &toolbox, cli.model, cli.max_tokens)
        .with_system(cli.system.unwrap_or_default());
    conversation.run(&cli.message, &mut Term::stdout())?;
    Ok(())
}
