use clap::Parser;
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use codeanalyzer::models::{MessageEvent, MessageOrigin, Persona};
use codeanalyzer::{
    ClaudeProvider, CodeAnalyzer, Config, PluginConfig, ProviderManager, Star, StarContext,
    StaticPersonaManager,
};

#[derive(Parser, Debug)]
#[command(name = "codeanalyzer")]
#[command(version = "1.0.0")]
#[command(about = "Ask an LLM to analyze a piece of code, as the chat plugin would")]
struct Args {
    /// Chat message, e.g. "/代码分析 print(1)". A bare snippet is wrapped in the command.
    message: Option<String>,

    /// Read the code to analyze from stdin
    #[arg(long)]
    stdin: bool,

    /// Sender name attached to the event
    #[arg(long, default_value = "console")]
    sender: String,

    /// Conversation origin used for provider and persona lookup
    #[arg(long, default_value = "console:FriendMessage:local")]
    origin: String,

    /// Plugin config as a JSON file (llm_provider, enable_personality)
    #[arg(short, long)]
    config: Option<String>,

    /// Use this provider id instead of the active one
    #[arg(long)]
    llm_provider: Option<String>,

    /// Disable the persona preamble
    #[arg(long)]
    no_personality: bool,

    /// Default persona prompt
    #[arg(long)]
    persona: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("codeanalyzer=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    let mut plugin_config = match &args.config {
        Some(path) => PluginConfig::from_file(path)?,
        None => config.plugin.clone(),
    };
    if let Some(id) = args.llm_provider.as_deref().map(str::trim) {
        plugin_config.llm_provider = Some(id.to_string()).filter(|id| !id.is_empty());
    }
    if args.no_personality {
        plugin_config.enable_personality = false;
    }

    let mut providers = ProviderManager::new();
    providers.register(Arc::new(ClaudeProvider::new(
        config.provider_id.clone(),
        config.anthropic_api_key.clone(),
        config.model.clone(),
    )?));

    let persona = args
        .persona
        .clone()
        .or(config.persona_prompt.clone())
        .map(|prompt| Persona::new("default", prompt));
    let context = Arc::new(StarContext::new(providers, StaticPersonaManager::new(persona)));

    let plugin = CodeAnalyzer::new(context, Some(plugin_config));
    plugin.initialize().await;

    let message = read_message(&args, plugin.command().name())?;
    let event = MessageEvent::new(args.sender.clone(), message, MessageOrigin::new(args.origin.clone()));

    if plugin.command().matches(&event.message_str) {
        for reply in plugin.handle(&event).await {
            println!("{}", reply);
        }
    } else {
        tracing::warn!("Message does not invoke /{}", plugin.command().name());
    }

    plugin.terminate().await;
    Ok(())
}

fn read_message(args: &Args, command: &str) -> anyhow::Result<String> {
    let text = if args.stdin {
        let mut code = String::new();
        std::io::stdin().read_to_string(&mut code)?;
        code
    } else {
        args.message.clone().unwrap_or_default()
    };

    let trimmed = text.trim_start();
    if trimmed.starts_with(command) || trimmed.starts_with(&format!("/{}", command)) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{} {}", command, text))
    }
}
