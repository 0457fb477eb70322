use clap::Parser;
use telefy::markdown::escape_markdown_v2;
use telefy::{InlineButton, SendResult, Telefy, TelefyError, ALL_CHANNELS};

#[derive(Parser)]
#[command(name = "telefy")]
#[command(version, about = "Send Telegram notifications to configured channels", long_about = None)]
struct Cli {
    /// Message text to send
    #[arg(required_unless_present = "list")]
    message: Option<String>,

    /// Send to a single channel by name (default: all channels)
    #[arg(long, short, value_name = "NAME", conflicts_with = "all")]
    channel: Option<String>,

    /// Send to every configured channel
    #[arg(long, short)]
    all: bool,

    /// Parse mode: Markdown, HTML or MarkdownV2
    #[arg(long, short, value_name = "MODE", default_value = "MarkdownV2")]
    parse_mode: String,

    /// Inline URL button as "text|url"; repeat for more buttons (one row each)
    #[arg(long, short, value_name = "TEXT|URL")]
    button: Vec<String>,

    /// Send the message text as-is, without MarkdownV2 escaping
    #[arg(long)]
    raw: bool,

    /// List configured channels and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<TelefyError>() {
            Some(err) => {
                eprintln!("Error: {}", err.message());
                if !err.suggestion().is_empty() {
                    eprintln!("Suggestion: {}", err.suggestion());
                }
            }
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let telefy = Telefy::from_env()?;

    if cli.list {
        for channel in telefy.channels() {
            println!("{}", channel.name);
        }
        return Ok(());
    }

    let message = cli.message.unwrap_or_default();
    let text = prepare_text(&message, cli.raw);
    let target = if cli.all {
        ALL_CHANNELS
    } else {
        cli.channel.as_deref().unwrap_or(ALL_CHANNELS)
    };
    log::debug!("sending {} character(s) to {}", text.chars().count(), target);

    let results = if cli.button.is_empty() {
        telefy.send_message(&text, target, &cli.parse_mode).await?
    } else {
        let rows = cli.button.iter().map(|b| vec![parse_button(b)]).collect();
        telefy
            .send_message_with_buttons(&text, rows, target, &cli.parse_mode)
            .await?
    };

    for result in &results {
        println!("{}", success_line(result));
    }
    Ok(())
}

/// Escape MarkdownV2 specials unless raw output was requested.
fn prepare_text(message: &str, raw: bool) -> String {
    if !raw {
        escape_markdown_v2(message)
    } else {
        message.to_string()
    }
}

/// Split "text|url" at the first `|`. A value without `|` gets an empty url and is
/// rejected by button validation.
fn parse_button(value: &str) -> InlineButton {
    match value.split_once('|') {
        Some((text, url)) => InlineButton::new(text.trim(), url.trim()),
        None => InlineButton::new(value.trim(), ""),
    }
}

fn success_line(result: &SendResult) -> String {
    match result.message_id() {
        Some(id) => format!("Sent to {} (message_id {})", result.channel, id),
        None => format!("Sent to {}", result.channel),
    }
}
