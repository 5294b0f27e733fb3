//! ScoopView CLI
//!
//! Command-line interface for the ScoopView client.
//! Runs the interactive terminal UI by default, with one-shot lookups for
//! scripting.

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use scoopview::api::{TopicDocument, UserProfile};
use scoopview::{
    format_curation_date, format_post_count, sanitize, AppConfig, HttpApi, Route, SearchOutcome,
    Session, TopicApi,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// ScoopView - terminal client for curated topics
///
/// Searches topics as you type and browses their curated posts through a
/// JSON proxy of the curation API.
#[derive(Parser)]
#[command(name = "scoopview")]
#[command(author = "ScoopView Contributors")]
#[command(version)]
#[command(about = "Terminal client for curated topics", long_about = None)]
struct Cli {
    /// Root of the API proxy
    #[arg(
        long,
        global = true,
        env = "SCOOPVIEW_API_BASE",
        default_value = scoopview::DEFAULT_API_BASE
    )]
    api_base: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "10")]
    timeout: u64,

    /// Quiet period before typed input is searched, in milliseconds
    #[arg(long, global = true, default_value = "500")]
    debounce_ms: u64,

    /// Log file (default: next to the executable)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui {
        /// Start at a route, e.g. /search/corona or /topic/vallee-d-aure
        #[arg(long)]
        path: Option<String>,
    },

    /// Search topics once and print the outcome
    Search {
        /// Search text (use -- before it if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show a topic and its latest posts
    Topic {
        /// Topic identifier, e.g. corona-virus-news
        url_name: String,

        /// Number of posts to print
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show a curator's profile
    User {
        /// User identifier
        short_name: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = AppConfig {
        api_base: cli.api_base.clone(),
        debounce: Duration::from_millis(cli.debounce_ms),
        request_timeout: Duration::from_secs(cli.timeout.max(1)),
        log_file: cli.log_file.clone(),
        ..Default::default()
    };

    scoopview::logging::init(config.log_file.as_deref());
    info!(version = scoopview::VERSION, api_base = %config.api_base, "ScoopView starting up");

    let result = run(cli.command, config);

    if let Err(e) = result {
        error!(error = %e, "command failed");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(command: Option<Commands>, config: AppConfig) -> scoopview::Result<()> {
    config.validate()?;
    let api = Arc::new(HttpApi::new(&config.api_base, config.request_timeout)?);

    match command.unwrap_or(Commands::Tui { path: None }) {
        Commands::Tui { path } => {
            let route = path.as_deref().map(Route::parse).unwrap_or(Route::Home);
            scoopview::tui::run(config, api, route)
        }
        Commands::Search { query, output } => cmd_search(config, api, &query, output),
        Commands::Topic {
            url_name,
            limit,
            output,
        } => cmd_topic(api.as_ref(), &url_name, limit, output),
        Commands::User { short_name, output } => cmd_user(api.as_ref(), &short_name, output),
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Search command implementation
///
/// Goes through a session so the outcome is classified exactly as in the UI.
fn cmd_search(
    config: AppConfig,
    api: Arc<HttpApi>,
    query: &str,
    output: OutputFormat,
) -> scoopview::Result<()> {
    let start = Instant::now();
    let deadline = config.request_timeout + Duration::from_secs(1);
    let mut session = Session::new(config, api);

    let pb = spinner(format!("Searching for '{}'", query));
    session.on_input_changed(query, start);
    session.search_now();
    while session.outcome().is_pending() && start.elapsed() < deadline {
        session.wait_for_message(Duration::from_millis(100));
    }
    pb.finish_and_clear();
    session.shutdown();

    let outcome = session.outcome();
    if output == OutputFormat::Json {
        let json = match outcome {
            SearchOutcome::NoSearch => serde_json::json!({ "status": "no_search" }),
            SearchOutcome::Pending { query } => {
                serde_json::json!({ "status": "timeout", "query": query })
            }
            SearchOutcome::Success { query, topics } => {
                serde_json::json!({ "status": "success", "query": query, "topics": topics })
            }
            SearchOutcome::Empty { query } => {
                serde_json::json!({ "status": "empty", "query": query, "topics": [] })
            }
            SearchOutcome::Error { query, message } => {
                serde_json::json!({ "status": "error", "query": query, "message": message })
            }
        };
        println!("{}", json);
        return Ok(());
    }

    match outcome {
        SearchOutcome::NoSearch => {
            println!("{} Nothing to search for", style("!").yellow().bold());
        }
        SearchOutcome::Pending { .. } => {
            println!("{} No answer from the server", style("!").yellow().bold());
        }
        SearchOutcome::Empty { .. } => {
            println!("No results found...");
        }
        SearchOutcome::Error { message, .. } => {
            println!("{}", style(message).red());
        }
        SearchOutcome::Success { topics, .. } => {
            println!(
                "Found {} topics in {}:",
                style(topics.len()).green(),
                style(HumanDuration(start.elapsed())).cyan()
            );
            println!();
            for (i, topic) in topics.iter().enumerate() {
                println!(
                    "{:>4}. {} {}",
                    i + 1,
                    style(sanitize::html_to_line(&topic.name)).bold(),
                    style(format!("({})", format_post_count(topic.post_count))).dim()
                );
                // Percent-encoded, so no raw remote bytes reach the terminal
                let route = Route::Topic(topic.short_name.clone());
                println!("      {}", style(route).cyan());
                if let Some(desc) = topic.description.as_deref() {
                    let line = sanitize::html_to_line(desc);
                    if !line.is_empty() {
                        println!("      {}", scoopview::tui::ui::truncate(&line, 100));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Topic command implementation
fn cmd_topic(
    api: &dyn TopicApi,
    url_name: &str,
    limit: usize,
    output: OutputFormat,
) -> scoopview::Result<()> {
    let pb = spinner(format!("Loading topic '{}'", url_name));
    let result = api.get_topic(url_name);
    pb.finish_and_clear();
    let mut topic: TopicDocument = result?;
    topic.posts.truncate(limit);

    if output == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&topic).map_err(|e| scoopview::ScoopViewError::Decode {
                path: url_name.to_string(),
                message: e.to_string(),
            })?
        );
        return Ok(());
    }

    println!("{}", style(sanitize::html_to_line(&topic.name)).green().bold());
    if let Some(desc) = topic.description.as_deref() {
        println!("{}", sanitize::html_to_text(desc));
    }
    let mut meta = format_post_count(topic.post_count);
    if let Some(creator) = &topic.creator {
        meta = format!("{} | curated by {}", meta, sanitize::html_to_line(&creator.name));
    }
    println!("{}", style(meta).dim());
    if let Some(link) = sanitize::safe_link(&topic.url) {
        println!("View it on Scoop.it: {}", style(link).cyan().underlined());
    }

    for post in &topic.posts {
        println!();
        println!(
            "{} {}",
            style("\u{25B8}").green(),
            style(sanitize::html_to_line(&post.title)).bold()
        );
        let date = post.curation_date.map(format_curation_date).unwrap_or_default();
        let author = post
            .author
            .as_ref()
            .map(|a| format!("by {}", sanitize::html_to_line(&a.name)))
            .unwrap_or_default();
        let meta = [date, author]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ");
        if !meta.is_empty() {
            println!("  {}", style(meta).dim());
        }
        let body = post.html_fragment.as_deref().unwrap_or(&post.html_content);
        for line in scoopview::tui::ui::wrap(&sanitize::html_to_text(body), 96) {
            println!("  {}", line);
        }
        if let Some(insight) = post.html_insight.as_deref() {
            let text = sanitize::html_to_text(insight);
            if !text.is_empty() {
                println!("  {}", style("Curator's insight:").italic());
                for line in scoopview::tui::ui::wrap(&text, 96) {
                    println!("  {}", style(line).italic());
                }
            }
        }
        if let Some(domain) = post.url.as_deref().and_then(sanitize::domain) {
            println!("  View original on {}", style(domain).cyan());
        }
    }
    Ok(())
}

/// User command implementation
fn cmd_user(api: &dyn TopicApi, short_name: &str, output: OutputFormat) -> scoopview::Result<()> {
    let pb = spinner(format!("Loading user '{}'", short_name));
    let result = api.get_user(short_name);
    pb.finish_and_clear();
    let user: UserProfile = result?;

    if output == OutputFormat::Json {
        println!("{}", serde_json::json!(user));
        return Ok(());
    }

    println!("{}", style(sanitize::html_to_line(&user.name)).green().bold());
    if let Some(bio) = user.bio.as_deref() {
        let text = sanitize::html_to_text(bio);
        if !text.is_empty() {
            println!("{}", text);
        }
    }
    if let Some(link) = sanitize::safe_link(&user.url) {
        println!("{}", style(link).cyan().underlined());
    }
    Ok(())
}
