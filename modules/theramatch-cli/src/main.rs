use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use ranking_client::RankingClient;
use theramatch_common::{Config, FilterCategoryTable, MatchIndicator, Message, SignalExtractor};
use theramatch_session::results::profile;
use theramatch_session::{
    BrowserOptions, ControlAction, DispatchOutcome, FileSessionStore, FindMatchControl,
    HideTimer, PlayerDirective, RankingDispatcher, RankingGate, ResultsBrowser, TimerToken,
    TracingNotifier, VideoPlayer,
};

/// The terminal has no embedded player; directives are only logged.
struct TerminalPlayer;

impl VideoPlayer for TerminalPlayer {
    fn post(&mut self, directive: PlayerDirective) {
        debug!(message = %directive.to_message(), "No player attached, dropping directive");
    }
}

/// Nothing on a terminal ever hides, so armed timers never fire.
#[derive(Default)]
struct InertHideTimer {
    next: u64,
}

impl HideTimer for InertHideTimer {
    fn arm(&mut self, _delay: std::time::Duration) -> TimerToken {
        self.next += 1;
        TimerToken(self.next)
    }

    fn cancel(&mut self, _token: TimerToken) {}
}

type TerminalBrowser = ResultsBrowser<TerminalPlayer, InertHideTimer>;

#[derive(Parser)]
#[command(name = "theramatch")]
#[command(about = "Therapist match engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the running match count for a chat transcript
    Signal {
        /// JSON array of chat messages
        transcript: PathBuf,
    },

    /// Rank the current candidates and store the shortlist
    Rank {
        /// JSON array of chat messages
        transcript: PathBuf,

        /// Skip the confirmation prompt for large candidate pools
        #[arg(short, long)]
        yes: bool,
    },

    /// Browse the stored shortlist
    Results {
        /// Profiles to open, in order
        #[arg(long = "select", value_name = "UUID")]
        select: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("theramatch=info".parse()?)
                .add_directive("ranking_client=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.log_redacted();

    match cli.command {
        Commands::Signal { transcript } => cmd_signal(&config, &transcript),
        Commands::Rank { transcript, yes } => cmd_rank(&config, &transcript, yes).await,
        Commands::Results { select } => cmd_results(&config, &select).await,
    }
}

fn read_transcript(path: &Path) -> Result<Vec<Message>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Transcript {} is not a JSON array of messages", path.display()))
}

fn cmd_signal(config: &Config, path: &Path) -> Result<()> {
    let transcript = read_transcript(path)?;
    let extractor = SignalExtractor::new(config.match_tool.clone());

    let Some(signal) = extractor.extract(&transcript) else {
        println!("No match data yet.");
        return Ok(());
    };

    match MatchIndicator::render(&signal, FilterCategoryTable::standard()) {
        Some(view) => {
            println!("{}", view.badge);
            println!("{}", view.detail);
            println!("{}", view.hint);
        }
        None => println!("No match count reported."),
    }
    if let Some(message) = &signal.message {
        println!("{message}");
    }
    Ok(())
}

async fn cmd_rank(config: &Config, path: &Path, yes: bool) -> Result<()> {
    let transcript = read_transcript(path)?;
    let extractor = SignalExtractor::new(config.match_tool.clone());

    let signal = extractor
        .extract(&transcript)
        .context("Transcript has no match data to rank")?;
    let gate = RankingGate::new(config.confirm_threshold);
    let Some(mut control) = FindMatchControl::new(signal, gate) else {
        bail!("No filters applied yet; keep chatting before ranking");
    };

    let request = match control.trigger(&transcript) {
        ControlAction::Dispatch(request) => request,
        ControlAction::AskConfirmation { match_count } => {
            if !yes && !confirm(match_count)? {
                control.cancel();
                println!("Cancelled.");
                return Ok(());
            }
            match control.confirm(&transcript) {
                ControlAction::Dispatch(request) => request,
                other => bail!("Unexpected control action after confirmation: {other:?}"),
            }
        }
        ControlAction::Ignored => bail!("Find match is not available right now"),
    };

    let client = RankingClient::new(&config.api_url);
    info!(endpoint = client.endpoint(), "Ranking candidates");
    let dispatcher = RankingDispatcher::new(
        client,
        FileSessionStore::new(config.session_dir.clone()),
        TracingNotifier,
    );

    let outcome = dispatcher.dispatch(request).await;
    control.settle(&outcome);
    match outcome {
        DispatchOutcome::ShowResults => {
            println!(
                "Results stored in {}. Run `theramatch results` to browse them.",
                config.session_dir.display()
            );
            Ok(())
        }
        DispatchOutcome::Failed(e) => Err(e).context("Ranking failed"),
    }
}

fn confirm(match_count: u64) -> Result<bool> {
    print!(
        "There are {match_count} potential matches. Ranking works best with fewer. \
         Rank them anyway? [y/N] "
    );
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn cmd_results(config: &Config, select: &[String]) -> Result<()> {
    let store = FileSessionStore::new(config.session_dir.clone());
    let mut browser = match TerminalBrowser::load(
        &store,
        TerminalPlayer,
        InertHideTimer::default(),
        BrowserOptions::from(config),
    )
    .await
    {
        Ok(browser) => browser,
        Err(e) => {
            warn!(reason = e.reason(), "No results to show");
            println!("{e}");
            println!("Back to search: theramatch rank <transcript.json>");
            return Ok(());
        }
    };

    for uuid in select {
        if browser.select_profile(uuid).is_none() {
            warn!(uuid = uuid.as_str(), "No profile with that id in the results");
        }
    }

    print_primary(&browser);

    let others = browser.other_candidates();
    if !others.is_empty() {
        println!();
        println!("Other qualified matches ({}):", others.len());
        for other in others {
            let marker = if other.viewed { " (viewed)" } else { "" };
            println!(
                "  {}  {}  [{}]{}",
                other.rank_label, other.profile.listing_name, other.profile.uuid, marker
            );
        }
    }
    Ok(())
}

fn print_primary(browser: &TerminalBrowser) {
    let primary = browser.primary();

    println!("{}  {}", browser.badge(), browser.heading());
    println!();

    let credentials = profile::format_credentials(primary);
    if credentials.is_empty() {
        println!("{}", primary.listing_name);
    } else {
        println!("{}, {}", primary.listing_name, credentials);
    }
    if !primary.health_role.is_empty() {
        println!("{}", profile::format_health_role(&primary.health_role));
    }
    if profile::is_verified(primary) {
        println!("Verified");
    }

    let address = profile::address_line(primary);
    if !address.is_empty() {
        println!("{address}");
    }
    if !primary.primary_location.phone_number.is_empty() {
        println!(
            "{}  ({})",
            profile::format_phone_number(&primary.primary_location.phone_number),
            profile::call_link(primary)
        );
    }

    let badges = profile::appointment_badges(primary);
    if !badges.is_empty() {
        println!("{}", badges.join(" | "));
    }
    if let Some(url) = browser.embed_url() {
        println!("Intro video: {url}");
    }
    if !primary.ai_description.is_empty() {
        println!();
        println!("Why we recommend them: {}", primary.ai_description);
    }
    if !primary.canonical_url.is_empty() {
        println!("Full profile: {}", primary.canonical_url);
    }
}
