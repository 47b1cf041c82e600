use anyhow::Result;
use clap::{Parser, Subcommand};
use dashboard::cli::client::{ClientConfig, DashboardClient, DEFAULT_SERVER_URL};
use dashboard::cli::commands::{self, OutputOptions, View};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Dashboard - Lead and meeting analytics\nReads dashboard views from a running dashboard server")]
#[command(version)]
struct Cli {
  /// Dashboard server URL
  #[arg(long, global = true, env = "DASHBOARD_URL", default_value = DEFAULT_SERVER_URL)]
  server: String,

  /// Request timeout in seconds
  #[arg(long, global = true, default_value = "30")]
  timeout: u64,

  /// Print raw JSON instead of formatted output
  #[arg(long, global = true)]
  json: bool,

  /// Refresh every SECS seconds until Ctrl-C
  #[arg(long, global = true, value_name = "SECS", num_args = 0..=1, default_missing_value = "30")]
  watch: Option<u64>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Client counts, meeting outcomes and interests
  Stats,
  /// Contacts and meetings per day, peak hours
  Trends,
  /// The ten most recent clients
  RecentClients,
  /// The next confirmed meetings
  UpcomingMeetings,
  /// Lead status, top topics and confirmation rate by weekday
  Performance,
  /// Check that the server is up
  Health,
}

async fn handle(cli: Cli) -> Result<()> {
  let client =
    DashboardClient::with_config(ClientConfig { base_url: cli.server, timeout_secs: cli.timeout })?;
  let options = OutputOptions { json: cli.json, watch: cli.watch };

  let view = match cli.command {
    Command::Health => return commands::health(&client, cli.json).await,
    Command::Stats => View::Stats,
    Command::Trends => View::Trends,
    Command::RecentClients => View::RecentClients,
    Command::UpcomingMeetings => View::UpcomingMeetings,
    Command::Performance => View::Performance,
  };

  commands::show_view(&client, view, options).await
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  handle(cli).await
}
