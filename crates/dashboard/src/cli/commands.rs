use std::time::Duration;

use anyhow::Result;
use colored::*;
use serde::Serialize;

use crate::cli::client::DashboardClient;
use crate::cli::display;

/// Which dashboard view to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
  Stats,
  Trends,
  RecentClients,
  UpcomingMeetings,
  Performance,
}

/// How to present a view
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
  /// Print the raw JSON body instead of the formatted view
  pub json: bool,
  /// Refresh every N seconds until Ctrl-C
  pub watch: Option<u64>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
  Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

/// Fetch one view and render it
pub async fn render_view(client: &DashboardClient, view: View, json: bool) -> Result<String> {
  match view {
    View::Stats => {
      let stats = client.stats().await?;
      if json { to_json(&stats) } else { Ok(display::render_stats(&stats)) }
    }
    View::Trends => {
      let trends = client.trends().await?;
      if json { to_json(&trends) } else { Ok(display::render_trends(&trends)) }
    }
    View::RecentClients => {
      let clients = client.recent_clients().await?;
      if json { to_json(&clients) } else { Ok(display::render_recent_clients(&clients)) }
    }
    View::UpcomingMeetings => {
      let meetings = client.upcoming_meetings().await?;
      if json { to_json(&meetings) } else { Ok(display::render_upcoming_meetings(&meetings)) }
    }
    View::Performance => {
      let performance = client.performance().await?;
      if json { to_json(&performance) } else { Ok(display::render_performance(&performance)) }
    }
  }
}

/// Show a view once, or keep refreshing it in watch mode
pub async fn show_view(client: &DashboardClient, view: View, options: OutputOptions) -> Result<()> {
  let Some(seconds) = options.watch else {
    print!("{}", render_view(client, view, options.json).await?);
    return Ok(());
  };

  let mut interval = tokio::time::interval(Duration::from_secs(seconds.max(1)));
  loop {
    tokio::select! {
      _ = interval.tick() => {
        // A failed refresh is reported and retried on the next tick
        match render_view(client, view, options.json).await {
          Ok(output) => {
            if !options.json {
              // Clear the screen between refreshes
              print!("\x1B[2J\x1B[H");
              println!("{} a cada {}s, Ctrl-C para sair\n", client.base_url().dimmed(), seconds);
            }
            print!("{output}");
          }
          Err(e) => eprintln!("{} {e:#}", "✗".red()),
        }
      }
      _ = tokio::signal::ctrl_c() => {
        break;
      }
    }
  }

  Ok(())
}

/// Check the server's health endpoint
pub async fn health(client: &DashboardClient, json: bool) -> Result<()> {
  let health = client.health().await?;
  if json {
    print!("{}", to_json(&health)?);
  } else {
    print!("{}", display::render_health(&health, client.base_url()));
  }
  Ok(())
}
