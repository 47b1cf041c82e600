//! Display formatting utilities for CLI output

use colored::*;

use crate::aggregation::{OverviewStats, PerformanceStats, RecentClient, TrendStats, UpcomingMeeting};
use crate::server::types::HealthResponse;

const BAR_WIDTH: usize = 24;

/// Horizontal bar scaled against `max`
pub fn bar(value: usize, max: usize) -> String {
  if max == 0 {
    return String::new();
  }
  let width = (value * BAR_WIDTH).div_ceil(max);
  "█".repeat(width)
}

fn heading(title: &str) -> String {
  format!("{}\n", title.bold().underline())
}

pub fn render_health(health: &HealthResponse, server: &str) -> String {
  format!(
    "{} {} está {} ({}, no ar há {:.0}s)\n",
    "✓".green(),
    server.cyan(),
    health.status.green(),
    health.environment,
    health.uptime
  )
}

pub fn render_stats(stats: &OverviewStats) -> String {
  let mut out = heading("Visão geral");
  out.push_str(&format!(
    "  Clientes       {} no total, {} novos no mês, {} recorrentes\n",
    stats.total_clients.to_string().bold(),
    stats.new_clients.to_string().green(),
    stats.returning_clients
  ));
  out.push_str(&format!("  Mensagens      {:.1} por cliente\n", stats.avg_messages_per_interaction));
  out.push_str(&format!(
    "  Reuniões       {} agendadas, {} canceladas, {} reagendadas\n",
    stats.scheduled_meetings.to_string().green(),
    stats.cancelled_meetings.to_string().red(),
    stats.rescheduled_meetings.to_string().yellow()
  ));
  out.push_str(&format!(
    "  Taxa de sucesso {:.1}%   Lead para reunião {:.1}%\n",
    stats.scheduling_success_rate, stats.lead_to_meeting_rate
  ));

  if !stats.interests.is_empty() {
    out.push('\n');
    out.push_str(&heading("Interesses"));
    let max = stats.interests.iter().map(|interest| interest.value).max().unwrap_or(0);
    for interest in &stats.interests {
      out.push_str(&format!(
        "  {:<24} {:>4} {}\n",
        interest.name,
        interest.value,
        bar(interest.value, max).cyan()
      ));
    }
  }

  out
}

pub fn render_trends(trends: &TrendStats) -> String {
  let mut out = heading("Contatos por dia");
  if trends.daily_contacts.is_empty() {
    out.push_str(&format!("  {}\n", "Nenhum contato com data".dimmed()));
  }
  let max = trends.daily_contacts.iter().map(|day| day.contacts).max().unwrap_or(0);
  for day in &trends.daily_contacts {
    out.push_str(&format!("  {} {:>4} {}\n", day.date, day.contacts, bar(day.contacts, max).cyan()));
  }

  out.push('\n');
  out.push_str(&heading("Reuniões por dia"));
  for day in &trends.meeting_trends {
    out.push_str(&format!(
      "  {}  {} agendadas  {} canceladas  {} reagendadas\n",
      day.date,
      day.scheduled.to_string().green(),
      day.cancelled.to_string().red(),
      day.rescheduled.to_string().yellow()
    ));
  }

  out.push('\n');
  out.push_str(&heading("Horários de pico"));
  for hour in &trends.peak_hours {
    out.push_str(&format!("  {}  {} reuniões\n", hour.hour.bold(), hour.interactions));
  }

  out
}

pub fn render_recent_clients(clients: &[RecentClient]) -> String {
  let mut out = heading("Clientes recentes");
  if clients.is_empty() {
    out.push_str(&format!("  {}\n", "Nenhum cliente ainda".dimmed()));
    return out;
  }

  for client in clients {
    out.push_str(&format!(
      "  {}  {}  {}\n",
      client.criado_em.dimmed(),
      client.nome_completo.bold(),
      client.telefone_wpp.cyan()
    ));
    out.push_str(&format!(
      "              {} · {} · {} mensagens\n",
      client.interesse_principal, client.status_lead.yellow(), client.total_mensagens
    ));
  }

  out
}

pub fn render_upcoming_meetings(meetings: &[UpcomingMeeting]) -> String {
  let mut out = heading("Próximas reuniões");
  if meetings.is_empty() {
    out.push_str(&format!("  {}\n", "Nenhuma reunião agendada".dimmed()));
    return out;
  }

  for meeting in meetings {
    let marker = if meeting.is_rescheduled { " (reagendada)".yellow().to_string() } else { String::new() };
    out.push_str(&format!("  {}  {}{}\n", meeting.start_time.cyan(), meeting.title.bold(), marker));
    if !meeting.attendees.is_empty() {
      out.push_str(&format!("                    {}\n", meeting.attendees.join(", ")));
    }
    if !meeting.location.is_empty() {
      out.push_str(&format!("                    @ {}\n", meeting.location));
    }
  }

  out
}

pub fn render_performance(performance: &PerformanceStats) -> String {
  let mut out = heading("Performance");
  out.push_str(&format!("  Tempo médio para agendar: {}\n", performance.avg_time_to_schedule.bold()));

  out.push('\n');
  out.push_str(&heading("Status dos leads"));
  for status in &performance.lead_status {
    out.push_str(&format!("  {:<24} {:>4}\n", status.status, status.count));
  }

  out.push('\n');
  out.push_str(&heading("Principais tópicos"));
  for topic in &performance.top_topics {
    out.push_str(&format!("  {:<24} {:>4}\n", topic.topic, topic.count));
  }

  out.push('\n');
  out.push_str(&heading("Confirmadas por dia da semana"));
  for day in &performance.response_rate_by_day {
    out.push_str(&format!("  {:<8} {:>3}% {}\n", day.day, day.rate, bar(day.rate as usize, 100).green()));
  }

  out
}
