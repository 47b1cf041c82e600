//! Dashboard service: fetch fresh records, compute one view

use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::aggregation::{
  self, OverviewStats, PerformanceStats, RecentClient, TrendStats, UpcomingMeeting,
};
use crate::clock::Clock;
use crate::error::ProviderError;
use crate::providers::DataProvider;

/// Computes dashboard views on demand. Nothing is cached: every call reads
/// both sources again.
#[derive(Clone)]
pub struct DashboardService {
  provider: Arc<dyn DataProvider>,
  clock: Arc<dyn Clock>,
  timezone: Tz,
}

impl DashboardService {
  pub fn new(provider: Arc<dyn DataProvider>, clock: Arc<dyn Clock>, timezone: Tz) -> Self {
    Self { provider, clock, timezone }
  }

  pub fn timezone(&self) -> Tz {
    self.timezone
  }

  fn now(&self) -> DateTime<Tz> {
    self.clock.now().with_timezone(&self.timezone)
  }

  pub async fn stats(&self) -> Result<OverviewStats, ProviderError> {
    let (contacts, meetings) =
      tokio::try_join!(self.provider.fetch_contacts(), self.provider.fetch_meetings())?;
    Ok(aggregation::overview::compute(&contacts, &meetings, self.now()))
  }

  pub async fn trends(&self) -> Result<TrendStats, ProviderError> {
    let (contacts, meetings) =
      tokio::try_join!(self.provider.fetch_contacts(), self.provider.fetch_meetings())?;
    Ok(aggregation::trends::compute(&contacts, &meetings, self.timezone))
  }

  pub async fn recent_clients(&self) -> Result<Vec<RecentClient>, ProviderError> {
    let contacts = self.provider.fetch_contacts().await?;
    Ok(aggregation::recent::compute(&contacts))
  }

  pub async fn upcoming_meetings(&self) -> Result<Vec<UpcomingMeeting>, ProviderError> {
    let meetings = self.provider.fetch_meetings().await?;
    Ok(aggregation::upcoming::compute(&meetings, self.now()))
  }

  pub async fn performance(&self) -> Result<PerformanceStats, ProviderError> {
    let (contacts, meetings) =
      tokio::try_join!(self.provider.fetch_contacts(), self.provider.fetch_meetings())?;
    Ok(aggregation::performance::compute(&contacts, &meetings, self.timezone))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::clock::FixedClock;
  use crate::providers::MockDataProvider;
  use crate::records::Contact;
  use chrono::{TimeZone, Utc};

  fn service(provider: MockDataProvider) -> DashboardService {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 20, 15, 0, 0).unwrap());
    DashboardService::new(Arc::new(provider), Arc::new(clock), chrono_tz::America::Sao_Paulo)
  }

  #[tokio::test]
  async fn test_recent_clients_reads_only_contacts() {
    let mut provider = MockDataProvider::new();
    provider.expect_fetch_contacts().times(1).returning(|| {
      Ok(vec![Contact { nome_completo: "Ana".into(), ..Default::default() }])
    });
    provider.expect_fetch_meetings().never();

    let recent = service(provider).recent_clients().await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].nome_completo, "Ana");
  }

  #[tokio::test]
  async fn test_stats_propagates_provider_failure() {
    let mut provider = MockDataProvider::new();
    provider.expect_fetch_contacts().returning(|| Ok(Vec::new()));
    provider
      .expect_fetch_meetings()
      .returning(|| Err(ProviderError::Unavailable("calendar down".into())));

    let error = service(provider).stats().await.unwrap_err();
    assert!(error.to_string().contains("calendar down"));
  }

  #[tokio::test]
  async fn test_stats_with_no_records() {
    let mut provider = MockDataProvider::new();
    provider.expect_fetch_contacts().returning(|| Ok(Vec::new()));
    provider.expect_fetch_meetings().returning(|| Ok(Vec::new()));

    let stats = service(provider).stats().await.unwrap();
    assert_eq!(stats.total_clients, 0);
    assert_eq!(stats.scheduling_success_rate, 0.0);
    assert!(stats.interests.is_empty());
  }
}
