//! Data providers: where contacts and meetings come from
//!
//! The aggregation layer only ever sees a [`DataProvider`]. Production uses
//! the Google Sheets + Calendar implementation, tests and local runs use
//! in-memory fixtures.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::records::{Contact, Meeting};

pub mod fixture;
pub mod google;

pub use fixture::FixtureProvider;
pub use google::GoogleProvider;

/// Read access to the two raw record collections.
///
/// Every call returns a fresh copy; implementations must not cache between
/// requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataProvider: Send + Sync {
  /// All contact records (one per spreadsheet row)
  async fn fetch_contacts(&self) -> Result<Vec<Contact>, ProviderError>;

  /// All meetings, with the rescheduled flag already derived
  async fn fetch_meetings(&self) -> Result<Vec<Meeting>, ProviderError>;
}
