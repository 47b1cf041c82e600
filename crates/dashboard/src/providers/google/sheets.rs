//! Google Sheets API v4: contact rows

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{api_url, check_status};
use crate::error::ProviderError;
use crate::records::{cell_text, Contact};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/";
const SOURCE_NAME: &str = "Google Sheets";

#[derive(Debug, Deserialize)]
struct ValueRange {
  #[serde(default)]
  values: Vec<Vec<Value>>,
}

/// Read every row of `range`. The first row holds the column names.
pub async fn fetch_contacts(
  client: &Client,
  access_token: &str,
  spreadsheet_id: &str,
  range: &str,
) -> Result<Vec<Contact>, ProviderError> {
  let url = api_url(SHEETS_API_BASE, &["spreadsheets", spreadsheet_id, "values", range], SOURCE_NAME)?;
  let response = client.get(url).bearer_auth(access_token).send().await?;
  let response = check_status(response, SOURCE_NAME).await?;

  let body: ValueRange =
    response.json().await.map_err(|e| ProviderError::malformed(SOURCE_NAME, e.to_string()))?;

  let contacts = contacts_from_values(&body.values);
  if contacts.is_empty() {
    tracing::warn!(range, "No contact rows found in the spreadsheet");
  } else {
    tracing::info!(count = contacts.len(), "Loaded contacts from the spreadsheet");
  }

  Ok(contacts)
}

/// Map data rows onto the header row
pub fn contacts_from_values(values: &[Vec<Value>]) -> Vec<Contact> {
  let Some((header_row, rows)) = values.split_first() else {
    return Vec::new();
  };
  let headers: Vec<String> = header_row.iter().map(cell_text).collect();

  rows.iter().map(|row| Contact::from_row(&headers, row)).collect()
}
