//! Most recently created contacts

use serde::{Deserialize, Serialize};

use crate::records::Contact;

/// How many contacts the list shows
pub const RECENT_CLIENTS_LIMIT: usize = 10;

const UNKNOWN_NAME: &str = "Nome não informado";
const UNKNOWN_INTEREST: &str = "Não especificado";

/// One entry of `GET /api/dashboard/recent-clients`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentClient {
  pub nome_completo: String,
  pub email_contato: String,
  pub telefone_wpp: String,
  pub interesse_principal: String,
  /// `DD/MM/YYYY`
  pub criado_em: String,
  pub total_mensagens: i64,
  pub status_lead: String,
}

/// Newest contacts first. Contacts without a parseable creation date are
/// left out; contacts created on the same day keep their sheet order.
pub fn compute(contacts: &[Contact]) -> Vec<RecentClient> {
  let mut dated: Vec<_> =
    contacts.iter().filter_map(|contact| contact.created_on().map(|date| (date, contact))).collect();
  dated.sort_by(|a, b| b.0.cmp(&a.0));

  dated
    .into_iter()
    .take(RECENT_CLIENTS_LIMIT)
    .map(|(created, contact)| RecentClient {
      nome_completo: or_default(&contact.nome_completo, UNKNOWN_NAME),
      email_contato: contact.email_contato.clone(),
      telefone_wpp: contact.telefone_wpp.clone(),
      interesse_principal: or_default(&contact.interesse_principal, UNKNOWN_INTEREST),
      criado_em: created.format("%d/%m/%Y").to_string(),
      total_mensagens: contact.message_count(),
      status_lead: contact.lead_status().to_string(),
    })
    .collect()
}

fn or_default(value: &str, default: &str) -> String {
  if value.is_empty() { default } else { value }.to_string()
}
