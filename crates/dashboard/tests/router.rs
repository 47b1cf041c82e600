use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
  body::{to_bytes, Body},
  http::{header, Request, StatusCode},
  Router,
};
use chrono::{TimeZone, Utc};
use clap::Parser;
use serde_json::Value;
use tower::ServiceExt;

use dashboard::clock::FixedClock;
use dashboard::config::{Environment, ServerArgs, Settings};
use dashboard::error::ProviderError;
use dashboard::providers::{DataProvider, FixtureProvider};
use dashboard::records::{Contact, Meeting};
use dashboard::server::routing::create_router;
use dashboard::server::startup::build_app;
use dashboard::server::types::DataSources;
use dashboard::server::AppState;
use dashboard::service::DashboardService;

fn fixture_path() -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.json")
}

fn data_sources() -> DataSources {
  DataSources { contacts: "fixtures".into(), meetings: "fixtures".into() }
}

/// Router over the sample fixtures, frozen at 2024-01-20 12:00 in São Paulo
fn app_with(provider: Arc<dyn DataProvider>, environment: Environment) -> Router {
  let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 20, 15, 0, 0).unwrap());
  let service = DashboardService::new(provider, Arc::new(clock), chrono_tz::America::Sao_Paulo);
  create_router(AppState::new(service, environment, data_sources()))
}

fn app() -> Router {
  let provider = FixtureProvider::from_file(&fixture_path()).unwrap();
  app_with(Arc::new(provider), Environment::Development)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
  let response =
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
  let status = response.status();
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  (status, serde_json::from_slice(&bytes).unwrap())
}

struct FailingProvider;

#[async_trait]
impl DataProvider for FailingProvider {
  async fn fetch_contacts(&self) -> Result<Vec<Contact>, ProviderError> {
    Err(ProviderError::Upstream {
      source_name: "Google Sheets",
      status: 403,
      message: "The caller does not have permission".into(),
    })
  }

  async fn fetch_meetings(&self) -> Result<Vec<Meeting>, ProviderError> {
    Ok(Vec::new())
  }
}

#[tokio::test]
async fn test_health() {
  let (status, body) = get(app(), "/health").await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "healthy");
  assert_eq!(body["environment"], "development");
  assert!(body["uptime"].as_f64().unwrap() >= 0.0);
  assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_service_info_lists_endpoints() {
  let (status, body) = get(app(), "/").await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "success");
  assert_eq!(body["endpoints"].as_array().unwrap().len(), 7);
  assert_eq!(body["data_sources"]["contacts"], "fixtures");
}

#[tokio::test]
async fn test_stats_from_fixtures() {
  let (status, body) = get(app(), "/api/dashboard/stats").await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["total_clients"], 3);
  assert_eq!(body["new_clients"], 2);
  assert_eq!(body["returning_clients"], 1);
  assert_eq!(body["avg_messages_per_interaction"], 4.0);
  assert_eq!(body["scheduled_meetings"], 2);
  assert_eq!(body["cancelled_meetings"], 1);
  assert_eq!(body["rescheduled_meetings"], 1);
  assert_eq!(body["scheduling_success_rate"], 75.0);
  assert_eq!(body["lead_to_meeting_rate"], 100.0);
  assert_eq!(body["interests"][0]["name"], "Consórcio");
  assert_eq!(body["interests"][0]["value"], 2);
  assert_eq!(body["interests"][1]["name"], "Seguro");
}

#[tokio::test]
async fn test_upcoming_meetings_are_future_and_confirmed() {
  let (status, body) = get(app(), "/api/dashboard/upcoming-meetings").await;
  let meetings = body.as_array().unwrap();

  assert_eq!(status, StatusCode::OK);
  assert_eq!(meetings.len(), 2);
  assert_eq!(meetings[0]["id"], "evt-4");
  assert_eq!(meetings[0]["title"], "Reunião sem título");
  assert_eq!(meetings[0]["start_time"], "22/01/2024 16:30");
  assert_eq!(meetings[1]["id"], "evt-2");
  assert_eq!(meetings[1]["is_rescheduled"], true);
  assert_eq!(meetings[1]["location"], "Escritório");
}

#[tokio::test]
async fn test_recent_clients_newest_first() {
  let (status, body) = get(app(), "/api/dashboard/recent-clients").await;
  let clients = body.as_array().unwrap();

  assert_eq!(status, StatusCode::OK);
  assert_eq!(clients.len(), 3);
  assert_eq!(clients[0]["nome_completo"], "Bruno Lima");
  assert_eq!(clients[0]["criado_em"], "18/01/2024");
  assert_eq!(clients[0]["status_lead"], "em_qualificacao");
  assert_eq!(clients[2]["nome_completo"], "Carla Dias");
}

#[tokio::test]
async fn test_trends_and_performance_respond() {
  let (status, trends) = get(app(), "/api/dashboard/trends").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(trends["daily_contacts"].as_array().unwrap().len(), 3);

  let (status, performance) = get(app(), "/api/dashboard/performance").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(performance["avg_time_to_schedule"], "2.5");
  assert_eq!(performance["response_rate_by_day"].as_array().unwrap().len(), 7);
  assert_eq!(performance["response_rate_by_day"][0]["day"], "Segunda");
}

#[tokio::test]
async fn test_unknown_route_returns_envelope() {
  let (status, body) = get(app(), "/api/dashboard/missing?x=1").await;

  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Endpoint não encontrado");
  assert_eq!(body["message"], "A rota GET /api/dashboard/missing?x=1 não existe");
  assert_eq!(body["available_endpoints"].as_array().unwrap().len(), 7);
  assert!(body["request_id"].as_str().is_some());
}

#[tokio::test]
async fn test_unsupported_method_on_known_path_returns_envelope() {
  let response = app()
    .oneshot(
      Request::builder().method("POST").uri("/api/dashboard/stats").body(Body::empty()).unwrap(),
    )
    .await
    .unwrap();
  let status = response.status();
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();

  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "A rota POST /api/dashboard/stats não existe");
  assert_eq!(body["available_endpoints"].as_array().unwrap().len(), 7);
  assert!(body["request_id"].as_str().is_some());
}

#[tokio::test]
async fn test_provider_failure_shows_detail_in_development() {
  let (status, body) =
    get(app_with(Arc::new(FailingProvider), Environment::Development), "/api/dashboard/stats").await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body["error"], "Erro interno do servidor");
  assert!(body["message"].as_str().unwrap().contains("403"));
  assert!(body.get("available_endpoints").is_none());
}

#[tokio::test]
async fn test_provider_failure_is_generic_in_production() {
  let (status, body) =
    get(app_with(Arc::new(FailingProvider), Environment::Production), "/api/dashboard/recent-clients")
      .await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body["message"], "Algo deu errado");
}

#[tokio::test]
async fn test_full_app_allows_any_origin() {
  let fixtures = fixture_path();
  let args = ServerArgs::try_parse_from([
    "dashboard_server",
    "--sheets-id",
    "sheet",
    "--calendar-id",
    "calendar",
    "--fixtures",
    fixtures.to_str().unwrap(),
  ])
  .unwrap();
  let settings = Settings::from_args(args).unwrap();
  let app = build_app(&settings).unwrap();

  let response = app
    .oneshot(
      Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://dashboard.example.com")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
