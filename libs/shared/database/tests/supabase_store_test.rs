use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_database::{ClinicStore, SeedData, SupabaseStore};
use shared_models::HistoryField;

fn supabase_config(uri: &str) -> AppConfig {
    let uri = uri.to_string();
    AppConfig::from_lookup(move |key| match key {
        "STORE_BACKEND" => Some("supabase".to_string()),
        "SUPABASE_URL" => Some(uri.clone()),
        "SUPABASE_SERVICE_KEY" => Some("service-key".to_string()),
        "GEMINI_API_KEY" => Some("gemini-key".to_string()),
        _ => None,
    })
}

fn doctor_row(name: &str, specialization: &str, slots: &[&str]) -> serde_json::Value {
    json!({
        "id": uuid::Uuid::new_v4(),
        "name": name,
        "specialization": specialization,
        "availability": slots,
        "status": "online",
        "experience": "10 years",
        "rating": 4.9,
        "photo": ""
    })
}

#[tokio::test]
async fn test_pull_doctor_slot_calls_rpc() {
    let mock_server = MockServer::start().await;
    let store = SupabaseStore::new(&supabase_config(&mock_server.uri()));

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/pull_doctor_slot"))
        .and(header("apikey", "service-key"))
        .and(header("Authorization", "Bearer service-key"))
        .and(body_json(json!({
            "p_doctor_name": "Dr. Aisha Khan",
            "p_slot": "2025-11-16T09:00:00Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pulled = store
        .pull_doctor_slot("Dr. Aisha Khan", "2025-11-16T09:00:00Z")
        .await
        .unwrap();

    assert!(pulled);
}

#[tokio::test]
async fn test_pull_doctor_slot_reports_no_match() {
    let mock_server = MockServer::start().await;
    let store = SupabaseStore::new(&supabase_config(&mock_server.uri()));

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/pull_doctor_slot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(false)))
        .mount(&mock_server)
        .await;

    assert!(!store.pull_doctor_slot("Dr. Aisha Khan", "2025-11-16T09:00:00Z").await.unwrap());
}

#[tokio::test]
async fn test_find_doctor_by_name_filters_on_name() {
    let mock_server = MockServer::start().await;
    let store = SupabaseStore::new(&supabase_config(&mock_server.uri()));

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("name", "eq.Dr. Aisha Khan"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            doctor_row("Dr. Aisha Khan", "Dermatologist", &["2025-11-16T09:30:00Z"])
        ])))
        .mount(&mock_server)
        .await;

    let doctor = store.find_doctor_by_name("Dr. Aisha Khan").await.unwrap().unwrap();
    assert_eq!(doctor.specialization, "Dermatologist");
    assert_eq!(doctor.availability, vec!["2025-11-16T09:30:00Z".to_string()]);
}

#[tokio::test]
async fn test_find_patient_returns_none_for_empty_result() {
    let mock_server = MockServer::start().await;
    let store = SupabaseStore::new(&supabase_config(&mock_server.uri()));

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .and(query_param("userId", "eq.unknown-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    assert!(store.find_patient("unknown-user").await.unwrap().is_none());
}

#[tokio::test]
async fn test_append_patient_entry_uses_rpc() {
    let mock_server = MockServer::start().await;
    let store = SupabaseStore::new(&supabase_config(&mock_server.uri()));

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/append_patient_entry"))
        .and(body_json(json!({
            "p_user_id": "user-1",
            "p_field": "allergies",
            "p_entry": "Dust",
            "p_upsert": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": uuid::Uuid::new_v4(),
            "userId": "user-1",
            "name": null,
            "dob": null,
            "allergies": ["Dust"],
            "conditions": [],
            "medications": []
        }])))
        .mount(&mock_server)
        .await;

    let patient = store
        .append_patient_entry("user-1", HistoryField::Allergies, "Dust", true)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(patient.allergies, vec!["Dust".to_string()]);
}

#[tokio::test]
async fn test_store_errors_surface_status_and_body() {
    let mock_server = MockServer::start().await;
    let store = SupabaseStore::new(&supabase_config(&mock_server.uri()));

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let err = store.list_doctors().await.unwrap_err();
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn test_reset_deletes_then_inserts_seed() {
    let mock_server = MockServer::start().await;
    let store = SupabaseStore::new(&supabase_config(&mock_server.uri()));

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(5)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(header("Prefer", "return=minimal"))
        .respond_with(ResponseTemplate::new(201))
        .expect(4)
        .mount(&mock_server)
        .await;

    store.reset_with(&SeedData::demo()).await.unwrap();
}
