mod common;

use axum::http::StatusCode;
use common::{body_json, get, harness, post_json, Submitted};
use serde_json::json;
use sqoop_scheduler::server::create_router;
use uuid::Uuid;

fn import_body() -> serde_json::Value {
    json!({
        "name": "daily sales",
        "sqoopImport": {
            "jdbcUri": "jdbc:mysql://db:3306/sales",
            "table": "orders",
            "username": "john",
            "password": "secret",
            "importMode": "append"
        }
    })
}

fn scheduled_body(unit: &str, amount: i64) -> serde_json::Value {
    let mut body = import_body();
    body["schedule"] = json!({
        "startTime": "2077-07-04T08:15:00",
        "endTime": "2077-07-06T08:15:00",
        "timezone": "Europe/Warsaw",
        "frequency": { "unit": unit, "amount": amount }
    });
    body
}

#[tokio::test]
async fn health_check_returns_ok() {
    let h = harness();
    let response = get(create_router(h.orchestrator.clone()), "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn import_returns_job_handle() {
    let h = harness();
    let org = Uuid::new_v4();

    let response = post_json(
        create_router(h.orchestrator.clone()),
        &format!("/api/orgs/{}/jobs/import", org),
        import_body(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["jobId"].as_str().unwrap().starts_with("daily_sales-"));
    assert_eq!(json["engineJobId"], "0000001-oozie");
    assert!(matches!(h.client.submitted()[0], Submitted::Workflow { .. }));
}

#[tokio::test]
async fn invalid_import_mode_is_a_bad_request() {
    let h = harness();
    let mut body = import_body();
    body["sqoopImport"]["importMode"] = json!("replace");

    let response = post_json(
        create_router(h.orchestrator.clone()),
        &format!("/api/orgs/{}/jobs/import", Uuid::new_v4()),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"][0]["field"], "importMode");
}

#[tokio::test]
async fn import_without_username_is_a_bad_request() {
    let h = harness();
    let mut body = import_body();
    body["sqoopImport"]["username"] = json!("");

    let response = post_json(
        create_router(h.orchestrator.clone()),
        &format!("/api/orgs/{}/jobs/import", Uuid::new_v4()),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"][0]["field"], "username");
    assert!(h.client.submitted().is_empty());
}

#[tokio::test]
async fn escaping_target_dir_is_a_bad_request() {
    let h = harness();
    let mut body = import_body();
    body["sqoopImport"]["targetDir"] = json!("../victim-org/data");

    let response = post_json(
        create_router(h.orchestrator.clone()),
        &format!("/api/orgs/{}/jobs/import", Uuid::new_v4()),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"][0]["field"], "targetDir");
}

#[tokio::test]
async fn scheduled_import_submits_coordinator() {
    let h = harness();

    let response = post_json(
        create_router(h.orchestrator.clone()),
        &format!("/api/orgs/{}/jobs/scheduled-import", Uuid::new_v4()),
        scheduled_body("hours", 6),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(matches!(h.client.submitted()[0], Submitted::Coordinator { .. }));
}

#[tokio::test]
async fn too_frequent_schedule_fails_fast() {
    let h = harness();
    let mut body = scheduled_body("minutes", 1);
    // the fail-fast check reports only the period, not the bad timezone
    body["schedule"]["timezone"] = json!("Atlantis/Central");

    let response = post_json(
        create_router(h.orchestrator.clone()),
        &format!("/api/orgs/{}/jobs/scheduled-import", Uuid::new_v4()),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let fields = json["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["field"], "frequency");
    assert_eq!(
        fields[0]["message"],
        "Job schedule period can not be smaller than (300) seconds"
    );
    assert!(h.client.submitted().is_empty());
}

#[tokio::test]
async fn non_uuid_org_is_rejected() {
    let h = harness();
    let response = post_json(
        create_router(h.orchestrator.clone()),
        "/api/orgs/not-a-uuid/jobs/import",
        import_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn configuration_view_is_served() {
    let h = harness();
    let org = Uuid::new_v4();

    let response = get(
        create_router(h.orchestrator.clone()),
        &format!("/api/orgs/{}/configuration", org),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["minimumFrequencyInSeconds"], 300);
    assert_eq!(json["organizationDirectory"], format!("/org/{}/", org));
    assert_eq!(json["databases"][0]["drivers"][0]["className"], "com.mysql.jdbc.Driver");
    assert!(json["timezones"].as_array().unwrap().iter().any(|z| z == "Europe/Warsaw"));
}
