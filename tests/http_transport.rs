//! HTTP transport tests against a local mock service.

use policy_navigator::client::{DEFAULT_BUSINESS_SIZE, DEFAULT_BUSINESS_TYPE};
use policy_navigator::{
    normalize, render_lines, ClientConfig, HttpTransport, LineKind, NavigatorError,
    QueryTransport, FALLBACK_DISPLAY,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> HttpTransport {
    let config = ClientConfig {
        endpoint: server.uri(),
        timeout: Duration::from_secs(2),
        ..ClientConfig::default()
    };
    HttpTransport::new(&config).expect("build transport")
}

#[tokio::test]
async fn query_posts_json_body_and_returns_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .and(body_json(json!({"query": "Has Section 230 been challenged in court?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "Yes, several times.\nSource: CourtListener",
            "intermediate_steps": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = transport_for(&server)
        .submit_query("Has Section 230 been challenged in court?")
        .await
        .unwrap();

    let display = normalize(&payload);
    let kinds: Vec<LineKind> = render_lines(&display).iter().map(|l| l.kind).collect();
    assert_eq!(kinds, vec![LineKind::Prose, LineKind::Citation]);
}

#[tokio::test]
async fn bare_string_payload_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("Plain text answer")))
        .mount(&server)
        .await;

    let payload = transport_for(&server).submit_query("q").await.unwrap();
    assert_eq!(normalize(&payload), "Plain text answer");
}

#[tokio::test]
async fn server_error_maps_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "agent crashed"})))
        .mount(&server)
        .await;

    let err = transport_for(&server).submit_query("q").await.unwrap_err();
    match err {
        NavigatorError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("agent crashed"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = transport_for(&server).submit_query("q").await.unwrap_err();
    assert!(matches!(err, NavigatorError::Transport { .. }));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!("late"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig {
        endpoint: server.uri(),
        timeout: Duration::from_millis(100),
        ..ClientConfig::default()
    };
    let err = HttpTransport::new(&config)
        .unwrap()
        .submit_query("q")
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let config = ClientConfig {
        endpoint: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_secs(2),
        ..ClientConfig::default()
    };
    let err = HttpTransport::new(&config)
        .unwrap()
        .submit_query("q")
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn health_and_status_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "service": "Policy Navigator API"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/status"))
        .and(body_json(json!({"policy_id": "EO-14067"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "EO-14067 is active"
        })))
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let health = transport.health().await.unwrap();
    assert_eq!(health["status"], "healthy");

    let status = transport.policy_status("EO-14067").await.unwrap();
    assert_eq!(normalize(&status), "EO-14067 is active");
}

#[tokio::test]
async fn compliance_posts_business_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/compliance"))
        .and(body_json(json!({
            "business_type": DEFAULT_BUSINESS_TYPE,
            "size": DEFAULT_BUSINESS_SIZE
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "File quarterly OSHA logs.\nSource: 29 CFR 1904"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = transport_for(&server)
        .compliance(DEFAULT_BUSINESS_TYPE, DEFAULT_BUSINESS_SIZE)
        .await
        .unwrap();

    let display = normalize(&payload);
    let lines = render_lines(&display);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].kind, LineKind::Citation);
}

#[tokio::test]
async fn structured_compliance_report_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/compliance"))
        .and(body_json(json!({"business_type": "restaurant", "size": "large_business"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "business_type": "restaurant",
            "size": "large_business",
            "requirements": {"osha": ["Post safety notices"]},
            "deadlines": []
        })))
        .mount(&server)
        .await;

    let payload = transport_for(&server)
        .compliance("restaurant", "large_business")
        .await
        .unwrap();
    assert_eq!(normalize(&payload), FALLBACK_DISPLAY);
}
