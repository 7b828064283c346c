//! Resource services against a mock InfluxDB server.

use std::io::Read;

use assert2::{check, let_assert};
use influxdb_api::models::{
    BucketTarget, DeletePredicateRequest, HealthStatus, ListBucketsParams, OnboardingRequest,
    PatchBucketRequest, PostBucketRequest, RetentionRule, WritePrecision,
};
use influxdb_api::{ApiClient, Error, ErrorDetail, HyperClient, WriteOptions};
use wiremock::{
    Mock, MockServer, Request, ResponseTemplate,
    matchers::{body_json, body_string, header, method, path, query_param},
};

const BUCKET_JSON: &str = r#"{
    "id": "0a1b2c3d4e5f6a7b",
    "orgID": "b7a6f5e4d3c2b1a0",
    "type": "user",
    "name": "telemetry",
    "retentionRules": [{"type": "expire", "everySeconds": 86400}]
}"#;

async fn setup() -> (MockServer, ApiClient<HyperClient>) {
    let server = MockServer::start().await;
    let client = ApiClient::new(HyperClient::new(), server.uri())
        .expect("url")
        .with_header("Authorization", "Token my-token");
    (server, client)
}

fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
}

#[tokio::test]
async fn health() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(json(
            r#"{"name":"influxdb","message":"ready for queries and writes","status":"pass","version":"v2.7.1"}"#,
        ))
        .mount(&server)
        .await;

    let health = client.health().get_health().await.expect("health");
    check!(health.status == HealthStatus::Pass);
    check!(health.version.as_deref() == Some("v2.7.1"));
}

#[tokio::test]
async fn unhealthy_server_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_raw(
            r#"{"name":"influxdb","message":"not ready","status":"fail"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let_assert!(Err(error) = client.health().get_health().await);
    check!(error.status() == Some(503));
    check!(error.to_string() == "503 Service Unavailable: not ready");
}

#[tokio::test]
async fn setup_flow() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/setup"))
        .respond_with(json(r#"{"allowed":true}"#))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/setup"))
        .and(body_json(serde_json::json!({
            "username": "admin",
            "password": "hunter22",
            "org": "acme",
            "bucket": "telemetry",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_raw(
            format!(
                r#"{{"user":{{"id":"01","name":"admin"}},"org":{{"id":"b7a6f5e4d3c2b1a0","name":"acme"}},"bucket":{BUCKET_JSON},"auth":{{"token":"operator-token"}}}}"#
            ),
            "application/json",
        ))
        .mount(&server)
        .await;

    let setup = client.setup().only_oss();
    check!(setup.get_setup().await.expect("get").allowed);

    let mut request = OnboardingRequest::new("admin", "acme", "telemetry");
    request.password = Some("hunter22".to_string());
    let response = setup.post_setup(&request).await.expect("post");

    let_assert!(Some(auth) = response.auth);
    check!(auth.token.as_deref() == Some("operator-token"));
    let_assert!(Some(bucket) = response.bucket);
    check!(bucket.name == "telemetry");
}

#[tokio::test]
async fn setup_already_done() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/setup"))
        .respond_with(ResponseTemplate::new(422).set_body_raw(
            r#"{"code":"conflict","message":"onboarding has already been completed"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let_assert!(
        Err(Error::Api(error)) = client
            .setup()
            .only_oss()
            .post_setup(&OnboardingRequest::new("admin", "acme", "telemetry"))
            .await
    );
    check!(
        error.to_string()
            == "InfluxDB OSS-only command failed: 422 Unprocessable Entity: onboarding has already been completed"
    );
}

#[tokio::test]
async fn buckets_list_with_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/buckets"))
        .and(query_param("org", "acme"))
        .and(query_param("limit", "20"))
        .and(header("Authorization", "Token my-token"))
        .respond_with(json(&format!(r#"{{"links":{{}},"buckets":[{BUCKET_JSON}]}}"#)))
        .mount(&server)
        .await;

    let params = ListBucketsParams {
        org: Some("acme".to_string()),
        limit: Some(20),
        ..ListBucketsParams::default()
    };
    let buckets = client.buckets().list(&params).await.expect("list");

    check!(buckets.buckets.len() == 1);
    check!(buckets.buckets[0].retention_rules[0].every_seconds == 86400);

    let requests = server.received_requests().await.expect("recording");
    let query = requests[0].url.query().unwrap_or_default();
    check!(!query.contains("offset"));
}

#[tokio::test]
async fn buckets_crud() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/buckets"))
        .and(body_json(serde_json::json!({
            "orgID": "b7a6f5e4d3c2b1a0",
            "name": "telemetry",
            "retentionRules": [{"type": "expire", "everySeconds": 86400}],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_raw(BUCKET_JSON, "application/json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/buckets/0a1b2c3d4e5f6a7b"))
        .respond_with(json(BUCKET_JSON))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v2/buckets/0a1b2c3d4e5f6a7b"))
        .and(body_json(serde_json::json!({"description": "hot data"})))
        .respond_with(json(BUCKET_JSON))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/buckets/0a1b2c3d4e5f6a7b"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let buckets = client.buckets();

    let mut request = PostBucketRequest::new("b7a6f5e4d3c2b1a0", "telemetry");
    request.retention_rules.push(RetentionRule::expire_after(86400));
    let created = buckets.create(&request).await.expect("create");
    let_assert!(Some(id) = created.id);

    let fetched = buckets.get(&id).await.expect("get");
    check!(fetched.name == "telemetry");

    let patch = PatchBucketRequest {
        description: Some("hot data".to_string()),
        ..PatchBucketRequest::default()
    };
    buckets.update(&id, &patch).await.expect("update");

    buckets.delete(&id).await.expect("delete");
}

#[tokio::test]
async fn bucket_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/buckets/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            r#"{"code":"not found","message":"bucket not found"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let_assert!(Err(error) = client.buckets().only_cloud().get("missing").await);
    check!(error.is_not_found());
    check!(error.to_string().starts_with("InfluxDB Cloud-only command failed: 404 Not Found"));
}

#[tokio::test]
async fn write_plain() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/write"))
        .and(query_param("org", "acme"))
        .and(query_param("bucket", "telemetry"))
        .and(query_param("precision", "ms"))
        .and(header("Content-Type", "text/plain; charset=utf-8"))
        .and(body_string("cpu usage=0.5 1622505600000"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let options = WriteOptions {
        precision: WritePrecision::Ms,
        gzip: false,
    };
    client
        .write()
        .post_write(&BucketTarget::named("acme", "telemetry"), "cpu usage=0.5 1622505600000", options)
        .await
        .expect("write");
}

#[tokio::test]
async fn write_gzip_request_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/write"))
        .and(header("Content-Encoding", "gzip"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let options = WriteOptions {
        gzip: true,
        ..WriteOptions::default()
    };
    client
        .write()
        .post_write(&BucketTarget::named("acme", "telemetry"), "cpu usage=0.5", options)
        .await
        .expect("write");

    let requests: Vec<Request> = server.received_requests().await.expect("recording");
    let mut lines = String::new();
    flate2::read::GzDecoder::new(requests[0].body.as_slice())
        .read_to_string(&mut lines)
        .expect("gunzip");
    check!(lines == "cpu usage=0.5");
}

#[tokio::test]
async fn write_line_protocol_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/write"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(
            r#"{"code":"invalid","message":"unable to parse 'cpu usage=': missing field value","op":"writing points","line":2}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let_assert!(
        Err(Error::Api(error)) = client
            .write()
            .post_write(&BucketTarget::named("acme", "telemetry"), "cpu usage=1\ncpu usage=", WriteOptions::default())
            .await
    );

    let_assert!(Some(ErrorDetail::LineProtocol(detail)) = error.detail());
    check!(detail.line == Some(2));
    check!(detail.op.as_deref() == Some("writing points"));
    check!(
        error.to_string()
            == "400 Bad Request: unable to parse 'cpu usage=': missing field value (line 2)"
    );
}

#[tokio::test]
async fn write_length_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/write"))
        .respond_with(ResponseTemplate::new(413).set_body_raw(
            r#"{"code":"request too large","message":"unable to read data: points batch is too large"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let_assert!(
        Err(Error::Api(error)) = client
            .write()
            .only_cloud()
            .post_write(&BucketTarget::named("acme", "telemetry"), "cpu usage=1", WriteOptions::default())
            .await
    );

    let_assert!(Some(ErrorDetail::LineProtocolLength(_)) = error.detail());
    check!(
        error.to_string()
            == "InfluxDB Cloud-only command failed: 413 Payload Too Large: unable to read data: points batch is too large"
    );
}

#[tokio::test]
async fn write_unauthorized_uses_standard_shape() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/write"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            r#"{"code":"unauthorized","message":"unauthorized access"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let_assert!(
        Err(Error::Api(error)) = client
            .write()
            .post_write(&BucketTarget::named("acme", "telemetry"), "cpu usage=1", WriteOptions::default())
            .await
    );
    let_assert!(Some(ErrorDetail::Standard(_)) = error.detail());
    check!(error.to_string() == "401 Unauthorized: unauthorized access");
}

#[tokio::test]
async fn delete_points() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/delete"))
        .and(query_param("org", "acme"))
        .and(query_param("bucket", "telemetry"))
        .and(body_json(serde_json::json!({
            "start": "2021-06-01T00:00:00Z",
            "stop": "2021-06-02T00:00:00Z",
            "predicate": "_measurement=\"cpu\"",
        })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let request = DeletePredicateRequest {
        start: "2021-06-01T00:00:00Z".to_string(),
        stop: "2021-06-02T00:00:00Z".to_string(),
        predicate: Some("_measurement=\"cpu\"".to_string()),
    };
    client
        .delete()
        .post_delete(&BucketTarget::named("acme", "telemetry"), &request)
        .await
        .expect("delete");
}
