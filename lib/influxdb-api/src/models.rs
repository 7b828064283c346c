//! Request and response documents of the InfluxDB v2 API.
//!
//! Only the fields the services read or send are modelled. Unknown fields in
//! server responses are ignored.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Result of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Component name, `influxdb` for the server itself.
    pub name: String,
    /// Human-readable status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Health of sub-components.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<HealthCheck>,
    /// Overall status.
    pub status: HealthStatus,
    /// Server version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Server commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// Health status of a component.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Healthy.
    #[display("pass")]
    Pass,
    /// Unhealthy.
    #[display("fail")]
    Fail,
}

/// Result of `GET /api/v2/setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsOnboarding {
    /// `true` while the server has not been set up yet.
    pub allowed: bool,
}

/// Body of `POST /api/v2/setup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    /// Initial user.
    pub username: String,
    /// Password of the initial user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Initial organization.
    pub org: String,
    /// Initial bucket.
    pub bucket: String,
    /// Retention of the initial bucket, `0` for infinite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_period_seconds: Option<i64>,
    /// Operator token to create instead of a generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl OnboardingRequest {
    /// Minimal request: user, organization and bucket.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        org: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: None,
            org: org.into(),
            bucket: bucket.into(),
            retention_period_seconds: None,
            token: None,
        }
    }
}

/// Result of `POST /api/v2/setup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingResponse {
    /// Created user.
    #[serde(default)]
    pub user: Option<UserResponse>,
    /// Created organization.
    #[serde(default)]
    pub org: Option<Organization>,
    /// Created bucket.
    #[serde(default)]
    pub bucket: Option<Bucket>,
    /// Operator authorization.
    #[serde(default)]
    pub auth: Option<Authorization>,
}

/// A user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    #[serde(default)]
    pub id: Option<String>,
    /// User name.
    pub name: String,
    /// `active` or `inactive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// An organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Organization name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An API token and its owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    /// Authorization ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Token value.
    #[serde(default)]
    pub token: Option<String>,
    /// `active` or `inactive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Owning organization.
    #[serde(default, rename = "orgID")]
    pub org_id: Option<String>,
    /// Owning user.
    #[serde(default, rename = "userID")]
    pub user_id: Option<String>,
}

/// Retention policy of a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionRule {
    /// Always `expire`.
    #[serde(rename = "type", default = "RetentionRule::expire")]
    pub kind: String,
    /// Data older than this is dropped, `0` for infinite.
    pub every_seconds: i64,
    /// Shard group duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_group_duration_seconds: Option<i64>,
}

impl RetentionRule {
    fn expire() -> String {
        "expire".to_string()
    }

    /// Expire data after `every_seconds`.
    #[must_use]
    pub fn expire_after(every_seconds: i64) -> Self {
        Self {
            kind: Self::expire(),
            every_seconds,
            shard_group_duration_seconds: None,
        }
    }
}

/// A bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Bucket ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Owning organization.
    #[serde(default, rename = "orgID")]
    pub org_id: Option<String>,
    /// `user` or `system`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Bucket name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Retention policy name, for 1.x compatibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<String>,
    /// `implicit` or `explicit` (Cloud only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Retention rules.
    #[serde(default)]
    pub retention_rules: Vec<RetentionRule>,
    /// RFC 3339 creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// RFC 3339 update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A page of buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buckets {
    /// Buckets in this page.
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

/// Body of `POST /api/v2/buckets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBucketRequest {
    /// Owning organization.
    #[serde(rename = "orgID")]
    pub org_id: String,
    /// Bucket name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Retention policy name, for 1.x compatibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<String>,
    /// Retention rules, none for infinite retention.
    #[serde(default)]
    pub retention_rules: Vec<RetentionRule>,
    /// `implicit` or `explicit` (Cloud only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
}

impl PostBucketRequest {
    /// Bucket with infinite retention.
    #[must_use]
    pub fn new(org_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            name: name.into(),
            description: None,
            rp: None,
            retention_rules: Vec::new(),
            schema_type: None,
        }
    }
}

/// Body of `PATCH /api/v2/buckets/{bucketID}`. Absent fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchBucketRequest {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New retention rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_rules: Option<Vec<RetentionRule>>,
}

/// Query of `GET /api/v2/buckets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListBucketsParams {
    /// Page offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Resume after this bucket ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Organization name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// Organization ID.
    #[serde(rename = "orgID", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Bucket name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Bucket ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Timestamp precision of written points.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePrecision {
    /// Nanoseconds.
    #[default]
    #[display("ns")]
    Ns,
    /// Microseconds.
    #[display("us")]
    Us,
    /// Milliseconds.
    #[display("ms")]
    Ms,
    /// Seconds.
    #[display("s")]
    S,
}

/// Query of `POST /api/v2/write` and `POST /api/v2/delete`.
///
/// One of `org` and `org_id`, and one of `bucket` and `bucket_id`, is required
/// by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BucketTarget {
    /// Organization name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// Organization ID.
    #[serde(rename = "orgID", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Bucket name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    /// Bucket ID.
    #[serde(rename = "bucketID", skip_serializing_if = "Option::is_none")]
    pub bucket_id: Option<String>,
}

impl BucketTarget {
    /// Target a bucket by organization and bucket name.
    #[must_use]
    pub fn named(org: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            org: Some(org.into()),
            bucket: Some(bucket.into()),
            ..Self::default()
        }
    }
}

/// Body of `POST /api/v2/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePredicateRequest {
    /// RFC 3339 start of the range, inclusive.
    pub start: String,
    /// RFC 3339 end of the range, inclusive.
    pub stop: String,
    /// Delete predicate, such as `_measurement="cpu"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_decodes_server_document() {
        let json = r#"{
            "id": "0a1b2c3d4e5f6a7b",
            "orgID": "b7a6f5e4d3c2b1a0",
            "type": "user",
            "name": "telemetry",
            "retentionRules": [{"type": "expire", "everySeconds": 86400, "shardGroupDurationSeconds": 3600}],
            "createdAt": "2021-06-01T00:00:00Z",
            "labels": []
        }"#;

        let bucket: Bucket = serde_json::from_str(json).expect("bucket");
        assert_eq!(bucket.name, "telemetry");
        assert_eq!(bucket.org_id.as_deref(), Some("b7a6f5e4d3c2b1a0"));
        assert_eq!(bucket.kind.as_deref(), Some("user"));
        assert_eq!(bucket.retention_rules[0].every_seconds, 86400);
        assert_eq!(bucket.retention_rules[0].shard_group_duration_seconds, Some(3600));
    }

    #[test]
    fn post_bucket_request_encodes_ids() {
        let mut request = PostBucketRequest::new("b7a6f5e4d3c2b1a0", "telemetry");
        request.retention_rules.push(RetentionRule::expire_after(3600));

        let json = serde_json::to_value(&request).expect("json");
        assert_eq!(
            json,
            serde_json::json!({
                "orgID": "b7a6f5e4d3c2b1a0",
                "name": "telemetry",
                "retentionRules": [{"type": "expire", "everySeconds": 3600}],
            })
        );
    }

    #[test]
    fn patch_bucket_request_skips_unset() {
        let request = PatchBucketRequest {
            description: Some("hot data".to_string()),
            ..PatchBucketRequest::default()
        };
        let json = serde_json::to_string(&request).expect("json");
        assert_eq!(json, r#"{"description":"hot data"}"#);
    }

    #[test]
    fn health_check_nested() {
        let json = r#"{"name":"influxdb","message":"ready for queries and writes","status":"pass",
            "checks":[{"name":"storage","status":"fail"}],"version":"v2.7.1","commit":"407fa622e9"}"#;
        let health: HealthCheck = serde_json::from_str(json).expect("health");
        assert_eq!(health.status, HealthStatus::Pass);
        assert_eq!(health.checks[0].status, HealthStatus::Fail);
        assert_eq!(health.version.as_deref(), Some("v2.7.1"));
    }

    #[test]
    fn onboarding_request_camel_case() {
        let mut request = OnboardingRequest::new("admin", "acme", "telemetry");
        request.retention_period_seconds = Some(0);
        let json = serde_json::to_value(&request).expect("json");
        assert_eq!(
            json,
            serde_json::json!({
                "username": "admin",
                "org": "acme",
                "bucket": "telemetry",
                "retentionPeriodSeconds": 0,
            })
        );
    }

    #[test]
    fn write_precision_display() {
        assert_eq!(WritePrecision::default().to_string(), "ns");
        assert_eq!(WritePrecision::Ms.to_string(), "ms");
    }
}
