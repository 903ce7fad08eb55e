//! Typed admin API client.
//!
//! Thin typed layer over the platform's v3-style admin API. All calls ride the
//! CLI's authenticated `curl` subcommand, abstracted behind [`ApiTransport`]
//! so the client is testable without a platform. The suite only needs a
//! handful of operations: GUID lookups, isolation-segment entitlement and
//! assignment, and the two boolean precondition checks.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::errors::{Error, Result};
use crate::platform::cli::PlatformCli;

/// Transport carrying raw admin API requests
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Perform a GET, returning the raw response body
    async fn get(&self, path: &str) -> Result<String>;

    /// Perform a request with an explicit method and optional JSON body
    async fn request(&self, method: &str, path: &str, body: Option<&str>) -> Result<String>;
}

#[async_trait]
impl ApiTransport for PlatformCli {
    async fn get(&self, path: &str) -> Result<String> {
        self.curl(path).await
    }

    async fn request(&self, method: &str, path: &str, body: Option<&str>) -> Result<String> {
        self.curl_with(method, path, body).await
    }
}

/// v3-style paginated listing; only the fields the suite reads
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct Resource {
    guid: String,
}

/// To-one relationship payload (`{"data": {"guid": ...}}` or `{"data": null}`)
#[derive(Debug, Deserialize)]
struct ToOneRelationship {
    data: Option<RelationshipData>,
}

#[derive(Debug, Deserialize)]
struct RelationshipData {
    #[allow(dead_code)]
    guid: String,
}

/// Typed admin API client over any [`ApiTransport`]
pub struct PlatformApi<T: ApiTransport> {
    transport: T,
}

impl<T: ApiTransport> PlatformApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Look up an organization GUID by name
    pub async fn org_guid(&self, name: &str) -> Result<String> {
        self.guid_from_listing("organization", &format!("/v3/organizations?names={}", name), name)
            .await
    }

    /// Look up a space GUID by name
    pub async fn space_guid(&self, name: &str) -> Result<String> {
        self.guid_from_listing("space", &format!("/v3/spaces?names={}", name), name).await
    }

    /// Look up an isolation segment GUID by name
    pub async fn isolation_segment_guid(&self, name: &str) -> Result<String> {
        self.guid_from_listing(
            "isolation segment",
            &format!("/v3/isolation_segments?names={}", name),
            name,
        )
        .await
    }

    /// Entitle an organization to an isolation segment
    pub async fn entitle_org_to_segment(&self, org_guid: &str, segment_guid: &str) -> Result<()> {
        let endpoint = format!("/v3/isolation_segments/{}/relationships/organizations", segment_guid);
        let body = json!({ "data": [{ "guid": org_guid }] }).to_string();

        debug!(org_guid, segment_guid, "Entitling organization to isolation segment");
        let response = self.transport.request("POST", &endpoint, Some(&body)).await?;
        ensure_no_errors(&response, &endpoint)?;
        Ok(())
    }

    /// Assign an isolation segment to a space
    pub async fn assign_segment_to_space(&self, space_guid: &str, segment_guid: &str) -> Result<()> {
        let endpoint = format!("/v3/spaces/{}/relationships/isolation_segment", space_guid);
        let body = json!({ "data": { "guid": segment_guid } }).to_string();

        debug!(space_guid, segment_guid, "Assigning isolation segment to space");
        let response = self.transport.request("PATCH", &endpoint, Some(&body)).await?;
        ensure_no_errors(&response, &endpoint)?;
        Ok(())
    }

    /// Whether the organization is entitled to the named isolation segment
    pub async fn org_entitled_to_segment(
        &self,
        org_guid: &str,
        segment_name: &str,
    ) -> Result<bool> {
        let endpoint = format!(
            "/v3/isolation_segments?names={}&organization_guids={}",
            segment_name, org_guid
        );
        let response = self.transport.get(&endpoint).await?;
        ensure_no_errors(&response, &endpoint)?;

        let listing: ListResponse = parse_json(&response, &endpoint)?;
        Ok(!listing.resources.is_empty())
    }

    /// Whether any isolation segment is assigned to the space
    pub async fn segment_assigned_to_space(&self, space_guid: &str) -> Result<bool> {
        let endpoint = format!("/v3/spaces/{}/relationships/isolation_segment", space_guid);
        let response = self.transport.get(&endpoint).await?;
        ensure_no_errors(&response, &endpoint)?;

        let relationship: ToOneRelationship = parse_json(&response, &endpoint)?;
        Ok(relationship.data.is_some())
    }

    async fn guid_from_listing(
        &self,
        resource_type: &str,
        endpoint: &str,
        name: &str,
    ) -> Result<String> {
        let response = self.transport.get(endpoint).await?;
        ensure_no_errors(&response, endpoint)?;

        let listing: ListResponse = parse_json(&response, endpoint)?;
        listing
            .resources
            .into_iter()
            .next()
            .map(|r| r.guid)
            .ok_or_else(|| Error::not_found(resource_type, name))
    }
}

/// The CLI's curl prints API error documents with a zero exit status; surface
/// them as API errors instead of parse failures.
fn ensure_no_errors(response: &str, endpoint: &str) -> Result<()> {
    let value: serde_json::Value = serde_json::from_str(response)
        .map_err(|_| Error::api_endpoint("response was not valid JSON", endpoint))?;

    if let Some(errors) = value.get("errors").and_then(|e| e.as_array()) {
        if let Some(first) = errors.first() {
            let detail = first
                .get("detail")
                .and_then(|d| d.as_str())
                .unwrap_or("unspecified API error");
            return Err(Error::api_endpoint(detail, endpoint));
        }
    }
    Ok(())
}

fn parse_json<'a, D: Deserialize<'a>>(response: &'a str, endpoint: &str) -> Result<D> {
    serde_json::from_str(response).map_err(|e| {
        Error::api_endpoint(format!("failed to deserialize response: {}", e), endpoint)
    })
}
