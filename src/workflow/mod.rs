//! # Scenario Workflow
//!
//! Orchestration helpers for the linear provision → push → probe → assert →
//! cleanup sequence of a scenario. Every step is sequential and blocking; the
//! only cross-scenario state is the platform itself.

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{AppAssets, SmokeConfig};
use crate::errors::{Error, Result};
use crate::platform::{ApiTransport, PlatformApi, PlatformCli};

/// Well-known identifier of the platform-wide shared isolation segment.
/// An external administrative contract; fixed, never re-derived.
pub const SHARED_SEGMENT_GUID: &str = "933b4c58-120b-499a-b85d-4b6fc9e2903b";

/// Generate a prefixed random name, e.g. `SMOKES-APP-1G4XK2QZ`.
///
/// Uniqueness keeps concurrently running scenarios (in separate orgs/spaces)
/// from colliding on application names.
pub fn random_app_name(prefix: &str, group: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();
    format!("{}-{}-{}", prefix, group, suffix)
}

/// Everything a `push` invocation needs
#[derive(Debug, Clone)]
pub struct PushPlan {
    pub name: String,
    pub bits_path: String,
    pub buildpack: String,
    pub domain: String,
    pub start_command: String,
}

impl PushPlan {
    /// Plan a push of the configured test application under the given domain
    pub fn new(name: impl Into<String>, domain: impl Into<String>, assets: &AppAssets) -> Self {
        Self {
            name: name.into(),
            bits_path: assets.bits_path.clone(),
            buildpack: assets.buildpack.clone(),
            domain: domain.into(),
            start_command: assets.start_command.clone(),
        }
    }

    /// The application's externally visible hostname under its push domain
    pub fn hostname(&self) -> String {
        format!("{}.{}", self.name, self.domain)
    }

    /// CLI argument vector for this push
    pub fn cli_args(&self) -> Vec<String> {
        vec![
            "push".to_string(),
            self.name.clone(),
            "-p".to_string(),
            self.bits_path.clone(),
            "-b".to_string(),
            self.buildpack.clone(),
            "-d".to_string(),
            self.domain.clone(),
            "-c".to_string(),
            self.start_command.clone(),
        ]
    }
}

/// Entitle the org to the shared segment and assign it to the space.
///
/// Used when the suite provisions its own org/space; pre-existing
/// environments are expected to arrive already configured.
pub async fn bind_shared_segment<T: ApiTransport>(
    api: &PlatformApi<T>,
    org_guid: &str,
    space_guid: &str,
) -> Result<()> {
    info!(org_guid, space_guid, "Binding space to the shared isolation segment");
    api.entitle_org_to_segment(org_guid, SHARED_SEGMENT_GUID).await?;
    api.assign_segment_to_space(space_guid, SHARED_SEGMENT_GUID).await?;
    Ok(())
}

/// Entitle the org to the configured isolation segment and assign it to the
/// space, honoring the pre-existing org/space flags. Returns the segment GUID.
pub async fn bind_isolation_segment<T: ApiTransport>(
    api: &PlatformApi<T>,
    config: &SmokeConfig,
    org_guid: &str,
    space_guid: &str,
) -> Result<String> {
    let segment_name = &config.isolation_segment.name;
    let segment_guid = api.isolation_segment_guid(segment_name).await?;

    if !config.use_existing_organization {
        info!(org_guid, segment = %segment_name, "Entitling organization to isolation segment");
        api.entitle_org_to_segment(org_guid, &segment_guid).await?;
    }
    if !config.use_existing_space {
        info!(space_guid, segment = %segment_name, "Assigning isolation segment to space");
        api.assign_segment_to_space(space_guid, &segment_guid).await?;
    }

    Ok(segment_guid)
}

/// Verify a pre-existing environment is usable for the isolation scenarios.
///
/// Only applies when both `use_existing_organization` and `use_existing_space`
/// are set. Returns the GUID of the isolated space on success. Failures are
/// [`Error::Precondition`]: the environment is broken, not the platform.
pub async fn verify_existing_environment<T: ApiTransport>(
    api: &PlatformApi<T>,
    config: &SmokeConfig,
    org_name: &str,
    org_guid: &str,
) -> Result<Option<String>> {
    if !(config.use_existing_organization && config.use_existing_space) {
        return Ok(None);
    }

    let segment_name = &config.isolation_segment.name;
    if !api.org_entitled_to_segment(org_guid, segment_name).await? {
        return Err(Error::precondition(format!(
            "Pre-existing org {} is not entitled to isolation segment {}",
            org_name, segment_name
        )));
    }

    let iso_space_name = &config.isolation_segment.space;
    let iso_space_guid = api.space_guid(iso_space_name).await?;
    if !api.segment_assigned_to_space(&iso_space_guid).await? {
        return Err(Error::precondition(format!(
            "No isolation segment assigned to pre-existing space {}",
            iso_space_name
        )));
    }

    Ok(Some(iso_space_guid))
}

/// Best-effort application deletion, only when cleanup is enabled.
///
/// A failed delete is logged, never propagated; cleanup must not mask the
/// scenario's own outcome.
pub async fn cleanup_app(cli: &PlatformCli, config: &SmokeConfig, app_name: &str) {
    if !config.cleanup {
        debug!(app = app_name, "Cleanup disabled, leaving application in place");
        return;
    }

    match cli.delete_app(app_name).await {
        Ok(()) => info!(app = app_name, "Deleted application"),
        Err(e) => warn!(app = app_name, error = %e, "Failed to delete application"),
    }
}
