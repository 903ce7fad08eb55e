//! Live routing-isolation scenarios.
//!
//! The four original smoke scenarios against a real platform: push an app
//! into a space bound to the shared segment (or the configured isolation
//! segment), then probe it through both router pools and assert on the
//! status/body. Requires `RUN_SMOKE=1`, a valid `SMOKE_TEST_CONFIG`, and the
//! platform CLI logged in on PATH; each test provisions, probes, and cleans
//! up sequentially.

use anyhow::Context;

use routesmoke::config::SmokeConfig;
use routesmoke::platform::{PlatformApi, PlatformCli};
use routesmoke::probe::{RouterTarget, RoutingProber};
use routesmoke::workflow::{
    bind_isolation_segment, bind_shared_segment, cleanup_app, random_app_name,
    verify_existing_environment, PushPlan,
};

struct LiveEnv {
    config: SmokeConfig,
    cli: PlatformCli,
    api: PlatformApi<PlatformCli>,
    prober: RoutingProber,
}

/// Gate and build the live environment. Returns `None` to skip (not fail)
/// when the suite is not enabled.
async fn live_env() -> Option<LiveEnv> {
    if std::env::var("RUN_SMOKE").ok().as_deref() != Some("1") {
        eprintln!("skipping live smoke (set RUN_SMOKE=1 to enable)");
        return None;
    }

    let config = SmokeConfig::load().expect("load smoke configuration");
    if !config.enable_isolation_segment_tests {
        eprintln!("skipping because enable_isolation_segment_tests is false");
        return None;
    }

    let cli = PlatformCli::from_config(&config);
    assert!(
        cli.is_available(),
        "platform CLI `{}` not found on PATH",
        cli.binary().display()
    );

    let prober = RoutingProber::with_timeout(config.timeouts.default_timeout());
    let api = PlatformApi::new(cli.clone());
    Some(LiveEnv { config, cli, api, prober })
}

impl LiveEnv {
    fn org_name(&self) -> anyhow::Result<String> {
        self.config.organization.clone().context("organization name required for live runs")
    }

    fn space_name(&self) -> anyhow::Result<String> {
        self.config.space.clone().context("space name required for live runs")
    }

    /// Provision (shared segment) and push an app under the apps domain
    async fn push_shared_app(&self) -> anyhow::Result<PushPlan> {
        let org = self.org_name()?;
        let space = self.space_name()?;
        let org_guid = self.api.org_guid(&org).await?;
        let space_guid = self.api.space_guid(&space).await?;

        // Pre-existing environments must pass the entitlement/assignment
        // preconditions before any scenario, shared ones included.
        verify_existing_environment(&self.api, &self.config, &org, &org_guid).await?;

        if !self.config.use_existing_organization && !self.config.use_existing_space {
            bind_shared_segment(&self.api, &org_guid, &space_guid).await?;
        }

        self.cli.target_space(&space).await?;
        let plan = PushPlan::new(
            random_app_name("SMOKES", "APP"),
            self.config.apps_domain.as_str(),
            &self.config.app,
        );
        self.cli.push(&plan, self.config.timeouts.push_timeout()).await?;
        Ok(plan)
    }

    /// Provision (configured isolation segment) and push an app under the
    /// isolation segment domain
    async fn push_isolated_app(&self) -> anyhow::Result<PushPlan> {
        let org = self.org_name()?;
        let space = self.space_name()?;
        let org_guid = self.api.org_guid(&org).await?;
        let space_guid = self.api.space_guid(&space).await?;

        let (iso_space_name, iso_space_guid) =
            match verify_existing_environment(&self.api, &self.config, &org, &org_guid).await? {
                Some(guid) => (self.config.isolation_segment.space.clone(), guid),
                None => (space, space_guid),
            };

        bind_isolation_segment(&self.api, &self.config, &org_guid, &iso_space_guid).await?;

        self.cli.target_space(&iso_space_name).await?;
        let plan = PushPlan::new(
            random_app_name("SMOKES", "APP"),
            self.config.isolation_segment.domain.as_str(),
            &self.config.app,
        );
        self.cli.push(&plan, self.config.timeouts.push_timeout()).await?;
        Ok(plan)
    }
}

#[tokio::test]
#[ignore = "requires a live platform with isolation segments (set RUN_SMOKE=1)"]
async fn shared_segment_app_is_reachable_from_the_shared_router() {
    let Some(env) = live_env().await else { return };
    let plan = env.push_shared_app().await.expect("provision and push shared app");

    let router = RouterTarget::new(env.config.apps_domain.as_str());
    let result = env.prober.probe_for_status(&plan.hostname(), &router).await;

    // Clean up before asserting so a failed expectation still deletes the app.
    cleanup_app(&env.cli, &env.config, &plan.name).await;

    let (status, body) = result.expect("probe shared router");
    assert_eq!(status, 200);
    assert!(
        body.contains(&env.config.app.expected_body),
        "body missing expected marker: {body}"
    );
}

#[tokio::test]
#[ignore = "requires a live platform with isolation segments (set RUN_SMOKE=1)"]
async fn shared_segment_app_is_not_reachable_from_the_isolated_router() {
    let Some(env) = live_env().await else { return };
    let plan = env.push_shared_app().await.expect("provision and push shared app");

    // Request an app in the shared domain, but through the isolation segment
    // router.
    let router = RouterTarget::new(env.config.isolation_segment.domain.as_str());
    let result = env.prober.probe_for_status(&plan.hostname(), &router).await;

    cleanup_app(&env.cli, &env.config, &plan.name).await;

    let (status, _) = result.expect("probe isolated router");
    assert_eq!(status, 404);
}

#[tokio::test]
#[ignore = "requires a live platform with isolation segments (set RUN_SMOKE=1)"]
async fn isolated_app_is_reachable_from_the_isolated_router() {
    let Some(env) = live_env().await else { return };
    let plan = env.push_isolated_app().await.expect("provision and push isolated app");

    let router = RouterTarget::new(env.config.isolation_segment.domain.as_str());
    let result = env.prober.probe_for_status(&plan.hostname(), &router).await;

    cleanup_app(&env.cli, &env.config, &plan.name).await;

    let (status, body) = result.expect("probe isolated router");
    assert_eq!(status, 200);
    assert!(
        body.contains(&env.config.app.expected_body),
        "body missing expected marker: {body}"
    );
}

#[tokio::test]
#[ignore = "requires a live platform with isolation segments (set RUN_SMOKE=1)"]
async fn isolated_app_is_not_reachable_from_the_shared_router() {
    let Some(env) = live_env().await else { return };
    let plan = env.push_isolated_app().await.expect("provision and push isolated app");

    let router = RouterTarget::new(env.config.apps_domain.as_str());
    let result = env.prober.probe_for_status(&plan.hostname(), &router).await;

    cleanup_app(&env.cli, &env.config, &plan.name).await;

    let (status, _) = result.expect("probe shared router");
    assert_eq!(status, 404);
}
