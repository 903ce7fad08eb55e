//! Hermetic routing-isolation tests.
//!
//! Two wiremock doubles play the shared and isolated router pools; the real
//! prober runs against them. These cover the full outcome matrix without a
//! platform: an app bound to one pool answers 200 with its body through that
//! pool and 404 through the other, and the probe's claimed identity never
//! changes when only the connection target changes.

use std::time::Duration;

use routesmoke::probe::{RouterTarget, RoutingProber};
use routesmoke::Error;

use crate::common::RouterPoolDouble;

const BINARY_HI: &str = "Hello from a binary";

#[tokio::test]
async fn shared_app_is_reachable_from_the_shared_router() {
    let shared = RouterPoolDouble::start().await;
    let hostname = "smokes-app-1.apps.example.com";
    shared.serve_app(hostname, BINARY_HI).await;

    let prober = RoutingProber::new();
    let (status, body) = prober.probe_for_status(hostname, &shared.target()).await.unwrap();

    assert_eq!(status, 200);
    assert!(body.contains(BINARY_HI), "body missing marker: {body}");
}

#[tokio::test]
async fn shared_app_is_not_reachable_from_the_isolated_router() {
    let shared = RouterPoolDouble::start().await;
    let isolated = RouterPoolDouble::start().await;
    let hostname = "smokes-app-1.apps.example.com";
    shared.serve_app(hostname, BINARY_HI).await;

    // Same Host, but the connection goes to the isolated pool's address.
    let prober = RoutingProber::new();
    let (status, _) = prober.probe_for_status(hostname, &isolated.target()).await.unwrap();

    assert_eq!(status, 404);
}

#[tokio::test]
async fn isolated_app_is_reachable_from_the_isolated_router() {
    let isolated = RouterPoolDouble::start().await;
    let hostname = "smokes-app-2.iso.example.com";
    isolated.serve_app(hostname, BINARY_HI).await;

    let prober = RoutingProber::new();
    let (status, body) = prober.probe_for_status(hostname, &isolated.target()).await.unwrap();

    assert_eq!(status, 200);
    assert!(body.contains(BINARY_HI));
}

#[tokio::test]
async fn isolated_app_is_not_reachable_from_the_shared_router() {
    let shared = RouterPoolDouble::start().await;
    let isolated = RouterPoolDouble::start().await;
    let hostname = "smokes-app-2.iso.example.com";
    isolated.serve_app(hostname, BINARY_HI).await;

    let prober = RoutingProber::new();
    let (status, _) = prober.probe_for_status(hostname, &shared.target()).await.unwrap();

    assert_eq!(status, 404);
}

#[tokio::test]
async fn probe_presents_the_target_hostname_to_the_router() {
    let pool = RouterPoolDouble::start().await;
    let hostname = "smokes-app-3.apps.example.com";
    pool.serve_app(hostname, BINARY_HI).await;

    let prober = RoutingProber::new();
    prober.probe_for_status(hostname, &pool.target()).await.unwrap();

    let hosts = pool.observed_hosts().await;
    assert_eq!(hosts, vec![format!("{}:{}", hostname, pool.port())]);
}

#[tokio::test]
async fn changing_the_router_never_changes_the_claimed_identity() {
    let shared = RouterPoolDouble::start().await;
    let isolated = RouterPoolDouble::start().await;
    let hostname = "smokes-app-4.apps.example.com";
    shared.serve_app(hostname, BINARY_HI).await;

    let prober = RoutingProber::new();
    prober.probe_for_status(hostname, &shared.target()).await.unwrap();
    prober.probe_for_status(hostname, &isolated.target()).await.unwrap();

    // Both pools saw the same hostname; only the port suffix differs because
    // each double listens on its own ephemeral port.
    let shared_hosts = shared.observed_hosts().await;
    let isolated_hosts = isolated.observed_hosts().await;
    assert_eq!(shared_hosts, vec![format!("{}:{}", hostname, shared.port())]);
    assert_eq!(isolated_hosts, vec![format!("{}:{}", hostname, isolated.port())]);
}

#[tokio::test]
async fn response_body_is_left_for_the_caller() {
    let pool = RouterPoolDouble::start().await;
    let hostname = "smokes-app-5.apps.example.com";
    pool.serve_app(hostname, BINARY_HI).await;

    let prober = RoutingProber::new();
    let response = prober.probe(hostname, &pool.target()).await.unwrap();

    // Status and headers are available before the body is touched.
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains(BINARY_HI));
}

#[tokio::test]
async fn probe_to_a_closed_port_is_a_hard_failure() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let prober = RoutingProber::with_timeout(Duration::from_secs(5));
    let router = RouterTarget::new("127.0.0.1").with_port(port);
    let err = prober.probe("smokes-app-6.apps.example.com", &router).await.unwrap_err();

    assert!(matches!(err, Error::Probe { .. }), "unexpected error: {err}");
}
