//! # Routing Prober
//!
//! Issues one HTTP GET whose destination address and whose claimed hostname
//! are controlled independently. The connection is always established against
//! the address resolved from the router domain; the Host header always carries
//! the target hostname. Pointing the same hostname at different router pools
//! is what proves (or disproves) routing isolation.
//!
//! A probe is a single stateless request/response exchange: no retries, no
//! caching, no connection reuse across probes.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::debug;

use crate::errors::{Error, Result};

/// Router pool endpoint to physically connect to.
///
/// Only the domain participates in address resolution; the port is carried in
/// the request URL because DNS has no notion of ports. Port 80 is the normal
/// production case, the explicit port exists for nonstandard router
/// deployments and for tests running router doubles on ephemeral ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterTarget {
    /// Domain whose DNS resolution yields the router pool's address
    pub domain: String,
    /// TCP port the router listens on
    pub port: u16,
}

impl RouterTarget {
    /// Router reachable on the conventional HTTP port
    pub fn new(domain: impl Into<String>) -> Self {
        Self { domain: domain.into(), port: 80 }
    }

    /// Set a nonstandard router port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// One-shot prober decoupling connection target from claimed hostname
#[derive(Debug, Clone)]
pub struct RoutingProber {
    timeout: Duration,
}

impl Default for RoutingProber {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingProber {
    /// Prober with a 30 second network timeout
    pub fn new() -> Self {
        Self { timeout: Duration::from_secs(30) }
    }

    /// Prober with a custom network timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Send a GET to the router pool behind `router` while presenting
    /// `target_hostname` as the request's identity.
    ///
    /// Returns the response with the body unconsumed; reading (or dropping)
    /// it is the caller's responsibility. Dropping the response releases the
    /// connection on every exit path.
    ///
    /// DNS failure, connection failure, and an incomplete response within the
    /// timeout are all hard errors; a single attempt is definitive.
    pub async fn probe(
        &self,
        target_hostname: &str,
        router: &RouterTarget,
    ) -> Result<reqwest::Response> {
        if target_hostname.is_empty() {
            return Err(Error::probe("target hostname cannot be empty"));
        }
        if router.domain.is_empty() {
            return Err(Error::probe("router domain cannot be empty"));
        }

        let addr = self.resolve_router(router).await?;

        debug!(
            host = target_hostname,
            router_domain = %router.domain,
            router_addr = %addr,
            "Probing router with spoofed host"
        );

        // Pin the target hostname to the router's address. The URL carries
        // the router port; reqwest ignores the port of the resolve() addr.
        let client = reqwest::Client::builder()
            .resolve(target_hostname, addr)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::Probe {
                message: "failed to build probe client".to_string(),
                source: Some(e),
            })?;

        let url = if router.port == 80 {
            format!("http://{}/", target_hostname)
        } else {
            format!("http://{}:{}/", target_hostname, router.port)
        };

        let response = client.get(&url).send().await?;

        debug!(
            host = target_hostname,
            router_domain = %router.domain,
            status = response.status().as_u16(),
            "Probe completed"
        );

        Ok(response)
    }

    /// Probe and consume the body, returning `(status, body)`.
    pub async fn probe_for_status(
        &self,
        target_hostname: &str,
        router: &RouterTarget,
    ) -> Result<(u16, String)> {
        let response = self.probe(target_hostname, router).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Resolve the router domain to a concrete address, honoring whatever
    /// DNS/hosts configuration is in effect.
    async fn resolve_router(&self, router: &RouterTarget) -> Result<SocketAddr> {
        let mut addrs = tokio::net::lookup_host((router.domain.as_str(), router.port))
            .await
            .map_err(|e| {
                Error::probe(format!(
                    "DNS resolution of router domain '{}' failed: {}",
                    router.domain, e
                ))
            })?;

        addrs.next().ok_or_else(|| {
            Error::probe(format!("router domain '{}' resolved to no addresses", router.domain))
        })
    }
}
