//! Hard timeout wrapper.
//!
//! Every CLI invocation, admin API call, and probe in the suite runs under a
//! hard timeout; a hung platform must surface as a labeled failure, never as a
//! stuck test run. No retry helpers live here: a single attempt is definitive
//! for every assertion in this suite.

use std::future::Future;
use std::time::Duration;

use crate::errors::{Error, Result};

/// Run an async operation with a hard time budget.
///
/// The label names the operation in the resulting [`Error::Timeout`].
pub async fn with_timeout<F, T>(label: &str, budget: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(budget, fut).await {
        Ok(result) => result,
        Err(_elapsed) => Err(Error::timeout(label, budget.as_millis() as u64)),
    }
}
