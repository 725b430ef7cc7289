//! Shared utilities for integration testing.

use std::sync::Arc;
use std::time::Duration;

use cancel_task::operation::StepPlan;
use cancel_task::Client;

/// One time unit in the scenarios below.
pub fn units(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// A client whose operation is `count` steps of one unit each.
pub fn client_with_unit_steps(timeout: Duration, count: u32) -> Client {
    let delays = std::iter::repeat(units(1)).take(count as usize);
    Client::with_steps(timeout, StepPlan::fixed(delays).steps())
}

/// Dispose `client` after `after` elapses, from another task.
#[allow(dead_code)]
pub fn dispose_after(client: &Arc<Client>, after: Duration) -> tokio::task::JoinHandle<()> {
    let client = client.clone();
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        client.dispose();
    })
}
