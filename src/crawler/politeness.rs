//! Per-host politeness gate
//!
//! Tracks the last dispatch time for every host contacted during the job and
//! makes workers wait out the configured delay before the next request to
//! the same host.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Per-host last-access table enforcing the politeness delay
pub struct HostClock {
    delay: Duration,
    last_access: Mutex<HashMap<String, Instant>>,
}

impl HostClock {
    /// Creates a clock enforcing `delay` between requests to one host
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_access: Mutex::new(HashMap::new()),
        }
    }

    /// The configured politeness delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Blocks until `host` may receive another request, then stamps it.
    ///
    /// The eligibility check and the timestamp update happen under the same
    /// lock acquisition, and a caller that had to wait re-checks after
    /// sleeping, so two workers contending for one host can never both pass
    /// inside the delay window. Hosts without an entry are immediately
    /// eligible (first contact).
    pub async fn acquire(&self, host: &str) {
        loop {
            let wait = {
                let mut last_access = self.last_access.lock().await;
                match last_access.get(host) {
                    Some(last) => {
                        let elapsed = last.elapsed();
                        if elapsed >= self.delay {
                            last_access.insert(host.to_string(), Instant::now());
                            None
                        } else {
                            Some(self.delay - elapsed)
                        }
                    }
                    None => {
                        last_access.insert(host.to_string(), Instant::now());
                        None
                    }
                }
            };

            match wait {
                None => return,
                Some(remaining) => tokio::time::sleep(remaining).await,
            }
        }
    }
}
