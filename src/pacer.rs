use rand::Rng;
use std::thread;
use std::time::{Duration, Instant};

const JITTER_MAX_SECS: u64 = 2;

/// Spaces outbound requests to the site. The upstream rate-limits
/// aggressive polling, so every request waits out a fixed interval
/// rather than an adaptive one.
pub struct Pacer {
    delay: Duration,
    cooldown: Duration,
    last_request: Option<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration, cooldown: Duration) -> Self {
        Self {
            delay,
            cooldown,
            last_request: None,
        }
    }

    /// Blocks until at least `delay` has passed since the previous call,
    /// then stamps the new request time.
    pub fn pace(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                thread::sleep(self.delay - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }

    /// Longer sleep after a connection failure, with jitter so retries
    /// don't land on the same second. A zero cooldown skips the wait.
    pub fn cooldown(&mut self) {
        if self.cooldown.is_zero() {
            return;
        }
        let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
        thread::sleep(self.cooldown + Duration::from_secs(jitter));
        self.last_request = Some(Instant::now());
    }
}
