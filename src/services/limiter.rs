//! Client-side search throttling.
//!
//! A sliding window over recent submission times: at most `max_requests`
//! submissions may be allowed within any trailing `window`. A rejected
//! submission is not recorded and starts a cooldown countdown.
//! [`SearchGate`] holds every submission back until that countdown ends.
//!
//! ## Rule
//!
//! > On a call at time T, keep only timestamps strictly newer than
//! > `T - window`. If `max_requests` or more remain, reject. Otherwise
//! > record T and allow.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::models::SearchConfig;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Proceed with the submission
    Allowed,
    /// Submission dropped; wait out the cooldown
    Throttled { cooldown_secs: u32 },
    /// Submission swallowed while an earlier cooldown is still running
    CoolingDown { remaining_secs: u32 },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Sliding-window submission counter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    hits: VecDeque<Instant>,
    max_requests: usize,
    window: Duration,
    cooldown_secs: u32,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration, cooldown_secs: u32) -> Self {
        Self {
            hits: VecDeque::with_capacity(max_requests),
            max_requests,
            window,
            cooldown_secs,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            config.max_requests,
            Duration::from_millis(config.window_ms),
            config.cooldown_secs,
        )
    }

    /// Check a submission happening now.
    pub fn check(&mut self) -> Decision {
        self.check_at(Instant::now())
    }

    /// Check a submission happening at `now`.
    pub fn check_at(&mut self, now: Instant) -> Decision {
        self.prune(now);

        if self.hits.len() >= self.max_requests {
            log::debug!(
                "Search throttled: {} submissions within {:?}",
                self.hits.len(),
                self.window
            );
            return Decision::Throttled {
                cooldown_secs: self.cooldown_secs,
            };
        }

        self.hits.push_back(now);
        Decision::Allowed
    }

    /// Submissions still inside the window ending at `now`.
    pub fn in_window(&mut self, now: Instant) -> usize {
        self.prune(now);
        self.hits.len()
    }

    /// Drop timestamps at or before `now - window`.
    fn prune(&mut self, now: Instant) {
        while let Some(&t) = self.hits.front() {
            if now.saturating_duration_since(t) >= self.window {
                self.hits.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

/// Rate limiter plus the blocking cooldown that follows a rejection.
///
/// While the cooldown runs, submissions are neither checked nor recorded,
/// and further submissions do not extend it.
#[derive(Debug, Clone)]
pub struct SearchGate {
    limiter: RateLimiter,
    blocked_until: Option<Instant>,
}

impl SearchGate {
    pub fn new(limiter: RateLimiter) -> Self {
        Self {
            limiter,
            blocked_until: None,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(RateLimiter::from_config(config))
    }

    pub fn submit(&mut self) -> Decision {
        self.submit_at(Instant::now())
    }

    /// Gate a submission happening at `now`.
    ///
    /// `Throttled` is returned once per cooldown, when it starts.
    pub fn submit_at(&mut self, now: Instant) -> Decision {
        if let Some(remaining_secs) = self.remaining_at(now) {
            return Decision::CoolingDown { remaining_secs };
        }
        self.blocked_until = None;

        let decision = self.limiter.check_at(now);
        if let Decision::Throttled { cooldown_secs } = decision {
            self.blocked_until = Some(now + Duration::from_secs(cooldown_secs.into()));
        }
        decision
    }

    /// Whole seconds of cooldown left at `now`, rounded up.
    pub fn remaining_at(&self, now: Instant) -> Option<u32> {
        let left = self
            .blocked_until?
            .checked_duration_since(now)
            .filter(|d| !d.is_zero())?;
        Some(u32::try_from(left.as_millis().div_ceil(1_000)).unwrap_or(u32::MAX))
    }

    pub fn is_blocked_at(&self, now: Instant) -> bool {
        self.remaining_at(now).is_some()
    }
}

impl Default for SearchGate {
    fn default() -> Self {
        Self::new(RateLimiter::default())
    }
}

/// Whole-second countdown shown while throttled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    remaining: u32,
}

impl Cooldown {
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the notice should be dismissed.
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Count down to zero, calling `on_tick` with the seconds left before
    /// each one-second wait and once more at zero.
    ///
    /// The timer lives inside the returned future; dropping the future
    /// cancels the countdown.
    pub async fn run(mut self, mut on_tick: impl FnMut(u32)) {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // First tick completes immediately.
        interval.tick().await;
        while !self.is_finished() {
            on_tick(self.remaining);
            interval.tick().await;
            self.tick();
        }
        on_tick(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> RateLimiter {
        RateLimiter::new(10, Duration::from_millis(10_000), 15)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn ten_allowed_eleventh_rejected() {
        let mut limiter = limiter();
        let start = Instant::now();

        for i in 0..10 {
            assert_eq!(limiter.check_at(start + ms(i * 900)), Decision::Allowed);
        }
        assert_eq!(
            limiter.check_at(start + ms(9_500)),
            Decision::Throttled { cooldown_secs: 15 }
        );
    }

    #[test]
    fn rejection_is_not_recorded() {
        let mut limiter = limiter();
        let start = Instant::now();
        for _ in 0..10 {
            limiter.check_at(start);
        }
        for i in 0..5 {
            assert!(!limiter.check_at(start + ms(1_000 + i)).is_allowed());
        }
        assert_eq!(limiter.in_window(start + ms(2_000)), 10);
    }

    #[test]
    fn window_slides() {
        let mut limiter = limiter();
        let start = Instant::now();

        for i in 0..10 {
            limiter.check_at(start + ms(i * 1_000));
        }
        assert!(!limiter.check_at(start + ms(9_900)).is_allowed());
        // The first call (t=0) has aged out at t=10.1s.
        assert!(limiter.check_at(start + ms(10_100)).is_allowed());
        // Only one slot freed.
        assert!(!limiter.check_at(start + ms(10_200)).is_allowed());
    }

    #[test]
    fn entry_exactly_window_old_is_expired() {
        let mut limiter = limiter();
        let start = Instant::now();
        for _ in 0..10 {
            limiter.check_at(start);
        }
        assert!(!limiter.check_at(start + ms(9_999)).is_allowed());
        assert!(limiter.check_at(start + ms(10_000)).is_allowed());
    }

    #[test]
    fn never_more_than_limit_in_any_window() {
        let mut limiter = limiter();
        let start = Instant::now();
        let mut allowed = Vec::new();

        // Bursty arrivals every 137ms for a minute.
        for i in 0..440 {
            let t = start + ms(i * 137);
            if limiter.check_at(t).is_allowed() {
                allowed.push(t);
            }
        }

        for (i, &t) in allowed.iter().enumerate() {
            let in_window = allowed[..=i]
                .iter()
                .filter(|&&earlier| t.duration_since(earlier) < ms(10_000))
                .count();
            assert!(in_window <= 10, "{in_window} allowed in window ending at call {i}");
        }
        assert!(allowed.len() >= 60);
    }

    /// Ten submissions at 0-0.9s, then the rejection at 2s.
    fn throttled_gate(start: Instant) -> SearchGate {
        let mut gate = SearchGate::new(limiter());
        for i in 0..10 {
            assert!(gate.submit_at(start + ms(i * 100)).is_allowed());
        }
        assert_eq!(
            gate.submit_at(start + ms(2_000)),
            Decision::Throttled { cooldown_secs: 15 }
        );
        gate
    }

    #[test]
    fn gate_blocks_until_cooldown_ends() {
        let start = Instant::now();
        let mut gate = throttled_gate(start);

        // The window has slid by 11s but the countdown still shows 6s.
        assert_eq!(
            gate.submit_at(start + ms(11_000)),
            Decision::CoolingDown { remaining_secs: 6 }
        );
        assert_eq!(
            gate.submit_at(start + ms(16_999)),
            Decision::CoolingDown { remaining_secs: 1 }
        );
        assert!(gate.is_blocked_at(start + ms(16_999)));
        assert!(!gate.is_blocked_at(start + ms(17_000)));
        assert!(gate.submit_at(start + ms(17_000)).is_allowed());
    }

    #[test]
    fn gate_rejections_do_not_restart_cooldown() {
        let start = Instant::now();
        let mut gate = throttled_gate(start);

        for t in [3_000, 5_000, 9_000, 14_000] {
            assert!(matches!(
                gate.submit_at(start + ms(t)),
                Decision::CoolingDown { .. }
            ));
        }
        assert_eq!(gate.remaining_at(start + ms(14_000)), Some(3));
        assert_eq!(gate.remaining_at(start + ms(17_000)), None);
    }

    #[test]
    fn gate_swallowed_submissions_are_not_recorded() {
        let start = Instant::now();
        let mut gate = throttled_gate(start);
        for i in 0..20 {
            gate.submit_at(start + ms(10_000 + i * 100));
        }

        let reopened = start + ms(17_000);
        for i in 0..10 {
            assert!(gate.submit_at(reopened + ms(i)).is_allowed());
        }
        assert_eq!(
            gate.submit_at(reopened + ms(500)),
            Decision::Throttled { cooldown_secs: 15 }
        );
    }

    #[test]
    fn cooldown_ticks_to_zero() {
        let mut cooldown = Cooldown::new(2);
        assert_eq!(cooldown.tick(), 1);
        assert_eq!(cooldown.tick(), 0);
        assert!(cooldown.is_finished());
        assert_eq!(cooldown.tick(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cooldown_run_reports_each_second() {
        let mut seen = Vec::new();
        let started = tokio::time::Instant::now();
        Cooldown::new(3).run(|s| seen.push(s)).await;

        assert_eq!(seen, vec![3, 2, 1, 0]);
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_cooldown_stops_ticking() {
        let mut seen = Vec::new();
        let _ = tokio::time::timeout(
            Duration::from_millis(1_500),
            Cooldown::new(15).run(|s| seen.push(s)),
        )
        .await;
        assert_eq!(seen, vec![15, 14]);
    }
}
