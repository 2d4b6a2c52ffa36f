//! Periodic timers
//!
//! Timers are plain values owned by the session, polled with the frame clock.
//! A cancelled timer never fires until it is armed again.

use crate::consts::MAX_TIMER_CATCHUP;

/// A repeating timer driven by an external monotonic clock (milliseconds)
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicTimer {
    interval_ms: f64,
    /// Next due time, or None when cancelled or suspended
    next_due: Option<f64>,
    /// Time left until the next firing while suspended
    remaining: Option<f64>,
}

impl PeriodicTimer {
    /// Create a cancelled timer
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due: None,
            remaining: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Start (or restart) the timer; first firing is one interval after `now`
    pub fn arm(&mut self, now: f64) {
        self.next_due = Some(now + self.interval_ms);
        self.remaining = None;
    }

    /// Stop the timer. Cancelling twice is harmless.
    pub fn cancel(&mut self) {
        self.next_due = None;
        self.remaining = None;
    }

    /// Stop firing but keep the time left until the next period
    pub fn suspend(&mut self, now: f64) {
        if let Some(due) = self.next_due.take() {
            self.remaining = Some((due - now).max(0.0));
        }
    }

    /// Continue a suspended timer from where it stopped. Returns false if
    /// nothing was suspended.
    pub fn resume(&mut self, now: f64) -> bool {
        match self.remaining.take() {
            Some(left) => {
                self.next_due = Some(now + left);
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of periods that elapsed up to `now`.
    ///
    /// A timer that fell far behind fires at most `MAX_TIMER_CATCHUP` times
    /// and then rebases on `now`.
    pub fn poll(&mut self, now: f64) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut fired = 0;
        while due <= now {
            fired += 1;
            due += self.interval_ms;
            if fired == MAX_TIMER_CATCHUP {
                if due <= now {
                    due = now + self.interval_ms;
                }
                break;
            }
        }
        self.next_due = Some(due);
        fired
    }
}

/// The session's timers
#[derive(Debug, Clone)]
pub struct Timers {
    pub spawn: PeriodicTimer,
    pub round: PeriodicTimer,
    pub rapid_fire: PeriodicTimer,
}

impl Timers {
    pub fn new(spawn_ms: f64, round_ms: f64, rapid_fire_ms: f64) -> Self {
        Self {
            spawn: PeriodicTimer::new(spawn_ms),
            round: PeriodicTimer::new(round_ms),
            rapid_fire: PeriodicTimer::new(rapid_fire_ms),
        }
    }

    /// Arm the gameplay timers (spawn and round)
    pub fn arm_gameplay(&mut self, now: f64) {
        self.spawn.arm(now);
        self.round.arm(now);
    }

    /// Suspend spawn and round timers, keeping their progress
    pub fn suspend_gameplay(&mut self, now: f64) {
        self.spawn.suspend(now);
        self.round.suspend(now);
    }

    /// Resume spawn and round timers; any timer with nothing to resume is
    /// armed fresh
    pub fn resume_gameplay(&mut self, now: f64) {
        for timer in [&mut self.spawn, &mut self.round] {
            if !timer.resume(now) {
                timer.arm(now);
            }
        }
    }

    pub fn cancel_all(&mut self) {
        self.spawn.cancel();
        self.round.cancel();
        self.rapid_fire.cancel();
    }

    pub fn any_armed(&self) -> bool {
        self.spawn.is_armed() || self.round.is_armed() || self.rapid_fire.is_armed()
    }
}
