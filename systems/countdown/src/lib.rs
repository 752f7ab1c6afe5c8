#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Countdown system that converts elapsed wall time into turn time units.
//!
//! The system arms itself when a turn starts and disarms as soon as the turn
//! or its round ends. While armed it accumulates [`Event::TimeAdvanced`]
//! deltas and emits one [`Command::ElapseTimeUnit`] per full unit. Every unit
//! carries the turn it was measured for, so the world can discard units that
//! arrive after the turn already ended.

use std::time::Duration;

use ricochet_core::{Command, Event, TurnId};
use tracing::debug;

/// Length of one time unit when no other value is configured.
pub const DEFAULT_UNIT: Duration = Duration::from_secs(1);

/// Configuration parameters required to construct the countdown system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    unit: Duration,
}

impl Config {
    /// Creates a new configuration using the provided unit length.
    #[must_use]
    pub const fn new(unit: Duration) -> Self {
        Self { unit }
    }

    /// Wall time that makes up one unit.
    #[must_use]
    pub const fn unit(&self) -> Duration {
        self.unit
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT)
    }
}

/// Pure system that meters the active turn.
#[derive(Debug)]
pub struct Countdown {
    unit: Duration,
    accumulator: Duration,
    armed: Option<TurnId>,
}

impl Countdown {
    /// Creates a new, disarmed countdown using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            unit: config.unit,
            accumulator: Duration::ZERO,
            armed: None,
        }
    }

    /// Turn currently being metered.
    #[must_use]
    pub const fn armed_turn(&self) -> Option<TurnId> {
        self.armed
    }

    /// Consumes world events in order and emits time unit commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::TurnStarted { turn, .. } => self.arm(*turn),
                Event::TurnEnded { turn, .. } => {
                    if self.armed == Some(*turn) {
                        self.disarm();
                    }
                }
                Event::RoundCompleted { .. }
                | Event::BiddingReopened { .. }
                | Event::GameStarted { .. }
                | Event::GameOver { .. } => self.disarm(),
                Event::TimeAdvanced { dt } => self.advance(*dt, out),
                _ => {}
            }
        }
    }

    fn arm(&mut self, turn: TurnId) {
        debug!(turn = turn.get(), "countdown armed");
        self.armed = Some(turn);
        self.accumulator = Duration::ZERO;
    }

    fn disarm(&mut self) {
        if let Some(turn) = self.armed.take() {
            debug!(turn = turn.get(), "countdown disarmed");
        }
        self.accumulator = Duration::ZERO;
    }

    fn advance(&mut self, dt: Duration, out: &mut Vec<Command>) {
        let Some(turn) = self.armed else {
            return;
        };
        if self.unit.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        while self.accumulator >= self.unit {
            self.accumulator -= self.unit;
            out.push(Command::ElapseTimeUnit { turn });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_unit_never_emits() {
        let mut countdown = Countdown::new(Config::new(Duration::ZERO));
        countdown.arm(TurnId::new(1));
        let mut commands = Vec::new();
        countdown.advance(Duration::from_secs(5), &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn arming_discards_partial_unit() {
        let mut countdown = Countdown::new(Config::default());
        countdown.arm(TurnId::new(1));
        countdown.accumulator = Duration::from_millis(900);
        countdown.arm(TurnId::new(2));
        assert_eq!(countdown.accumulator, Duration::ZERO);
    }
}
