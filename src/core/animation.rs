// src/core/animation.rs

use std::time::{Duration, Instant};

pub const COUNTER_STEPS: u32 = 20;
pub const COUNTER_STEP_INTERVAL: Duration = Duration::from_millis(50);

/// Number that glides toward its target in fixed steps.
#[derive(Debug, Clone)]
pub struct Counter {
    value: f64,
    target: u64,
    increment: f64,
    steps_left: u32,
    last_step: Instant,
}

impl Counter {
    pub fn new(now: Instant) -> Self {
        Self { value: 0.0, target: 0, increment: 0.0, steps_left: 0, last_step: now }
    }

    /// Starts animating from the currently displayed value to `target`.
    pub fn set_target(&mut self, target: u64, now: Instant) {
        if target == self.target && self.steps_left == 0 {
            return;
        }
        self.value = self.displayed() as f64;
        self.target = target;
        self.increment = (target as f64 - self.value) / COUNTER_STEPS as f64;
        self.steps_left = COUNTER_STEPS;
        self.last_step = now;
    }

    pub fn tick(&mut self, now: Instant) {
        while self.steps_left > 0 && now.saturating_duration_since(self.last_step) >= COUNTER_STEP_INTERVAL {
            self.last_step += COUNTER_STEP_INTERVAL;
            self.steps_left -= 1;
            self.value += self.increment;
            if self.steps_left == 0 {
                self.value = self.target as f64;
            }
        }
    }

    pub fn displayed(&self) -> u64 {
        if self.steps_left == 0 {
            self.target
        } else {
            self.value.max(0.0).floor() as u64
        }
    }

    pub fn is_animating(&self) -> bool {
        self.steps_left > 0
    }
}

pub const TYPING_MESSAGES: &[&str] = &[
    "Welcome to SENA",
    "Scanning Engineering Network Assistant",
    "Advanced Security Solutions",
    "Real-time Network Monitoring",
];

const TYPE_DELAY: Duration = Duration::from_millis(100);
const DELETE_DELAY: Duration = Duration::from_millis(50);
const HOLD_DELAY: Duration = Duration::from_millis(2000);
const NEXT_MESSAGE_DELAY: Duration = Duration::from_millis(500);
const START_DELAY: Duration = Duration::from_millis(1000);

/// Banner that types a message, holds it, erases it, then moves to the next one.
#[derive(Debug, Clone)]
pub struct TypingEffect {
    messages: &'static [&'static str],
    message_index: usize,
    char_index: usize,
    deleting: bool,
    next_at: Instant,
}

impl TypingEffect {
    pub fn new(messages: &'static [&'static str], now: Instant) -> Self {
        Self { messages, message_index: 0, char_index: 0, deleting: false, next_at: now + START_DELAY }
    }

    pub fn tick(&mut self, now: Instant) {
        if self.messages.is_empty() {
            return;
        }
        while now >= self.next_at {
            let delay = self.step();
            self.next_at += delay;
        }
    }

    fn step(&mut self) -> Duration {
        let len = self.messages[self.message_index].chars().count();
        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(len);
        }

        if !self.deleting && self.char_index == len {
            self.deleting = true;
            HOLD_DELAY
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.message_index = (self.message_index + 1) % self.messages.len();
            NEXT_MESSAGE_DELAY
        } else if self.deleting {
            DELETE_DELAY
        } else {
            TYPE_DELAY
        }
    }

    pub fn text(&self) -> String {
        self.messages
            .get(self.message_index)
            .map(|m| m.chars().take(self.char_index).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_reaches_exact_target_after_twenty_steps() {
        let start = Instant::now();
        let mut counter = Counter::new(start);
        counter.set_target(7, start);

        counter.tick(start + COUNTER_STEP_INTERVAL * 10);
        assert!(counter.is_animating());
        assert_eq!(counter.displayed(), 3);

        counter.tick(start + COUNTER_STEP_INTERVAL * 20);
        assert!(!counter.is_animating());
        assert_eq!(counter.displayed(), 7);
    }

    #[test]
    fn counter_can_animate_downwards() {
        let start = Instant::now();
        let mut counter = Counter::new(start);
        counter.set_target(40, start);
        counter.tick(start + Duration::from_secs(2));
        let later = start + Duration::from_secs(2);
        counter.set_target(0, later);
        counter.tick(later + COUNTER_STEP_INTERVAL * 5);
        assert_eq!(counter.displayed(), 30);
        counter.tick(later + Duration::from_secs(2));
        assert_eq!(counter.displayed(), 0);
    }

    #[test]
    fn typing_effect_types_then_deletes() {
        const MESSAGES: &[&str] = &["ab", "xyz"];
        let start = Instant::now();
        let mut typing = TypingEffect::new(MESSAGES, start);
        assert_eq!(typing.text(), "");

        typing.tick(start + START_DELAY);
        assert_eq!(typing.text(), "a");
        typing.tick(start + START_DELAY + TYPE_DELAY);
        assert_eq!(typing.text(), "ab");

        // hold, then delete both characters, then pause before the next message
        let deleted = start + START_DELAY + TYPE_DELAY + HOLD_DELAY + DELETE_DELAY;
        typing.tick(deleted);
        assert_eq!(typing.text(), "");
        typing.tick(deleted + NEXT_MESSAGE_DELAY);
        assert_eq!(typing.text(), "x");
    }
}
