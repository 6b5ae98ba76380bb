//! Alert rate limiting
//!
//! Each alert kind has its own gate with an independent cooldown, so a
//! collision alert never suppresses a proximity alert and vice versa.

use std::time::Duration;

use crate::sim::constants::alerts::{
    COLLISION_COOLDOWN_MS, CRITICAL_COOLDOWN_MS, WARNING_COOLDOWN_MS,
};

/// Alert kinds raised by the simulation itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    CriticalProximity,
    WarningProximity,
    Collision,
}

impl AlertKind {
    pub fn cooldown(&self) -> Duration {
        let ms = match self {
            AlertKind::CriticalProximity => CRITICAL_COOLDOWN_MS,
            AlertKind::WarningProximity => WARNING_COOLDOWN_MS,
            AlertKind::Collision => COLLISION_COOLDOWN_MS,
        };
        Duration::from_millis(ms)
    }
}

/// Refusal from a gate that is still cooling down
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?} alert suppressed: cooldown has {remaining:?} remaining")]
pub struct AlertSuppressed {
    pub kind: AlertKind,
    pub remaining: Duration,
}

/// Gate lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    /// Never fired since creation or reset
    Quiet,
    /// Fired at the given time; refuses until the cooldown has strictly elapsed
    CoolingDown { fired_at: Duration },
    /// Cooldown elapsed; the next trigger fires
    Armed,
}

/// Per-kind rate limiter. Timestamps are offsets from the loop's epoch.
#[derive(Debug, Clone)]
pub struct AlertGate {
    kind: AlertKind,
    cooldown: Duration,
    phase: AlertPhase,
}

impl AlertGate {
    pub fn new(kind: AlertKind) -> Self {
        Self::with_cooldown(kind, kind.cooldown())
    }

    pub fn with_cooldown(kind: AlertKind, cooldown: Duration) -> Self {
        Self {
            kind,
            cooldown,
            phase: AlertPhase::Quiet,
        }
    }

    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    /// Phase as of `now`, promoting an expired cooldown to `Armed`
    pub fn poll(&mut self, now: Duration) -> AlertPhase {
        if let AlertPhase::CoolingDown { fired_at } = self.phase {
            if now.saturating_sub(fired_at) > self.cooldown {
                self.phase = AlertPhase::Armed;
            }
        }
        self.phase
    }

    /// Fire if allowed; on success the gate starts cooling down from `now`
    pub fn try_fire(&mut self, now: Duration) -> Result<(), AlertSuppressed> {
        if let AlertPhase::CoolingDown { fired_at } = self.poll(now) {
            let elapsed = now.saturating_sub(fired_at);
            return Err(AlertSuppressed {
                kind: self.kind,
                remaining: self.cooldown.saturating_sub(elapsed),
            });
        }

        self.phase = AlertPhase::CoolingDown { fired_at: now };
        Ok(())
    }

    pub fn reset(&mut self) {
        self.phase = AlertPhase::Quiet;
    }
}

/// Gates for all simulation alert kinds
#[derive(Debug, Clone)]
pub struct AlertBoard {
    pub critical: AlertGate,
    pub warning: AlertGate,
    pub collision: AlertGate,
}

impl AlertBoard {
    pub fn new() -> Self {
        Self {
            critical: AlertGate::new(AlertKind::CriticalProximity),
            warning: AlertGate::new(AlertKind::WarningProximity),
            collision: AlertGate::new(AlertKind::Collision),
        }
    }

    pub fn gate_mut(&mut self, kind: AlertKind) -> &mut AlertGate {
        match kind {
            AlertKind::CriticalProximity => &mut self.critical,
            AlertKind::WarningProximity => &mut self.warning,
            AlertKind::Collision => &mut self.collision,
        }
    }

    pub fn try_fire(&mut self, kind: AlertKind, now: Duration) -> Result<(), AlertSuppressed> {
        self.gate_mut(kind).try_fire(now)
    }

    pub fn reset(&mut self) {
        self.critical.reset();
        self.warning.reset();
        self.collision.reset();
    }
}

impl Default for AlertBoard {
    fn default() -> Self {
        Self::new()
    }
}
