//! # Scan Debouncer
//!
//! The gate between the decoder and the catalog lookup.
//!
//! A camera decoder reports the same barcode many times per second while it
//! stays in frame. The gate turns that stream into at most one lookup per
//! physical scan.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │             offer(event) accepted                                       │
//! │   ┌───────┐ ─────────────────────────► ┌─────────────────────┐          │
//! │   │ Armed │                            │ LookingUp {barcode} │          │
//! │   └───────┘ ◄──────┐                   └──────────┬──────────┘          │
//! │       ▲            │                              │ complete_lookup(t)  │
//! │       │            │ begin_manual (bypasses       ▼                     │
//! │       │            │  the cooldown timer)  ┌──────────────────────┐     │
//! │       │            └────────────────────── │ CoolingDown {t + cd} │     │
//! │       │        poll_rearm(now ≥ t + cd)    └──────────┬───────────┘     │
//! │       └───────────────────────────────────────────────┘                 │
//! │                                                                         │
//! │  Accept rule (Armed only):                                              │
//! │    barcode != last accepted  OR  event - last accepted > cooldown       │
//! │                                                                         │
//! │  The cooldown is measured from lookup COMPLETION, not from event time. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gate never reads the clock: every call takes the `Instant` it should
//! reason about, which keeps it deterministic under test.

use std::time::{Duration, Instant};
use tracing::debug;

use crate::types::ScanEvent;

/// Default cooldown between accepted scans.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(3000);

// =============================================================================
// Gate State
// =============================================================================

/// Where the gate currently is in its cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Ready to accept a scan.
    Armed,

    /// A lookup is in flight; everything is rejected.
    LookingUp { barcode: String },

    /// The lookup finished; scans are rejected until `until`.
    CoolingDown { until: Instant },
}

/// Why a scan was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A lookup is in flight.
    Busy,

    /// Inside the cooldown that follows a completed lookup.
    CoolingDown,

    /// Same barcode as the last accepted scan, within the cooldown window.
    Duplicate,
}

/// Result of offering a scan to the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanDecision {
    /// The caller must issue exactly one lookup for `barcode`.
    Accepted { barcode: String },

    /// Dropped. No lookup.
    Rejected(RejectReason),
}

impl ScanDecision {
    /// Returns true for `Accepted`.
    pub fn is_accepted(&self) -> bool {
        matches!(self, ScanDecision::Accepted { .. })
    }
}

// =============================================================================
// Scan Debouncer
// =============================================================================

/// Debounce gate for decode events.
#[derive(Debug, Clone)]
pub struct ScanDebouncer {
    cooldown: Duration,
    state: GateState,
    last_accepted: Option<(String, Instant)>,
}

impl ScanDebouncer {
    /// Creates an armed gate with the given cooldown.
    pub fn new(cooldown: Duration) -> Self {
        ScanDebouncer {
            cooldown,
            state: GateState::Armed,
            last_accepted: None,
        }
    }

    /// Returns the configured cooldown.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Returns the current state.
    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Returns true if a lookup is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, GateState::LookingUp { .. })
    }

    /// Returns the barcode and time of the last accepted scan.
    pub fn last_accepted(&self) -> Option<(&str, Instant)> {
        self.last_accepted
            .as_ref()
            .map(|(barcode, at)| (barcode.as_str(), *at))
    }

    /// Offers a decode event to the gate.
    ///
    /// On `Accepted` the gate has already moved to `LookingUp`, so a second
    /// identical event in the same tick is rejected as `Busy`.
    pub fn offer(&mut self, event: &ScanEvent) -> ScanDecision {
        self.poll_rearm(event.timestamp);

        match self.state {
            GateState::LookingUp { .. } => return self.reject(event, RejectReason::Busy),
            GateState::CoolingDown { .. } => {
                return self.reject(event, RejectReason::CoolingDown)
            }
            GateState::Armed => {}
        }

        if let Some((last_barcode, last_at)) = &self.last_accepted {
            let elapsed = event.timestamp.saturating_duration_since(*last_at);
            if *last_barcode == event.barcode && elapsed <= self.cooldown {
                return self.reject(event, RejectReason::Duplicate);
            }
        }

        debug!(barcode = %event.barcode, "Scan accepted");
        self.last_accepted = Some((event.barcode.clone(), event.timestamp));
        self.state = GateState::LookingUp {
            barcode: event.barcode.clone(),
        };

        ScanDecision::Accepted {
            barcode: event.barcode.clone(),
        }
    }

    /// Starts a lookup for a manually entered barcode.
    ///
    /// Manual entry skips the cooldown timer and the duplicate rule, but a
    /// lookup already in flight still blocks it.
    pub fn begin_manual(&mut self, barcode: &str, now: Instant) -> Result<(), RejectReason> {
        self.poll_rearm(now);

        if self.is_busy() {
            debug!(barcode, "Manual lookup rejected: lookup in flight");
            return Err(RejectReason::Busy);
        }

        debug!(barcode, "Manual lookup started");
        self.state = GateState::LookingUp {
            barcode: barcode.to_string(),
        };
        Ok(())
    }

    /// Marks the in-flight lookup as finished and starts the cooldown.
    ///
    /// Ignored when no lookup is in flight.
    pub fn complete_lookup(&mut self, completed_at: Instant) {
        match &self.state {
            GateState::LookingUp { barcode } => {
                let until = completed_at + self.cooldown;
                debug!(barcode = %barcode, cooldown_ms = self.cooldown.as_millis() as u64, "Lookup complete, cooling down");
                self.state = GateState::CoolingDown { until };
            }
            other => {
                debug!(state = ?other, "complete_lookup called with no lookup in flight");
            }
        }
    }

    /// Returns when the gate re-arms, if it is cooling down.
    pub fn rearm_deadline(&self) -> Option<Instant> {
        match self.state {
            GateState::CoolingDown { until } => Some(until),
            _ => None,
        }
    }

    /// Re-arms the gate if its cooldown has elapsed at `now`.
    ///
    /// Returns true if this call performed the transition.
    pub fn poll_rearm(&mut self, now: Instant) -> bool {
        match self.state {
            GateState::CoolingDown { until } if now >= until => {
                self.state = GateState::Armed;
                debug!("Scanner re-armed");
                true
            }
            _ => false,
        }
    }

    fn reject(&self, event: &ScanEvent, reason: RejectReason) -> ScanDecision {
        debug!(barcode = %event.barcode, ?reason, "Scan rejected");
        ScanDecision::Rejected(reason)
    }
}

impl Default for ScanDebouncer {
    fn default() -> Self {
        ScanDebouncer::new(DEFAULT_COOLDOWN)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
