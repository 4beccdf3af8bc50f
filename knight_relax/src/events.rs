/// Knight relaxation network — Diagnostic Events
///
/// Events are pure data describing what the solver observed. Each one is
/// logged through `tracing` when emitted; the engine additionally keeps the
/// per-attempt events in memory.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, trace, warn};

use crate::domain::EdgeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RelaxEvent {
    /// An edge's output differs from its epoch-start snapshot.
    OutputFlipped { edge: EdgeId, output: u8 },
    /// A relaxation run settled before the epoch cap.
    Converged { attempt: u64, epochs: u64 },
    /// A relaxation run hit the epoch cap without settling.
    EpochsExpired { attempt: u64, epochs: u64 },
    AttemptRejected { attempt: u64, reason: String },
    TourAccepted { attempt: u64 },
}

impl RelaxEvent {
    /// Write the event to the log at its level.
    pub fn emit(&self) {
        match self {
            RelaxEvent::OutputFlipped { edge, output } => {
                trace!(edge = *edge, output = *output, "output of neuron changed");
            }
            RelaxEvent::Converged { attempt, epochs } => {
                debug!(attempt = *attempt, epochs = *epochs, "network converged");
            }
            RelaxEvent::EpochsExpired { attempt, epochs } => {
                warn!(attempt = *attempt, epochs = *epochs, "epochs expired");
            }
            RelaxEvent::AttemptRejected { attempt, reason } => {
                debug!(attempt = *attempt, %reason, "configuration rejected, restarting");
            }
            RelaxEvent::TourAccepted { attempt } => {
                info!(attempt = *attempt, "knight's tour accepted");
            }
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn attempt(&self) -> Option<u64> {
        match *self {
            RelaxEvent::OutputFlipped { .. } => None,
            RelaxEvent::Converged { attempt, .. }
            | RelaxEvent::EpochsExpired { attempt, .. }
            | RelaxEvent::AttemptRejected { attempt, .. }
            | RelaxEvent::TourAccepted { attempt } => Some(attempt),
        }
    }
}
