// gate.rs — ConfirmationGate: decides whether a mutating call proceeds.
//
// The gate is stateless between calls. Three modes:
// - AutoApprove: every request is approved and logged.
// - Interactive: delegates to a pluggable callback.
// - DenyAll: every request is refused — the safe default for headless use.

use std::fmt;

/// Callback signature for interactive confirmation.
///
/// Receives the operation name (e.g., "Write File") and a human-readable
/// details block; returns whether the user approved.
pub type ConfirmFn = Box<dyn Fn(&str, &str) -> bool + Send + Sync>;

enum GateMode {
    AutoApprove,
    Interactive(ConfirmFn),
    DenyAll,
}

/// Decides whether a mutating operation proceeds.
///
/// `Send + Sync` so a client holding a gate can be shared across threads.
pub struct ConfirmationGate {
    mode: GateMode,
}

impl ConfirmationGate {
    /// A gate that approves everything (the `--auto-confirm` path).
    pub fn auto_approve() -> Self {
        Self {
            mode: GateMode::AutoApprove,
        }
    }

    /// A gate that delegates each decision to `callback`.
    pub fn interactive(callback: impl Fn(&str, &str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            mode: GateMode::Interactive(Box::new(callback)),
        }
    }

    /// A gate that refuses everything — for headless use where no one can
    /// answer a prompt.
    pub fn deny_all() -> Self {
        Self {
            mode: GateMode::DenyAll,
        }
    }

    /// Ask whether `operation` may proceed.
    pub fn confirm(&self, operation: &str, details: &str) -> bool {
        match &self.mode {
            GateMode::AutoApprove => {
                tracing::info!("auto-confirming operation: {}", operation);
                true
            }
            GateMode::Interactive(callback) => {
                tracing::info!("requesting confirmation for: {}", operation);
                let approved = callback(operation, details);
                if !approved {
                    tracing::warn!("operation declined: {}", operation);
                }
                approved
            }
            GateMode::DenyAll => {
                tracing::warn!("denying operation (no confirmer attached): {}", operation);
                false
            }
        }
    }
}

impl fmt::Debug for ConfirmationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            GateMode::AutoApprove => "AutoApprove",
            GateMode::Interactive(_) => "Interactive",
            GateMode::DenyAll => "DenyAll",
        };
        f.debug_struct("ConfirmationGate").field("mode", &mode).finish()
    }
}
