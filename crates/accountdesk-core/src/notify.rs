//! Collaborators the controllers report to: the notification surface and
//! the yes/no confirmation gate.

use std::sync::Arc;

/// Notifier reference type
pub type NotifierRef = Arc<dyn Notifier>;

/// Confirmation gate reference type
pub type ConfirmationGateRef = Arc<dyn ConfirmationGate>;

/// Operator-facing outcome messages. Rendering is up to the implementor.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

/// Synchronous yes/no question asked before destructive operations
pub trait ConfirmationGate: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Messages shown for each operation outcome
pub mod messages {
    pub const LOAD_FAILED: &str = "Failed to load accounts.";
    pub const CREATE_SUCCESS: &str = "Account created successfully!";
    pub const CREATE_FAILED: &str = "Failed to create account.";
    pub const UPDATE_SUCCESS: &str = "Account updated successfully!";
    pub const UPDATE_FAILED: &str = "Failed to update account.";
    pub const DELETE_PROMPT: &str = "Do you really want to delete this account?";
    pub const DELETE_SUCCESS: &str = "Account deleted successfully!";
    pub const DELETE_FAILED: &str = "Failed to delete account.";
}

/// Notifier that writes outcomes to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_success(&self, message: &str) {
        log::info!(target: "accountdesk::notify", "{}", message);
    }

    fn notify_error(&self, message: &str) {
        log::warn!(target: "accountdesk::notify", "{}", message);
    }
}

/// Gate with a fixed answer, for non-interactive use
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmation(pub bool);

impl ConfirmationGate for FixedConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        log::debug!("{} -> {}", prompt, if self.0 { "yes" } else { "no" });
        self.0
    }
}
