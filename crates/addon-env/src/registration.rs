//! Messages exchanged with the host when an addon is installed

use serde::{Deserialize, Serialize};

/// Result of an addon's install hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallResponse {
    /// Installation finished; the host can activate the instance.
    Complete,
    /// The user must visit this URL to finish installing.
    Redirect(String),
}
