//! Shared crate-wide constants.

use std::time::Duration;

/// Default poll interval for [`PopupEventLoop`](crate::pipeline::PopupEventLoop).
///
/// Sixteen milliseconds keeps the pump responsive at roughly display refresh
/// rate without busy-waiting the input thread. Hosts with their own frame
/// pacing can override via `set_poll_interval`.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(16);
