mod monitor;
mod system;

pub use monitor::{ClipboardMonitor, MonitorGate, MonitorOptions};
pub use system::SystemClipboard;
