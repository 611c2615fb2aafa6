/// Switches of the clipboard monitor that the application layer flips.
///
/// 剪贴板监控开关端口。
///
/// Both calls are idempotent and take effect before the next poll.
pub trait MonitorControlPort: Send + Sync {
    /// Enable or disable clipboard monitoring globally.
    fn set_monitoring(&self, enabled: bool);

    fn is_monitoring(&self) -> bool;

    /// Suspend polling while a monitor-raised notification is on screen.
    fn set_notification_visible(&self, visible: bool);
}
