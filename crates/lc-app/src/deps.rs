//! # Application Dependencies / 应用依赖
//!
//! Groups the ports every application component is constructed from. Built
//! once at start-up and shared; there are no process-wide singletons.
//!
//! **Note / 注意**: This is NOT a Builder pattern. Every field is required.

use std::sync::Arc;

use lc_core::ports::*;

pub struct AppDeps {
    // Translation / 翻译
    pub translator: Arc<dyn TranslatorPort>,

    // Storage / 存储
    pub activity_log: Arc<dyn ActivityLogPort>,

    // Settings / 设置
    pub settings: Arc<dyn SettingsPort>,

    // Clipboard monitor switches / 监控开关
    pub monitor: Arc<dyn MonitorControlPort>,

    // UI / 界面
    pub ui: Arc<dyn UiPort>,

    // Time / 时间
    pub clock: Arc<dyn ClockPort>,
}
