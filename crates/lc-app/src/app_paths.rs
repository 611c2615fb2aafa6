use std::path::PathBuf;

use lc_core::app_dirs::AppDirs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Directory holding `history.log` and `favorites.log`.
    pub activity_dir: PathBuf,
    pub settings_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_app_dirs(dirs: &AppDirs) -> Self {
        Self {
            activity_dir: dirs.app_data_root.clone(),
            settings_path: dirs.app_data_root.join("settings.json"),
            logs_dir: dirs.app_data_root.join("logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_paths_derives_concrete_locations_from_app_data_root() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/lingoclip"),
        };

        let paths = AppPaths::from_app_dirs(&dirs);

        assert_eq!(paths.activity_dir, PathBuf::from("/tmp/lingoclip"));
        assert_eq!(paths.settings_path, PathBuf::from("/tmp/lingoclip/settings.json"));
        assert_eq!(paths.logs_dir, PathBuf::from("/tmp/lingoclip/logs"));
    }
}
