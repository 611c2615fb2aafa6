//! Where LingoClip keeps its data on this machine.

use std::path::PathBuf;

use lc_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "lingoclip";

/// Resolves the data root as `<data-local>/lingoclip[-<profile>]`.
#[derive(Debug, Clone, Default)]
pub struct DataDirLocator {
    profile: Option<String>,
    base: Option<PathBuf>,
}

impl DataDirLocator {
    /// An empty profile name means the default profile.
    pub fn for_profile(profile: Option<&str>) -> Self {
        Self {
            profile: profile.filter(|p| !p.is_empty()).map(str::to_string),
            base: None,
        }
    }

    /// Resolve under `base` instead of the system data-local directory.
    pub fn under(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    fn dir_name(&self) -> String {
        match &self.profile {
            Some(profile) => format!("{APP_DIR_NAME}-{profile}"),
            None => APP_DIR_NAME.to_string(),
        }
    }
}

impl AppDirsPort for DataDirLocator {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base = match &self.base {
            Some(base) => base.clone(),
            None => dirs::data_local_dir().ok_or(AppDirsError::DataLocalDirUnavailable)?,
        };
        Ok(AppDirs {
            app_data_root: base.join(self.dir_name()),
        })
    }
}
