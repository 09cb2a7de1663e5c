use std::path::PathBuf;

use tracing::debug;

use crate::{config, types::FolderSettings};

/// The output folder remembered between runs.
pub struct FolderPreference {
    path: PathBuf,
}

impl FolderPreference {
    pub fn new() -> Self {
        Self {
            path: config::data_path("config.json"),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Last saved folder, or the platform download directory when nothing
    /// usable is stored.
    pub async fn load(&self) -> PathBuf {
        match self.read().await {
            Ok(settings) => settings.last_folder,
            Err(e) => {
                debug!("no remembered folder in {}: {}", self.path.display(), e);
                Self::default_folder()
            }
        }
    }

    pub async fn save(&self, folder: PathBuf) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&FolderSettings {
            last_folder: folder,
        })
        .map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    async fn read(&self) -> Result<FolderSettings, String> {
        let json = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }

    pub fn default_folder() -> PathBuf {
        dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for FolderPreference {
    fn default() -> Self {
        Self::new()
    }
}
