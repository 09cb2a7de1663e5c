use std::path::PathBuf;

use crate::{info, management::FolderPreference, success, warning};

pub async fn folder(set: Option<PathBuf>) {
    let preference = FolderPreference::new();

    match set {
        Some(path) => match preference.save(path.clone()).await {
            Ok(_) => success!("Output folder set to {}", path.display()),
            Err(e) => warning!("Could not save folder path: {}", e),
        },
        None => info!("Output folder: {}", preference.load().await.display()),
    }
}

/// Picks the output folder for a command.
///
/// An explicit folder is remembered for the next run, otherwise the
/// remembered one is used.
pub async fn resolve_output_dir(output: Option<PathBuf>) -> PathBuf {
    let preference = FolderPreference::new();

    match output {
        Some(path) => {
            if let Err(e) = preference.save(path.clone()).await {
                warning!("Could not save folder path: {}", e);
            }
            path
        }
        None => preference.load().await,
    }
}
