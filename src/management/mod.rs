mod folder;
mod token;

pub use folder::FolderPreference;
pub use token::TokenManager;
