pub mod base_storage;
pub mod file_storage;
pub mod migrations;
mod utils;

pub use base_storage::KeyValueStorage;
pub use file_storage::FileStorage;
pub use utils::parse_json;

// Credential store
pub const USERS_KEY: &str = "pv-users";

// Session identity
pub const USER_NAME_KEY: &str = "pv-user-name";
pub const USER_FULLNAME_KEY: &str = "pv-user-fullname";
pub const USER_EMAIL_KEY: &str = "pv-user-email";

// Profile extension
pub const PROFILE_LOCATION_KEY: &str = "pv-profile-location";
pub const PROFILE_BIO_KEY: &str = "pv-profile-bio";

// UI preference
pub const THEME_KEY: &str = "pv-theme";

// Session-scoped chat transcript
pub const CHAT_HISTORY_KEY: &str = "pv-chat-history-v2";

/// Storage key holding the latest analysis snapshot of `username`.
pub fn analysis_key(username: &str) -> String {
    format!("analysisData:{}", username.trim().to_lowercase())
}

/// Storage key holding the uploaded flag of `username`.
pub fn uploaded_key(username: &str) -> String {
    format!("resumeUploaded:{}", username.trim().to_lowercase())
}
