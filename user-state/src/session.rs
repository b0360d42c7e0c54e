use thiserror::Error;

use crate::directory::UserRecord;
use kv_storage::{
    KeyValueStorage, CHAT_HISTORY_KEY, PROFILE_BIO_KEY, PROFILE_LOCATION_KEY,
    USER_EMAIL_KEY, USER_FULLNAME_KEY, USER_NAME_KEY,
};
use state_error::{Result, StateError};

/// Fixed initials shown when no name is available at all.
const PLACEHOLDER_INITIALS: &str = "PV";

/// Editable profile fields: the session identity plus the extension
/// scalars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub location: String,
    pub bio: String,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Full name and username are required.")]
    MissingName,
    #[error(transparent)]
    Storage(#[from] StateError),
}

/// Establish the session for an authenticated account.
pub fn sign_in<S: KeyValueStorage>(
    store: &mut S,
    user: &UserRecord,
) -> Result<()> {
    store.set(USER_NAME_KEY, &user.username)?;
    store.set(USER_FULLNAME_KEY, &user.full_name)?;
    store.set(USER_EMAIL_KEY, &user.email)
}

/// The signed-in username. The session is signed in iff this is
/// non-empty.
pub fn current_username<S: KeyValueStorage>(store: &S) -> Option<String> {
    let name = store.get(USER_NAME_KEY)?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_owned())
    }
}

pub fn is_signed_in<S: KeyValueStorage>(store: &S) -> bool {
    current_username(store).is_some()
}

/// Destroy the session: the three identity scalars and the chat
/// transcript go together. Removing only part of them is a defect.
pub fn logout<S: KeyValueStorage>(store: &mut S) -> Result<()> {
    store.remove(USER_NAME_KEY)?;
    store.remove(USER_FULLNAME_KEY)?;
    store.remove(USER_EMAIL_KEY)?;
    store.remove(CHAT_HISTORY_KEY)
}

pub fn load_profile<S: KeyValueStorage>(store: &S) -> Profile {
    let field = |key: &str| {
        store.get(key).map(str::trim).unwrap_or("").to_owned()
    };
    Profile {
        full_name: field(USER_FULLNAME_KEY),
        username: field(USER_NAME_KEY),
        email: field(USER_EMAIL_KEY),
        location: field(PROFILE_LOCATION_KEY),
        bio: field(PROFILE_BIO_KEY),
    }
}

/// Overwrite identity and extension scalars together.
///
/// Known gap kept from the original behavior: the new username/email are
/// not re-checked against the directory, so a profile edit can collide
/// with another account.
pub fn save_profile<S: KeyValueStorage>(
    store: &mut S,
    profile: &Profile,
) -> std::result::Result<(), ProfileError> {
    let full_name = profile.full_name.trim();
    let username = profile.username.trim();
    if full_name.is_empty() || username.is_empty() {
        return Err(ProfileError::MissingName);
    }

    store.set(USER_FULLNAME_KEY, full_name)?;
    store.set(USER_NAME_KEY, username)?;
    store.set(USER_EMAIL_KEY, profile.email.trim())?;
    store.set(PROFILE_LOCATION_KEY, profile.location.trim())?;
    store.set(PROFILE_BIO_KEY, profile.bio.trim())?;
    Ok(())
}

/// On-screen name: full name when set, else username.
pub fn display_name<S: KeyValueStorage>(store: &S) -> Option<String> {
    let full_name =
        store.get(USER_FULLNAME_KEY).map(str::trim).unwrap_or("");
    if !full_name.is_empty() {
        return Some(full_name.to_owned());
    }
    current_username(store)
}

/// Avatar initials: first letters of the first two whitespace-separated
/// tokens, or the first two characters of a single token, upper-cased.
pub fn initials(name: &str) -> String {
    let mut tokens = name.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (None, _) => PLACEHOLDER_INITIALS.to_owned(),
        (Some(only), None) => {
            only.chars().take(2).collect::<String>().to_uppercase()
        }
        (Some(first), Some(second)) => {
            let mut out = String::new();
            out.extend(first.chars().next());
            out.extend(second.chars().next());
            out.to_uppercase()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kv_storage::FileStorage;
    use tempdir::TempDir;

    fn test_store(temp_dir: &TempDir) -> FileStorage {
        FileStorage::new(
            "TestStorage".to_string(),
            &temp_dir.path().join("state.json"),
        )
    }

    fn marie() -> UserRecord {
        UserRecord {
            full_name: "Marie Curie".to_string(),
            username: "marie".to_string(),
            email: "marie@curie.fr".to_string(),
            password: "s3cret!".to_string(),
        }
    }

    #[test]
    fn test_sign_in_establishes_the_session() {
        let temp_dir = TempDir::new("pv").unwrap();
        let mut store = test_store(&temp_dir);

        assert!(!is_signed_in(&store));
        sign_in(&mut store, &marie()).unwrap();
        assert_eq!(current_username(&store).as_deref(), Some("marie"));
        assert_eq!(display_name(&store).as_deref(), Some("Marie Curie"));
    }

    #[test]
    fn test_logout_clears_identity_and_chat_together() {
        let temp_dir = TempDir::new("pv").unwrap();
        let mut store = test_store(&temp_dir);
        sign_in(&mut store, &marie()).unwrap();
        store.set(CHAT_HISTORY_KEY, "[]").unwrap();

        logout(&mut store).unwrap();

        assert!(!store.contains(USER_NAME_KEY));
        assert!(!store.contains(USER_FULLNAME_KEY));
        assert!(!store.contains(USER_EMAIL_KEY));
        assert!(!store.contains(CHAT_HISTORY_KEY));
    }

    #[test]
    fn test_blank_username_reads_as_signed_out() {
        let temp_dir = TempDir::new("pv").unwrap();
        let mut store = test_store(&temp_dir);
        store.set(USER_NAME_KEY, "   ").unwrap();
        assert!(!is_signed_in(&store));
        assert_eq!(display_name(&store), None);
    }

    #[test]
    fn test_profile_round_trip_and_validation() {
        let temp_dir = TempDir::new("pv").unwrap();
        let mut store = test_store(&temp_dir);
        sign_in(&mut store, &marie()).unwrap();

        let mut profile = load_profile(&store);
        assert_eq!(profile.username, "marie");
        profile.location = " Paris ".to_string();
        profile.bio = "Physicist".to_string();
        save_profile(&mut store, &profile).unwrap();
        assert_eq!(load_profile(&store).location, "Paris");

        profile.username = "  ".to_string();
        let err = save_profile(&mut store, &profile).unwrap_err();
        assert!(matches!(err, ProfileError::MissingName));
        // The failed save left the previous identity in place.
        assert_eq!(current_username(&store).as_deref(), Some("marie"));
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let temp_dir = TempDir::new("pv").unwrap();
        let mut store = test_store(&temp_dir);
        store.set(USER_NAME_KEY, "marie").unwrap();
        assert_eq!(display_name(&store).as_deref(), Some("marie"));
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Marie Curie"), "MC");
        assert_eq!(initials("marie sklodowska curie"), "MS");
        assert_eq!(initials("marie"), "MA");
        assert_eq!(initials("m"), "M");
        assert_eq!(initials("   "), "PV");
        assert_eq!(initials(""), "PV");
    }
}
