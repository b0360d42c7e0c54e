use serde::{Deserialize, Serialize};
use thiserror::Error;

use kv_storage::{parse_json, KeyValueStorage, USERS_KEY};
use state_error::StateError;

/// One credential record in the user directory.
///
/// Serde renames keep the persisted JSON field names stable across
/// schema versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Registration form input. The three identity fields are trimmed before
/// validation; passwords are compared verbatim.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Please complete all fields.")]
    IncompleteFields,
    #[error("Username must be 3-20 chars (letters, numbers, . or _).")]
    InvalidUsername,
    #[error("Enter a valid email.")]
    InvalidEmail,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Email already registered.")]
    EmailTaken,
    #[error("Username already taken.")]
    UsernameTaken,
    #[error(transparent)]
    Storage(#[from] StateError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Enter email or username.")]
    MissingIdentifier,
    #[error("Password is required.")]
    MissingPassword,
    #[error("No account found with this email/username.")]
    NoSuchUser,
    #[error("Incorrect password.")]
    BadPassword,
}

/// Read the credential directory, healing malformed entries.
///
/// A missing or unparseable directory is empty; non-object entries are
/// dropped; a missing username is derived from the email local part or
/// the full name.
pub fn load_directory<S: KeyValueStorage>(store: &S) -> Vec<UserRecord> {
    let raw = match store.get(USERS_KEY) {
        Some(raw) => raw,
        None => return Vec::new(),
    };
    let values: Vec<serde_json::Value> = match parse_json(raw) {
        Ok(values) => values,
        Err(_) => {
            log::warn!("user directory is unreadable, treating as empty");
            return Vec::new();
        }
    };
    values.into_iter().filter_map(heal_record).collect()
}

/// Persist the whole directory; records are never rewritten in place.
pub fn save_directory<S: KeyValueStorage>(
    store: &mut S,
    users: &[UserRecord],
) -> Result<(), StateError> {
    let raw = serde_json::to_string(users)?;
    store.set(USERS_KEY, &raw)
}

/// Validate and append a new account. Does not establish a session; the
/// user signs in explicitly afterwards.
pub fn register<S: KeyValueStorage>(
    store: &mut S,
    candidate: &Registration,
) -> Result<(), RegisterError> {
    let full_name = candidate.full_name.trim();
    let username = candidate.username.trim();
    let email = candidate.email.trim();

    if full_name.is_empty()
        || username.is_empty()
        || email.is_empty()
        || candidate.password.is_empty()
        || candidate.confirm_password.is_empty()
    {
        return Err(RegisterError::IncompleteFields);
    }
    if !is_valid_username(username) {
        return Err(RegisterError::InvalidUsername);
    }
    if !is_valid_email(email) {
        return Err(RegisterError::InvalidEmail);
    }
    if candidate.password != candidate.confirm_password {
        return Err(RegisterError::PasswordMismatch);
    }

    let mut users = load_directory(store);
    if users
        .iter()
        .any(|user| user.email.eq_ignore_ascii_case(email))
    {
        return Err(RegisterError::EmailTaken);
    }
    if users
        .iter()
        .any(|user| user.username.eq_ignore_ascii_case(username))
    {
        return Err(RegisterError::UsernameTaken);
    }

    users.push(UserRecord {
        full_name: full_name.to_owned(),
        username: username.to_owned(),
        email: email.to_owned(),
        password: candidate.password.clone(),
    });
    save_directory(store, &users)?;
    log::info!("registered account {}", username);
    Ok(())
}

/// Look up an account by email or username (case-insensitive, trimmed)
/// and check the password verbatim.
pub fn login<S: KeyValueStorage>(
    store: &S,
    identifier: &str,
    password: &str,
) -> Result<UserRecord, LoginError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(LoginError::MissingIdentifier);
    }
    if password.trim().is_empty() {
        return Err(LoginError::MissingPassword);
    }

    let matched = load_directory(store)
        .into_iter()
        .find(|user| {
            user.email.eq_ignore_ascii_case(identifier)
                || user.username.eq_ignore_ascii_case(identifier)
        })
        .ok_or(LoginError::NoSuchUser)?;

    if matched.password != password {
        return Err(LoginError::BadPassword);
    }
    Ok(matched)
}

fn heal_record(value: serde_json::Value) -> Option<UserRecord> {
    let object = value.as_object()?;
    let field = |name: &str| {
        object
            .get(name)
            .and_then(|value| value.as_str())
            .unwrap_or("")
            .to_owned()
    };

    let full_name = field("fullName");
    let email = field("email");
    let mut username = field("username");
    if username.is_empty() {
        let seed = if email.is_empty() { &full_name } else { &email };
        username = derive_username_fallback(seed);
    }

    Some(UserRecord {
        full_name,
        username,
        email,
        password: field("password"),
    })
}

/// Best-effort username from an email local part or a display name,
/// restricted to the username alphabet.
fn derive_username_fallback(seed: &str) -> String {
    let local = seed.split('@').next().unwrap_or("");
    let clean: String = local
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '_')
        .collect();
    if clean.is_empty() {
        "user".to_owned()
    } else {
        clean
    }
}

fn is_valid_username(username: &str) -> bool {
    (3..=20).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
}

// Minimal `x@y.z` shape, nothing more. Real validation happens when the
// backend sends mail.
fn is_valid_email(email: &str) -> bool {
    match email.find('@') {
        Some(at) if at > 0 => {
            let domain = &email[at + 1..];
            match domain.rfind('.') {
                Some(dot) => dot > 0 && dot + 1 < domain.len(),
                None => false,
            }
        }
        _ => false,
    }
}
