use kv_storage::{KeyValueStorage, THEME_KEY};
use state_error::Result;

/// UI theme preference. Anything but the exact stored value "dark"
/// reads as light.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_stored(raw: Option<&str>) -> Theme {
        if raw == Some("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub fn stored_theme<S: KeyValueStorage>(store: &S) -> Theme {
    Theme::from_stored(store.get(THEME_KEY))
}

/// Persist `theme` unconditionally (page-load application path).
pub fn apply_theme<S: KeyValueStorage>(
    store: &mut S,
    theme: Theme,
) -> Result<()> {
    store.set(THEME_KEY, theme.as_str())
}

/// Persist `theme` if it differs from the active one. Returns whether
/// anything changed; setting the already-active theme is a no-op.
pub fn set_theme<S: KeyValueStorage>(
    store: &mut S,
    theme: Theme,
) -> Result<bool> {
    if stored_theme(store) == theme {
        return Ok(false);
    }
    apply_theme(store, theme)?;
    Ok(true)
}

/// Flip the active theme and return the new value.
pub fn toggle_theme<S: KeyValueStorage>(store: &mut S) -> Result<Theme> {
    let next = stored_theme(store).flipped();
    apply_theme(store, next)?;
    Ok(next)
}
