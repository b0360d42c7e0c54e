use serde::de::DeserializeOwned;
use state_error::{Result, StateError};

/// Decode a persisted JSON value as `T`.
///
/// Corruption is reported to the caller, which answers with a typed
/// empty default; it is never raised to the user.
pub fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|_| StateError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_maps_corruption_to_parse() {
        let parsed: Vec<String> = parse_json(r#"["a","b"]"#).unwrap();
        assert_eq!(parsed, vec!["a".to_string(), "b".to_string()]);

        let corrupt: Result<Vec<String>> = parse_json("{oops");
        assert!(matches!(corrupt, Err(StateError::Parse)));
    }
}
