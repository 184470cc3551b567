// Helper functions for safe logging and serialization

use serde::{Deserialize, Deserializer};

/// Masks tokens for safe logging
/// Shows only first and last 4 characters
///
/// # Example
/// ```
/// use company_api::common::safe_token_log;
///
/// let masked = safe_token_log("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
/// assert_eq!(masked, "eyJh...VCJ9");
/// ```
pub fn safe_token_log(token: &str) -> String {
    if token.len() > 8 && token.is_ascii() {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "***".to_string()
    }
}

/// Distinguishes an absent field from an explicit `null`.
///
/// Used with `#[serde(default, deserialize_with = "deserialize_nullable")]`:
/// a missing key stays `None`, `null` becomes `Some(None)`, and a value
/// becomes `Some(Some(value))`.
pub fn deserialize_nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
