use std::env;

pub const API_KEY_ENV: &str = "CMS_API_KEY";

#[cfg(not(test))]
const API_KEY_VAR: &str = API_KEY_ENV;

#[cfg(test)]
const API_KEY_VAR: &str = "TEST_CMS_API_KEY";

/// API key from the environment, ignoring empty values.
pub fn get_api_key() -> Option<String> {
    env::var(API_KEY_VAR).ok().filter(|key| !key.trim().is_empty())
}

/// An explicitly passed key wins over the environment.
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    explicit
        .filter(|key| !key.trim().is_empty())
        .or_else(get_api_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_from_environment() {
        // Save initial state of environment variable
        let original_key = env::var(API_KEY_VAR).ok();

        unsafe {
            env::set_var(API_KEY_VAR, "env-key");
        }
        assert_eq!(get_api_key().as_deref(), Some("env-key"));
        assert_eq!(resolve_api_key(None).as_deref(), Some("env-key"));
        assert_eq!(
            resolve_api_key(Some("flag-key".to_string())).as_deref(),
            Some("flag-key")
        );
        assert_eq!(resolve_api_key(Some(String::new())).as_deref(), Some("env-key"));

        unsafe {
            env::set_var(API_KEY_VAR, "  ");
        }
        assert_eq!(get_api_key(), None);

        unsafe {
            env::remove_var(API_KEY_VAR);
        }
        assert_eq!(get_api_key(), None);
        assert_eq!(resolve_api_key(None), None);

        // Restore environment variable to original state
        unsafe {
            match original_key {
                Some(value) => env::set_var(API_KEY_VAR, value),
                None => env::remove_var(API_KEY_VAR),
            }
        }
    }
}
