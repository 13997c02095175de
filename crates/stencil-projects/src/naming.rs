//! Project name rules

use crate::error::{Error, Result};

/// Check a project name against `^[a-z0-9-_]+$`
pub fn is_valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Validate a project name, returning `Error::InvalidProjectName` on mismatch
pub fn validate_project_name(name: &str) -> Result<()> {
    if is_valid_project_name(name) {
        Ok(())
    } else {
        Err(Error::invalid_project_name(name))
    }
}

/// Split on hyphens, capitalise each word and join with spaces
///
/// Only hyphens separate words; `my_app-2` becomes `My_app 2`.
pub fn title_case(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_project_name("my-app"));
        assert!(is_valid_project_name("app_2"));
        assert!(is_valid_project_name("42"));
        assert!(validate_project_name("shop-front").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_valid_project_name(""));
        assert!(!is_valid_project_name("MyApp"));
        assert!(!is_valid_project_name("my app"));
        assert!(!is_valid_project_name("@scope/app"));
        assert!(!is_valid_project_name("café"));
        assert!(matches!(
            validate_project_name("Bad.Name"),
            Err(Error::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("my-cool-app"), "My Cool App");
        assert_eq!(title_case("app"), "App");
        assert_eq!(title_case("my_app-2"), "My_app 2");
        assert_eq!(title_case("a--b"), "A  B");
    }
}
