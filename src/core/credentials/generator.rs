//! Random string generation

use crate::domain::{RecoError, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric string of `length` characters
///
/// Characters are drawn from `[A-Za-z0-9]` using the thread-local
/// cryptographically secure generator.
///
/// # Errors
///
/// Returns `InvalidArgument` when `length` is zero.
pub fn generate(length: usize) -> Result<String> {
    if length == 0 {
        return Err(RecoError::InvalidArgument(
            "random string length must be greater than zero".to_string(),
        ));
    }

    Ok(rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1)]
    #[test_case(10)]
    #[test_case(30)]
    #[test_case(128)]
    fn test_generate_length_and_alphabet(length: usize) {
        let value = generate(length).unwrap();
        assert_eq!(value.chars().count(), length);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_zero_length_is_rejected() {
        assert!(matches!(generate(0), Err(RecoError::InvalidArgument(_))));
    }

    #[test]
    fn test_generate_values_differ() {
        assert_ne!(generate(30).unwrap(), generate(30).unwrap());
    }
}
