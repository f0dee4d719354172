//! Credential file entries
//!
//! Lines have the form `login:$5$<salt>$<hash>` where the hash is
//! SHA-256-crypt with the default 5000 rounds, the format web servers accept
//! for basic authentication.

use crate::domain::{RecoError, Result};
use rand::Rng;
use sha_crypt::{sha256_check, sha256_crypt_b64, Sha256Params};

/// Name of the credential file written into a secured chunk directory
pub const CREDENTIALS_FILE: &str = ".htpasswd";

const PREFIX: &str = "$5$";
const ROUNDS: usize = 5000;
const SALT_LENGTH: usize = 16;
const CRYPT_ALPHABET: &[u8; 64] =
    b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Random salt drawn from the crypt alphabet
pub fn generate_salt() -> String {
    let mut rng = rand::thread_rng();
    (0..SALT_LENGTH)
        .map(|_| CRYPT_ALPHABET[rng.gen_range(0..CRYPT_ALPHABET.len())] as char)
        .collect()
}

/// Hash `password` with SHA-256-crypt
///
/// Salts longer than 16 characters are truncated.
///
/// # Errors
///
/// Returns `InvalidArgument` if the salt is empty or contains characters
/// outside `[./0-9A-Za-z]`.
///
/// # Examples
///
/// ```
/// use reco_export::core::files::htpasswd::hash_password;
///
/// let hash = hash_password("Hello world!", "saltstring").unwrap();
/// assert_eq!(hash, "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5");
/// ```
pub fn hash_password(password: &str, salt: &str) -> Result<String> {
    if salt.is_empty() || !salt.bytes().all(|b| CRYPT_ALPHABET.contains(&b)) {
        return Err(RecoError::InvalidArgument(format!(
            "invalid crypt salt '{salt}'"
        )));
    }
    let salt = &salt[..salt.len().min(SALT_LENGTH)];
    let params = Sha256Params::new(ROUNDS)
        .map_err(|e| RecoError::InvalidArgument(format!("invalid crypt rounds: {e:?}")))?;
    let hash = sha256_crypt_b64(password.as_bytes(), salt.as_bytes(), &params)
        .map_err(|e| RecoError::Serialization(format!("SHA-256-crypt failed: {e:?}")))?;
    Ok(format!("{PREFIX}{salt}${hash}"))
}

/// Build one credential file line for `login`
///
/// # Errors
///
/// Returns `InvalidArgument` if the login is empty or contains `:`.
pub fn entry(login: &str, password: &str) -> Result<String> {
    if login.is_empty() || login.contains(':') {
        return Err(RecoError::InvalidArgument(format!(
            "invalid credential file login '{login}'"
        )));
    }
    Ok(format!("{login}:{}", hash_password(password, &generate_salt())?))
}

/// Check `password` against a `$5$salt$hash` string
pub fn verify(hash: &str, password: &str) -> bool {
    hash.starts_with(PREFIX) && sha256_check(password, hash).is_ok()
}

/// Hash stored for `login` in credential file contents
pub fn find_hash<'a>(contents: &'a str, login: &str) -> Option<&'a str> {
    contents
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| *name == login)
        .map(|(_, hash)| hash.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Hello world!", "saltstring", "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5" ; "short password")]
    #[test_case(
        "a-much-longer-password-that-exceeds-thirty-two-bytes",
        "abcdefghijklmnop",
        "$5$abcdefghijklmnop$onk6jyYn79HLem6kL3e9D8N15wp.GPAy9L2NSLg78CB" ;
        "password longer than digest"
    )]
    fn test_hash_password_known_values(password: &str, salt: &str, expected: &str) {
        assert_eq!(hash_password(password, salt).unwrap(), expected);
    }

    #[test]
    fn test_long_salt_is_truncated() {
        let hash = hash_password("secret", "abcdefghijklmnopqrstuvwxyz").unwrap();
        assert!(hash.starts_with("$5$abcdefghijklmnop$"));
        assert_eq!(hash, hash_password("secret", "abcdefghijklmnop").unwrap());
    }

    #[test_case("" ; "empty")]
    #[test_case("has$dollar" ; "dollar sign")]
    #[test_case("white space" ; "space")]
    fn test_invalid_salt_is_rejected(salt: &str) {
        assert!(matches!(
            hash_password("secret", salt),
            Err(RecoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_generate_salt_uses_crypt_alphabet() {
        let salt = generate_salt();
        assert_eq!(salt.len(), 16);
        assert!(salt.bytes().all(|b| CRYPT_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_entry_round_trips_through_verify() {
        let line = entry("Ab3dE6gH9j", "s3cret-password").unwrap();
        let hash = find_hash(&line, "Ab3dE6gH9j").unwrap();

        assert!(hash.starts_with("$5$"));
        assert!(verify(hash, "s3cret-password"));
        assert!(!verify(hash, "wrong-password"));
    }

    #[test]
    fn test_entry_rejects_colon_in_login() {
        assert!(entry("bad:login", "secret").is_err());
    }

    #[test]
    fn test_verify_accepts_externally_generated_hash() {
        let hash = "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5";
        assert!(verify(hash, "Hello world!"));
        assert!(!verify(hash, "Hello world"));
    }

    #[test]
    fn test_verify_rejects_foreign_formats() {
        assert!(!verify("$apr1$salt$hash", "secret"));
        assert!(!verify("plain", "secret"));
    }

    #[test]
    fn test_find_hash_missing_login() {
        assert_eq!(find_hash("other:$5$salt$hash\n", "login"), None);
    }
}
