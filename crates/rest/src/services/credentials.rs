//! Credential store adapter: signup and login against the user collection.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use matdb_persistence::core::CredentialStorage;
use matdb_persistence::error::{ResourceError, StorageError};
use matdb_persistence::types::UserCredential;
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::RestError;

/// Authentication and signup failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user is registered under the email.
    #[error("no user registered for this email")]
    NoSuchUser,

    /// The password does not match the stored hash.
    #[error("password does not match")]
    BadPassword,

    /// Signup password and repeat differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Signup email is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Signup email is not an address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The user collection failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Hashing or hash decoding failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl From<AuthError> for RestError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NoSuchUser => RestError::InvalidCredentials,
            AuthError::BadPassword => RestError::BadPassword,
            AuthError::PasswordMismatch => RestError::PasswordMismatch,
            AuthError::EmailTaken => RestError::EmailTaken,
            AuthError::InvalidEmail(email) => RestError::InvalidEmail { email },
            AuthError::Storage(e) => e.into(),
            AuthError::Hashing(message) => RestError::InternalError { message },
        }
    }
}

/// Signup and login over a [`CredentialStorage`].
pub struct CredentialService<'a, S: ?Sized> {
    storage: &'a S,
}

impl<'a, S> CredentialService<'a, S>
where
    S: CredentialStorage + ?Sized,
{
    /// Creates a credential service over `storage`.
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Checks an email/password pair and returns the stored user.
    pub async fn verify_login(&self, email: &str, password: &str) -> Result<UserCredential, AuthError> {
        let Some(user) = self.storage.find_user(email).await? else {
            warn!(email = %email, "Login for unknown email");
            return Err(AuthError::NoSuchUser);
        };

        let hash = user.password_hash.clone();
        let password = password.to_string();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let matches = match verified {
            Ok(matches) => matches,
            Err(e) => {
                warn!(email = %email, error = %e, "Stored password hash is unreadable");
                return Err(AuthError::BadPassword);
            }
        };
        if !matches {
            warn!(email = %email, "Login with wrong password");
            return Err(AuthError::BadPassword);
        }

        debug!(email = %email, "Login verified");
        Ok(user)
    }

    /// Registers a new user.
    ///
    /// Checks run in order: password repeat, email shape, then uniqueness at
    /// insert time.
    pub async fn create_user(
        &self,
        first_name: &str,
        email: &str,
        password: &str,
        repeat_password: &str,
    ) -> Result<(), AuthError> {
        if password != repeat_password {
            return Err(AuthError::PasswordMismatch);
        }
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }

        let plain = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&plain))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))??;

        let user = UserCredential {
            email: email.to_string(),
            first_name: first_name.to_string(),
            password_hash,
        };

        match self.storage.insert_user(user).await {
            Ok(()) => {
                info!(email = %email, "Registered user");
                Ok(())
            }
            Err(StorageError::Resource(ResourceError::AlreadyExists { .. })) => {
                Err(AuthError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Hashes a password with Argon2id and a fresh random salt, in PHC format.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Modular-crypt prefixes of bcrypt hashes written by earlier signups.
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Checks a password against a stored hash.
///
/// New hashes are Argon2id in PHC format; bcrypt hashes are still accepted.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    if BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix)) {
        return bcrypt::verify(password, hash).map_err(|e| AuthError::Hashing(e.to_string()));
    }

    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Accepts `local@domain.tld` with no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use matdb_persistence::backends::memory::MemoryBackend;

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let first = hash_password("correct horse").unwrap();
        let second = hash_password("correct horse").unwrap();

        assert_ne!(first, "correct horse");
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &first).unwrap());
        assert!(!verify_password("battery staple", &first).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "not-a-hash"),
            Err(AuthError::Hashing(_))
        ));
    }

    #[test]
    fn test_bcrypt_hash_verifies() {
        let hash = bcrypt::hash("correct horse", 4).unwrap();
        assert!(hash.starts_with("$2b$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());

        let truncated = &hash[..20];
        assert!(matches!(
            verify_password("correct horse", truncated),
            Err(AuthError::Hashing(_))
        ));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ada@example.org"));
        assert!(is_valid_email("a.b+c@lab.uni.edu"));
        assert!(!is_valid_email("ada.example.org"));
        assert!(!is_valid_email("@example.org"));
        assert!(!is_valid_email("ada@localhost"));
        assert!(!is_valid_email("ada@@example.org"));
        assert!(!is_valid_email("ada @example.org"));
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let backend = MemoryBackend::new();
        let service = CredentialService::new(&backend);

        service
            .create_user("Ada", "ada@example.org", "pw1", "pw1")
            .await
            .unwrap();
        assert_eq!(backend.user_count(), 1);

        let user = service.verify_login("ada@example.org", "pw1").await.unwrap();
        assert_eq!(user.first_name, "Ada");
        assert_ne!(user.password_hash, "pw1");
    }

    #[tokio::test]
    async fn test_wrong_password_is_bad_password() {
        let backend = MemoryBackend::new();
        let service = CredentialService::new(&backend);
        service
            .create_user("Ada", "ada@example.org", "pw1", "pw1")
            .await
            .unwrap();

        let err = service.verify_login("ada@example.org", "pw2").await.unwrap_err();
        assert!(matches!(err, AuthError::BadPassword));

        let err = service.verify_login("bob@example.org", "pw1").await.unwrap_err();
        assert!(matches!(err, AuthError::NoSuchUser));
    }

    #[tokio::test]
    async fn test_login_with_bcrypt_row() {
        let backend = MemoryBackend::new();
        backend
            .insert_user(UserCredential {
                email: "old@example.org".to_string(),
                first_name: "Grace".to_string(),
                password_hash: bcrypt::hash("password", 4).unwrap(),
            })
            .await
            .unwrap();
        let service = CredentialService::new(&backend);

        let user = service.verify_login("old@example.org", "password").await.unwrap();
        assert_eq!(user.first_name, "Grace");

        let err = service.verify_login("old@example.org", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::BadPassword));
    }

    #[tokio::test]
    async fn test_unreadable_hash_is_bad_password() {
        let backend = MemoryBackend::new();
        backend
            .insert_user(UserCredential {
                email: "odd@example.org".to_string(),
                first_name: "Odd".to_string(),
                password_hash: "plaintext?".to_string(),
            })
            .await
            .unwrap();
        let service = CredentialService::new(&backend);

        let err = service.verify_login("odd@example.org", "plaintext?").await.unwrap_err();
        assert!(matches!(err, AuthError::BadPassword));
    }

    #[tokio::test]
    async fn test_mismatch_and_duplicate_email() {
        let backend = MemoryBackend::new();
        let service = CredentialService::new(&backend);

        let err = service
            .create_user("Ada", "ada@example.org", "pw1", "pw2")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
        assert_eq!(backend.user_count(), 0);

        service
            .create_user("Ada", "ada@example.org", "pw1", "pw1")
            .await
            .unwrap();
        let err = service
            .create_user("Ada", "ada@example.org", "pw3", "pw3")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(backend.user_count(), 1);
    }

    #[test]
    fn test_rest_error_mapping() {
        assert_eq!(RestError::from(AuthError::NoSuchUser).code(), "invalid_credentials");
        assert_eq!(RestError::from(AuthError::BadPassword).code(), "bad_password");
        assert_eq!(
            RestError::from(AuthError::InvalidEmail("x".to_string())).code(),
            "invalid_email"
        );
    }
}
