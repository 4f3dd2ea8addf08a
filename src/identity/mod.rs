//! Identity provider boundary used by sign-up and sign-in.

pub mod cognito;

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

pub use cognito::CognitoIdentity;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// The user pool or app client could not be resolved from its name.
    #[error("Failed to resolve identity pool: {0}")]
    Resolution(String),

    /// The provider rejected the call (bad credentials, existing user, ...).
    #[error("{0}")]
    Provider(String),
}

/// A user attribute as a name/value pair, e.g. `email_verified = "true"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

impl UserAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Result of a password authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Authentication succeeded; carries the ID token.
    Token(String),
    /// The user still holds a temporary password and must set a new one.
    NewPasswordRequired { session: String },
}

#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    async fn create_user(
        &self,
        username: &str,
        attributes: &[UserAttribute],
        temporary_password: &str,
    ) -> Result<(), IdentityError>;

    async fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome, IdentityError>;

    /// Answer a new-password challenge issued by [`IdentityProvider::authenticate`].
    async fn complete_new_password(
        &self,
        username: &str,
        session: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;
}

/// Generate a throwaway temporary password that satisfies the default Cognito policy
/// (upper, lower, digit and symbol, at least 8 characters).
pub fn generate_temp_password() -> String {
    const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
    const LOWER: &[u8] = b"abcdefghijkmnpqrstuvwxyz";
    const DIGITS: &[u8] = b"23456789";
    const SYMBOLS: &[u8] = b"!#$%&*+-=?@^_";

    let mut rng = rand::rng();
    let mut pick = |set: &[u8]| set[rng.random_range(0..set.len())];

    let mut chars: Vec<u8> = vec![pick(UPPER), pick(LOWER), pick(DIGITS), pick(SYMBOLS)];
    for i in 0..12 {
        let set = match i % 3 {
            0 => UPPER,
            1 => LOWER,
            _ => DIGITS,
        };
        chars.push(pick(set));
    }
    chars.shuffle(&mut rand::rng());

    chars.into_iter().map(char::from).collect()
}
