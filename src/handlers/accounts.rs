//! Sign-up and sign-in against the identity provider.

use serde_json::{Value, json};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::identity::{AuthOutcome, IdentityProvider, UserAttribute, generate_temp_password};
use crate::models::{SignInRequest, SignUpRequest};

/// Create an account with a permanent password.
///
/// The user is created with a throwaway temporary password (no invitation
/// message). The handler then signs in with it once and answers the resulting
/// new-password challenge with the requested password.
pub async fn handle_sign_up<I: IdentityProvider>(request: SignUpRequest, identity: &I) -> Result<Value> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let full_name = format!("{} {}", request.first_name, request.last_name).trim().to_string();
    let attributes = [
        UserAttribute::new("email", &request.email),
        UserAttribute::new("name", full_name),
        UserAttribute::new("email_verified", "true"),
    ];
    let temporary_password = generate_temp_password();

    identity.create_user(&request.email, &attributes, &temporary_password).await?;

    if let AuthOutcome::NewPasswordRequired { session } =
        identity.authenticate(&request.email, &temporary_password).await?
    {
        identity
            .complete_new_password(&request.email, &session, &request.password)
            .await?;
    }

    info!(email = %request.email, "Sign-up completed");
    Ok(json!({ "message": "Sign-up successful" }))
}

pub async fn handle_sign_in<I: IdentityProvider>(request: SignInRequest, identity: &I) -> Result<Value> {
    match identity.authenticate(&request.email, &request.password).await? {
        AuthOutcome::Token(token) => Ok(json!({ "accessToken": token })),
        AuthOutcome::NewPasswordRequired { .. } => Err(ApiError::validation("Password change required before sign-in")),
    }
}
