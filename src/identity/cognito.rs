//! Cognito user pool implementation of [`IdentityProvider`].

use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use aws_sdk_cognitoidentityprovider::error::DisplayErrorContext;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType, ChallengeNameType, MessageActionType};
use tokio::sync::OnceCell;
use tracing::info;

use super::{AuthOutcome, IdentityError, IdentityProvider, UserAttribute};

/// Page size for the pool/client listings (60 is the service maximum).
const LIST_PAGE_SIZE: i32 = 60;

/// Resolved ids for the configured pool and app client.
#[derive(Debug, Clone)]
struct PoolHandles {
    user_pool_id: String,
    client_id: String,
}

/// Cognito-backed identity provider.
///
/// The pool and app client are configured by name. Their ids are looked up on
/// first use and kept for the lifetime of the process.
pub struct CognitoIdentity {
    client: CognitoClient,
    user_pool_name: String,
    client_name: String,
    handles: OnceCell<PoolHandles>,
}

fn provider_error(context: &str, err: impl std::error::Error) -> IdentityError {
    IdentityError::Provider(format!("{}: {}", context, DisplayErrorContext(&err)))
}

impl CognitoIdentity {
    pub fn new(client: CognitoClient, user_pool_name: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            client,
            user_pool_name: user_pool_name.into(),
            client_name: client_name.into(),
            handles: OnceCell::new(),
        }
    }

    async fn handles(&self) -> Result<&PoolHandles, IdentityError> {
        self.handles.get_or_try_init(|| self.resolve_handles()).await
    }

    async fn resolve_handles(&self) -> Result<PoolHandles, IdentityError> {
        let user_pool_id = self.find_user_pool_id().await?;
        let client_id = self.find_client_id(&user_pool_id).await?;
        info!(user_pool_id = %user_pool_id, client_id = %client_id, "Resolved Cognito pool handles");
        Ok(PoolHandles { user_pool_id, client_id })
    }

    async fn find_user_pool_id(&self) -> Result<String, IdentityError> {
        let mut next_token: Option<String> = None;
        loop {
            let page = self
                .client
                .list_user_pools()
                .max_results(LIST_PAGE_SIZE)
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| IdentityError::Resolution(format!("Failed to list user pools: {}", DisplayErrorContext(&e))))?;

            let found = page
                .user_pools()
                .iter()
                .find(|pool| pool.name() == Some(self.user_pool_name.as_str()))
                .and_then(|pool| pool.id());
            if let Some(id) = found {
                return Ok(id.to_string());
            }

            next_token = page.next_token().map(str::to_string);
            if next_token.is_none() {
                return Err(IdentityError::Resolution(format!("User pool {} not found", self.user_pool_name)));
            }
        }
    }

    async fn find_client_id(&self, user_pool_id: &str) -> Result<String, IdentityError> {
        let mut next_token: Option<String> = None;
        loop {
            let page = self
                .client
                .list_user_pool_clients()
                .user_pool_id(user_pool_id)
                .max_results(LIST_PAGE_SIZE)
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| IdentityError::Resolution(format!("Failed to list app clients: {}", DisplayErrorContext(&e))))?;

            let found = page
                .user_pool_clients()
                .iter()
                .find(|client| client.client_name() == Some(self.client_name.as_str()))
                .and_then(|client| client.client_id());
            if let Some(id) = found {
                return Ok(id.to_string());
            }

            next_token = page.next_token().map(str::to_string);
            if next_token.is_none() {
                return Err(IdentityError::Resolution(format!(
                    "Client {} not found in user pool {}",
                    self.client_name, user_pool_id
                )));
            }
        }
    }
}

impl IdentityProvider for CognitoIdentity {
    async fn create_user(
        &self,
        username: &str,
        attributes: &[UserAttribute],
        temporary_password: &str,
    ) -> Result<(), IdentityError> {
        let handles = self.handles().await?;

        let user_attributes = attributes
            .iter()
            .map(|attr| {
                AttributeType::builder()
                    .name(&attr.name)
                    .value(&attr.value)
                    .build()
                    .map_err(|e| IdentityError::Provider(format!("Failed to build {} attribute: {}", attr.name, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .admin_create_user()
            .user_pool_id(&handles.user_pool_id)
            .username(username)
            .set_user_attributes(Some(user_attributes))
            .temporary_password(temporary_password)
            .message_action(MessageActionType::Suppress)
            .send()
            .await
            .map_err(|e| provider_error("Could not create user", e))?;

        Ok(())
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome, IdentityError> {
        let handles = self.handles().await?;

        let output = self
            .client
            .admin_initiate_auth()
            .user_pool_id(&handles.user_pool_id)
            .client_id(&handles.client_id)
            .auth_flow(AuthFlowType::AdminUserPasswordAuth)
            .auth_parameters("USERNAME", username)
            .auth_parameters("PASSWORD", password)
            .send()
            .await
            .map_err(|e| provider_error("Authentication failed", e))?;

        if output.challenge_name() == Some(&ChallengeNameType::NewPasswordRequired) {
            let session = output
                .session()
                .ok_or_else(|| IdentityError::Provider("New password challenge without a session".to_string()))?;
            return Ok(AuthOutcome::NewPasswordRequired { session: session.to_string() });
        }

        output
            .authentication_result()
            .and_then(|result| result.id_token())
            .map(|token| AuthOutcome::Token(token.to_string()))
            .ok_or_else(|| IdentityError::Provider("Authentication returned no token".to_string()))
    }

    async fn complete_new_password(
        &self,
        username: &str,
        session: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let handles = self.handles().await?;

        self.client
            .admin_respond_to_auth_challenge()
            .user_pool_id(&handles.user_pool_id)
            .client_id(&handles.client_id)
            .challenge_name(ChallengeNameType::NewPasswordRequired)
            .challenge_responses("USERNAME", username)
            .challenge_responses("NEW_PASSWORD", new_password)
            .session(session)
            .send()
            .await
            .map_err(|e| provider_error("Failed to set password", e))?;

        info!(username = %username, "Password set");
        Ok(())
    }
}
