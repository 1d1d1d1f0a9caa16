//! Account resolution.
//!
//! Real authentication is out of scope for this server; the trait
//! marks the seam where it belongs. Clients send an auth token with
//! every request, and a production deployment resolves it to an
//! account here.

use crate::error::{ServerError, ServerResult};
use batchsync_store::AccountId;

/// Resolves the account a request operates on.
pub trait AccountProvider: Send + Sync {
    /// Resolves the auth token (if any) to an account id.
    fn resolve(&self, auth_token: Option<&str>) -> ServerResult<AccountId>;
}

/// An account provider that maps every request to one fixed account.
///
/// This is the stand-in for real token validation: single-tenant
/// deployments and tests use it directly.
#[derive(Debug, Clone)]
pub struct StaticAccountProvider {
    account: AccountId,
}

impl StaticAccountProvider {
    /// Creates a provider that always resolves to `account`.
    pub fn new(account: AccountId) -> Self {
        Self { account }
    }
}

impl Default for StaticAccountProvider {
    fn default() -> Self {
        Self::new(AccountId::new("default"))
    }
}

impl AccountProvider for StaticAccountProvider {
    fn resolve(&self, _auth_token: Option<&str>) -> ServerResult<AccountId> {
        Ok(self.account.clone())
    }
}

/// A provider that rejects every request.
///
/// Useful for exercising the auth-failure path without a real
/// validator.
#[derive(Debug, Clone, Default)]
pub struct DenyAllProvider;

impl AccountProvider for DenyAllProvider {
    fn resolve(&self, _auth_token: Option<&str>) -> ServerResult<AccountId> {
        Err(ServerError::InvalidRequest(
            "authentication required".into(),
        ))
    }
}
