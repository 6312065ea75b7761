//! Admin gate.
//!
//! The password is a hardcoded literal and the resulting flag lives only in
//! client-local storage. The API enforces nothing on its write endpoints, so
//! this keeps honest users out of the admin commands and nothing more. A real
//! deployment needs server-side authentication instead.

use crate::error::{ClientError, ClientResult};
use crate::storage::LocalStore;

pub const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_FLAG_KEY: &str = "isAdmin";

#[derive(Debug, Clone)]
pub struct AdminGate {
    store: LocalStore,
}

impl AdminGate {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub async fn login(&self, password: &str) -> ClientResult<()> {
        if password != ADMIN_PASSWORD {
            tracing::warn!("admin login rejected");
            return Err(ClientError::IncorrectPassword);
        }
        self.store.set_item(ADMIN_FLAG_KEY, "true").await?;
        Ok(())
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.store.remove_item(ADMIN_FLAG_KEY).await?;
        Ok(())
    }

    pub async fn is_admin(&self) -> ClientResult<bool> {
        Ok(self.store.get_item(ADMIN_FLAG_KEY).await?.as_deref() == Some("true"))
    }

    /// Guard for admin-only commands.
    pub async fn require_admin(&self) -> ClientResult<()> {
        if self.is_admin().await? {
            Ok(())
        } else {
            Err(ClientError::AdminRequired)
        }
    }
}
