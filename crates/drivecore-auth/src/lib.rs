use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Sign-in state lives with the identity provider; callers only ask it to end the session.
#[async_trait]
pub trait AuthService: Send + Sync {
    fn is_signed_in(&self) -> bool;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Session flag for drives that need no credentials, such as a local folder.
#[derive(Debug)]
pub struct LocalAuth {
    signed_in: AtomicBool,
}

impl LocalAuth {
    pub fn signed_in() -> Self {
        Self {
            signed_in: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl AuthService for LocalAuth {
    fn is_signed_in(&self) -> bool {
        self.signed_in.load(Ordering::SeqCst)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if !self.signed_in.swap(false, Ordering::SeqCst) {
            return Err(AuthError::NotSignedIn);
        }
        info!("signed out of local drive");
        Ok(())
    }
}
