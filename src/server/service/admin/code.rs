//! One-time admin bootstrap codes.
//!
//! When the database has no admin, startup generates a code and logs a login URL
//! carrying it. The first login presenting the code before it expires becomes admin.
//! Codes live in memory only and are consumed on first successful use.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const ADMIN_CODE_TTL: Duration = Duration::from_secs(60);
const ADMIN_CODE_LENGTH: usize = 32;
const ADMIN_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Clone)]
struct IssuedCode {
    value: String,
    expires_at: Instant,
}

/// Holds at most one outstanding admin code.
#[derive(Clone)]
pub struct AdminCodeService {
    current: Arc<RwLock<Option<IssuedCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    /// Creates a service whose codes expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Issues a fresh random code, replacing any outstanding one.
    ///
    /// # Returns
    /// - `String` - 32 character alphanumeric code
    pub async fn generate(&self) -> String {
        let mut rng = rand::rng();
        let value: String = (0..ADMIN_CODE_LENGTH)
            .map(|_| ADMIN_CODE_CHARSET[rng.random_range(0..ADMIN_CODE_CHARSET.len())] as char)
            .collect();

        *self.current.write().await = Some(IssuedCode {
            value: value.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        value
    }

    /// Checks `input` against the outstanding code and consumes it on a match.
    ///
    /// An expired code is dropped and never matches. A wrong guess leaves a valid
    /// code in place.
    ///
    /// # Returns
    /// - `true` - Code matched and is now consumed
    /// - `false` - No code, wrong code or expired code
    pub async fn validate_and_consume(&self, input: &str) -> bool {
        let mut current = self.current.write().await;

        match current.as_ref() {
            Some(code) if Instant::now() >= code.expires_at => {
                *current = None;
                false
            }
            Some(code) if code.value == input => {
                *current = None;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    async fn is_outstanding(&self) -> bool {
        self.current
            .read()
            .await
            .as_ref()
            .is_some_and(|code| Instant::now() < code.expires_at)
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}
