//! Token Revocation Registry
//! Mission: Remember logged-out tokens for the life of the process

use parking_lot::RwLock;
use std::collections::HashSet;

/// Set of revoked token strings. Entries are never evicted.
#[derive(Default)]
pub struct RevocationRegistry {
    revoked: RwLock<HashSet<String>>,
}

impl RevocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke a token. Returns `false` if it was already revoked.
    pub fn revoke(&self, token: &str) -> bool {
        self.revoked.write().insert(token.to_string())
    }

    pub fn is_revoked(&self, token: &str) -> bool {
        self.revoked.read().contains(token)
    }

    pub fn len(&self) -> usize {
        self.revoked.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_revoke_marks_token() {
        let registry = RevocationRegistry::new();
        assert!(!registry.is_revoked("abc"));

        assert!(registry.revoke("abc"));
        assert!(registry.is_revoked("abc"));
        assert!(!registry.is_revoked("abd"));
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let registry = RevocationRegistry::new();
        assert!(registry.revoke("abc"));
        assert!(!registry.revoke("abc"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_revoke_and_lookup() {
        let registry = Arc::new(RevocationRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for j in 0..100 {
                        let token = format!("token-{}-{}", i, j);
                        registry.revoke(&token);
                        assert!(registry.is_revoked(&token));
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(registry.len(), 800);
    }
}
