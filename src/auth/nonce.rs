//! Nonce generation for Bitfinex API authentication.
//!
//! Bitfinex rejects any authenticated request whose nonce is not greater than
//! the last one seen for the same API key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// The nonce must be strictly increasing for each request. Share one provider
/// between all clients that use the same API key.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider that generates strictly increasing nonces based on time.
///
/// Uses milliseconds since UNIX epoch. When the clock has not advanced (or has
/// gone backwards) since the last nonce, the previous value is incremented.
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self {
            last_nonce: AtomicU64::new(0),
        }
    }

    /// Create a provider that never issues a nonce at or below `floor`.
    ///
    /// Useful when an API key was previously used with a larger nonce scheme.
    pub fn starting_after(floor: u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(floor),
        }
    }

    /// Get current time in milliseconds since UNIX epoch.
    fn current_time_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let time_nonce = Self::current_time_millis();

        loop {
            let last = self.last_nonce.load(Ordering::SeqCst);
            let next = time_nonce.max(last + 1);

            if self
                .last_nonce
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return next;
            }
            // Another thread issued a nonce in between. Retry.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_nonce_strictly_increasing() {
        let provider = IncreasingNonce::new();

        // Far more nonces than milliseconds elapse, so most come from the increment path.
        let mut last = 0u64;
        for _ in 0..1000 {
            let nonce = provider.next_nonce();
            assert!(nonce > last, "Nonce must be strictly increasing");
            last = nonce;
        }
    }

    #[test]
    fn test_nonce_is_wall_clock_millis() {
        let before = IncreasingNonce::current_time_millis();
        let nonce = IncreasingNonce::new().next_nonce();
        let after = IncreasingNonce::current_time_millis();

        assert!(nonce >= before && nonce <= after);
        assert_eq!(nonce.to_string().len(), 13);
    }

    #[test]
    fn test_nonce_increments_past_floor_ahead_of_clock() {
        let floor = IncreasingNonce::current_time_millis() + 60_000;
        let provider = IncreasingNonce::starting_after(floor);

        assert_eq!(provider.next_nonce(), floor + 1);
        assert_eq!(provider.next_nonce(), floor + 2);
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let provider = std::sync::Arc::new(IncreasingNonce::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let p = provider.clone();
            handles.push(thread::spawn(move || {
                let mut nonces = Vec::new();
                for _ in 0..1000 {
                    nonces.push(p.next_nonce());
                }
                nonces
            }));
        }

        let mut all_nonces = HashSet::new();
        for handle in handles {
            let nonces = handle.join().unwrap();
            assert!(nonces.windows(2).all(|w| w[1] > w[0]));
            for nonce in nonces {
                assert!(
                    all_nonces.insert(nonce),
                    "Nonce must be unique across threads"
                );
            }
        }
    }
}
