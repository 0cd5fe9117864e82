//! Fibonacci seeded recurrence - the deterministic low-entropy selection policy
//!
//! Index derivation: build the Fibonacci sequence to a fixed depth, take
//! `seq[seed % len(seq)]`, and reduce it modulo the pool size. The effective
//! index space is tiny, which is why this policy is labeled low-entropy and
//! is never a default.

use std::time::{SystemTime, UNIX_EPOCH};

/// Number of terms generated beyond the two seed values
const FIB_DEPTH: usize = 100;

/// Fibonacci sequence starting 0, 1, computed to `FIB_DEPTH` further terms.
/// u128 holds every term at this depth without overflow.
fn fibonacci_sequence() -> Vec<u128> {
    let mut seq: Vec<u128> = Vec::with_capacity(FIB_DEPTH + 2);
    seq.push(0);
    seq.push(1);
    for _ in 0..FIB_DEPTH {
        let next = seq[seq.len() - 1] + seq[seq.len() - 2];
        seq.push(next);
    }
    seq
}

/// Current Unix time in milliseconds, the default seed
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Derive a pool index from a seed.
///
/// `seed = None` uses the current time in milliseconds. The same seed and the
/// same `pool_len` always produce the same index.
///
/// Precondition: `pool_len > 0` (callers check for empty pools first).
pub fn pseudo_random_index(seed: Option<u64>, pool_len: usize) -> usize {
    debug_assert!(pool_len > 0);

    let seed = seed.unwrap_or_else(time_seed);
    let seq = fibonacci_sequence();
    let fib = seq[(seed as usize) % seq.len()];
    (fib % pool_len as u128) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_shape() {
        let seq = fibonacci_sequence();
        assert_eq!(seq.len(), FIB_DEPTH + 2);
        assert_eq!(&seq[..8], &[0, 1, 1, 2, 3, 5, 8, 13]);
        // Last term of depth 100: fib(101)
        assert_eq!(seq[101], 573_147_844_013_817_084_101);
    }

    #[test]
    fn test_determinism() {
        for seed in [0u64, 1, 41, 12345, u64::MAX] {
            let a = pseudo_random_index(Some(seed), 97);
            let b = pseudo_random_index(Some(seed), 97);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_index_in_bounds() {
        for seed in 0..500u64 {
            for pool_len in [1usize, 2, 3, 10, 1000] {
                let idx = pseudo_random_index(Some(seed), pool_len);
                assert!(idx < pool_len);
            }
        }
    }

    #[test]
    fn test_known_values() {
        // seed 5 -> seq[5] = 5, 5 % 3 = 2
        assert_eq!(pseudo_random_index(Some(5), 3), 2);
        // seed 102 wraps to seq[0] = 0
        assert_eq!(pseudo_random_index(Some(102), 3), 0);
    }
}
