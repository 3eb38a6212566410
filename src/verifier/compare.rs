//! Timing-safe byte comparison.

use subtle::ConstantTimeEq;

/// Compare two byte sequences without leaking the position of the first difference.
///
/// Lengths are compared first and a mismatch returns immediately. For equal lengths
/// every byte is visited regardless of where the inputs diverge.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::constant_time_eq;
    use std::time::{Duration, Instant};

    #[test]
    fn equal_inputs_match() {
        assert!(constant_time_eq(b"", b""));
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(constant_time_eq(&[0u8; 64], &[0u8; 64]));
    }

    #[test]
    fn different_lengths_never_match() {
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(!constant_time_eq(b"", b"a"));
    }

    #[test]
    fn agrees_with_slice_equality() {
        let base = b"0123456789abcdef0123456789abcdef".to_vec();
        for position in 0..base.len() {
            for flip in [0x01u8, 0x80, 0xff] {
                let mut other = base.clone();
                if let Some(byte) = other.get_mut(position) {
                    *byte ^= flip;
                }
                assert_eq!(constant_time_eq(&base, &other), base == other);
                assert!(!constant_time_eq(&base, &other));
            }
        }
        assert!(constant_time_eq(&base, &base.clone()));
    }

    // Timing measurements are noisy on shared CI runners; run with `--ignored` on a quiet host.
    #[test]
    #[ignore = "statistical timing test"]
    fn timing_does_not_depend_on_mismatch_position() {
        const LEN: usize = 4096;
        const ROUNDS: u32 = 2_000;

        let base = vec![0x5au8; LEN];
        let measure = |position: usize| -> Duration {
            let mut other = base.clone();
            if let Some(byte) = other.get_mut(position) {
                *byte ^= 0xff;
            }
            let started = Instant::now();
            for _ in 0..ROUNDS {
                std::hint::black_box(constant_time_eq(
                    std::hint::black_box(&base),
                    std::hint::black_box(&other),
                ));
            }
            started.elapsed()
        };

        // Warm up caches before sampling.
        let _ = measure(0);

        let early = measure(0);
        let late = measure(LEN - 1);
        let (fast, slow) = if early < late { (early, late) } else { (late, early) };
        let ratio = slow.as_secs_f64() / fast.as_secs_f64().max(f64::EPSILON);
        assert!(ratio < 1.5, "early={early:?} late={late:?}");
    }
}
