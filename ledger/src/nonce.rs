//! # Nonce Sequencing
//!
//! Every transaction from a wallet carries a strictly increasing nonce; the
//! network rejects replays and out-of-order submissions. [`NonceSequencer`]
//! hands out values that are unique and increasing across threads.
//!
//! Two modes:
//!
//! - **plain**: a counter starting at the seed value. Right choice when the
//!   caller tracks the wallet's last confirmed nonce.
//! - **clock-anchored**: values track the Unix-millisecond clock, bumping by
//!   one whenever the clock hasn't moved past the last value. Right choice
//!   for fire-and-forget senders that never read the wallet state back, at
//!   the cost of burning the nonce space ~1000 per second.

use chrono::Utc;
use parking_lot::Mutex;

/// A thread-safe source of unique, increasing nonces.
///
/// # Examples
///
/// ```
/// use aurum_ledger::nonce::NonceSequencer;
///
/// let seq = NonceSequencer::new(5);
/// assert_eq!(seq.next(), 5);
/// assert_eq!(seq.next(), 6);
/// ```
pub struct NonceSequencer {
    state: Mutex<u64>,
    clock_anchored: bool,
}

impl NonceSequencer {
    /// A plain counter starting at `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: Mutex::new(seed),
            clock_anchored: false,
        }
    }

    /// A clock-anchored sequencer. `seed` floors the first value; pass the
    /// last nonce used if one is known, or 0.
    pub fn clock_anchored(seed: u64) -> Self {
        Self {
            state: Mutex::new(seed),
            clock_anchored: true,
        }
    }

    /// The next nonce. Never returns the same value twice, in any mode,
    /// from any thread.
    pub fn next(&self) -> u64 {
        let mut state = self.state.lock();

        if self.clock_anchored {
            let now = Utc::now().timestamp_millis().max(0) as u64;
            if now <= *state {
                *state += 1;
            } else {
                *state = now;
            }
            return *state;
        }

        let ret = *state;
        *state += 1;
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    const TASKS: usize = 4;
    const DRAWS: usize = 10_000;

    fn drain(seq: Arc<NonceSequencer>) -> Vec<Vec<u64>> {
        let handles: Vec<_> = (0..TASKS)
            .map(|_| {
                let seq = Arc::clone(&seq);
                thread::spawn(move || (0..DRAWS).map(|_| seq.next()).collect::<Vec<_>>())
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    }

    #[test]
    fn plain_mode_is_duplicate_free_across_threads() {
        let runs = drain(Arc::new(NonceSequencer::new(0)));
        let mut seen = HashSet::new();
        for run in &runs {
            for &v in run {
                assert!(seen.insert(v), "duplicate nonce {v}");
            }
        }
        assert_eq!(seen.len(), TASKS * DRAWS);
    }

    #[test]
    fn clock_mode_is_duplicate_free_across_threads() {
        let runs = drain(Arc::new(NonceSequencer::clock_anchored(0)));
        let mut seen = HashSet::new();
        for run in &runs {
            for &v in run {
                assert!(seen.insert(v), "duplicate nonce {v}");
            }
        }
    }

    #[test]
    fn each_caller_sees_increasing_values() {
        for seq in [NonceSequencer::new(7), NonceSequencer::clock_anchored(0)] {
            let mut prev = None;
            for _ in 0..100 {
                let v = seq.next();
                if let Some(p) = prev {
                    assert!(v > p, "{v} not above {p}");
                }
                prev = Some(v);
            }
        }
    }

    #[test]
    fn plain_mode_starts_at_the_seed() {
        let seq = NonceSequencer::new(42);
        assert_eq!(seq.next(), 42);
        assert_eq!(seq.next(), 43);
    }

    #[test]
    fn clock_mode_tracks_the_wall_clock() {
        let seq = NonceSequencer::clock_anchored(0);
        let before = Utc::now().timestamp_millis() as u64;
        let v = seq.next();
        let after = Utc::now().timestamp_millis() as u64;
        assert!(v >= before && v <= after + 1);
    }
}
