// ==============================================
// DIFFERENTIAL TESTS (integration)
// ==============================================
//
// Drives FusedLru and the tree-map reference through identical random
// operation streams and requires identical observable behavior: every
// return value, every size, and, after each phase, a full walk of the
// reference's entries compared against the fused cache.

mod common;

use common::TreeLru;
use fusedlru::cache::FusedLru;
use fusedlru::traits::{IntCache, IntLruCache};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const LOAD_FACTOR: f32 = 0.66;

/// Every key the reference still holds must come back from the fused cache
/// with the same value. Lookups go through `get` on both sides, so recency
/// stays in lockstep too.
fn compare_all_entries(sut: &mut FusedLru, oracle: &mut TreeLru) {
    assert_eq!(sut.len(), oracle.len(), "cache sizes diverged");
    for key in oracle.keys() {
        assert_eq!(
            sut.get(key),
            oracle.get(key),
            "value for key {key} diverged"
        );
    }
}

/// One full churn cycle: `3 * cache_size` random puts over a key population
/// twice the cache size, a full comparison, `3 * cache_size` removes drawn
/// from the keys the put phase touched, and a final comparison.
fn exercise(sut: &mut FusedLru, oracle: &mut TreeLru, cache_size: i32, rng: &mut SmallRng) {
    let iterations = (cache_size as usize) * 3;
    let population = cache_size * 2;

    let mut touched = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let key = rng.gen_range(0..population);
        let value = rng.gen_range(0..population);
        touched.push(key);
        assert_eq!(
            sut.put(key, value),
            oracle.put(key, value),
            "prior value for key {key} diverged"
        );
    }
    sut.check_invariants().expect("invariants after put phase");
    compare_all_entries(sut, oracle);

    // Removes range over everything the put phase touched, so most target
    // keys have already been evicted, exercising both hit and miss paths.
    for _ in 0..iterations {
        let key = touched[rng.gen_range(0..touched.len())];
        assert_eq!(
            sut.remove(key),
            oracle.remove(key),
            "removed value for key {key} diverged"
        );
    }
    sut.check_invariants().expect("invariants after remove phase");
    compare_all_entries(sut, oracle);
}

#[test]
fn random_ops_match_tree_reference() {
    for &cache_size in &[3, 1000, 10_000, 100_000] {
        let mut rng = SmallRng::seed_from_u64(0xFEED_F00D ^ cache_size as u64);
        let mut sut = FusedLru::new(cache_size, LOAD_FACTOR);
        let mut oracle = TreeLru::new(cache_size as usize);

        exercise(&mut sut, &mut oracle, cache_size, &mut rng);

        // A cleared cache must behave exactly like a fresh one.
        sut.clear();
        oracle.clear();
        assert!(sut.is_empty());
        sut.check_invariants().expect("invariants after clear");

        exercise(&mut sut, &mut oracle, cache_size, &mut rng);
    }
}

#[test]
fn mixed_ops_match_tree_reference() {
    for &cache_size in &[3, 17, 256] {
        let mut rng = SmallRng::seed_from_u64(0xDEC0_DE ^ cache_size as u64);
        let mut sut = FusedLru::new(cache_size, LOAD_FACTOR);
        let mut oracle = TreeLru::new(cache_size as usize);
        let population = cache_size * 2;

        for step in 0..10_000 {
            let key = rng.gen_range(0..population);
            match rng.gen_range(0..100) {
                0..=49 => {
                    let value = rng.gen_range(-1..population);
                    assert_eq!(sut.put(key, value), oracle.put(key, value));
                }
                50..=69 => assert_eq!(sut.get(key), oracle.get(key)),
                70..=79 => assert_eq!(sut.remove(key), oracle.remove(key)),
                80..=86 => assert_eq!(sut.peek(key), oracle.peek(key)),
                87..=93 => assert_eq!(sut.contains(key), oracle.contains(key)),
                94..=97 => assert_eq!(sut.touch(key), oracle.touch(key)),
                _ => assert_eq!(sut.pop_lru(), oracle.pop_lru()),
            }
            assert_eq!(sut.len(), oracle.len(), "sizes diverged at step {step}");
            assert_eq!(sut.peek_lru(), oracle.peek_lru());
            if step % 512 == 0 {
                sut.check_invariants()
                    .unwrap_or_else(|err| panic!("step {step}: {err}"));
            }
        }
        sut.check_invariants().expect("invariants at end of stream");
    }
}
