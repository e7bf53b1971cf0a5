// ==============================================
// MEMOIZER PERFORMANCE TESTS (integration)
// ==============================================
//
// Coarse latency ceilings. Bounds are loose enough for debug builds on CI;
// criterion benches under benches/ give the real numbers.

use memokit::prelude::*;
use std::time::{Duration, Instant};

/// Helper function to measure execution time of a closure
fn measure_time<F, R>(operation: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = operation();
    let duration = start.elapsed();
    (result, duration)
}

mod hit_path {
    use super::*;

    #[test]
    fn test_unbounded_hit_latency() {
        let mut memo = memoize(2, |args: &[u64]| args[0] ^ args[1]).unwrap();
        for i in 0..1000u64 {
            memo.call(&[i % 10, i]).unwrap();
        }

        let iterations = 10_000u32;
        let (_, duration) = measure_time(|| {
            for i in 0..u64::from(iterations) {
                let _ = memo.call(&[i % 10, i % 1000]);
            }
        });

        let avg_latency = duration / iterations;
        println!("Average unbounded hit latency: {:?}", avg_latency);
        assert!(
            avg_latency < Duration::from_micros(10),
            "Unbounded hit too slow: {:?}",
            avg_latency
        );
    }

    #[test]
    fn test_lru_hit_latency() {
        let mut memo = memoize_with_limit(3, 1000, |args: &[u32]| args.iter().sum::<u32>()).unwrap();
        for i in 0..1000u32 {
            memo.call(&[i % 7, i % 11, i]).unwrap();
        }

        let iterations = 10_000u32;
        let (_, duration) = measure_time(|| {
            for i in 0..iterations {
                let i = i % 1000;
                let _ = memo.call(&[i % 7, i % 11, i]);
            }
        });

        let avg_latency = duration / iterations;
        println!("Average LRU hit latency: {:?}", avg_latency);
        assert!(
            avg_latency < Duration::from_micros(10),
            "LRU hit too slow: {:?}",
            avg_latency
        );
        assert_eq!(memo.store().len(), 1000);
    }
}

mod eviction_path {
    use super::*;

    #[test]
    fn test_eviction_cost_is_flat() {
        // every call misses and evicts once the cache is full
        fn churn(capacity: usize) -> Duration {
            let mut memo = memoize_with_limit(2, capacity, |args: &[u64]| args[0] + args[1]).unwrap();
            let (_, duration) = measure_time(|| {
                for i in 0..20_000u64 {
                    let _ = memo.call(&[i / 4, i]);
                }
            });
            assert!(memo.store().check_invariants().is_ok());
            duration
        }

        let small = churn(16);
        let large = churn(4096);
        println!("Churn with capacity 16: {:?}, 4096: {:?}", small, large);

        // O(1) eviction: a larger cache must not be dramatically slower
        assert!(
            large < small * 20 + Duration::from_millis(50),
            "Eviction cost grows with capacity: {:?} vs {:?}",
            small,
            large
        );
    }
}
