//! DHAT heap profiler for memokit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use memokit::builder::Memoized;
use memokit::policy::lru::LruTrieCache;
use memokit::policy::unbounded::UnboundedCache;
use memokit::traits::MemoStore;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

fn key_for(n: u64) -> [u64; 3] {
    [n % 8, (n / 8) % 32, n]
}

/// Run a hotset workload: 90% of accesses hit 10% of keys.
fn hotset_workload<S, F>(memo: &mut Memoized<S, F>, operations: usize, universe: u64, seed: u64)
where
    S: MemoStore<Key = u64>,
    F: FnMut(&[u64]) -> S::Value,
{
    let mut rng = XorShift64::new(seed);
    let hot_size = (universe as f64 * 0.1) as u64;

    for _ in 0..operations {
        let n = if rng.next_f64() < 0.9 {
            // Hot key (10% of universe, 90% of accesses)
            rng.next_u64() % hot_size
        } else {
            // Cold key
            hot_size + (rng.next_u64() % (universe - hot_size))
        };
        let _ = memo.call(&key_for(n));
    }
}

/// Run a scan workload: sequential access pattern.
fn scan_workload<S, F>(memo: &mut Memoized<S, F>, operations: usize, universe: u64)
where
    S: MemoStore<Key = u64>,
    F: FnMut(&[u64]) -> S::Value,
{
    for i in 0..operations {
        let _ = memo.call(&key_for((i as u64) % universe));
    }
}

/// Every call is a new tuple; in the bounded store each one evicts.
fn eviction_churn<S, F>(memo: &mut Memoized<S, F>, operations: usize)
where
    S: MemoStore<Key = u64>,
    F: FnMut(&[u64]) -> S::Value,
{
    for i in 0..operations {
        let _ = memo.call(&key_for(1_000_000 + i as u64));
    }
}

fn payload(args: &[u64]) -> Vec<u8> {
    vec![0u8; (args[2] % 64) as usize]
}

fn profile_lru() {
    println!("=== Profiling LRU trie cache ===");
    let capacity = 4096;
    let operations = 100_000;
    let universe = 16_384;

    let store = match LruTrieCache::<u64, Vec<u8>>::try_new(3, capacity) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("  skipped: {err}");
            return;
        },
    };
    let mut memo = Memoized::new(store, payload);

    // Warm up
    scan_workload(&mut memo, capacity, universe);

    hotset_workload(&mut memo, operations, universe, 42);
    scan_workload(&mut memo, operations / 2, universe);
    eviction_churn(&mut memo, operations / 4);

    println!("  Final size: {}", memo.store().len());
}

fn profile_unbounded() {
    println!("=== Profiling unbounded trie cache ===");
    let operations = 100_000;
    let universe = 16_384;

    let store = match UnboundedCache::<u64, Vec<u8>>::try_new(3) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("  skipped: {err}");
            return;
        },
    };
    let mut memo = Memoized::new(store, payload);

    hotset_workload(&mut memo, operations, universe, 42);
    scan_workload(&mut memo, operations / 2, universe);

    println!("  Final size: {}", memo.store().len());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("memokit DHAT Heap Profiling");
    println!("===========================\n");

    profile_lru();
    profile_unbounded();

    println!("\n===========================");
    println!("Profile written to dhat-heap.json");
}
