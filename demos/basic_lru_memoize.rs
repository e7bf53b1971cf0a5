use memokit::memoize::memoize_with_limit;
use memokit::traits::MemoStore;

fn main() {
    let mut shout = memoize_with_limit(1, 2, |args: &[&str]| {
        println!("computing {}", args[0]);
        args[0].to_uppercase()
    })
    .unwrap();

    shout.call(&["alpha"]).unwrap();
    shout.call(&["beta"]).unwrap();
    shout.call(&["alpha"]).unwrap();
    shout.call(&["gamma"]).unwrap();

    println!("contains beta? {}", shout.store().contains(&["beta"]));
    if let Some((key, value)) = shout.store().peek_lru() {
        println!("next to evict: {} -> {}", key[0], value);
    }
}

// Expected output:
// computing alpha
// computing beta
// computing gamma
// contains beta? false
// next to evict: alpha -> ALPHA
//
// Explanation: capacity=2; the second call with "alpha" makes it MRU, so
// "gamma" evicts "beta". "alpha" is now the least recently used entry.
