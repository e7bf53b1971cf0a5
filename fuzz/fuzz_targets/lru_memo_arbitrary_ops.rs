#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::error::MemoError;
use memokit::policy::lru::LruTrieCache;
use memokit::traits::MemoStore;

// Fuzz arbitrary call sequences on LruTrieCache
//
// First byte picks arity and capacity; every following pair of bytes is one
// operation on a key derived from the second byte.
fuzz_target!(|data: &[u8]| {
    let Some((&config, ops)) = data.split_first() else {
        return;
    };

    let arity = usize::from(config % 4) + 1;
    let capacity = usize::from((config >> 2) % 16) + 1;
    let mut cache: LruTrieCache<u8, u32> = match LruTrieCache::try_new(arity, capacity) {
        Ok(cache) => cache,
        Err(_) => return,
    };

    for chunk in ops.chunks_exact(2) {
        let (op, seed) = (chunk[0] % 5, chunk[1]);
        // small component domain so prefixes are shared
        let key: Vec<u8> = (0..arity).map(|d| (seed >> d) % 3).collect();
        let expected = key.iter().map(|&c| u32::from(c)).sum::<u32>();

        match op {
            0 | 1 => {
                // call
                let was_cached = cache.contains(&key);
                let len_before = cache.len();
                let value = *cache
                    .get_or_insert_with(&key, |args| args.iter().map(|&c| u32::from(c)).sum())
                    .unwrap();
                assert_eq!(value, expected);
                assert_eq!(cache.recency_rank(&key), Some(0));
                if was_cached || len_before == capacity {
                    assert_eq!(cache.len(), len_before);
                } else {
                    assert_eq!(cache.len(), len_before + 1);
                }
            }
            2 => {
                // failing call
                let was_cached = cache.contains(&key);
                let before: Vec<Vec<u8>> = cache.iter().map(|(k, _)| k.to_vec()).collect();
                let result = cache
                    .get_or_try_insert_with(&key, |_| Err(MemoError::invalid_argument("fuzz")));
                if was_cached {
                    assert_eq!(result.ok().copied(), Some(expected));
                } else {
                    assert!(result.is_err());
                    let after: Vec<Vec<u8>> = cache.iter().map(|(k, _)| k.to_vec()).collect();
                    assert_eq!(before, after);
                }
            }
            3 => {
                // peek (read-only)
                let peeked = cache.peek(&key).copied();
                assert_eq!(peeked.is_some(), cache.contains(&key));
                if let Some(value) = peeked {
                    assert_eq!(value, expected);
                }
            }
            4 => {
                // wrong arity
                let mut longer = key.clone();
                longer.push(0);
                let err = cache.get_or_insert_with(&longer, |_| 0).unwrap_err();
                assert_eq!(
                    err,
                    MemoError::ArityMismatch {
                        expected: arity,
                        actual: arity + 1
                    }
                );
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated: {err}");
        }
    }
});
