#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use memokit::ds::KeyTrie;

// Fuzz insert / remove_cascading sequences on KeyTrie against a HashMap model
//
// Checks that removal never leaves empty levels behind: once the model holds
// no key with a given first component, the trie must not hold that prefix.
fuzz_target!(|data: &[u8]| {
    let Some((&config, ops)) = data.split_first() else {
        return;
    };

    let arity = usize::from(config % 4) + 1;
    let mut trie: KeyTrie<u8, u16> = KeyTrie::new(arity);
    let mut model: HashMap<Vec<u8>, u16> = HashMap::new();

    for (step, chunk) in ops.chunks_exact(2).enumerate() {
        let (op, seed) = (chunk[0] % 3, chunk[1]);
        let key: Vec<u8> = (0..arity).map(|d| (seed >> (2 * d)) % 4).collect();
        let handle = step as u16;

        match op {
            0 => {
                assert_eq!(trie.insert(&key, handle), model.insert(key.clone(), handle));
            }
            1 => {
                let removed = trie.remove_cascading(&key).map(|(h, _)| h);
                assert_eq!(removed, model.remove(&key));
            }
            2 => {
                assert_eq!(trie.get(&key), model.get(&key));
            }
            _ => unreachable!(),
        }

        assert_eq!(trie.count(), model.len());
        assert_eq!(trie.is_empty(), model.is_empty());
        let head = key[0];
        let head_present = model.keys().any(|k| k[0] == head);
        assert_eq!(trie.contains_prefix(&[head]), head_present);
    }
});
