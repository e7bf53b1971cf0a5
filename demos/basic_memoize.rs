use memokit::memoize::{binary, memoize};
use memokit::traits::MemoStore;

fn main() {
    let mut slow_add = memoize(2, |args: &[u64]| {
        println!("computing {} + {}", args[0], args[1]);
        args[0] + args[1]
    })
    .unwrap();

    println!("result: {:?}", slow_add.call(&[2, 3]));
    println!("result: {:?}", slow_add.call(&[2, 3]));
    println!("result: {:?}", slow_add.call(&[3, 2]));
    println!("cached tuples: {}", slow_add.store().len());

    let mut power = binary(|base: &u32, exp: &u32| base.pow(*exp));
    println!("2^10 = {:?}", power.call(&[2, 10]));
}

// Expected output:
// computing 2 + 3
// result: Ok(5)
// result: Ok(5)
// computing 3 + 2
// result: Ok(5)
// cached tuples: 2
// 2^10 = Ok(1024)
//
// Explanation: the second call with (2, 3) is served from the cache. (3, 2)
// is a different tuple because components are positional.
