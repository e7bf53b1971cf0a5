use std::fmt;

use memokit::builder::MemoBuilder;
use memokit::error::MemoError;

#[derive(Debug)]
enum LoadError {
    Memo(MemoError),
    Missing(u32),
}

impl From<MemoError> for LoadError {
    fn from(err: MemoError) -> Self {
        LoadError::Memo(err)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Memo(err) => write!(f, "{err}"),
            LoadError::Missing(id) => write!(f, "record {id} not found"),
        }
    }
}

fn main() -> Result<(), MemoError> {
    let mut load = MemoBuilder::new()
        .arity(1)
        .capacity(16)
        .build_lru_fallible(|args: &[u32]| {
            println!("loading {}", args[0]);
            if args[0] % 2 == 0 {
                Ok(format!("record-{}", args[0]))
            } else {
                Err(LoadError::Missing(args[0]))
            }
        })?;

    for id in [2, 2, 3, 3] {
        match load.try_call(&[id]) {
            Ok(record) => println!("ok: {record}"),
            Err(err) => println!("error: {err}"),
        }
    }
    if let Err(err) = load.try_call(&[1, 2]) {
        println!("error: {err}");
    }
    Ok(())
}

// Expected output:
// loading 2
// ok: record-2
// ok: record-2
// loading 3
// error: record 3 not found
// loading 3
// error: record 3 not found
// error: arity mismatch: expected 1 argument(s), got 2
//
// Explanation: successful results are cached; failures are returned but not
// stored, so the failing id is loaded again on the next call.
