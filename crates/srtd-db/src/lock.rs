//! Advisory lock key derivation.
//!
//! Postgres's `pg_advisory_xact_lock` takes a 64-bit signed integer key.
//! We derive it deterministically from a template's name so that
//! concurrent applications of the *same* template serialize against each
//! other, while distinct templates never contend (spec.md §4.6).

/// Folds `template_name`'s bytes into a deterministic `i64` lock key.
///
/// A simple FNV-1a-style fold: fast, stable across platforms and process
/// restarts (it is pure, no hashing-with-random-seed involved), and good
/// enough collision resistance for the realistic template-name cardinality
/// this tool operates on -- a project rarely has more than a few hundred
/// templates.
pub fn advisory_lock_key(template_name: &str) -> i64 {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let mut hash = FNV_OFFSET_BASIS;
    for byte in template_name.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash as i64
}
