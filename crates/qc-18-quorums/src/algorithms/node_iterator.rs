//! # Randomized Node Iteration
//!
//! Fair round-robin over a peer-state map where peers may drop out mid-pass.
//!
//! The working order is shuffled once up front, then walked cyclically:
//!
//! ```text
//! [C, A, D, B]   callback(C) = keep -> cursor 1
//!  ^
//! [C, A, D, B]   callback(A) = drop -> A removed, cursor stays at 1 (now D)
//!     ^
//! [C, D, B]      ...
//! ```
//!
//! Not a quorum computation: the randomness source is injected and may be
//! non-deterministic. The caller holds whatever lock guards the map for the
//! whole traversal.

use crate::ports::RandomSource;

/// Shuffle in place (Fisher-Yates) using `rng`.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: RandomSource + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.random_index(i + 1);
        items.swap(i, j);
    }
}

/// Visit entries of `nodes` in random cyclic order.
///
/// Loops while `cont()` is true and entries remain. `callback` returning
/// `true` keeps the entry and advances; `false` drops it from this
/// traversal (the map itself is untouched).
pub fn iterate_nodes_random<'m, K, V, M, C, F, R>(
    nodes: &'m mut M,
    mut cont: C,
    mut callback: F,
    rng: &mut R,
) where
    K: 'm,
    V: 'm,
    &'m mut M: IntoIterator<Item = (&'m K, &'m mut V)>,
    C: FnMut() -> bool,
    F: FnMut(&K, &mut V) -> bool,
    R: RandomSource + ?Sized,
{
    let mut entries: Vec<(&K, &mut V)> = nodes.into_iter().collect();
    if entries.is_empty() {
        return;
    }
    shuffle(&mut entries, rng);

    let mut idx = 0;
    while !entries.is_empty() && cont() {
        let (id, state) = &mut entries[idx];
        if callback(*id, &mut **state) {
            idx = (idx + 1) % entries.len();
        } else {
            entries.remove(idx);
            if entries.is_empty() {
                break;
            }
            idx %= entries.len();
        }
    }
}
