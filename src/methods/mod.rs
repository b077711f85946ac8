//! Methods module
//! This module provides generic methods for use on any walker: binary search by a
//! comparator, and moving to the extreme nodes of a subtree.

use crate::data::Compare;
use crate::trees::SomeWalker;
use std::cmp::Ordering;

/// Searches for `key` in the subtree of the walker's current position.
///
/// Returns `true` if a value comparing equal to `key` was found, in which case the walker
/// is at its node. Otherwise returns `false` and the walker is at the empty position where
/// `key` would be inserted.
pub fn search<W, T, C>(walker: &mut W, key: &T, compare: &C) -> bool
where
    W: SomeWalker<T>,
    C: Compare<T>,
{
    loop {
        let ord = match walker.value() {
            None => return false,
            Some(value) => compare.compare(key, value),
        };
        match ord {
            Ordering::Equal => return true,
            Ordering::Less => walker.go_left().unwrap(),
            Ordering::Greater => walker.go_right().unwrap(),
        }
    }
}

/// Goes to the leftmost node of the current subtree.
/// If at an empty position, returns an error.
pub fn go_to_min<W: SomeWalker<T>, T>(walker: &mut W) -> Result<(), ()> {
    if walker.is_empty() {
        return Err(());
    }
    while walker.go_left().is_ok() {}
    // we went one step too far, into an empty position
    walker.go_up().map(|_| ())
}
