//! The capabilities a tree is built over.
//!
//! A tree never inspects its elements directly. It orders them through a [`Compare`]
//! instance, and when it discards an element it owns (on `remove`, `pop`, `erase`
//! or when the tree is dropped) it hands it to a [`Destroy`] instance.
//!
//! Both traits are implemented for closures, so ad-hoc capabilities can be passed
//! straight to a constructor:
//!```
//! use arbor::{SomeTree, avl::AVLTree};
//!
//! // a tree ordered from largest to smallest
//! let mut tree = AVLTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! for x in [3, 1, 2] {
//!     tree.insert(x).unwrap();
//! }
//! assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), vec![3, 2, 1]);
//!```

use std::cmp::Ordering;

/// A total order over elements.
/// The order must stay consistent for as long as the elements are in the tree.
/// Elements that compare [`Ordering::Equal`] are considered the same key.
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Disposes of an element the tree owns.
/// Called exactly once for every element that leaves the tree without being handed back
/// to the caller.
pub trait Destroy<T> {
    fn destroy(&mut self, element: T);
}

/// Orders elements by their [`Ord`] instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Compare<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Destroys elements by dropping them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropElement;

impl<T> Destroy<T> for DropElement {
    fn destroy(&mut self, element: T) {
        drop(element);
    }
}

impl<T, F> Destroy<T> for F
where
    F: FnMut(T),
{
    fn destroy(&mut self, element: T) {
        self(element)
    }
}
