//! This module contains the self-balancing search trees, and the traits they share.
//!
//! Both [`avl::AVLTree`] and [`red_black::RedBlackTree`] are built by wrapping a
//! [`basic_tree::BasicTree`], and both walk it with a [`basic_tree::BasicWalker`].

#[macro_use]
mod macros;

pub mod avl;
pub mod basic_tree;
pub mod red_black;

use crate::error::{Rejected, TreeError};
use basic_tree::iterators::Traverse;

/// Which child of a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The order in which [`SomeTree::traverse`] visits the elements.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Order {
    /// Node, then its left subtree, then its right subtree.
    PreOrder,
    /// Sorted order.
    InOrder,
    /// Left subtree, then right subtree, then the node.
    PostOrder,
    /// Only nodes with no children, left to right.
    Leaves,
}

/// The operations shared by the balanced search trees of this crate.
///
/// A tree owns its elements. Elements that are refused by [`SomeTree::insert`] are
/// handed back inside the [`Rejected`] error, and elements the tree discards are passed
/// to the tree's [`crate::data::Destroy`] capability, exactly once each.
pub trait SomeTree<T> {
    /// The balancing data kept in every node.
    type TreeData;

    /// Inserts the element, unless the tree is at its size limit or already holds an
    /// equal element. On failure nothing changes and the element is returned.
    fn insert(&mut self, element: T) -> Result<(), Rejected<T>>;

    /// Removes the element equal to `key` and passes it to the destructor.
    fn remove(&mut self, key: &T) -> Result<(), TreeError>;

    /// Removes the element equal to `key` and returns it, without destroying it.
    fn take(&mut self, key: &T) -> Option<T>;

    /// Removes the element returned by [`SomeTree::peek`] and passes it to the destructor.
    fn pop(&mut self) -> Result<(), TreeError>;

    /// Returns the element equal to `key`.
    fn get(&self, key: &T) -> Option<&T>;

    fn contains(&self, key: &T) -> bool {
        self.get(key).is_some()
    }

    fn min(&self) -> Option<&T>;

    fn max(&self) -> Option<&T>;

    /// Returns the element at the root of the tree, in `O(1)` time.
    fn peek(&self) -> Option<&T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The maximum number of elements, `0` meaning unlimited.
    fn limit(&self) -> usize;

    /// Sets the maximum number of elements. `0` removes the limit.
    /// Fails if the tree already holds more than `limit` elements.
    fn set_limit(&mut self, limit: usize) -> Result<(), TreeError>;

    /// A lazy traversal of the tree in the given order.
    /// The traversal borrows the tree, so it can't be modified while traversing.
    fn traverse(&self, order: Order) -> Traverse<'_, T, Self::TreeData>;

    /// Iterates over the elements in sorted order.
    fn iter(&self) -> Traverse<'_, T, Self::TreeData> {
        self.traverse(Order::InOrder)
    }

    /// Destroys every element, leaving an empty tree with the same capabilities and limit.
    fn erase(&mut self);

    /// Checks the ordering, the element count and the balancing invariants of the whole tree.
    /// Panics if any of them is violated.
    fn assert_correctness(&self);
}

/// A cursor into a tree. It is always either at a node, or at an empty position
/// which is the son of a node (or the root of an empty tree).
pub trait SomeWalker<T> {
    /// Goes to the left son. Fails if at an empty position.
    fn go_left(&mut self) -> Result<(), ()>;

    /// Goes to the right son. Fails if at an empty position.
    fn go_right(&mut self) -> Result<(), ()>;

    /// Goes to the parent, returning which son the walker was.
    /// Fails if at the root.
    fn go_up(&mut self) -> Result<Side, ()>;

    /// The number of steps from the root.
    fn depth(&self) -> usize;

    /// The element at the current position, if it isn't empty.
    fn value(&self) -> Option<&T>;

    fn go_side(&mut self, side: Side) -> Result<(), ()> {
        match side {
            Side::Left => self.go_left(),
            Side::Right => self.go_right(),
        }
    }

    fn is_empty(&self) -> bool {
        self.value().is_none()
    }
}
