//! The basic tree module
//! This module implements basic unbalanced trees, which the balanced trees wrap.
//!
//! Every node carries an extra field of "algorithm data" of type `A`, which the
//! balancing algorithm uses for its bookkeeping: a height for AVL trees, a color for
//! red-black trees.

// these should not be public as they are merely separate files
// for some of the functions of this module
mod implementations;
mod iterative_deallocator;
pub mod iterators;
mod walker;

pub use iterative_deallocator::*;
pub use walker::*;

use super::{Order, Side};
use crate::data::Compare;
use std::cmp::Ordering;

/// A basic tree. Might be empty.
pub enum BasicTree<T, A = ()> {
    Empty,
    Root(Box<BasicNode<T, A>>),
}
use BasicTree::*;

/// A basic node. Can be viewed as a non-empty basic tree: it always has a value.
pub struct BasicNode<T, A = ()> {
    pub(crate) value: T,
    pub(crate) alg_data: A,
    pub left: BasicTree<T, A>,
    pub right: BasicTree<T, A>,
}

impl<T, A> BasicNode<T, A> {
    pub fn new_alg(value: T, alg_data: A) -> BasicNode<T, A> {
        BasicNode {
            value,
            alg_data,
            left: Empty,
            right: Empty,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn alg_data(&self) -> &A {
        &self.alg_data
    }

    pub fn child(&self, side: Side) -> &BasicTree<T, A> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut BasicTree<T, A> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    fn representation<F>(&self, alg_print: &F) -> String
    where
        F: Fn(&BasicNode<T, A>) -> String,
    {
        format!(
            "{} {} {}",
            self.left.representation(alg_print),
            alg_print(self),
            self.right.representation(alg_print)
        )
    }
}

impl<T, A> BasicTree<T, A> {
    pub fn new() -> Self {
        Empty
    }

    pub fn from_node(node: BasicNode<T, A>) -> Self {
        Root(Box::new(node))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Empty)
    }

    pub fn node(&self) -> Option<&BasicNode<T, A>> {
        match self {
            Empty => None,
            Root(node) => Some(&**node),
        }
    }

    pub fn node_mut(&mut self) -> Option<&mut BasicNode<T, A>> {
        match self {
            Empty => None,
            Root(node) => Some(&mut **node),
        }
    }

    pub fn into_node_boxed(self) -> Option<Box<BasicNode<T, A>>> {
        match self {
            Empty => None,
            Root(node) => Some(node),
        }
    }

    pub fn into_node(self) -> Option<BasicNode<T, A>> {
        Some(*self.into_node_boxed()?)
    }

    pub fn walker(&mut self) -> BasicWalker<'_, T, A> {
        BasicWalker::new(self)
    }

    /// Finds the node whose value compares equal to `key`.
    /// Complexity: `O(depth)`.
    pub fn find<C: Compare<T>>(&self, key: &T, compare: &C) -> Option<&BasicNode<T, A>> {
        let mut tree = self;
        while let Root(node) = tree {
            tree = match compare.compare(key, &node.value) {
                Ordering::Equal => return Some(&**node),
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
            };
        }
        None
    }

    /// The node reached by always going towards `side`: the minimum for [`Side::Left`],
    /// the maximum for [`Side::Right`].
    pub fn edge(&self, side: Side) -> Option<&BasicNode<T, A>> {
        let mut node = self.node()?;
        while let Root(son) = node.child(side) {
            node = &**son;
        }
        Some(node)
    }

    /// A lazy traversal of the tree in the given order.
    pub fn traverse(&self, order: Order) -> iterators::Traverse<'_, T, A> {
        iterators::Traverse::new(self, order)
    }

    /// Counts the nodes. Takes `O(n)` time.
    pub fn count(&self) -> usize {
        self.traverse(Order::PreOrder).count()
    }

    /// Calls `func` on every node of the tree, and panics if the in-order sequence
    /// of values isn't strictly increasing according to `compare`.
    pub fn assert_correctness_with<C, F>(&self, compare: &C, func: F)
    where
        C: Compare<T>,
        F: Fn(&BasicNode<T, A>) + Copy,
    {
        let mut previous: Option<&T> = None;
        for value in self.traverse(Order::InOrder) {
            if let Some(previous) = previous {
                assert!(
                    compare.compare(previous, value) == Ordering::Less,
                    "values out of order"
                );
            }
            previous = Some(value);
        }
        self.for_each_node(func);
    }

    fn for_each_node<F>(&self, func: F)
    where
        F: Fn(&BasicNode<T, A>) + Copy,
    {
        if let Some(node) = self.node() {
            func(node);
            node.left.for_each_node(func);
            node.right.for_each_node(func);
        }
    }

    /// Used for debugging. Prints a representation of the tree, like so:
    /// `<<* 1 * > 2 * >`
    /// Each pair of triangle brackets is a node, and `*` denotes empty trees.
    /// `alg_print` decides what gets printed for the node itself.
    pub fn representation<F>(&self, alg_print: &F) -> String
    where
        F: Fn(&BasicNode<T, A>) -> String,
    {
        if let Some(node) = self.node() {
            format!("<{} >", node.representation(alg_print))
        } else {
            String::from("*")
        }
    }
}

impl<T, A> Default for BasicTree<T, A> {
    fn default() -> Self {
        Empty
    }
}
