//! Implementation of red-black trees.
//!
//! Every node is colored red or black. The root is black, a red node never has a red son,
//! and every path from a node down to an empty position passes through the same number
//! of black nodes. Together these keep the depth below `2 * log2(n + 1)`.
//!
//! Insertion and deletion first edit the tree like an unbalanced search tree would, and
//! then walk up from the edited position, recoloring and rotating until the
//! invariants hold again.
//!
//!```
//! use arbor::{SomeTree, red_black::RedBlackTree};
//!
//! let mut tree: RedBlackTree<i32> = (1..=20).collect();
//! assert_eq!(tree.len(), 20);
//! tree.remove(&7).unwrap();
//! assert!(!tree.contains(&7));
//! assert_eq!(tree.min(), Some(&1));
//! assert_eq!(tree.max(), Some(&20));
//! # tree.assert_correctness();
//!```

use super::basic_tree::iterators::{drain_in_order, Traverse};
use super::basic_tree::*;
use super::*;
use crate::data::{Compare, Destroy, DropElement, NaturalOrder};
use crate::methods;
use log::{debug, trace};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Color {
    Red,
    Black,
}
use Color::*;

/// A red-black tree.
///
/// Elements are ordered by the comparator `C`, and discarded elements are handed to
/// the destructor `X`.
pub struct RedBlackTree<T, C = NaturalOrder, X = DropElement>
where
    C: Compare<T>,
    X: Destroy<T>,
{
    tree: BasicTree<T, Color>,
    len: usize,
    limit: usize,
    compare: C,
    destroy: X,
}

/// For reading and writing colors of trees and nodes alike.
trait Colored {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);
}

impl<T> Colored for BasicTree<T, Color> {
    /// Empty trees count as black.
    fn color(&self) -> Color {
        match self.node() {
            None => Black,
            Some(node) => node.color(),
        }
    }

    /// Does nothing on an empty tree.
    fn set_color(&mut self, color: Color) {
        if let Some(node) = self.node_mut() {
            node.set_color(color);
        }
    }
}

impl<T> Colored for BasicNode<T, Color> {
    fn color(&self) -> Color {
        *self.alg_data()
    }

    fn set_color(&mut self, color: Color) {
        self.alg_data = color;
    }
}

impl<T: Ord> RedBlackTree<T> {
    /// Creates an empty [`RedBlackTree`], ordered by `T`'s [`Ord`] instance.
    pub fn new() -> Self {
        RedBlackTree::with_capabilities(NaturalOrder, DropElement)
    }
}

impl<T, C: Compare<T>> RedBlackTree<T, C> {
    /// Creates an empty [`RedBlackTree`] ordered by `compare`.
    pub fn with_comparator(compare: C) -> Self {
        RedBlackTree::with_capabilities(compare, DropElement)
    }
}

impl<T, C: Compare<T>, X: Destroy<T>> RedBlackTree<T, C, X> {
    /// Creates an empty [`RedBlackTree`] ordered by `compare`, which passes every element
    /// it discards to `destroy`.
    pub fn with_capabilities(compare: C, destroy: X) -> Self {
        RedBlackTree {
            tree: BasicTree::Empty,
            len: 0,
            limit: 0,
            compare,
            destroy,
        }
    }

    /// The number of black nodes on any path from the root down to an empty position.
    pub fn black_height(&self) -> usize {
        let mut res = 0;
        let mut tree = &self.tree;
        while let Some(node) = tree.node() {
            if node.color() == Black {
                res += 1;
            }
            tree = &node.left;
        }
        res
    }

    /// Consumes the tree, returning its elements in sorted order.
    /// The elements are handed over, so the destructor isn't called on them.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut res = Vec::with_capacity(self.len);
        drain_in_order(std::mem::take(&mut self.tree), |value| res.push(value));
        self.len = 0;
        res
    }

    /// Used for debugging. See [`BasicTree::representation`].
    /// Red nodes are marked with a `*`.
    pub fn representation(&self) -> String
    where
        T: std::fmt::Debug,
    {
        self.tree.representation(&|node: &BasicNode<T, Color>| match node.color() {
            Red => format!("{:?}*", node.value()),
            Black => format!("{:?}", node.value()),
        })
    }

    fn is_full(&self) -> bool {
        self.limit > 0 && self.len >= self.limit
    }

    fn destroy_all(&mut self) {
        let destroy = &mut self.destroy;
        let count = deallocate_iteratively(&mut self.tree, |value| destroy.destroy(value));
        debug!("erased {} elements from a red-black tree", count);
        self.len = 0;
    }

    /// Asserts that a red node has no red sons, and returns the black height
    /// of the subtree. Panics if the black heights of the two sons differ.
    fn assert_colors_internal(tree: &BasicTree<T, Color>) -> usize {
        match tree.node() {
            None => 0,
            Some(node) => {
                if node.color() == Red {
                    assert!(
                        node.left.color() == Black && node.right.color() == Black,
                        "red node with a red son"
                    );
                }
                let left = Self::assert_colors_internal(&node.left);
                let right = Self::assert_colors_internal(&node.right);
                assert_eq!(left, right, "black heights of the sons differ");
                left + (node.color() == Black) as usize
            }
        }
    }

    /// Asserts that the root is black, that no red node has a red son,
    /// and that all paths have the same number of black nodes.
    /// Otherwise, panics.
    pub fn assert_colors(&self) {
        assert_eq!(self.tree.color(), Black, "red root");
        let black_height = Self::assert_colors_internal(&self.tree);
        assert_eq!(black_height, self.black_height());
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        RedBlackTree::new()
    }
}

impl<T, C: Compare<T>, X: Destroy<T>> Drop for RedBlackTree<T, C, X> {
    fn drop(&mut self) {
        self.destroy_all();
    }
}

impl<T, C: Compare<T>, X: Destroy<T>> SomeTree<T> for RedBlackTree<T, C, X> {
    type TreeData = Color;

    fn insert(&mut self, element: T) -> Result<(), Rejected<T>> {
        if self.is_full() {
            let reason = TreeError::CapacityExceeded { limit: self.limit };
            return Err(Rejected::new(element, reason));
        }
        let mut walker = RBWalker::new(&mut self.tree);
        if methods::search(&mut walker, &element, &self.compare) {
            return Err(Rejected::new(element, TreeError::DuplicateKey));
        }
        if let Err(element) = walker.insert(element) {
            // the search always ends on an empty position when the key is absent
            return Err(Rejected::new(element, TreeError::DuplicateKey));
        }
        self.len += 1;
        Ok(())
    }

    fn remove(&mut self, key: &T) -> Result<(), TreeError> {
        let value = self.take(key).ok_or(TreeError::NotFound)?;
        self.destroy.destroy(value);
        Ok(())
    }

    fn take(&mut self, key: &T) -> Option<T> {
        let mut walker = RBWalker::new(&mut self.tree);
        if !methods::search(&mut walker, key, &self.compare) {
            return None;
        }
        let value = walker.delete()?;
        self.len -= 1;
        Some(value)
    }

    fn pop(&mut self) -> Result<(), TreeError> {
        let value = RBWalker::new(&mut self.tree)
            .delete()
            .ok_or(TreeError::EmptyTree)?;
        self.len -= 1;
        self.destroy.destroy(value);
        Ok(())
    }

    fn get(&self, key: &T) -> Option<&T> {
        Some(self.tree.find(key, &self.compare)?.value())
    }

    fn min(&self) -> Option<&T> {
        Some(self.tree.edge(Side::Left)?.value())
    }

    fn max(&self) -> Option<&T> {
        Some(self.tree.edge(Side::Right)?.value())
    }

    fn peek(&self) -> Option<&T> {
        Some(self.tree.node()?.value())
    }

    fn len(&self) -> usize {
        self.len
    }

    fn limit(&self) -> usize {
        self.limit
    }

    fn set_limit(&mut self, limit: usize) -> Result<(), TreeError> {
        if limit > 0 && limit < self.len {
            debug!("refused to set the limit to {} with {} elements", limit, self.len);
            return Err(TreeError::LimitBelowSize {
                requested: limit,
                len: self.len,
            });
        }
        self.limit = limit;
        Ok(())
    }

    fn traverse(&self, order: Order) -> Traverse<'_, T, Color> {
        self.tree.traverse(order)
    }

    fn erase(&mut self) {
        self.destroy_all();
    }

    fn assert_correctness(&self) {
        self.tree.assert_correctness_with(&self.compare, |_| {});
        self.assert_colors();
        assert_eq!(self.tree.count(), self.len, "element count is off");
    }
}

impl<T: Ord> std::iter::FromIterator<T> for RedBlackTree<T> {
    /// Elements equal to an earlier element are dropped.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Compare<T>, X: Destroy<T>> Extend<T> for RedBlackTree<T, C, X> {
    /// Inserts every element. Rejected elements are dropped, and never reach the destructor.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            let _ = self.insert(element);
        }
    }
}

impl<T: std::fmt::Debug, C: Compare<T>, X: Destroy<T>> std::fmt::Debug
    for RedBlackTree<T, C, X>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

const MISSING_NODE: &str = "invariant violated: red-black fixup reached an empty position";

/// A walker struct for [`RedBlackTree`].
pub struct RBWalker<'a, T> {
    walker: BasicWalker<'a, T, Color>,
}

derive_SomeWalker! {walker,
    impl<'a, T> SomeWalker<T> for RBWalker<'a, T> {
        fn go_up(&mut self) -> Result<Side, ()> {
            self.walker.go_up()
        }
    }
}

impl<'a, T> RBWalker<'a, T> {
    fn new(tree: &'a mut BasicTree<T, Color>) -> Self {
        RBWalker {
            walker: BasicWalker::new(tree),
        }
    }

    fn color(&self) -> Color {
        self.walker.inner().color()
    }

    fn node_mut(&mut self) -> &mut BasicNode<T, Color> {
        self.walker.node_mut().expect(MISSING_NODE)
    }

    fn descend(&mut self, side: Side) {
        self.walker.go_side(side).expect(MISSING_NODE);
    }

    fn blacken_root(&mut self) {
        self.walker.go_to_root();
        self.walker.inner_mut().set_color(Black);
    }

    /// Inserts the value into the tree at the current empty position, as a red node.
    /// If the current position is not empty, gives the value back.
    fn insert(&mut self, value: T) -> Result<(), T> {
        self.walker.insert_with_alg_data(value, Red)?;
        self.fix_after_insert();
        Ok(())
    }

    /// Called with the walker at a red node, whose parent might also be red.
    fn fix_after_insert(&mut self) {
        loop {
            let side = match self.walker.is_left_son() {
                None => break, // reached the root
                Some(side) => side,
            };
            self.walker.go_up().unwrap();
            if self.color() == Black {
                break;
            }
            // the parent is red, so it isn't the root and there is a grandparent
            let parent_side = self.walker.is_left_son().expect("red root");
            self.walker.go_up().unwrap();

            let grandparent = self.node_mut();
            if grandparent.child(parent_side.flip()).color() == Red {
                trace!("red-black insert: red uncle, recoloring");
                grandparent.child_mut(parent_side.flip()).set_color(Black);
                grandparent.child_mut(parent_side).set_color(Black);
                grandparent.set_color(Red);
                // the grandparent is red now, and its own parent might be red too
                continue;
            }

            if side != parent_side {
                trace!("red-black insert: inner grandchild, rotating the parent");
                self.descend(parent_side);
                self.walker.rot_side(parent_side).expect(MISSING_NODE);
                self.walker.go_up().unwrap();
            }
            trace!("red-black insert: outer grandchild, rotating the grandparent");
            let grandparent = self.node_mut();
            grandparent.child_mut(parent_side).set_color(Black);
            grandparent.set_color(Red);
            self.walker
                .rot_side(parent_side.flip())
                .expect(MISSING_NODE);
            break;
        }
        self.blacken_root();
    }

    /// Deletes the node at the current position and returns its value.
    /// If the current position is empty, returns [`None`].
    fn delete(&mut self) -> Option<T> {
        let node = self.walker.node()?;
        if !node.left.is_empty() && !node.right.is_empty() {
            self.swap_with_successor();
        }

        // the current node has at most one son now: splice it out
        let mut node = self.walker.take_subtree().into_node_boxed()?;
        let son = if node.left.is_empty() {
            std::mem::take(&mut node.right)
        } else {
            std::mem::take(&mut node.left)
        };
        self.walker.put_subtree(son).unwrap();
        if node.color() == Black {
            self.fix_after_delete();
        }
        let BasicNode { value, .. } = *node;
        Some(value)
    }

    /// Exchanges the value at the current node, which must have two sons, with the value
    /// of its in-order successor, and leaves the walker at the successor's node.
    fn swap_with_successor(&mut self) {
        let depth = self.walker.depth();
        self.descend(Side::Right);
        methods::go_to_min(&mut self.walker).expect(MISSING_NODE);
        let mut successor = self.walker.take_subtree().into_node_boxed().expect(MISSING_NODE);

        let mut path = vec![];
        while self.walker.depth() > depth {
            path.push(self.walker.go_up().unwrap());
        }
        std::mem::swap(&mut self.node_mut().value, &mut successor.value);
        for side in path.into_iter().rev() {
            self.descend(side);
        }
        self.walker
            .put_subtree(BasicTree::Root(successor))
            .unwrap();
    }

    /// Called with the walker at the position of a removed black node. The subtree at
    /// this position (possibly empty) is one black node short compared to its sibling.
    /// The parent of an empty position is found by going up, since the walker keeps
    /// the path.
    fn fix_after_delete(&mut self) {
        loop {
            if self.color() == Red {
                // a red node absorbs the missing black
                self.walker.inner_mut().set_color(Black);
                break;
            }
            let side = match self.walker.is_left_son() {
                None => break, // the root may be short, which shortens every path equally
                Some(side) => side,
            };
            self.walker.go_up().unwrap();

            if self.node_mut().child(side.flip()).color() == Red {
                trace!("red-black delete: red sibling, rotating the parent");
                let parent = self.node_mut();
                parent.child_mut(side.flip()).set_color(Black);
                parent.set_color(Red);
                self.walker.rot_side(side).expect(MISSING_NODE);
                // back down to the parent, which now has a black sibling on the other side
                self.descend(side);
            }

            let parent = self.node_mut();
            let sibling = parent.child_mut(side.flip()).node_mut().expect(MISSING_NODE);
            let near = sibling.child(side).color();
            let far = sibling.child(side.flip()).color();

            if near == Black && far == Black {
                trace!("red-black delete: black sibling with black sons, moving up");
                sibling.set_color(Red);
                // the parent's subtree is now short as a whole
                continue;
            }

            if far == Black {
                trace!("red-black delete: red near nephew, rotating the sibling");
                sibling.set_color(Red);
                sibling.child_mut(side).set_color(Black);
                self.descend(side.flip());
                self.walker.rot_side(side.flip()).expect(MISSING_NODE);
                self.walker.go_up().unwrap();
            }

            trace!("red-black delete: red far nephew, rotating the parent");
            let parent = self.node_mut();
            let parent_color = parent.color();
            parent.set_color(Black);
            let sibling = parent.child_mut(side.flip()).node_mut().expect(MISSING_NODE);
            sibling.set_color(parent_color);
            sibling.child_mut(side.flip()).set_color(Black);
            self.walker.rot_side(side).expect(MISSING_NODE);
            break;
        }
        self.blacken_root();
    }
}
