//! Implementation of AVL trees.
//! Balanced by keeping track of subtree heights, this is a worst-case balancing
//! algorithm that has a small memory overhead per node.
//!
//!```
//! use arbor::{SomeTree, avl::AVLTree};
//!
//! let mut tree: AVLTree<i32> = AVLTree::new();
//! for x in [10, 20, 5, 15, 30] {
//!     tree.insert(x).unwrap();
//! }
//! assert!(tree.insert(15).is_err()); // no duplicates
//! assert_eq!(tree.min(), Some(&5));
//! assert_eq!(tree.max(), Some(&30));
//! tree.remove(&10).unwrap();
//! assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), vec![5, 15, 20, 30]);
//! # tree.assert_correctness();
//!```

use super::basic_tree::iterators::{drain_in_order, Traverse};
use super::basic_tree::*;
use super::*;
use crate::data::{Compare, Destroy, DropElement, NaturalOrder};
use crate::methods;
use log::{debug, trace};

/// The type that is used for height bookkeeping.
/// `u8` is definitely enough, since the height of the tree is logarithmic in the tree size.
type H = u8;
/// Used for height differences
type HD = i8;

/// An AVL tree. Balanced by keeping track of subtree heights: the heights of the two
/// sons of any node differ by at most one.
///
/// Elements are ordered by the comparator `C`, and discarded elements are handed to
/// the destructor `X`.
pub struct AVLTree<T, C = NaturalOrder, X = DropElement>
where
    C: Compare<T>,
    X: Destroy<T>,
{
    tree: BasicTree<T, H>,
    len: usize,
    limit: usize,
    compare: C,
    destroy: X,
}

/// For implementing `height`, `balance` and `rebuild_height` for
/// trees, nodes and walkers alike.
trait Heighted {
    fn height(&self) -> H;

    /// Returns `true` if the height of the current node had to be updated,
    /// `false` if it was correct.
    fn rebuild_height(&mut self) -> bool;

    /// Returns `left.height() - right.height()`
    fn balance(&self) -> HD;
}

impl<T> Heighted for BasicTree<T, H> {
    fn height(&self) -> H {
        match self.node() {
            None => 0,
            Some(node) => node.height(),
        }
    }

    fn rebuild_height(&mut self) -> bool {
        if let Some(node) = self.node_mut() {
            node.rebuild_height()
        } else {
            false
        }
    }

    fn balance(&self) -> HD {
        match self.node() {
            None => 0,
            Some(node) => node.balance(),
        }
    }
}

impl<T> Heighted for BasicNode<T, H> {
    fn height(&self) -> H {
        *self.alg_data()
    }

    fn rebuild_height(&mut self) -> bool {
        let new_height = std::cmp::max(self.left.height(), self.right.height()) + 1;
        let changed = self.height() != new_height;
        self.alg_data = new_height;
        changed
    }

    fn balance(&self) -> HD {
        self.left.height() as HD - self.right.height() as HD
    }
}

impl<T: Ord> AVLTree<T> {
    /// Creates an empty [`AVLTree`], ordered by `T`'s [`Ord`] instance.
    pub fn new() -> Self {
        AVLTree::with_capabilities(NaturalOrder, DropElement)
    }
}

impl<T, C: Compare<T>> AVLTree<T, C> {
    /// Creates an empty [`AVLTree`] ordered by `compare`.
    pub fn with_comparator(compare: C) -> Self {
        AVLTree::with_capabilities(compare, DropElement)
    }
}

impl<T, C: Compare<T>, X: Destroy<T>> AVLTree<T, C, X> {
    /// Creates an empty [`AVLTree`] ordered by `compare`, which passes every element
    /// it discards to `destroy`.
    pub fn with_capabilities(compare: C, destroy: X) -> Self {
        AVLTree {
            tree: BasicTree::Empty,
            len: 0,
            limit: 0,
            compare,
            destroy,
        }
    }

    /// The height of the tree. An empty tree has height `0`.
    pub fn height(&self) -> usize {
        self.tree.height() as usize
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
    pub fn representation(&self) -> String
    where
        T: std::fmt::Debug,
    {
        self.tree
            .representation(&|node: &BasicNode<T, H>| {
                format!("{:?}:{}", node.value(), node.height())
            })
    }

    fn is_full(&self) -> bool {
        self.limit > 0 && self.len >= self.limit
    }

    fn destroy_all(&mut self) {
        let destroy = &mut self.destroy;
        let count = deallocate_iteratively(&mut self.tree, |value| destroy.destroy(value));
        debug!("erased {} elements from an AVL tree", count);
        self.len = 0;
    }

    fn assert_heights_locally_internal(node: &BasicNode<T, H>) {
        let left = node.left.height();
        let right = node.right.height();
        assert_eq!(
            node.height(),
            std::cmp::max(left, right) + 1,
            "stale height"
        );
        assert!(
            (-1..=1).contains(&node.balance()),
            "unbalanced node: heights {} and {}",
            left,
            right
        );
    }

    /// Asserts that the heights are correct and balanced at every node.
    /// Otherwise, panics.
    pub fn assert_heights(&self) {
        self.tree
            .assert_correctness_with(&self.compare, Self::assert_heights_locally_internal);
    }
}

impl<T: Ord> Default for AVLTree<T> {
    fn default() -> Self {
        AVLTree::new()
    }
}

impl<T, C: Compare<T>, X: Destroy<T>> Drop for AVLTree<T, C, X> {
    fn drop(&mut self) {
        self.destroy_all();
    }
}

impl<T, C: Compare<T>, X: Destroy<T>> SomeTree<T> for AVLTree<T, C, X> {
    type TreeData = H;

    fn insert(&mut self, element: T) -> Result<(), Rejected<T>> {
        if self.is_full() {
            let reason = TreeError::CapacityExceeded { limit: self.limit };
            return Err(Rejected::new(element, reason));
        }
        let mut walker = AVLWalker::new(&mut self.tree);
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
        let mut walker = AVLWalker::new(&mut self.tree);
        if !methods::search(&mut walker, key, &self.compare) {
            return None;
        }
        let value = walker.delete()?;
        self.len -= 1;
        Some(value)
    }

    fn pop(&mut self) -> Result<(), TreeError> {
        let value = AVLWalker::new(&mut self.tree)
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

    fn traverse(&self, order: Order) -> Traverse<'_, T, H> {
        self.tree.traverse(order)
    }

    fn erase(&mut self) {
        self.destroy_all();
    }

    fn assert_correctness(&self) {
        self.assert_heights();
        assert_eq!(self.tree.count(), self.len, "element count is off");
    }
}

impl<T: Ord> std::iter::FromIterator<T> for AVLTree<T> {
    /// Elements equal to an earlier element are dropped.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AVLTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Compare<T>, X: Destroy<T>> Extend<T> for AVLTree<T, C, X> {
    /// Inserts every element. Rejected elements are dropped, and never reach the destructor.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            let _ = self.insert(element);
        }
    }
}

impl<T: std::fmt::Debug, C: Compare<T>, X: Destroy<T>> std::fmt::Debug for AVLTree<T, C, X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A walker struct for [`AVLTree`].
pub struct AVLWalker<'a, T> {
    walker: BasicWalker<'a, T, H>,
}

derive_SomeWalker! {walker,
    impl<'a, T> SomeWalker<T> for AVLWalker<'a, T> {
        fn go_up(&mut self) -> Result<Side, ()> {
            let res = self.walker.go_up()?;
            let changed = self.walker.inner_mut().rebuild_height();
            assert!(!changed); // it shouldn't have changed without being rebalanced already
            Ok(res)
        }
    }
}

impl<'a, T> AVLWalker<'a, T> {
    fn new(tree: &'a mut BasicTree<T, H>) -> Self {
        AVLWalker {
            walker: BasicWalker::new(tree),
        }
    }

    fn inner(&self) -> &BasicTree<T, H> {
        self.walker.inner()
    }

    fn inner_mut(&mut self) -> &mut BasicTree<T, H> {
        self.walker.inner_mut()
    }

    fn rot_left(&mut self) -> Option<()> {
        let rebuilder = |node: &mut BasicNode<T, H>| {
            node.rebuild_height();
        };
        self.walker.rot_left_with_custom_rebuilder(rebuilder)
    }

    fn rot_right(&mut self) -> Option<()> {
        let rebuilder = |node: &mut BasicNode<T, H>| {
            node.rebuild_height();
        };
        self.walker.rot_right_with_custom_rebuilder(rebuilder)
    }

    fn rot_up(&mut self) -> Result<Side, ()> {
        let rebuilder = |node: &mut BasicNode<T, H>| {
            node.rebuild_height();
        };
        self.walker.rot_up_with_custom_rebuilder(rebuilder)
    }

    /// This function gets called when a node is deleted or inserted,
    /// at the current position.
    ///
    /// Walks up to the root, fixing the heights and rotating where a node is out
    /// of balance. Stops as soon as a node's height didn't change, since nothing above
    /// it can have changed either.
    fn rebalance(&mut self) {
        if self.walker.is_empty() {
            let res = self.walker.go_up(); // heights may be incorrect, so go up with the inner walker
            if res.is_err() {
                return;
            }
        }

        self.inner_mut().rebuild_height();

        loop {
            let node = self.inner().node().unwrap();
            match node.balance() {
                2 => {
                    // left is deeper
                    if node.left.balance() >= 0 {
                        trace!("AVL rebalance: left left case at depth {}", self.depth());
                        self.rot_right().unwrap();
                    } else {
                        trace!("AVL rebalance: left right case at depth {}", self.depth());
                        self.walker.go_left().unwrap();
                        self.rot_left().unwrap();
                        let res = self.rot_up();
                        assert!(res == Ok(Side::Left));
                    }
                }

                -1..=1 => {} // do nothing, the current node is balanced.

                -2 => {
                    // right is deeper
                    if node.right.balance() <= 0 {
                        trace!("AVL rebalance: right right case at depth {}", self.depth());
                        self.rot_left().unwrap();
                    } else {
                        trace!("AVL rebalance: right left case at depth {}", self.depth());
                        self.walker.go_right().unwrap();
                        self.rot_right().unwrap();
                        let res = self.rot_up();
                        assert!(res == Ok(Side::Right));
                    }
                }

                balance => panic!("illegal height difference: {}", balance),
            }

            // current node has been balanced. now go up a node,
            // and check if we need to continue rebalancing.
            let res = self.walker.go_up(); // heights may be incorrect, so go up with the inner walker
            if res.is_err() {
                // reached root
                break;
            }
            let changed = self.inner_mut().rebuild_height();
            let balance = self.inner().balance();
            if !changed && (-1..=1).contains(&balance) {
                // tree is now balanced correctly
                break;
            }
        }
    }

    /// Inserts the value into the tree at the current empty position.
    /// If the current position is not empty, gives the value back.
    /// When the function returns, the walker will be at a position which is an ancestor of the
    /// newly inserted node.
    fn insert(&mut self, value: T) -> Result<(), T> {
        self.walker
            .insert_with_alg_data(value, 1 /* height of a node with no sons */)?;
        self.rebalance();
        Ok(())
    }

    /// Deletes the node at the current position and returns its value.
    /// If the current position is empty, returns [`None`].
    fn delete(&mut self) -> Option<T> {
        Some(self.delete_boxed()?.value)
    }

    /// Deletes a node and returns it with the box.
    fn delete_boxed(&mut self) -> Option<Box<BasicNode<T, H>>> {
        let mut node = self.walker.take_subtree().into_node_boxed()?;
        if node.left.is_empty() || node.right.is_empty() {
            // at most one son: splice the node out
            let son = if node.left.is_empty() {
                std::mem::take(&mut node.right)
            } else {
                std::mem::take(&mut node.left)
            };
            self.walker.put_subtree(son).unwrap();
            self.rebalance();
        } else {
            // find the next node and move it to the current position.
            // the right subtree is rebalanced on its own first: removing its minimum
            // can't affect anything outside of it.
            let mut replacement = {
                let mut walker = AVLWalker::new(&mut node.right);
                methods::go_to_min(&mut walker.walker).unwrap();
                let mut replacement = walker.walker.take_subtree().into_node_boxed().unwrap();
                assert!(replacement.left.is_empty());
                walker
                    .walker
                    .put_subtree(std::mem::take(&mut replacement.right))
                    .unwrap();
                walker.rebalance(); // rebalance here
                replacement
            };

            replacement.left = std::mem::take(&mut node.left);
            replacement.right = std::mem::take(&mut node.right);
            replacement.rebuild_height();
            self.walker
                .put_subtree(BasicTree::Root(replacement))
                .unwrap();
            self.rebalance(); // rebalance here
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tree_of(values: &[i32]) -> AVLTree<i32> {
        values.iter().cloned().collect()
    }

    #[test]
    fn ascending_inserts_stay_logarithmic() {
        let mut tree = AVLTree::new();
        for x in 0..1023 {
            tree.insert(x).unwrap();
        }
        tree.assert_correctness();
        // a perfect tree with 1023 nodes has height 10
        assert_eq!(tree.height(), 10);
        assert_eq!(tree.peek(), Some(&511));
    }

    #[test]
    fn single_rotations() {
        // left left
        let tree = tree_of(&[3, 2, 1]);
        assert_eq!(tree.representation(), "<<* 1:1 * > 2:2 <* 3:1 * > >");
        // right right
        let tree = tree_of(&[1, 2, 3]);
        assert_eq!(tree.representation(), "<<* 1:1 * > 2:2 <* 3:1 * > >");
    }

    #[test]
    fn double_rotations() {
        // left right
        let tree = tree_of(&[3, 1, 2]);
        assert_eq!(tree.representation(), "<<* 1:1 * > 2:2 <* 3:1 * > >");
        // right left
        let tree = tree_of(&[1, 3, 2]);
        assert_eq!(tree.representation(), "<<* 1:1 * > 2:2 <* 3:1 * > >");
    }

    #[test]
    fn removing_a_node_with_two_sons_promotes_the_successor() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        tree.remove(&4).unwrap();
        assert_eq!(tree.peek(), Some(&5));
        assert_eq!(
            tree.iter().cloned().collect::<Vec<_>>(),
            vec![1, 2, 3, 5, 6, 7]
        );
        tree.assert_correctness();
    }

    #[test]
    fn removal_rebalances_up_to_the_root() {
        // a minimal AVL tree of height 5: removing from its shallow side forces
        // rotations at more than one level
        let mut tree = tree_of(&[8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1]);
        tree.assert_correctness();
        assert_eq!(tree.height(), 5);
        tree.remove(&12).unwrap();
        tree.assert_correctness();
        assert_eq!(tree.len(), 11);
        assert_eq!(tree.height(), 4);
    }

    #[test]
    fn missing_keys() {
        let mut tree = tree_of(&[1, 2, 3]);
        assert_eq!(tree.remove(&4), Err(TreeError::NotFound));
        assert_eq!(tree.take(&0), None);
        assert_eq!(tree.len(), 3);
        let mut empty: AVLTree<i32> = AVLTree::new();
        assert_eq!(empty.pop(), Err(TreeError::EmptyTree));
        assert_eq!(empty.peek(), None);
    }

    #[test]
    fn pop_removes_the_root() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5]);
        while let Some(&root) = tree.peek() {
            tree.pop().unwrap();
            assert!(!tree.contains(&root));
            tree.assert_correctness();
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn destructor_runs_once_per_discarded_element() {
        let destroyed = Rc::new(RefCell::new(vec![]));
        let log = destroyed.clone();
        let mut tree =
            AVLTree::with_capabilities(NaturalOrder, move |x: i32| log.borrow_mut().push(x));
        for x in 0..10 {
            tree.insert(x).unwrap();
        }
        assert!(tree.insert(3).is_err());
        tree.remove(&3).unwrap();
        assert_eq!(tree.take(&4), Some(4));
        tree.pop().unwrap();
        assert_eq!(destroyed.borrow().len(), 2);
        drop(tree);
        let mut all = destroyed.borrow().clone();
        all.sort();
        assert_eq!(all, vec![0, 1, 2, 3, 5, 6, 7, 8, 9]);
    }
}
