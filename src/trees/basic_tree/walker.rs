// This is a private module, so no documentation for it directly.
// instead look for documentation of the `BasicWalker` struct.

use super::*;
use recursive_reference::*;

use crate::trees::SomeWalker; // in order to be able to use our own go_up method

/// This struct implements a walker for the [`BasicTree`] type.
/// It is a struct that has a mutable reference of the tree, and allows you to walk up and down on it.
/// The walker may also be in a position which is the son of a node, but doesn't contain
/// a node by itself, and then it is said to be in an empty position.
///
/// The walker remembers the whole path from the root to the current position, so the
/// parent of the current position is always one [`SomeWalker::go_up`] away, even when
/// the current position is empty. Nodes therefore don't need parent pointers.
///
/// Walkers for the balanced trees are built by wrapping around the [`BasicWalker`] type,
/// as the balanced tree types are built by wrapping around the [`BasicTree`] type.
///
/// Internally, [`recursive_reference::RecRef`] is used, in order to be able to dynamically
/// go up and down the tree without upsetting the borrow checker.
pub struct BasicWalker<'a, T, A = ()> {
    /// Holds references to all the subtrees from the root to the current position.
    pub(super) rec_ref: RecRef<'a, BasicTree<T, A>>,

    /// This array holds for every node, whether the next subtree in the walker
    /// is its left son or the right son.
    /// This array is always one shorter than [`BasicWalker::rec_ref`],
    /// because the last node has no son in the walker.
    pub(super) is_left: Vec<Side>,
}

impl<'a, T, A> BasicWalker<'a, T, A> {
    pub fn new(tree: &'a mut BasicTree<T, A>) -> BasicWalker<'a, T, A> {
        BasicWalker {
            rec_ref: RecRef::new(tree),
            is_left: vec![],
        }
    }

    /// Returns true if at an empty position.
    pub fn is_empty(&self) -> bool {
        self.rec_ref.is_empty()
    }

    /// Returns true if at the root.
    /// Note: even if you are the root, the root might still be empty.
    pub fn is_root(&self) -> bool {
        self.is_left.is_empty()
    }

    /// If the current position is the left son of a node, returns [`Some(Left)`].
    /// If the current position is the right son of a node, returns [`Some(Right)`].
    /// If at the root, returns [`None`].
    pub fn is_left_son(&self) -> Option<Side> {
        self.is_left.last().cloned()
    }

    pub fn inner(&self) -> &BasicTree<T, A> {
        &*self.rec_ref
    }

    pub(in super::super) fn inner_mut(&mut self) -> &mut BasicTree<T, A> {
        &mut *self.rec_ref
    }

    pub fn node(&self) -> Option<&BasicNode<T, A>> {
        self.rec_ref.node()
    }

    pub(in super::super) fn node_mut(&mut self) -> Option<&mut BasicNode<T, A>> {
        self.rec_ref.node_mut()
    }

    /// Performs a left rotation.
    /// Returns [`None`] if this is an empty tree or if it has no right son.
    pub fn rot_left(&mut self) -> Option<()> {
        self.rot_left_with_custom_rebuilder(|_| {})
    }

    /// Performs a left rotation.
    /// Returns [`None`] if this is an empty tree or if it has no right son.
    /// Uses a callback for a rebuilding action, that is applied first to the node that
    /// moved down, and then to the node that moved up.
    pub fn rot_left_with_custom_rebuilder<F: FnMut(&mut BasicNode<T, A>)>(
        &mut self,
        mut rebuilder: F,
    ) -> Option<()> {
        if self.node()?.right.is_empty() {
            return None;
        }
        let mut bn1: Box<BasicNode<T, A>> = self.take_subtree().into_node_boxed()?;
        let mut bn2: Box<BasicNode<T, A>> = std::mem::take(&mut bn1.right).into_node_boxed()?;

        bn1.right = std::mem::take(&mut bn2.left);
        rebuilder(&mut *bn1);
        bn2.left = Root(bn1);
        rebuilder(&mut *bn2);

        *self.rec_ref = Root(bn2); // restore the node back
        Some(())
    }

    /// Performs a right rotation.
    /// Returns [`None`] if this is an empty tree or if it has no left son.
    pub fn rot_right(&mut self) -> Option<()> {
        self.rot_right_with_custom_rebuilder(|_| {})
    }

    /// Performs a right rotation.
    /// Returns [`None`] if this is an empty tree or if it has no left son.
    /// Uses a callback for a rebuilding action, that is applied first to the node that
    /// moved down, and then to the node that moved up.
    pub fn rot_right_with_custom_rebuilder<F: FnMut(&mut BasicNode<T, A>)>(
        &mut self,
        mut rebuilder: F,
    ) -> Option<()> {
        if self.node()?.left.is_empty() {
            return None;
        }
        let mut bn1: Box<BasicNode<T, A>> = self.take_subtree().into_node_boxed()?;
        let mut bn2: Box<BasicNode<T, A>> = std::mem::take(&mut bn1.left).into_node_boxed()?;

        bn1.left = std::mem::take(&mut bn2.right);
        rebuilder(&mut *bn1);
        bn2.right = Root(bn1);
        rebuilder(&mut *bn2);

        *self.rec_ref = Root(bn2); // restore the node back
        Some(())
    }

    /// Performs rot_left if `side` is [`Side::Left`]
    /// rot_right otherwise
    pub fn rot_side(&mut self, side: Side) -> Option<()> {
        match side {
            Side::Left => self.rot_left(),
            Side::Right => self.rot_right(),
        }
    }

    /// Performs rot_left if `side` is [`Side::Left`]
    /// rot_right otherwise
    pub fn rot_side_with_custom_rebuilder<F: FnMut(&mut BasicNode<T, A>)>(
        &mut self,
        side: Side,
        rebuilder: F,
    ) -> Option<()> {
        match side {
            Side::Left => self.rot_left_with_custom_rebuilder(rebuilder),
            Side::Right => self.rot_right_with_custom_rebuilder(rebuilder),
        }
    }

    /// Rotates so that the current node moves up.
    /// Basically moves up and then calls rot_side.
    /// Fails if the current node is the root.
    pub fn rot_up_with_custom_rebuilder<F: FnMut(&mut BasicNode<T, A>)>(
        &mut self,
        rebuilder: F,
    ) -> Result<Side, ()> {
        let b = self.go_up()?;
        self.rot_side_with_custom_rebuilder::<F>(b.flip(), rebuilder)
            .expect("original node went missing?");
        Ok(b)
    }

    pub fn go_to_root(&mut self) {
        while self.go_up().is_ok() {}
    }

    /// If the current position is empty, puts a new node there.
    /// Otherwise, gives the value back.
    pub fn insert_with_alg_data(&mut self, value: T, alg_data: A) -> Result<(), T> {
        match *self.rec_ref {
            Empty => {
                *self.rec_ref = BasicTree::from_node(BasicNode::new_alg(value, alg_data));
                Ok(())
            }
            _ => Err(value),
        }
    }

    /// Takes the current subtree out of the tree, and writes `Empty` instead.
    /// Intended to help writing tree algorithms.
    pub(in super::super) fn take_subtree(&mut self) -> BasicTree<T, A> {
        std::mem::replace(&mut *self.rec_ref, BasicTree::Empty)
    }

    /// If the current position is empty, puts the given subtree there instead.
    /// Intended to help writing tree algorithms.
    pub(in super::super) fn put_subtree(&mut self, new: BasicTree<T, A>) -> Option<()> {
        if self.rec_ref.is_empty() {
            *self.rec_ref = new;
            Some(())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: i32) -> BasicTree<i32> {
        BasicTree::from_node(BasicNode::new_alg(value, ()))
    }

    fn node(left: BasicTree<i32>, value: i32, right: BasicTree<i32>) -> BasicTree<i32> {
        let mut node = BasicNode::new_alg(value, ());
        node.left = left;
        node.right = right;
        BasicTree::from_node(node)
    }

    fn repr(tree: &BasicTree<i32>) -> String {
        tree.representation(&|node: &BasicNode<i32>| node.value().to_string())
    }

    #[test]
    fn rotations_move_a_son_up() {
        let mut tree = node(leaf(1), 2, leaf(3));
        let mut walker = tree.walker();
        walker.rot_left().unwrap();
        assert_eq!(repr(walker.inner()), "<<<* 1 * > 2 * > 3 * >");
        walker.rot_right().unwrap();
        assert_eq!(repr(walker.inner()), "<<* 1 * > 2 <* 3 * > >");
        assert!(walker.is_root());
    }

    #[test]
    fn rebuilder_sees_the_lower_node_first() {
        let mut tree = node(leaf(1), 2, leaf(3));
        let mut seen = vec![];
        tree.walker()
            .rot_side_with_custom_rebuilder(Side::Right, |node| seen.push(*node.value()))
            .unwrap();
        assert_eq!(seen, vec![2, 1]);
        assert_eq!(repr(&tree), "<* 1 <* 2 <* 3 * > > >");
    }

    #[test]
    fn rotation_without_a_son_leaves_the_tree_alone() {
        let mut tree = leaf(1);
        let mut walker = tree.walker();
        assert_eq!(walker.rot_left(), None);
        assert_eq!(walker.rot_right(), None);
        assert_eq!(repr(walker.inner()), "<* 1 * >");

        let mut empty: BasicTree<i32> = BasicTree::Empty;
        assert_eq!(empty.walker().rot_left(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn rot_up_lifts_the_current_node() {
        let mut tree = node(leaf(1), 2, leaf(3));
        let mut walker = tree.walker();
        walker.go_left().unwrap();
        assert!(!walker.is_root());
        assert_eq!(walker.rot_up_with_custom_rebuilder(|_| {}), Ok(Side::Left));
        assert!(walker.is_root());
        assert_eq!(walker.value(), Some(&1));
        assert_eq!(repr(walker.inner()), "<* 1 <* 2 <* 3 * > > >");
    }
}
