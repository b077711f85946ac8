use super::*;

/// The auto-generated deallocation code for [`BasicTree`] is recursive.
/// Even though balanced trees are shallow, tearing a tree down also has to hand every
/// value to a destructor, so we walk the tree with an explicit stack instead.
///
/// From the user's perspective this is a function from the `basic_tree` module.
struct IterativeDeallocator<T, A> {
    stack: Vec<Box<BasicNode<T, A>>>,
}

impl<T, A> IterativeDeallocator<T, A> {
    fn step(&mut self) -> Option<T> {
        let mut node = self.stack.pop()?;
        self.push(std::mem::take(&mut node.left));
        self.push(std::mem::take(&mut node.right));
        let BasicNode { value, .. } = *node;
        Some(value)
    }

    fn push(&mut self, tree: BasicTree<T, A>) {
        if let Some(node) = tree.into_node_boxed() {
            self.stack.push(node);
        }
    }
}

/// Replaces the tree with an empty tree, and deallocates the tree iteratively,
/// passing every value to `destroy`. Returns the number of values destroyed.
/// Input is a reference and not an owned value so that this function can get
/// called in `Drop` implementations.
pub fn deallocate_iteratively<T, A, F>(tree: &mut BasicTree<T, A>, mut destroy: F) -> usize
where
    F: FnMut(T),
{
    let my_tree = std::mem::replace(tree, BasicTree::new());
    let mut deallocator = IterativeDeallocator { stack: vec![] };
    deallocator.push(my_tree);
    let mut count = 0;
    while let Some(value) = deallocator.step() {
        destroy(value);
        count += 1;
    }
    count
}
