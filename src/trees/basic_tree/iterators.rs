//! Iterators over [`BasicTree`]s.
//! None of them recurse, so they work on trees of any depth.

use super::*;

/// A lazy depth-first traversal of a tree, in any [`Order`].
///
/// The stack holds nodes that were not yet expanded, and nodes that were expanded and
/// are waiting for their turn to be yielded. Expanding a node pushes its sons and itself
/// in the reverse of the order they should come out in.
pub struct Traverse<'a, T, A = ()> {
    stack: Vec<(&'a BasicNode<T, A>, bool)>,
    order: Order,
}

impl<'a, T, A> Traverse<'a, T, A> {
    pub fn new(tree: &'a BasicTree<T, A>, order: Order) -> Self {
        let mut res = Traverse {
            stack: vec![],
            order,
        };
        res.push(tree);
        res
    }

    // same as stack.push(...), but deals with the [`Empty`] case.
    fn push(&mut self, tree: &'a BasicTree<T, A>) {
        if let Some(node) = tree.node() {
            self.stack.push((node, false));
        }
    }
}

impl<'a, T, A> Iterator for Traverse<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(&node.value);
            }
            match self.order {
                Order::PreOrder => {
                    self.push(&node.right);
                    self.push(&node.left);
                    return Some(&node.value);
                }
                Order::InOrder => {
                    self.push(&node.right);
                    self.stack.push((node, true));
                    self.push(&node.left);
                }
                Order::PostOrder => {
                    self.stack.push((node, true));
                    self.push(&node.right);
                    self.push(&node.left);
                }
                Order::Leaves => {
                    if node.is_leaf() {
                        return Some(&node.value);
                    }
                    self.push(&node.right);
                    self.push(&node.left);
                }
            }
        }
    }
}

impl<'a, T, A> std::iter::FusedIterator for Traverse<'a, T, A> {}

/// Consumes the tree, passing its values to `func` in sorted order.
pub fn drain_in_order<T, A, F>(tree: BasicTree<T, A>, mut func: F)
where
    F: FnMut(T),
{
    // the stack holds nodes whose left subtree was already drained
    let mut stack: Vec<Box<BasicNode<T, A>>> = vec![];
    let mut current = tree;
    loop {
        while let Some(mut node) = current.into_node_boxed() {
            current = std::mem::take(&mut node.left);
            stack.push(node);
        }
        match stack.pop() {
            None => break,
            Some(node) => {
                let BasicNode { value, right, .. } = *node;
                func(value);
                current = right;
            }
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

    //        4
    //      /   \
    //     2     6
    //    / \     \
    //   1   3     7
    fn sample() -> BasicTree<i32> {
        node(
            node(leaf(1), 2, leaf(3)),
            4,
            node(BasicTree::Empty, 6, leaf(7)),
        )
    }

    fn collect(tree: &BasicTree<i32>, order: Order) -> Vec<i32> {
        tree.traverse(order).cloned().collect()
    }

    #[test]
    fn orders() {
        let tree = sample();
        assert_eq!(collect(&tree, Order::PreOrder), vec![4, 2, 1, 3, 6, 7]);
        assert_eq!(collect(&tree, Order::InOrder), vec![1, 2, 3, 4, 6, 7]);
        assert_eq!(collect(&tree, Order::PostOrder), vec![1, 3, 2, 7, 6, 4]);
        assert_eq!(collect(&tree, Order::Leaves), vec![1, 3, 7]);
    }

    #[test]
    fn empty_tree() {
        let tree: BasicTree<i32> = BasicTree::Empty;
        for order in [Order::PreOrder, Order::InOrder, Order::PostOrder, Order::Leaves] {
            assert_eq!(tree.traverse(order).next(), None);
        }
    }

    #[test]
    fn restartable() {
        let tree = sample();
        let first: Vec<_> = tree.traverse(Order::PostOrder).collect();
        let second: Vec<_> = tree.traverse(Order::PostOrder).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn drains_sorted() {
        let mut res = vec![];
        drain_in_order(sample(), |x| res.push(x));
        assert_eq!(res, vec![1, 2, 3, 4, 6, 7]);
    }

    #[test]
    fn deep_trees_dont_overflow() {
        // a path of length 100_000 going left
        let mut tree = BasicTree::Empty;
        for x in 0..100_000 {
            tree = node(tree, x, BasicTree::Empty);
        }
        assert_eq!(tree.traverse(Order::InOrder).count(), 100_000);
        assert_eq!(tree.traverse(Order::Leaves).cloned().collect::<Vec<_>>(), vec![0]);
        let mut count = 0;
        drain_in_order(tree, |_| count += 1);
        assert_eq!(count, 100_000);
    }
}
