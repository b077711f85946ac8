//! Self-balancing binary search trees over a user supplied ordering.
//!
//! Two trees are provided, [`avl::AVLTree`] and [`red_black::RedBlackTree`].
//! Both own their elements, keep them unique under a [`Compare`] capability,
//! and pass every element they discard to a [`Destroy`] capability.
//! Their shared interface is the [`SomeTree`] trait.
//!
//!```
//! use arbor::{SomeTree, red_black::RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//! for x in [10, 20, 5, 15, 30] {
//!     tree.insert(x).unwrap();
//! }
//! assert_eq!(tree.min(), Some(&5));
//! assert_eq!(tree.max(), Some(&30));
//! assert!(tree.contains(&15));
//! assert!(tree.insert(15).is_err());
//!```

pub mod data;
pub mod error;
pub mod methods;
pub mod trees;

pub use data::{Compare, Destroy, DropElement, NaturalOrder};
pub use error::{Rejected, TreeError};
pub use trees::*;
