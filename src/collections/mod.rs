//! Collection Types.
//!
//! The linear containers at the top of this list are the building blocks of
//! the rest: [`Stack`] and [`Heap`] sit on an [`Array`], [`Queue`] on a
//! [`LinkedList`], [`HashTable`] chains entries in arrays of arrays, and the
//! graph algorithms drive their traversals with the stack, the queue and the
//! heap.

pub mod array;
pub mod avl_tree;
pub mod binary_search_tree;
pub mod binary_tree;
pub mod disjoint_set;
pub mod graph;
pub mod hash_set;
pub mod hash_table;
pub mod heap;
pub mod linked_list;
pub mod queue;
pub mod stack;
pub mod trie;

pub use self::array::Array;
pub use self::avl_tree::AvlTree;
pub use self::binary_search_tree::BinarySearchTree;
pub use self::binary_tree::BinaryTree;
pub use self::disjoint_set::DisjointSet;
pub use self::graph::{Graph, GraphKind, NodeId};
pub use self::hash_set::HashSet;
pub use self::hash_table::HashTable;
pub use self::heap::{Heap, HeapKind};
pub use self::linked_list::LinkedList;
pub use self::queue::Queue;
pub use self::stack::Stack;
pub use self::trie::Trie;

/// Collection Types Prelude
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{array, list};

    #[doc(no_inline)]
    pub use super::{
        Array, AvlTree, BinarySearchTree, BinaryTree, DisjointSet, Graph, GraphKind, HashSet,
        HashTable, Heap, HeapKind, LinkedList, Queue, Stack, Trie,
    };
}
