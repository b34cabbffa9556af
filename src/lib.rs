//! An ordered set backed by a skip list.
//!
//! `SkipListSet<T, R>` keeps its elements in a hierarchy of sorted, doubly linked levels. Level 0
//! holds every element and each higher level holds a random subset of the level below, so lookups
//! can skip over long runs of elements. Nodes are allocated from an arena and linked by handles
//! rather than pointers.
//!
//! # Examples
//! ```
//! use skiplist_set::SkipListSet;
//!
//! let mut set = SkipListSet::new();
//! for value in &[1, 3, 5, 2, 4] {
//!     set.insert(*value);
//! }
//!
//! assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3, &4, &5]);
//! assert_eq!(set.first(), Some(&1));
//! assert_eq!(set.last(), Some(&5));
//! ```

mod arena;
pub mod error;
pub mod skiplist;

pub use crate::error::{Error, Result};
pub use crate::skiplist::{CursorMut, NaturalOrder, SkipListSet, SortedSet};
