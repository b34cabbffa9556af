//! Ordered set built from a probabilistic, four-way linked hierarchy of levels.

mod cursor;
mod node;
mod set;
mod sorted;

pub use self::cursor::CursorMut;
pub use self::set::{IntoIter, Iter, SkipListSet, ARENA_CHUNK_SIZE, MIN_HEIGHT_BOUND};
pub use self::sorted::{NaturalOrder, SortedSet};
