//! Chunked node allocator addressed by stable handles.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A stable handle to a block in a `TypedArena<T>`.
///
/// Handles stay valid until the block is freed, after which the block may be handed out again by
/// a later allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Entry {
    chunk_index: usize,
    block_index: usize,
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Entry>),
}

/// An allocator for a single type of object.
///
/// Objects are stored in fixed-capacity chunks so that growing the arena never moves existing
/// objects between chunks. Freed blocks are threaded onto a free list and reused before a new
/// chunk is pushed.
#[derive(Clone)]
pub struct TypedArena<T> {
    head: Option<Entry>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    size: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_entry(&self, entry: &Entry) -> bool {
        entry.chunk_index < self.chunks.len()
            && entry.block_index < self.chunks[entry.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` holding `chunk_size` objects per chunk.
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            size: 0,
            capacity: 0,
        }
    }

    fn next_entry(&self) -> Entry {
        match self.head {
            Some(entry) => entry,
            None => {
                let chunk_count = self.chunks.len();
                match self.chunks.last() {
                    Some(chunk) if chunk.len() < self.chunk_size => Entry {
                        chunk_index: chunk_count - 1,
                        block_index: chunk.len(),
                    },
                    _ => Entry {
                        chunk_index: chunk_count,
                        block_index: 0,
                    },
                }
            }
        }
    }

    /// Allocates an object and returns its handle.
    pub fn allocate(&mut self, value: T) -> Entry {
        self.allocate_with(|_| value)
    }

    /// Allocates an object built from its own handle. Used to create nodes that link to
    /// themselves.
    pub fn allocate_with<F>(&mut self, f: F) -> Entry
    where
        F: FnOnce(Entry) -> T,
    {
        let entry = self.next_entry();
        let value = f(entry);

        if self.size == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.size += 1;

        match self.head.take() {
            None => {
                self.chunks[entry.chunk_index].push(Block::Occupied(value));
                entry
            }
            Some(head) => {
                let vacant_block = mem::replace(
                    &mut self.chunks[head.chunk_index][head.block_index],
                    Block::Occupied(value),
                );
                match vacant_block {
                    Block::Vacant(next_entry) => {
                        self.head = next_entry;
                        head
                    }
                    Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
                }
            }
        }
    }

    /// Deallocates an object and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `entry` corresponds to an invalid or vacant block.
    pub fn free(&mut self, entry: &Entry) -> T {
        if !self.is_valid_entry(entry) {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(
            &mut self.chunks[entry.chunk_index][entry.block_index],
            Block::Vacant(self.head),
        );
        match old_block {
            Block::Vacant(next_entry) => {
                self.chunks[entry.chunk_index][entry.block_index] = Block::Vacant(next_entry);
                panic!("Error: attempting to free vacant block.");
            }
            Block::Occupied(value) => {
                self.size -= 1;
                self.head = Some(*entry);
                value
            }
        }
    }

    /// Returns an immutable reference to an object, or `None` if the entry is invalid or vacant.
    pub fn get(&self, entry: &Entry) -> Option<&T> {
        if !self.is_valid_entry(entry) {
            return None;
        }
        match self.chunks[entry.chunk_index][entry.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object, or `None` if the entry is invalid or vacant.
    pub fn get_mut(&mut self, entry: &Entry) -> Option<&mut T> {
        if !self.is_valid_entry(entry) {
            return None;
        }
        match self.chunks[entry.chunk_index][entry.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Drops every object and releases all chunks.
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.size = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Entry> for TypedArena<T> {
    type Output = T;

    fn index(&self, entry: Entry) -> &Self::Output {
        self.get(&entry).expect("Error: entry out of bounds.")
    }
}

impl<T> IndexMut<Entry> for TypedArena<T> {
    fn index_mut(&mut self, entry: Entry) -> &mut Self::Output {
        self.get_mut(&entry).expect("Error: entry out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;
    use super::TypedArena;

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        arena.free(&Entry {
            chunk_index: 0,
            block_index: 0,
        });
    }

    #[test]
    #[should_panic]
    fn test_double_free() {
        let mut arena = TypedArena::new(1024);
        let entry = arena.allocate(0);
        arena.free(&entry);
        arena.free(&entry);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        arena.allocate(0);
        arena.allocate(1);
        assert_eq!(
            arena.allocate(2),
            Entry {
                chunk_index: 1,
                block_index: 0
            },
        );
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_allocate_with_own_entry() {
        let mut arena = TypedArena::new(2);
        arena.allocate(None);
        arena.allocate(None);
        let entry = arena.allocate_with(Some);
        assert_eq!(arena[entry], Some(entry));
    }

    #[test]
    fn test_free_reuses_block() {
        let mut arena = TypedArena::new(1024);
        let first = arena.allocate(0);
        let second = arena.allocate(1);
        assert_eq!(arena.free(&first), 0);
        assert_eq!(arena.free(&second), 1);
        assert_eq!(arena.len(), 0);

        assert_eq!(arena.allocate(3), second);
        assert_eq!(arena.allocate(2), first);
        assert_eq!(arena[first], 2);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let entry = arena.allocate(0);
        arena.free(&entry);
        assert_eq!(arena.get(&entry), None);
    }

    #[test]
    fn test_index_mut() {
        let mut arena = TypedArena::new(1024);
        let entry = arena.allocate(0);
        arena[entry] += 1;
        assert_eq!(arena.get(&entry), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(2);
        let entry = arena.allocate(0);
        arena.allocate(1);
        arena.allocate(2);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.get(&entry), None);
        assert_eq!(arena.allocate(3), entry);
    }
}
