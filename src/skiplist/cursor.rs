use crate::arena::Entry;
use crate::skiplist::set::SkipListSet;
use rand::Rng;

/// A forward cursor over level 0 of a `SkipListSet<T, R>` that can remove the element it sits on.
///
/// The cursor starts before the first element. It mutably borrows the set, so the set cannot be
/// changed through any other path while the cursor is alive.
///
/// # Examples
/// ```
/// use skiplist_set::SkipListSet;
///
/// let mut set: SkipListSet<u32> = (1..6).collect();
/// {
///     let mut cursor = set.cursor_mut();
///     assert_eq!(cursor.current(), None);
///     assert_eq!(cursor.advance(), Some(&1));
///     assert_eq!(cursor.advance(), Some(&2));
///     assert_eq!(cursor.remove(), Some(2));
///     assert_eq!(cursor.current(), Some(&1));
///     assert_eq!(cursor.advance(), Some(&3));
/// }
/// assert_eq!(set.len(), 4);
/// ```
pub struct CursorMut<'a, T, R>
where
    T: 'a,
    R: 'a,
{
    set: &'a mut SkipListSet<T, R>,
    current: Entry,
}

impl<'a, T, R> CursorMut<'a, T, R>
where
    T: 'a + Ord,
    R: 'a + Rng,
{
    pub(super) fn new(set: &'a mut SkipListSet<T, R>) -> Self {
        let current = set.bottom_head;
        CursorMut { set, current }
    }

    /// Returns `true` if there is an element after the cursor.
    pub fn has_next(&self) -> bool {
        self.set.arena[self.current].right != self.set.bottom_tail
    }

    /// Moves the cursor to the next element and returns it. Returns `None` and leaves the cursor
    /// in place if there is no next element.
    pub fn advance(&mut self) -> Option<&T> {
        if !self.has_next() {
            return None;
        }
        self.current = self.set.arena[self.current].right;
        self.set.value(self.current)
    }

    /// Returns the element the cursor sits on, or `None` if it sits before the first element.
    pub fn current(&self) -> Option<&T> {
        self.set.value(self.current)
    }

    /// Removes the element the cursor sits on together with its tower and moves the cursor back
    /// to the previous element. Returns `None` without changing the set if the cursor sits before
    /// the first element.
    pub fn remove(&mut self) -> Option<T> {
        let left = self.set.arena[self.current].left;
        let value = self.set.unlink_tower(self.current)?;
        self.current = left;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::skiplist::SkipListSet;
    use rand::{SeedableRng, XorShiftRng};

    fn seeded() -> SkipListSet<u32> {
        let mut set = SkipListSet::with_rng(XorShiftRng::from_seed([1, 1, 1, 1]));
        set.add_all(1..6);
        set
    }

    #[test]
    fn test_walk() {
        let mut set = seeded();
        let mut cursor = set.cursor_mut();
        let mut values = Vec::new();
        while cursor.has_next() {
            values.push(*cursor.advance().unwrap());
        }
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.current(), Some(&5));
    }

    #[test]
    fn test_remove_before_first() {
        let mut set = seeded();
        {
            let mut cursor = set.cursor_mut();
            assert_eq!(cursor.remove(), None);
        }
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_remove_first_moves_to_head() {
        let mut set = seeded();
        {
            let mut cursor = set.cursor_mut();
            cursor.advance();
            assert_eq!(cursor.remove(), Some(1));
            assert_eq!(cursor.current(), None);
            assert_eq!(cursor.remove(), None);
            assert_eq!(cursor.advance(), Some(&2));
        }
        assert_eq!(set.first(), Some(&2));
    }

    #[test]
    fn test_remove_every_other() {
        let mut set = seeded();
        {
            let mut cursor = set.cursor_mut();
            while let Some(&value) = cursor.advance() {
                if value % 2 == 0 {
                    assert_eq!(cursor.remove(), Some(value));
                }
            }
        }
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!(set.len(), 3);
        assert!(!set.contains(&2));
        assert!(set.insert(2));
    }

    #[test]
    fn test_remove_all() {
        let mut set = seeded();
        {
            let mut cursor = set.cursor_mut();
            while cursor.advance().is_some() {
                cursor.remove();
            }
        }
        assert!(set.is_empty());
        assert_eq!(set.first(), None);
        assert_eq!(set.last(), None);
    }
}
