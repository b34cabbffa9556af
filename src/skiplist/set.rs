use crate::arena::{Entry, TypedArena};
use crate::skiplist::cursor::CursorMut;
use crate::skiplist::node::{Node, NodeKind, Rank};
use crate::skiplist::sorted::{NaturalOrder, SortedSet};
use rand::{self, Rng, XorShiftRng};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use tracing::{debug, trace};

/// Number of nodes allocated per arena chunk.
pub const ARENA_CHUNK_SIZE: usize = 1024;

/// Initial advisory cap on how many levels a single coin-flip chain may climb.
pub const MIN_HEIGHT_BOUND: usize = 4;

/// An ordered set implemented by a skip list.
///
/// Every level is a doubly linked chain bounded by a head (negative infinity) and a tail (positive
/// infinity) sentinel. Level 0 contains every element; each higher level contains roughly half of
/// the elements of the level below it, chosen by flipping a fair coin when an element is inserted.
/// Copies of an element on different levels form a tower linked by `up` and `down` links. Search
/// descends from the top level, skipping over runs of elements, so searching, insertion, and
/// deletion take expected logarithmic time.
///
/// All nodes live in an arena and refer to each other through handles, so the structure contains
/// no unsafe code and no reference counting.
///
/// The coin is flipped with `R`, which can be injected with `with_rng` to make the shape of the
/// towers reproducible.
///
/// # Examples
/// ```
/// use skiplist_set::SkipListSet;
///
/// let mut set = SkipListSet::new();
/// assert!(set.insert(1));
/// assert!(set.insert(3));
/// assert!(!set.insert(3));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.first(), Some(&1));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert!(set.remove(&1));
/// assert!(!set.remove(&1));
/// ```
#[derive(Clone)]
pub struct SkipListSet<T, R = XorShiftRng> {
    pub(super) arena: TypedArena<Node<T>>,
    top_head: Entry,
    top_tail: Entry,
    pub(super) bottom_head: Entry,
    pub(super) bottom_tail: Entry,
    height: usize,
    max_height_bound: usize,
    len: usize,
    rng: R,
}

impl<T> SkipListSet<T, XorShiftRng>
where
    T: Ord,
{
    /// Constructs a new, empty `SkipListSet<T>` whose coin flips come from a randomly seeded
    /// `XorShiftRng`.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let set: SkipListSet<u32> = SkipListSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_rng(rand::weak_rng())
    }
}

impl<T, R> SkipListSet<T, R> {
    fn allocate_level(
        arena: &mut TypedArena<Node<T>>,
        below: Option<(Entry, Entry)>,
    ) -> (Entry, Entry) {
        let head = arena.allocate_with(|head| {
            Node::new(NodeKind::Head, head, head, below.map(|(head, _)| head))
        });
        let tail = arena.allocate_with(|tail| {
            Node::new(NodeKind::Tail, head, tail, below.map(|(_, tail)| tail))
        });
        arena[head].right = tail;

        if let Some((below_head, below_tail)) = below {
            arena[below_head].up = Some(head);
            arena[below_tail].up = Some(tail);
        }
        (head, tail)
    }

    pub(super) fn rank(&self, entry: Entry) -> Rank<T> {
        match self.arena[entry].kind {
            NodeKind::Head => Rank::NegativeInfinity,
            NodeKind::Tail => Rank::PositiveInfinity,
            NodeKind::Leaf(ref value) => Rank::Real(value),
            NodeKind::Tower(leaf) => match self.arena[leaf].kind {
                NodeKind::Leaf(ref value) => Rank::Real(value),
                _ => panic!("Error: tower does not rest on a leaf."),
            },
        }
    }

    pub(super) fn value(&self, entry: Entry) -> Option<&T> {
        match self.arena[entry].kind {
            NodeKind::Leaf(ref value) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let set: SkipListSet<u32> = SkipListSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of levels above level 0.
    ///
    /// The height only grows during insertion and only shrinks when the set is cleared.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the advisory cap on the number of levels a single insertion may climb.
    pub fn max_height_bound(&self) -> usize {
        self.max_height_bound
    }

    /// Returns the minimum element of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(3);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    pub fn first(&self) -> Option<&T> {
        self.value(self.arena[self.bottom_head].right)
    }

    /// Returns the maximum element of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// assert_eq!(set.last(), None);
    /// set.insert(3);
    /// set.insert(1);
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    pub fn last(&self) -> Option<&T> {
        self.value(self.arena[self.bottom_tail].left)
    }

    /// Returns the ordering of the set. Elements are always ordered by their `Ord`
    /// implementation.
    pub fn comparator(&self) -> NaturalOrder {
        NaturalOrder
    }

    /// Returns an iterator over the set. The iterator will yield elements in ascending order.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<T> {
        Iter {
            arena: &self.arena,
            front: self.arena[self.bottom_head].right,
            back: self.arena[self.bottom_tail].left,
            remaining: self.len,
        }
    }
}

impl<T, R> SkipListSet<T, R>
where
    T: Ord,
    R: Rng,
{
    /// Constructs a new, empty `SkipListSet<T, R>` that flips coins with `rng`.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, XorShiftRng};
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::with_rng(XorShiftRng::from_seed([1, 1, 1, 1]));
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// ```
    pub fn with_rng(rng: R) -> Self {
        let mut arena = TypedArena::new(ARENA_CHUNK_SIZE);
        let (head, tail) = Self::allocate_level(&mut arena, None);
        SkipListSet {
            arena,
            top_head: head,
            top_tail: tail,
            bottom_head: head,
            bottom_tail: tail,
            height: 0,
            max_height_bound: MIN_HEIGHT_BOUND,
            len: 0,
            rng,
        }
    }

    // Returns the level-0 node with the greatest rank less than or equal to `value`, or the level-0
    // head if there is none.
    fn locate_predecessor(&self, value: &T) -> Entry {
        let target = Rank::Real(value);
        let mut curr = self.top_head;
        loop {
            loop {
                let next = self.arena[curr].right;
                if self.rank(next) <= target {
                    curr = next;
                } else {
                    break;
                }
            }

            match self.arena[curr].down {
                Some(down) => curr = down,
                None => return curr,
            }
        }
    }

    fn splice_after(&mut self, left: Entry, kind: NodeKind<T>, down: Option<Entry>) -> Entry {
        let right = self.arena[left].right;
        let entry = self.arena.allocate(Node::new(kind, left, right, down));
        self.arena[left].right = entry;
        self.arena[right].left = entry;
        entry
    }

    fn push_level(&mut self) {
        let (head, tail) =
            Self::allocate_level(&mut self.arena, Some((self.top_head, self.top_tail)));
        self.top_head = head;
        self.top_tail = tail;
        self.height += 1;
        trace!(height = self.height, len = self.len, "materialized new top level");
    }

    // Flips coins to stack copies of `leaf` on the levels above it. Returns the number of copies
    // created.
    fn grow_tower(&mut self, leaf: Entry, allow_new_levels: bool) -> usize {
        let mut below = leaf;
        let mut trial = 0;
        while self.rng.gen::<bool>() && trial <= self.max_height_bound {
            if trial >= self.height {
                if !allow_new_levels {
                    break;
                }
                self.push_level();
            }

            let mut walker = self.arena[below].left;
            let parent = loop {
                match self.arena[walker].up {
                    Some(up) => break up,
                    None => walker = self.arena[walker].left,
                }
            };

            let node = self.splice_after(parent, NodeKind::Tower(leaf), Some(below));
            self.arena[below].up = Some(node);
            below = node;
            trial += 1;
        }
        trial
    }

    fn raise_height_bound(&mut self) {
        let exceeded = match 1usize.checked_shl(self.height as u32) {
            Some(capacity) => self.len > capacity,
            None => false,
        };
        if !exceeded {
            return;
        }

        let bits = mem::size_of::<usize>() * 8 - self.len.leading_zeros() as usize;
        if bits > self.max_height_bound {
            self.max_height_bound = bits;
            trace!(
                max_height_bound = self.max_height_bound,
                height = self.height,
                len = self.len,
                "raised height bound"
            );
        }
    }

    fn detach(&mut self, entry: Entry) -> Node<T> {
        let left = self.arena[entry].left;
        let right = self.arena[entry].right;
        self.arena[left].right = right;
        self.arena[right].left = left;
        self.arena.free(&entry)
    }

    // Unlinks a level-0 node and every copy above it, bottom to top.
    pub(super) fn unlink_tower(&mut self, leaf: Entry) -> Option<T> {
        if !self.arena[leaf].is_leaf() {
            return None;
        }
        let node = self.detach(leaf);
        let mut above = node.up;
        while let Some(entry) = above {
            above = self.detach(entry).up;
        }
        self.len -= 1;
        node.into_value()
    }

    /// Inserts a value into the set. Returns `false` and leaves the set unchanged if an equal
    /// value already exists.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let pred = self.locate_predecessor(&value);
        if self.rank(pred) == Rank::Real(&value) {
            return false;
        }

        let leaf = self.splice_after(pred, NodeKind::Leaf(value), None);
        self.grow_tower(leaf, true);
        self.len += 1;
        self.raise_height_bound();
        true
    }

    /// Removes a value from the set and returns it. Returns `None` if the value does not exist.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.insert(1);
    /// assert_eq!(set.take(&1), Some(1));
    /// assert_eq!(set.take(&1), None);
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        let pred = self.locate_predecessor(value);
        if self.rank(pred) != Rank::Real(value) {
            return None;
        }
        self.unlink_tower(pred)
    }

    /// Removes a value from the set. Returns `true` if the value existed.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        let pred = self.locate_predecessor(value);
        self.rank(pred) == Rank::Real(value)
    }

    /// Returns the greatest element that is less than or equal to `value`. Returns `None` if such
    /// an element does not exist.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, value: &T) -> Option<&T> {
        self.value(self.locate_predecessor(value))
    }

    /// Returns the least element that is greater than or equal to `value`. Returns `None` if such
    /// an element does not exist.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil(&self, value: &T) -> Option<&T> {
        let pred = self.locate_predecessor(value);
        if self.rank(pred) == Rank::Real(value) {
            self.value(pred)
        } else {
            self.value(self.arena[pred].right)
        }
    }

    /// Removes and returns the minimum element. Returns `None` if the set is empty.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.arena[self.bottom_head].right;
        self.unlink_tower(first)
    }

    /// Removes and returns the maximum element. Returns `None` if the set is empty.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.arena[self.bottom_tail].left;
        self.unlink_tower(last)
    }

    /// Clears the set, removing all values and every level above level 0.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert_eq!(set.height(), 0);
    /// ```
    pub fn clear(&mut self) {
        debug!(height = self.height, len = self.len, "clearing skip list");
        self.arena.clear();
        let (head, tail) = Self::allocate_level(&mut self.arena, None);
        self.top_head = head;
        self.top_tail = tail;
        self.bottom_head = head;
        self.bottom_tail = tail;
        self.height = 0;
        self.max_height_bound = MIN_HEIGHT_BOUND;
        self.len = 0;
    }

    /// Discards every tower above level 0 and regrows them with fresh coin flips.
    ///
    /// The height of the set is kept, so no new levels are created. Rebalancing bounds the skew
    /// left behind by adversarial sequences of insertions and deletions; it is never run
    /// implicitly.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// for value in 0..100 {
    ///     set.insert(value);
    /// }
    /// let height = set.height();
    /// set.rebalance();
    /// assert_eq!(set.height(), height);
    /// assert_eq!(set.len(), 100);
    /// ```
    pub fn rebalance(&mut self) {
        let mut discarded = 0;
        let (mut head, mut tail) = (self.top_head, self.top_tail);
        while let (Some(head_below), Some(tail_below)) =
            (self.arena[head].down, self.arena[tail].down)
        {
            let mut curr = self.arena[head].right;
            while curr != tail {
                curr = self.arena.free(&curr).right;
                discarded += 1;
            }
            self.arena[head].right = tail;
            self.arena[tail].left = head;
            head = head_below;
            tail = tail_below;
        }

        let mut rebuilt = 0;
        let mut curr = self.arena[self.bottom_head].right;
        while curr != self.bottom_tail {
            self.arena[curr].up = None;
            rebuilt += self.grow_tower(curr, false);
            curr = self.arena[curr].right;
        }

        debug!(
            height = self.height,
            len = self.len,
            discarded,
            rebuilt,
            "rebalanced skip list"
        );
    }

    /// Retains only the elements for which `f` returns `true`, in ascending order.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set: SkipListSet<u32> = (0..6).collect();
    /// set.retain(|value| value % 2 == 0);
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&0, &2, &4]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut curr = self.arena[self.bottom_head].right;
        while curr != self.bottom_tail {
            let next = self.arena[curr].right;
            let keep = match self.arena[curr].kind {
                NodeKind::Leaf(ref value) => f(value),
                _ => true,
            };
            if !keep {
                self.unlink_tower(curr);
            }
            curr = next;
        }
    }

    /// Inserts every value. Returns `true` if the set changed.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// assert!(set.add_all(vec![1, 2]));
    /// assert!(!set.add_all(vec![1, 2]));
    /// ```
    pub fn add_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let mut changed = false;
        for value in values {
            changed |= self.insert(value);
        }
        changed
    }

    /// Removes every value. Returns `true` if the set changed.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set: SkipListSet<u32> = (0..4).collect();
    /// assert!(set.remove_all(&[1, 5]));
    /// assert!(!set.remove_all(&[5]));
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn remove_all<'a, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut changed = false;
        for value in values {
            changed |= self.remove(value);
        }
        changed
    }

    /// Keeps only the elements that also appear in `values`. Returns `true` if the set changed.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set: SkipListSet<u32> = (1..7).collect();
    /// assert!(set.retain_all(&[2, 4, 6, 8]));
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&2, &4, &6]);
    /// ```
    pub fn retain_all<'a, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut kept = values.into_iter().collect::<Vec<&T>>();
        kept.sort();
        kept.dedup();

        let len = self.len;
        self.retain(|value| {
            kept.binary_search_by(|probe| Ord::cmp(*probe, value))
                .is_ok()
        });
        self.len != len
    }

    /// Checks if every value exists in the set. Returns `true` for an empty `values`.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let set: SkipListSet<u32> = (0..4).collect();
    /// assert!(set.contains_all(&[0, 3]));
    /// assert!(!set.contains_all(&[3, 4]));
    /// ```
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Returns a cursor positioned before the first element of the set. The cursor can remove the
    /// element it sits on.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let mut set: SkipListSet<u32> = (1..4).collect();
    /// {
    ///     let mut cursor = set.cursor_mut();
    ///     while let Some(&value) = cursor.advance() {
    ///         if value == 2 {
    ///             cursor.remove();
    ///         }
    ///     }
    /// }
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3]);
    /// ```
    pub fn cursor_mut(&mut self) -> CursorMut<T, R> {
        CursorMut::new(self)
    }

    /// Returns every element in ascending order in a fixed-size slice.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let set: SkipListSet<u32> = vec![3, 1, 2].into_iter().collect();
    /// assert_eq!(&*set.to_array(), &[1, 2, 3]);
    /// ```
    pub fn to_array(&self) -> Box<[T]>
    where
        T: Clone,
    {
        self.iter().cloned().collect::<Vec<T>>().into_boxed_slice()
    }

    /// Writes every element in ascending order into `buffer`, replacing its contents. The
    /// allocation of `buffer` is reused when its capacity is large enough.
    ///
    /// # Examples
    /// ```
    /// use skiplist_set::SkipListSet;
    ///
    /// let set: SkipListSet<u32> = vec![3, 1, 2].into_iter().collect();
    /// let buffer = set.to_array_with(Vec::with_capacity(16));
    /// assert_eq!(buffer, vec![1, 2, 3]);
    /// assert!(buffer.capacity() >= 16);
    /// ```
    pub fn to_array_with(&self, mut buffer: Vec<T>) -> Vec<T>
    where
        T: Clone,
    {
        buffer.clear();
        buffer.reserve(self.len);
        buffer.extend(self.iter().cloned());
        buffer
    }
}

impl<T, R> SortedSet<T> for SkipListSet<T, R>
where
    T: Ord,
    R: Rng,
{
    fn first(&self) -> Option<&T> {
        SkipListSet::first(self)
    }

    fn last(&self) -> Option<&T> {
        SkipListSet::last(self)
    }
}

impl<T, R> IntoIterator for SkipListSet<T, R>
where
    T: Ord,
    R: Rng,
{
    type Item = T;
    type IntoIter = IntoIter<T, R>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { set: self }
    }
}

impl<'a, T, R> IntoIterator for &'a SkipListSet<T, R>
where
    T: 'a,
    R: 'a,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `SkipListSet<T, R>`.
///
/// This iterator traverses the elements of the set in ascending order and yields owned values.
pub struct IntoIter<T, R> {
    set: SkipListSet<T, R>,
}

impl<T, R> Iterator for IntoIter<T, R>
where
    T: Ord,
    R: Rng,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.set.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.set.len(), Some(self.set.len()))
    }
}

impl<T, R> DoubleEndedIterator for IntoIter<T, R>
where
    T: Ord,
    R: Rng,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.set.pop_last()
    }
}

impl<T, R> ExactSizeIterator for IntoIter<T, R>
where
    T: Ord,
    R: Rng,
{
}

/// An iterator for `SkipListSet<T, R>`.
///
/// This iterator walks level 0 of the set in ascending order and yields immutable references.
pub struct Iter<'a, T>
where
    T: 'a,
{
    arena: &'a TypedArena<Node<T>>,
    front: Entry,
    back: Entry,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let arena = self.arena;
        let node = &arena[self.front];
        self.front = node.right;
        self.remaining -= 1;
        match node.kind {
            NodeKind::Leaf(ref value) => Some(value),
            _ => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let arena = self.arena;
        let node = &arena[self.back];
        self.back = node.left;
        self.remaining -= 1;
        match node.kind {
            NodeKind::Leaf(ref value) => Some(value),
            _ => None,
        }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> where T: 'a {}

impl<T> Default for SkipListSet<T, XorShiftRng>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for SkipListSet<T, XorShiftRng>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = SkipListSet::new();
        set.extend(iter);
        set
    }
}

impl<T, R> Extend<T> for SkipListSet<T, R>
where
    T: Ord,
    R: Rng,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, R, S> PartialEq<SkipListSet<T, S>> for SkipListSet<T, R>
where
    T: Ord,
{
    fn eq(&self, other: &SkipListSet<T, S>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, R> Eq for SkipListSet<T, R> where T: Ord {}

impl<T, R> Hash for SkipListSet<T, R>
where
    T: Hash,
{
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        state.write_usize(self.len);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T, R> fmt::Debug for SkipListSet<T, R>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, R> Serialize for SkipListSet<T, R>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

struct SkipListSetVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for SkipListSetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = SkipListSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of set elements")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = SkipListSet::new();
        while let Some(value) = seq.next_element()? {
            set.insert(value);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for SkipListSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SkipListSetVisitor {
            marker: PhantomData,
        })
    }
}
