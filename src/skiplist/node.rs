use crate::arena::Entry;

/// What a node stores: a sentinel marker, the authoritative value, or a pointer to it.
#[derive(Clone, Debug)]
pub enum NodeKind<T> {
    Head,
    Tail,
    Leaf(T),
    Tower(Entry),
}

/// A single cell of a level. Horizontal links are always present: a head's `left` and a tail's
/// `right` point back at the sentinel itself.
#[derive(Clone, Debug)]
pub struct Node<T> {
    pub kind: NodeKind<T>,
    pub left: Entry,
    pub right: Entry,
    pub up: Option<Entry>,
    pub down: Option<Entry>,
}

impl<T> Node<T> {
    pub fn new(kind: NodeKind<T>, left: Entry, right: Entry, down: Option<Entry>) -> Self {
        Node {
            kind,
            left,
            right,
            up: None,
            down,
        }
    }

    pub fn is_leaf(&self) -> bool {
        match self.kind {
            NodeKind::Leaf(_) => true,
            _ => false,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self.kind {
            NodeKind::Leaf(value) => Some(value),
            _ => None,
        }
    }
}

/// The ordering key of a node. Variants are declared in ascending order so the derived `Ord`
/// places every real value strictly between the two sentinels.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Rank<'a, T>
where
    T: 'a,
{
    NegativeInfinity,
    Real(&'a T),
    PositiveInfinity,
}
