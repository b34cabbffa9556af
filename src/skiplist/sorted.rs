use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Marker for the natural `Ord` ordering of a set's elements.
///
/// A `SkipListSet<T>` never takes a custom comparator; `comparator()` returns this marker so
/// callers can order values the same way the set does.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct NaturalOrder;

impl NaturalOrder {
    /// Compares two values by their natural ordering.
    pub fn compare<T>(&self, left: &T, right: &T) -> Ordering
    where
        T: Ord,
    {
        left.cmp(right)
    }
}

/// An ordered set with a limited set of capabilities.
///
/// Range views are part of the interface but are not provided by any set in this crate; the
/// default implementations always return `Error::Unsupported`.
///
/// # Examples
/// ```
/// use skiplist_set::{Error, SkipListSet, SortedSet};
///
/// let mut set = SkipListSet::new();
/// set.insert(1);
/// set.insert(3);
///
/// assert_eq!(SortedSet::first(&set), Some(&1));
/// assert_eq!(set.head_set(&3).err(), Some(Error::Unsupported("head_set")));
/// ```
pub trait SortedSet<T>
where
    T: Ord,
{
    /// Returns the ordering used by the set.
    fn comparator(&self) -> NaturalOrder {
        NaturalOrder
    }

    /// Returns the minimum element, or `None` if the set is empty.
    fn first(&self) -> Option<&T>;

    /// Returns the maximum element, or `None` if the set is empty.
    fn last(&self) -> Option<&T>;

    /// Returns the view of elements strictly less than `to`. Not supported.
    fn head_set(&self, _to: &T) -> Result<&Self> {
        Err(Error::Unsupported("head_set"))
    }

    /// Returns the view of elements greater than or equal to `from`. Not supported.
    fn tail_set(&self, _from: &T) -> Result<&Self> {
        Err(Error::Unsupported("tail_set"))
    }

    /// Returns the view of elements in `[from, to)`. Not supported.
    fn sub_set(&self, _from: &T, _to: &T) -> Result<&Self> {
        Err(Error::Unsupported("sub_set"))
    }
}

#[cfg(test)]
mod tests {
    use super::NaturalOrder;
    use std::cmp::Ordering;

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare(&"b", &"a"), Ordering::Greater);
        assert_eq!(NaturalOrder.compare(&5, &5), Ordering::Equal);
    }
}
