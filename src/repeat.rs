//! How many times each label is repeated on the sheet.

use std::iter::Empty;

/// The number of copies to place of each item added with
/// [`Sheet::add_labels`](crate::Sheet::add_labels).
///
/// With [`Repeat::PerItem`], counts are paired with items in order and the shorter
/// sequence wins: items beyond the last count are dropped without error, and extra
/// counts are ignored. A count of zero places nothing for its item.
#[derive(Debug, Clone)]
pub enum Repeat<C = Empty<usize>> {
    /// The same count for every item
    Each(usize),
    /// One count per item
    PerItem(C),
}

impl Repeat {
    /// Place every item once
    pub fn once() -> Repeat {
        Repeat::Each(1)
    }

    /// Place every item `count` times
    pub fn each(count: usize) -> Repeat {
        Repeat::Each(count)
    }
}

impl<C: Iterator<Item = usize>> Repeat<C> {
    /// Take counts one at a time from `counts`
    pub fn per_item<I>(counts: I) -> Repeat<C>
    where
        I: IntoIterator<IntoIter = C>,
    {
        Repeat::PerItem(counts.into_iter())
    }

    /// Pair every item with its count
    pub fn expand<I: Iterator>(self, items: I) -> Repeats<I, C> {
        Repeats {
            items,
            counts: self,
        }
    }
}

/// Iterator of `(item, count)` pairs, created by [`Repeat::expand`]
#[derive(Debug, Clone)]
pub struct Repeats<I, C> {
    items: I,
    counts: Repeat<C>,
}

impl<I, C> Iterator for Repeats<I, C>
where
    I: Iterator,
    C: Iterator<Item = usize>,
{
    type Item = (I::Item, usize);

    fn next(&mut self) -> Option<Self::Item> {
        // the count is drawn first so that a lazy item source is never advanced
        // for an item that would be dropped
        let count = match &mut self.counts {
            Repeat::Each(count) => *count,
            Repeat::PerItem(counts) => counts.next()?,
        };
        let item = self.items.next()?;
        Some((item, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_count_applies_to_every_item() {
        let pairs: Vec<_> = Repeat::each(2).expand(["a", "b", "c"].into_iter()).collect();
        assert_eq!(pairs, vec![("a", 2), ("b", 2), ("c", 2)]);
    }

    #[test]
    fn fewer_counts_than_items_truncates() {
        let pairs: Vec<_> = Repeat::per_item([2, 1])
            .expand(["a", "b", "c"].into_iter())
            .collect();
        assert_eq!(pairs, vec![("a", 2), ("b", 1)]);
    }

    #[test]
    fn extra_counts_are_ignored_and_zero_is_kept() {
        let pairs: Vec<_> = Repeat::per_item(0..100).expand(10..13).collect();
        assert_eq!(pairs, vec![(10, 0), (11, 1), (12, 2)]);
    }

    #[test]
    fn items_past_the_last_count_are_not_pulled() {
        let mut items = 0..10;
        let pulled = Repeat::per_item([1, 1, 1]).expand(items.by_ref()).count();
        assert_eq!(pulled, 3);
        assert_eq!(items.next(), Some(3));
    }
}
