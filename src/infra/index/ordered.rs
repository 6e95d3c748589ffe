//! Sorted index over trigger handles.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::config::IndexOrdering;
use crate::core::{Trigger, TriggerKey};

/// Snapshot of the trigger fields the ready index orders by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerHandle {
    /// Trigger identity.
    pub key: TriggerKey,
    /// Next fire time at the moment the handle was taken.
    pub next_fire_time: Option<DateTime<Utc>>,
    /// Priority at the moment the handle was taken.
    pub priority: i32,
}

impl From<&Trigger> for TriggerHandle {
    fn from(trigger: &Trigger) -> Self {
        Self {
            key: trigger.key().clone(),
            next_fire_time: trigger.next_fire_time(),
            priority: trigger.priority(),
        }
    }
}

fn key_bytes(key: &TriggerKey) -> impl Iterator<Item = u8> + '_ {
    key.group()
        .bytes()
        .chain(std::iter::once(b'.'))
        .chain(key.name().bytes())
}

/// Orders handles by their `group.name` string, then by the `(group, name)`
/// pair so distinct keys never compare equal.
#[must_use]
pub fn by_key(lhs: &TriggerHandle, rhs: &TriggerHandle) -> Ordering {
    key_bytes(&lhs.key)
        .cmp(key_bytes(&rhs.key))
        .then_with(|| lhs.key.cmp(&rhs.key))
}

/// Orders handles by next fire time (absent last), then higher priority first,
/// then key string.
#[must_use]
pub fn by_fire_time(lhs: &TriggerHandle, rhs: &TriggerHandle) -> Ordering {
    let time = match (lhs.next_fire_time, rhs.next_fire_time) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    time.then_with(|| rhs.priority.cmp(&lhs.priority))
        .then_with(|| by_key(lhs, rhs))
}

/// Comparator selected by an [`IndexOrdering`].
#[must_use]
pub fn comparator(ordering: IndexOrdering) -> fn(&TriggerHandle, &TriggerHandle) -> Ordering {
    match ordering {
        IndexOrdering::FireTime => by_fire_time,
        IndexOrdering::Key => by_key,
    }
}

/// Sequence kept sorted by a total-order comparator.
///
/// Lookups binary-search; insertion and removal shift the backing vector.
/// Elements comparing equal are stored once.
#[derive(Debug, Clone)]
pub struct OrderedIndex<T> {
    items: Vec<T>,
    compare: fn(&T, &T) -> Ordering,
}

impl<T> OrderedIndex<T> {
    /// Creates an empty index ordered by `compare`.
    #[must_use]
    pub const fn new(compare: fn(&T, &T) -> Ordering) -> Self {
        Self {
            items: Vec::new(),
            compare,
        }
    }

    fn search(&self, item: &T) -> Result<usize, usize> {
        self.items
            .binary_search_by(|current| (self.compare)(current, item))
    }

    /// Inserts `item` in order. Returns `false`, leaving the index unchanged,
    /// when an equal element is already present.
    pub fn add(&mut self, item: T) -> bool {
        match self.search(&item) {
            Ok(_) => false,
            Err(pos) => {
                self.items.insert(pos, item);
                true
            }
        }
    }

    /// Removes the element equal to `item`. Returns whether one was found.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.search(item) {
            Ok(pos) => {
                self.items.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Whether an element equal to `item` is present.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.search(item).is_ok()
    }

    /// First element in order.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a, T> IntoIterator for &'a OrderedIndex<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn handle(name: &str, offset_secs: Option<i64>, priority: i32) -> TriggerHandle {
        grouped(name, "g", offset_secs, priority)
    }

    fn grouped(name: &str, group: &str, offset_secs: Option<i64>, priority: i32) -> TriggerHandle {
        let base = DateTime::<Utc>::UNIX_EPOCH;
        TriggerHandle {
            key: TriggerKey::with_group(name, group),
            next_fire_time: offset_secs.map(|s| base + TimeDelta::seconds(s)),
            priority,
        }
    }

    fn names(index: &OrderedIndex<TriggerHandle>) -> Vec<&str> {
        index.iter().map(|h| h.key.name()).collect()
    }

    #[test]
    fn key_ordering_sorts_by_string() {
        let mut index = OrderedIndex::new(by_key);
        index.add(handle("c", Some(1), 0));
        index.add(handle("a", Some(3), 0));
        index.add(handle("b", Some(2), 0));
        assert_eq!(names(&index), vec!["a", "b", "c"]);
    }

    #[test]
    fn fire_time_ordering_breaks_ties_by_priority_then_key() {
        let mut index = OrderedIndex::new(by_fire_time);
        index.add(handle("late", Some(20), 0));
        index.add(handle("never", None, 9));
        index.add(handle("low", Some(10), 1));
        index.add(handle("high", Some(10), 5));
        index.add(handle("also-low", Some(10), 1));
        assert_eq!(names(&index), vec!["high", "also-low", "low", "late", "never"]);
        assert_eq!(index.first().map(|h| h.key.name()), Some("high"));
    }

    #[test]
    fn adding_same_handle_twice_is_a_no_op() {
        let mut index = OrderedIndex::new(by_key);
        assert!(index.add(handle("a", Some(1), 0)));
        assert!(!index.add(handle("a", Some(1), 0)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn remove_and_contains() {
        let mut index = OrderedIndex::new(by_fire_time);
        let a = handle("a", Some(1), 0);
        let b = handle("b", Some(2), 0);
        index.add(a.clone());
        index.add(b.clone());

        assert!(index.contains(&a));
        assert!(index.remove(&a));
        assert!(!index.contains(&a));
        assert!(!index.remove(&a));
        assert_eq!(names(&index), vec!["b"]);

        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn comparator_follows_configuration() {
        let early_z = handle("z", Some(1), 0);
        let late_a = handle("a", Some(9), 0);
        assert_eq!(comparator(IndexOrdering::FireTime)(&early_z, &late_a), Ordering::Less);
        assert_eq!(comparator(IndexOrdering::Key)(&early_z, &late_a), Ordering::Greater);
    }

    #[test]
    fn keys_with_equal_strings_stay_distinct() {
        for compare in [by_key, by_fire_time] {
            let mut index = OrderedIndex::new(compare);
            let left = grouped("c", "a.b", Some(1), 0);
            let right = grouped("b.c", "a", Some(1), 0);
            assert_eq!(left.key.to_string(), right.key.to_string());

            assert!(index.add(left.clone()));
            assert!(index.add(right.clone()));
            assert_eq!(index.len(), 2);

            assert!(index.remove(&right));
            assert!(index.contains(&left));
            assert!(!index.contains(&right));
        }
    }

    #[test]
    fn key_ordering_matches_rendered_strings() {
        let mut index = OrderedIndex::new(by_key);
        index.add(grouped("y", "a-b", None, 0));
        index.add(grouped("x", "a", None, 0));
        index.add(grouped("z", "a", None, 0));
        let rendered: Vec<String> = index.iter().map(|h| h.key.to_string()).collect();
        let mut sorted = rendered.clone();
        sorted.sort();
        assert_eq!(rendered, sorted);
    }
}
