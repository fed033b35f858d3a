//! A stack that holds each entry at most once

/// A stack keeping each entry once, at its most recent position
///
/// Pushing an entry that is already present moves it to the top
/// instead of duplicating it.
///
/// ```
/// use sundry::mappings::UniqueStack;
///
/// let mut stack: UniqueStack<char> = "abc".chars().collect();
/// stack.push('a');
/// assert_eq!(stack.into_vec(), vec!['b', 'c', 'a']);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueStack<T> {
    items: Vec<T>,
}

impl<T: PartialEq> UniqueStack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Push `item`, moving it to the top if already present
    pub fn push(&mut self, item: T) {
        if let Some(idx) = self.items.iter().position(|old| *old == item) {
            self.items.remove(idx);
        }
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.push(item);
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: PartialEq> FromIterator<T> for UniqueStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

impl<T> IntoIterator for UniqueStack<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
