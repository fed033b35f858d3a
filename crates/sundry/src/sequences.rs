//! Tools for sequences: sliding windows, chunking, diffing

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// Iterate over a sequence in (prev, current, next) triples
///
/// The first triple has no predecessor and the last one no successor:
///
/// ```
/// use sundry::sequences::sequence_slide;
///
/// let triples: Vec<_> = sequence_slide("abc".chars()).collect();
/// assert_eq!(triples, vec![
///     (None, 'a', Some('b')),
///     (Some('a'), 'b', Some('c')),
///     (Some('b'), 'c', None),
/// ]);
/// ```
pub fn sequence_slide<I>(iter: I) -> Slide<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Clone,
{
    Slide {
        iter: iter.into_iter(),
        prev: None,
        current: None,
        primed: false,
    }
}

/// Iterator returned by [`sequence_slide`]
#[derive(Debug)]
pub struct Slide<I: Iterator> {
    iter: I,
    prev: Option<I::Item>,
    current: Option<I::Item>,
    primed: bool,
}

impl<I> Iterator for Slide<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = (Option<I::Item>, I::Item, Option<I::Item>);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.primed {
            self.primed = true;
            self.current = self.iter.next();
        }
        let current = self.current.take()?;
        let next = self.iter.next();
        let triple = (self.prev.take(), current.clone(), next.clone());
        self.prev = Some(current);
        self.current = next;
        Some(triple)
    }
}

/// Iterate over a sequence together with neighbouring indexes
///
/// Yields `(item, prev_index, index, next_index)`; the first item has no
/// previous index, the last one no next index.
pub fn inject_indexes<I>(iter: I) -> InjectIndexes<I::IntoIter>
where
    I: IntoIterator,
{
    InjectIndexes {
        iter: iter.into_iter(),
        pending: None,
        primed: false,
        idx: 0,
    }
}

/// Iterator returned by [`inject_indexes`]
#[derive(Debug)]
pub struct InjectIndexes<I: Iterator> {
    iter: I,
    pending: Option<I::Item>,
    primed: bool,
    idx: usize,
}

impl<I: Iterator> Iterator for InjectIndexes<I> {
    type Item = (I::Item, Option<usize>, usize, Option<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.primed {
            self.primed = true;
            self.pending = self.iter.next();
        }
        let item = self.pending.take()?;
        self.pending = self.iter.next();
        let idx = self.idx;
        self.idx += 1;
        let prev = idx.checked_sub(1);
        let next = self.pending.as_ref().map(|_| idx + 1);
        Some((item, prev, idx, next))
    }
}

/// Turn a flat sequence into rows of at most `chunk` items
///
/// ```
/// use sundry::sequences::matrixify;
///
/// let rows: Vec<Vec<u32>> = matrixify(1..=7, 3).collect();
/// assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
/// ```
pub fn matrixify<I>(iter: I, chunk: usize) -> Matrixify<I::IntoIter>
where
    I: IntoIterator,
{
    Matrixify {
        iter: iter.into_iter(),
        // a zero chunk size would never fill a row
        chunk: chunk.max(1),
    }
}

/// Iterator returned by [`matrixify`]
#[derive(Debug)]
pub struct Matrixify<I: Iterator> {
    iter: I,
    chunk: usize,
}

impl<I: Iterator> Iterator for Matrixify<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut row = Vec::with_capacity(self.chunk);
        while row.len() < self.chunk {
            match self.iter.next() {
                Some(item) => row.push(item),
                None => break,
            }
        }
        if row.is_empty() {
            None
        } else {
            Some(row)
        }
    }
}

/// Select the next index of a list of length `top`, wrapping around
///
/// ```
/// use sundry::sequences::next_of;
///
/// assert_eq!(next_of(5, 3, 1), 4);
/// assert_eq!(next_of(5, 4, 1), 0);
/// assert_eq!(next_of(5, 4, 2), 1);
/// ```
pub fn next_of(top: usize, current: usize, step: usize) -> usize {
    if top == 0 {
        return 0;
    }
    (current + step) % top
}

/// Yield the trimmed non-empty lines of a string
///
/// ```
/// use sundry::sequences::nonempty_lines;
///
/// let lines: Vec<_> = nonempty_lines("\none  \r\n two three \n \n").collect();
/// assert_eq!(lines, vec!["one", "two three"]);
/// ```
pub fn nonempty_lines(s: &str) -> impl Iterator<Item = &str> {
    s.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Order-preserving union of several sequences
///
/// Duplicates count at their first occurrence only.
pub fn unique_union<T>(seqs: &[&[T]]) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let mut done = HashSet::new();
    let mut res = Vec::new();
    for seq in seqs {
        for item in seq.iter() {
            if done.insert(item.clone()) {
                res.push(item.clone());
            }
        }
    }
    res
}

/// Split a multiline string into words, skipping `#` comments
///
/// ```
/// use sundry::sequences::nocomments_split;
///
/// let words = nocomments_split("one.two three\n# ignored\nfour # trailing\n");
/// assert_eq!(words, vec!["one.two", "three", "four"]);
/// ```
pub fn nocomments_split(s: &str) -> Vec<&str> {
    let mut res = Vec::new();
    for line in s.lines() {
        let code = match line.split_once('#') {
            Some((before, _comment)) => before,
            None => line,
        };
        res.extend(code.split_whitespace());
    }
    res
}

/// An add/remove change set between two lists, see [`diff_lists`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet<T> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
}

impl<T> ChangeSet<T> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compute which items to add and which to remove to get from `old` to `new`
///
/// Both result lists keep the order of their source list and contain each
/// item at most once.
///
/// ```
/// use sundry::sequences::diff_lists;
///
/// let change = diff_lists(&["a", "b", "c"], &["b", "c", "d"]);
/// assert_eq!(change.added, vec!["d"]);
/// assert_eq!(change.removed, vec!["a"]);
/// ```
pub fn diff_lists<T>(old: &[T], new: &[T]) -> ChangeSet<T>
where
    T: Clone + Eq + Hash,
{
    let old_set: HashSet<&T> = old.iter().collect();
    let new_set: HashSet<&T> = new.iter().collect();
    let mut seen = HashSet::new();
    let added = new
        .iter()
        .filter(|item| !old_set.contains(item) && seen.insert(*item))
        .cloned()
        .collect();
    seen.clear();
    let removed = old
        .iter()
        .filter(|item| !new_set.contains(item) && seen.insert(*item))
        .cloned()
        .collect();
    ChangeSet { added, removed }
}
