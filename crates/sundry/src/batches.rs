//! Split sequences into batches of a given maximum size

/// Batches of a slice, with descriptive labels
///
/// Since the length is known, the labels include the batch count.
///
/// ```
/// use sundry::batches::batch_tuples;
///
/// let items = [11, 22, 33, 44];
/// let mut gen = batch_tuples(&items, 3);
/// assert_eq!(gen.next().unwrap(), (&items[..3], "items 1 to 3 (batch 1 of 2)".to_string()));
/// assert_eq!(gen.next().unwrap(), (&items[3..], "items 4 to 4 (batch 2 of 2)".to_string()));
/// ```
pub fn batch_tuples<T>(items: &[T], size: usize) -> impl Iterator<Item = (&[T], String)> {
    batch_tuples_named(items, size, "items")
}

/// Like [`batch_tuples`], naming the things being batched
pub fn batch_tuples_named<'a, T>(
    items: &'a [T],
    size: usize,
    thingies: &str,
) -> impl Iterator<Item = (&'a [T], String)> {
    let size = size.max(1);
    let batches = (items.len() + size - 1) / size;
    let thingies = thingies.to_string();
    items.chunks(size).enumerate().map(move |(i, chunk)| {
        let first = i * size + 1;
        let last = i * size + chunk.len();
        let label = format!(
            "{thingies} {first} to {last} (batch {batch} of {batches})",
            batch = i + 1
        );
        (chunk, label)
    })
}

/// Batches of an open-ended iterator
///
/// The number of batches is unknown here, so the labels omit it.
///
/// ```
/// use sundry::batches::batch_stream;
///
/// let mut gen = batch_stream((1..=9).map(|n| n * 10), 3);
/// assert_eq!(gen.next().unwrap(), (vec![10, 20, 30], "items 1 to 3 (batch 1)".to_string()));
/// assert_eq!(gen.next().unwrap(), (vec![40, 50, 60], "items 4 to 6 (batch 2)".to_string()));
/// ```
pub fn batch_stream<I: IntoIterator>(iter: I, size: usize) -> BatchStream<I::IntoIter> {
    batch_stream_named(iter, size, "items")
}

/// Like [`batch_stream`], naming the things being batched
pub fn batch_stream_named<I: IntoIterator>(
    iter: I,
    size: usize,
    thingies: &str,
) -> BatchStream<I::IntoIter> {
    BatchStream {
        inner: iter.into_iter(),
        size: size.max(1),
        taken: 0,
        batch: 0,
        thingies: thingies.to_string(),
    }
}

pub struct BatchStream<I: Iterator> {
    inner: I,
    size: usize,
    taken: usize,
    batch: usize,
    thingies: String,
}

impl<I: Iterator> Iterator for BatchStream<I> {
    type Item = (Vec<I::Item>, String);

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<I::Item> = self.inner.by_ref().take(self.size).collect();
        if chunk.is_empty() {
            return None;
        }
        let first = self.taken + 1;
        self.taken += chunk.len();
        self.batch += 1;
        let label = format!(
            "{} {first} to {last} (batch {batch})",
            self.thingies,
            last = self.taken,
            batch = self.batch
        );
        Some((chunk, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_length_labels() {
        let items: Vec<u32> = (1..=9).map(|n| n * 11).collect();
        let collected: Vec<_> = batch_tuples(&items, 3).collect();
        assert_eq!(collected.len(), 3);
        assert_eq!(collected[0].0, &[11, 22, 33]);
        assert_eq!(collected[0].1, "items 1 to 3 (batch 1 of 3)");
        assert_eq!(collected[2].1, "items 7 to 9 (batch 3 of 3)");
    }

    #[test]
    fn test_short_last_batch() {
        let items: Vec<u32> = (1..=9).collect();
        let collected: Vec<_> = batch_tuples(&items, 5).collect();
        assert_eq!(collected[0].1, "items 1 to 5 (batch 1 of 2)");
        assert_eq!(collected[1].0, &[6, 7, 8, 9]);
        assert_eq!(collected[1].1, "items 6 to 9 (batch 2 of 2)");
    }

    #[test]
    fn test_exact_fit() {
        let items: Vec<u32> = (1..=8).collect();
        let collected: Vec<_> = batch_tuples(&items, 4).collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[1].0.len(), 4);
    }

    #[test]
    fn test_custom_thingies() {
        let items = [1, 2];
        let (_, label) = batch_tuples_named(&items, 2, "thingies").next().unwrap();
        assert_eq!(label, "thingies 1 to 2 (batch 1 of 1)");
    }

    #[test]
    fn test_stream_labels_omit_total() {
        let labels: Vec<String> = batch_stream(1..=7, 3).map(|(_, label)| label).collect();
        assert_eq!(
            labels,
            vec![
                "items 1 to 3 (batch 1)",
                "items 4 to 6 (batch 2)",
                "items 7 to 7 (batch 3)",
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(batch_tuples::<u32>(&[], 3).count(), 0);
        assert_eq!(batch_stream(std::iter::empty::<u32>(), 3).count(), 0);
    }
}
