use std::ops::Range;

/// Splits `len` chunks into at most `partitions` contiguous ranges.
///
/// Every range gets `len / partitions` chunks and the last one also takes the
/// remainder. With fewer chunks than partitions each chunk gets its own
/// range, so no range is ever empty.
pub(crate) fn partition(len: usize, partitions: usize) -> Vec<Range<usize>> {
    if len == 0 || partitions == 0 {
        return Vec::new();
    }

    let (count, per_slice) = match len / partitions {
        0 => (len, 1),
        per_slice => (partitions, per_slice),
    };

    (0..count)
        .map(|i| {
            let start = i * per_slice;
            let end = if i == count - 1 { len } else { start + per_slice };
            start..end
        })
        .collect()
}
