/// djb2 string hash, reduced to one of `bucket_count` buckets.
///
/// Only used to lay terms out for diagnostics; lookups go through the index's map.
pub fn bucket_of(term: &str, bucket_count: usize) -> usize {
    let hash = term
        .bytes()
        .fold(5381u64, |h, c| (h << 5).wrapping_add(h).wrapping_add(c as u64));
    (hash % bucket_count.max(1) as u64) as usize
}
