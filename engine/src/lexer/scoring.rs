/// Combined frequency of a document matching both sides of a conjunction.
pub fn combined_frequency(left: u32, right: u32) -> u64 {
    left as u64 + right as u64
}

/// Sort rows by `score` descending. Equal scores keep their incoming order.
pub fn rank_descending<T, F>(rows: &mut [T], score: F)
where
    F: Fn(&T) -> u64,
{
    // slice::sort_by is stable
    rows.sort_by(|a, b| score(b).cmp(&score(a)));
}

/// Insert `item` into a list kept sorted by `score` descending and holding at most
/// `limit` entries.
///
/// The item goes after every entry with an equal score, so among ties the first one
/// offered ranks highest. If the list overflows, the lowest entry is dropped.
pub fn insert_bounded<T, F>(ranked: &mut Vec<T>, item: T, limit: usize, score: F)
where
    F: Fn(&T) -> u64,
{
    if limit == 0 {
        return;
    }
    let item_score = score(&item);
    if ranked.len() >= limit && ranked.last().map_or(false, |last| score(last) >= item_score) {
        return;
    }
    let position = ranked.partition_point(|entry| score(entry) >= item_score);
    ranked.insert(position, item);
    ranked.truncate(limit);
}
