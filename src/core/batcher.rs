/// Default number of rows per inference request, sized for the endpoint's payload limit.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Splits `rows` into contiguous chunks of at most `target` rows.
///
/// Always yields `max(1, ceil(len / target))` chunks, so an empty table still
/// produces one (empty) chunk. A `target` of zero is treated as one.
pub fn batch_rows<T>(rows: &[T], target: usize) -> Vec<&[T]> {
    if rows.is_empty() {
        return vec![rows];
    }
    rows.chunks(target.max(1)).collect()
}
