///
/// balanced
///
/// Split `items` into `count` contiguous runs, sizes differing by at most
/// one, with the longer runs first. `count` is clamped to `[1, items.len()]`.
///

pub(super) fn balanced<T: Clone>(items: &[T], count: usize) -> Vec<Vec<T>> {
    let mut lists_remaining = count.clamp(1, items.len().max(1));
    let mut rest = items;
    let mut out = Vec::with_capacity(lists_remaining);

    while lists_remaining > 0 {
        let take = rest.len().div_ceil(lists_remaining);
        let (head, tail) = rest.split_at(take);
        out.push(head.to_vec());
        rest = tail;
        lists_remaining -= 1;
    }

    out
}

///
/// sized
///
/// Split `items` into runs of `size` (the last may be shorter):
/// `ceil(len / size)` runs. A size at or above `len` yields one run.
///

pub(super) fn sized<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }

    items.chunks(size.max(1)).map(<[T]>::to_vec).collect()
}

///
/// with_overlap
///
/// Grow every run with the last `before` items of its predecessor and the
/// first `after` items of its successor. Neighbours are the original runs;
/// the first and last runs gain nothing on their open side.
///

pub(super) fn with_overlap<T: Clone>(runs: &[Vec<T>], before: usize, after: usize) -> Vec<Vec<T>> {
    runs.iter()
        .enumerate()
        .map(|(i, run)| {
            let mut grown = Vec::with_capacity(run.len() + before + after);
            if let Some(prev) = i.checked_sub(1).map(|p| &runs[p]) {
                grown.extend_from_slice(&prev[prev.len().saturating_sub(before)..]);
            }
            grown.extend_from_slice(run);
            if let Some(next) = runs.get(i + 1) {
                grown.extend_from_slice(&next[..after.min(next.len())]);
            }
            grown
        })
        .collect()
}
