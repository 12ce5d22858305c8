use crate::balance::BalanceDimension;

// Absorbs float error so that e.g. 4 / cbrt(8) floors to 2, not 1.
const FLOOR_EPSILON: f64 = 1e-9;

///
/// geometric
///
/// Spread `sub_max` across the free dimensions in proportion to their size.
///
/// With `n` free dimensions and `scale = (Π size / sub_max)^(1/n)`, every
/// dimension except the largest gets `floor(size / scale)`; the largest
/// absorbs what is left of the budget, `floor(sub_max / Π others)`. Counts
/// never drop below 1. Ties on size keep input order, so the last of the
/// tied dimensions is treated as the largest.
///
/// Returns `(slot, count)` pairs for every free slot; bounds are not applied.
///

pub(super) fn geometric<K>(
    dimensions: &[BalanceDimension<K>],
    free: &[usize],
    sub_max: usize,
) -> Vec<(usize, usize)> {
    let mut order = free.to_vec();
    order.sort_by_key(|slot| dimensions[*slot].size);

    let Some((&largest, others)) = order.split_last() else {
        return Vec::new();
    };

    let total_size: f64 = order.iter().map(|slot| dimensions[*slot].size as f64).product();
    let scale = (total_size / sub_max as f64).powf(1.0 / order.len() as f64);

    let mut counts = Vec::with_capacity(order.len());
    let mut others_product = 1usize;
    for &slot in others {
        let raw = (dimensions[slot].size as f64 / scale + FLOOR_EPSILON).floor();
        let count = (raw as usize).max(1);
        others_product = others_product.saturating_mul(count);
        counts.push((slot, count));
    }
    counts.push((largest, (sub_max / others_product).max(1)));

    counts
}
