/// Row indices ordered by descending key. Ties keep input order.
///
/// Pure function: `sort_by` is stable, and `total_cmp` gives NaN a fixed
/// place instead of an inconsistent comparison.
pub fn rank_order(keys: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[b].total_cmp(&keys[a]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_descending() {
        assert_eq!(rank_order(&[10.0, 70.5, 33.0]), vec![1, 2, 0]);
    }

    #[test]
    fn ties_keep_input_order() {
        assert_eq!(rank_order(&[5.0, 9.0, 5.0, 9.0]), vec![1, 3, 0, 2]);
    }

    #[test]
    fn empty_input() {
        assert!(rank_order(&[]).is_empty());
    }
}
