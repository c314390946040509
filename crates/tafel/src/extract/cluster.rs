//! One-dimensional agglomerative clustering.
//!
//! Both borderless axes use the same primitive: agglomerative clustering of
//! scalar coordinates where two clusters merge only while *all* their
//! members stay within the maximum distance of each other (complete
//! linkage). In one dimension clusters are contiguous ranges, so merging is
//! restricted to neighbours in sorted order and the linkage distance of a
//! merge is the span of the union.
//!
//! The nearest pair merges first; ties break towards the lower coordinate,
//! which keeps the result deterministic regardless of input order.

/// Assign a cluster index to each value.
///
/// Indices are dense, zero-based, and ranked by increasing coordinate: the
/// cluster containing the smallest values gets index 0.
pub fn cluster_indices(values: &[f64], max_distance: f64) -> Vec<usize> {
    if values.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    // Clusters are contiguous ranges over the sorted order, tracked as
    // (min, max) spans.
    let mut spans: Vec<(f64, f64)> = order.iter().map(|&i| (values[i], values[i])).collect();
    let mut sizes: Vec<usize> = vec![1; spans.len()];

    loop {
        let best = spans
            .windows(2)
            .enumerate()
            .map(|(i, pair)| (i, pair[1].1 - pair[0].0))
            .filter(|&(_, span)| span <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let Some((i, _)) = best else {
            break;
        };
        spans[i] = (spans[i].0, spans[i + 1].1);
        spans.remove(i + 1);
        sizes[i] += sizes[i + 1];
        sizes.remove(i + 1);
    }

    let mut indices = vec![0; values.len()];
    let mut position = 0;
    for (cluster, &size) in sizes.iter().enumerate() {
        for &i in &order[position..position + size] {
            indices[i] = cluster;
        }
        position += size;
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_clear_clusters() {
        let values = vec![5.0, 25.0, 6.0, 24.0];
        assert_eq!(cluster_indices(&values, 10.0), vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_rank_follows_coordinate_order() {
        // Input order deliberately scrambled; ranks must follow position.
        let values = vec![100.0, 5.0, 50.0];
        assert_eq!(cluster_indices(&values, 10.0), vec![2, 0, 1]);
    }

    #[test]
    fn test_complete_linkage_limits_chaining() {
        // Neighbours are 8 apart, but a cluster can only grow while its
        // total span stays within the distance.
        let values = vec![0.0, 8.0, 16.0, 24.0];
        assert_eq!(cluster_indices(&values, 10.0), vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_close_pair_separated_from_far_pair() {
        // Inter-cluster gap (55) is under the threshold, yet merging would
        // stretch the span to 65, so the clusters stay apart.
        let values = vec![20.0, 85.0, 20.0, 75.0];
        assert_eq!(cluster_indices(&values, 60.0), vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_span_boundary_inclusive() {
        let values = vec![0.0, 10.0];
        assert_eq!(cluster_indices(&values, 10.0), vec![0, 0]);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(cluster_indices(&[42.0], 10.0), vec![0]);
    }

    #[test]
    fn test_empty() {
        assert!(cluster_indices(&[], 10.0).is_empty());
    }

    #[test]
    fn test_identical_values() {
        let values = vec![7.0, 7.0, 7.0];
        assert_eq!(cluster_indices(&values, 1.0), vec![0, 0, 0]);
    }
}
