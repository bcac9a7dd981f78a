/// Calculate Σ m_i / d_i over parallel degree/mass slices.
///
/// For an edge-perspective distribution this is the number of nodes per edge,
/// i.e. the inverse of the average node degree.
pub fn inverse_degree_sum(degrees: &[usize], masses: &[f64]) -> f64 {
    degrees
        .iter()
        .zip(masses)
        .map(|(&d, &m)| m / d as f64)
        .sum()
}

/// Calculate Σ m_i · d_i over parallel degree/mass slices.
pub fn degree_weighted_sum(degrees: &[usize], masses: &[f64]) -> f64 {
    degrees
        .iter()
        .zip(masses)
        .map(|(&d, &m)| m * d as f64)
        .sum()
}

/// Divide every weight by the total. A total of exactly one leaves the slice untouched.
pub fn normalize(weights: &mut [f64]) {
    let total: f64 = weights.iter().sum();
    if total == 1.0 || total == 0.0 {
        return;
    }
    for w in weights.iter_mut() {
        *w /= total;
    }
}

/// Split `total` items proportionally to `fractions` so that the parts sum to `total`.
///
/// Every part gets the floor of its exact share; the remaining items go to the
/// parts with the largest fractional remainders (ties broken by position).
///
/// # Arguments
/// * `fractions` - Non-negative shares summing to one
/// * `total` - Number of items to distribute
pub fn apportion(fractions: &[f64], total: usize) -> Vec<usize> {
    let exact: Vec<f64> = fractions.iter().map(|f| f * total as f64).collect();
    let mut counts: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let assigned: usize = counts.iter().sum();
    let mut missing = total.saturating_sub(assigned);

    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });

    for &i in order.iter().cycle().take(exact.len() * 2) {
        if missing == 0 {
            break;
        }
        counts[i] += 1;
        missing -= 1;
    }

    counts
}

/// Shift nodes between degrees, keeping Σcounts, until Σ degree·count equals `target`.
///
/// Each move takes one node to a higher degree (to gain edges) or a lower one
/// (to lose edges) without overshooting the target. Nearest degrees are tried
/// first, then the largest step. Returns false when the target is missed and
/// no such move is left.
///
/// # Arguments
/// * `degrees` - Strictly increasing node degrees
/// * `counts` - Nodes per degree, updated in place
/// * `target` - Required number of edges
pub fn rebalance(degrees: &[usize], counts: &mut [usize], target: usize) -> bool {
    loop {
        let current: usize = degrees.iter().zip(counts.iter()).map(|(d, c)| d * c).sum();
        if current == target {
            return true;
        }
        let gap = current.abs_diff(target);
        let raise = current < target;

        // (distance in the degree list, step in edges, from, to)
        let mut best: Option<(usize, usize, usize, usize)> = None;
        for from in (0..degrees.len()).filter(|&i| counts[i] > 0) {
            for to in 0..degrees.len() {
                if to == from || (degrees[to] > degrees[from]) != raise {
                    continue;
                }
                let step = degrees[to].abs_diff(degrees[from]);
                if step > gap {
                    continue;
                }
                let dist = to.abs_diff(from);
                let better = match best {
                    None => true,
                    Some((bd, bs, _, _)) => dist < bd || (dist == bd && step > bs),
                };
                if better {
                    best = Some((dist, step, from, to));
                }
            }
        }

        match best {
            Some((_, _, from, to)) => {
                counts[from] -= 1;
                counts[to] += 1;
            }
            None => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_degree_sum_regular() {
        let sum = inverse_degree_sum(&[3], &[1.0]);
        assert!((sum - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_inverse_degree_sum_empty() {
        assert_eq!(inverse_degree_sum(&[], &[]), 0.0);
    }

    #[test]
    fn test_degree_weighted_sum() {
        // 0.5 * 2 + 0.5 * 4 = 3
        assert_eq!(degree_weighted_sum(&[2, 4], &[0.5, 0.5]), 3.0);
    }

    #[test]
    fn test_normalize_scales_to_one() {
        let mut w = vec![1.0, 3.0];
        normalize(&mut w);
        assert_eq!(w, vec![0.25, 0.75]);
    }

    #[test]
    fn test_normalize_unit_total_is_noop() {
        let mut w = vec![0.25, 0.75];
        normalize(&mut w);
        assert_eq!(w, vec![0.25, 0.75]);
    }

    #[test]
    fn test_apportion_sums_to_total() {
        let counts = apportion(&[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0], 10);
        assert_eq!(counts.iter().sum::<usize>(), 10);
        assert_eq!(counts, vec![4, 3, 3]);
    }

    #[test]
    fn test_apportion_largest_remainder_wins() {
        // exact shares: 1.2, 2.7, 6.1
        let counts = apportion(&[0.12, 0.27, 0.61], 10);
        assert_eq!(counts, vec![1, 3, 6]);
    }

    #[test]
    fn test_rebalance_lowers_edges() {
        // 29·7 + 20·8 = 363 edges, 7 too many
        let mut counts = vec![29, 20];
        assert!(rebalance(&[7, 8], &mut counts, 356));
        assert_eq!(counts, vec![36, 13]);
    }

    #[test]
    fn test_rebalance_raises_edges_through_empty_degree() {
        // degree 4 starts empty; 2·2 + 0·4 + 2·6 = 16, need 20
        let mut counts = vec![2, 0, 2];
        assert!(rebalance(&[2, 4, 6], &mut counts, 20));
        assert_eq!(counts.iter().sum::<usize>(), 4);
        assert_eq!(counts[0] * 2 + counts[1] * 4 + counts[2] * 6, 20);
    }

    #[test]
    fn test_rebalance_already_balanced() {
        let mut counts = vec![3, 5];
        assert!(rebalance(&[2, 3], &mut counts, 21));
        assert_eq!(counts, vec![3, 5]);
    }

    #[test]
    fn test_rebalance_impossible() {
        let mut single = vec![4];
        assert!(!rebalance(&[6], &mut single, 21), "4 nodes of degree 6 cannot carry 21 edges");

        // steps of 2 cannot fix an odd gap
        let mut counts = vec![1, 1];
        assert!(!rebalance(&[3, 5], &mut counts, 9));
        assert_eq!(counts.iter().sum::<usize>(), 2);
    }
}
