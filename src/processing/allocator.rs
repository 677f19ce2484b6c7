//! Distribution of a question budget across chunks

/// Spread `n_questions` over `n_chunks` as evenly as possible.
///
/// Every chunk receives `n_questions / n_chunks` and the first
/// `n_questions % n_chunks` chunks receive one more, so earlier chunks win
/// ties. With fewer questions than chunks the trailing chunks get zero.
pub fn allocate(n_chunks: usize, n_questions: usize) -> Vec<usize> {
    if n_chunks == 0 {
        return Vec::new();
    }

    let base = n_questions / n_chunks;
    let remainder = n_questions % n_chunks;

    (0..n_chunks)
        .map(|index| base + usize::from(index < remainder))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_allocations() {
        assert_eq!(allocate(3, 7), vec![3, 2, 2]);
        assert_eq!(allocate(5, 2), vec![1, 1, 0, 0, 0]);
        assert_eq!(allocate(4, 10), vec![3, 3, 2, 2]);
        assert_eq!(allocate(0, 5), Vec::<usize>::new());
    }

    #[test]
    fn test_even_split_and_zero_total() {
        assert_eq!(allocate(4, 8), vec![2, 2, 2, 2]);
        assert_eq!(allocate(3, 0), vec![0, 0, 0]);
        assert_eq!(allocate(1, 20), vec![20]);
    }

    #[test]
    fn test_length_and_sum_hold_for_small_grid() {
        for n_chunks in 0..12 {
            for n_questions in 0..30 {
                let allocation = allocate(n_chunks, n_questions);
                assert_eq!(allocation.len(), n_chunks);

                if n_chunks > 0 {
                    assert_eq!(allocation.iter().sum::<usize>(), n_questions);
                    let max = allocation.iter().max().copied().unwrap_or(0);
                    let min = allocation.iter().min().copied().unwrap_or(0);
                    assert!(max - min <= 1);
                    assert!(allocation.windows(2).all(|w| w[0] >= w[1]));
                }
            }
        }
    }
}
