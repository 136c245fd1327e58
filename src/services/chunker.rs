//! Fixed-size batch chunking

/// Split `items` into ordered chunks of at most `size` elements. The chunks
/// cover the input exactly once in original order; empty input yields no
/// chunks. A zero `size` is treated as 1 rather than looping forever.
pub fn chunk<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    let mut current = Vec::with_capacity(size.min(items.len()));

    for item in items {
        current.push(item);
        if current.len() == size {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunks = chunk(Vec::<i32>::new(), 100);
        assert!(chunks.is_empty());
    }

    #[test]
    fn exact_multiple_fills_every_chunk() {
        let chunks = chunk((0..200).collect(), 100);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 100));
    }

    #[test]
    fn remainder_goes_into_a_final_short_chunk() {
        let chunks = chunk((0..250).collect(), 100);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 100);
        assert_eq!(chunks[1].len(), 100);
        assert_eq!(chunks[2].len(), 50);
    }

    #[test]
    fn concatenation_preserves_original_order() {
        let original: Vec<i32> = (0..37).collect();
        let chunks = chunk(original.clone(), 5);
        assert_eq!(chunks.len(), 8);
        let flattened: Vec<i32> = chunks.into_iter().flatten().collect();
        assert_eq!(flattened, original);
    }

    #[test]
    fn chunk_size_larger_than_input_yields_single_chunk() {
        let chunks = chunk(vec![1, 2, 3], 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], vec![1, 2, 3]);
    }

    #[test]
    fn zero_size_is_clamped_to_one() {
        let chunks = chunk(vec![1, 2], 0);
        assert_eq!(chunks.len(), 2);
    }
}
