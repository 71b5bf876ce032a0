//! Vector marshalling across the flat-array boundary.
//!
//! Scenes fill out-param buffers; callers receive owned flat vectors
//! whose lengths were announced in advance by the corresponding `*_size`
//! query. These helpers perform that copy and validate the announced
//! length at the boundary, so a scene that produces the wrong number of
//! dimensions fails here rather than feeding a mis-shaped vector to a
//! learner.

/// Collect a filled vector and validate its announced length.
///
/// # Panics
///
/// Panics if the fill produces a length other than `expected`.
pub fn fill_exact<T>(what: &str, expected: usize, fill: impl FnOnce(&mut Vec<T>)) -> Vec<T> {
    let mut out = Vec::with_capacity(expected);
    fill(&mut out);
    assert_eq!(
        out.len(),
        expected,
        "{what}: scene filled {} dimensions but announced {expected}",
        out.len(),
    );
    out
}

/// Collect a pair of filled vectors (offset/scale, min/max) and validate
/// both announced lengths.
///
/// # Panics
///
/// Panics if either fill produces a length other than `expected`.
pub fn fill_pair_exact<T>(
    what: &str,
    expected: usize,
    fill: impl FnOnce(&mut Vec<T>, &mut Vec<T>),
) -> (Vec<T>, Vec<T>) {
    let mut first = Vec::with_capacity(expected);
    let mut second = Vec::with_capacity(expected);
    fill(&mut first, &mut second);
    assert_eq!(
        first.len(),
        expected,
        "{what}: scene filled {} dimensions but announced {expected}",
        first.len(),
    );
    assert_eq!(
        second.len(),
        expected,
        "{what}: scene filled {} dimensions but announced {expected}",
        second.len(),
    );
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_length_passes_through() {
        let v = fill_exact("state", 3, |out| out.extend([1.0, 2.0, 3.0]));
        assert_eq!(v, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_expected_accepts_empty_fill() {
        let v: Vec<i32> = fill_exact("groups", 0, |_| {});
        assert!(v.is_empty());
    }

    #[test]
    #[should_panic(expected = "filled 2 dimensions but announced 3")]
    fn short_fill_panics() {
        fill_exact("state", 3, |out: &mut Vec<f64>| out.extend([1.0, 2.0]));
    }

    #[test]
    fn pair_passes_both_through() {
        let (offset, scale) = fill_pair_exact("state offset/scale", 2, |a, b| {
            a.extend([0.0, 0.5]);
            b.extend([1.0, 2.0]);
        });
        assert_eq!(offset, vec![0.0, 0.5]);
        assert_eq!(scale, vec![1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "announced 2")]
    fn mismatched_second_of_pair_panics() {
        fill_pair_exact("action bounds", 2, |a: &mut Vec<f64>, b: &mut Vec<f64>| {
            a.extend([0.0, 0.0]);
            b.push(0.0);
        });
    }
}
