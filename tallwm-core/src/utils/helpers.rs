//! Index arithmetic over ordered lists.

/// Index `shift` steps away from `index` in a list of `len` elements, wrapping at
/// both ends. `None` for an empty list.
#[must_use]
pub fn wrapping_index(index: usize, len: usize, shift: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    Some((index as isize + shift).rem_euclid(len) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_index_wraps_both_ways() {
        assert_eq!(wrapping_index(0, 3, -1), Some(2));
        assert_eq!(wrapping_index(2, 3, 1), Some(0));
        assert_eq!(wrapping_index(1, 3, 4), Some(2));
        assert_eq!(wrapping_index(0, 0, 1), None);
    }
}
