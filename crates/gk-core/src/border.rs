/// Strategy for mapping out-of-range coordinates back into a grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Clamp to the nearest edge element.
    Replicate,
    /// Wrap around with a non-negative modulo.
    Circular,
    /// No remapping; the coordinate must already be in range.
    Unchecked,
}

pub fn map_index(i: isize, len: usize, policy: BorderPolicy) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match policy {
        BorderPolicy::Replicate => {
            if i < 0 {
                Some(0)
            } else {
                let idx = i as usize;
                Some(idx.min(len - 1))
            }
        }
        BorderPolicy::Circular => Some(i.rem_euclid(len as isize) as usize),
        BorderPolicy::Unchecked => {
            if i >= 0 && (i as usize) < len {
                Some(i as usize)
            } else {
                None
            }
        }
    }
}
