/// Contiguous half-open row range assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBlock {
    pub start: usize,
    pub end: usize,
}

impl RowBlock {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Splits `[start, end)` into at most `num_threads` contiguous blocks.
///
/// Blocks are quotient-sized with the last absorbing the remainder, so every
/// row lands in exactly one block. The worker count is capped at the row
/// count; fewer rows than threads simply means fewer blocks.
pub fn partition_rows(start: usize, end: usize, num_threads: usize) -> Vec<RowBlock> {
    debug_assert!(start <= end);
    debug_assert!(num_threads > 0);

    let rows = end - start;
    let workers = num_threads.min(rows).max(1);
    let block = rows / workers;

    let mut blocks = Vec::with_capacity(workers);
    let mut lo = start;
    for k in 0..workers {
        let hi = if k == workers - 1 { end } else { lo + block };
        blocks.push(RowBlock { start: lo, end: hi });
        lo = hi;
    }

    blocks
}
