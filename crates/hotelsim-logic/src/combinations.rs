//! Lazy fixed-size combinations.
//!
//! [`Combinations`] walks every order-preserving `k`-subsequence of a slice
//! in lexicographic index order, keeping only a `k`-length index vector
//! between steps. Nothing is materialized up front and there is no
//! recursion, so memory stays O(k) however large the input is.

/// Iterator over `k`-combinations of a slice, preserving element order.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl<'a, T: Copy> Combinations<'a, T> {
    pub fn new(items: &'a [T], k: usize) -> Self {
        Self {
            items,
            indices: (0..k).collect(),
            started: false,
            done: k > items.len(),
        }
    }

    /// Restart the sequence from the first combination.
    pub fn reset(&mut self) {
        let k = self.indices.len();
        self.indices = (0..k).collect();
        self.started = false;
        self.done = k > self.items.len();
    }

    /// Total number of combinations this producer yields from the start.
    pub fn total(&self) -> u64 {
        binomial(self.items.len() as u64, self.indices.len() as u64)
    }

    /// Move `indices` to the next combination. Returns false when exhausted.
    fn step(&mut self) -> bool {
        let n = self.items.len();
        let k = self.indices.len();
        // Rightmost index that can still move right.
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl<T: Copy> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.started {
            if !self.step() {
                self.done = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(self.indices.iter().map(|&i| self.items[i]).collect())
    }
}

/// `n choose k`, saturating at `u64::MAX`.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        // result * (n - i) is always divisible by (i + 1) at this point
        result = match result.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return u64::MAX,
        };
    }
    result
}
