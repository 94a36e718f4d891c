use derive_new::new;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::iter;

/// A single step of an edit script between two unit sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Delete { value: T },
    Insert { value: T },
    Equal { value: T },
}

impl<T> Edit<T> {
    pub fn value(&self) -> &T {
        match self {
            Edit::Delete { value } | Edit::Insert { value } | Edit::Equal { value } => value,
        }
    }
}

impl<T: Display> Display for Edit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edit::Delete { value } => write!(f, "-{value}"),
            Edit::Insert { value } => write!(f, "+{value}"),
            Edit::Equal { value } => write!(f, " {value}"),
        }
    }
}

pub trait DiffAlgorithm<T> {
    type EditScript;

    fn diff(&self) -> Self::EditScript;
}

/// Linear-space Myers diff over any sequence of comparable units.
///
/// Units that never occur on the other side cannot be part of a common
/// subsequence, so they are set aside before the search. The remaining
/// units are matched by divide and conquer around the middle snake, with the
/// common prefix and suffix of every sub-box matched directly.
///
/// Among minimal scripts the forward pass favours the deletion branch when
/// both neighbours reach equally far, and identical inputs always yield the
/// same script.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<T: Eq + Hash> MyersDiff<'_, T> {
    /// Index pairs `(i, j)` of a longest common subsequence, in order.
    fn common_pairs(&self) -> Vec<(usize, usize)> {
        let in_a = self.a.iter().collect::<HashSet<_>>();
        let in_b = self.b.iter().collect::<HashSet<_>>();

        let a_index = (0..self.a.len())
            .filter(|&i| in_b.contains(&self.a[i]))
            .collect::<Vec<_>>();
        let b_index = (0..self.b.len())
            .filter(|&j| in_a.contains(&self.b[j]))
            .collect::<Vec<_>>();

        let (n, m) = (a_index.len(), b_index.len());
        let mut search = SnakeSearch::new(self.a, self.b, a_index, b_index);
        search.conquer(0, n, 0, m);
        search.pairs
    }
}

impl<T: Eq + Hash + Clone> DiffAlgorithm<T> for MyersDiff<'_, T> {
    type EditScript = Vec<Edit<T>>;

    fn diff(&self) -> Self::EditScript {
        let (n, m) = (self.a.len(), self.b.len());
        let mut script = Vec::with_capacity(n.max(m));
        let (mut x, mut y) = (0, 0);

        for (i, j) in self.common_pairs().into_iter().chain(iter::once((n, m))) {
            script.extend(self.a[x..i].iter().map(|value| Edit::Delete {
                value: value.clone(),
            }));
            script.extend(self.b[y..j].iter().map(|value| Edit::Insert {
                value: value.clone(),
            }));

            if i < n {
                script.push(Edit::Equal {
                    value: self.a[i].clone(),
                });
            }

            (x, y) = (i + 1, j + 1);
        }

        script
    }
}

/// Working state of the middle snake search.
///
/// Coordinates are positions in `a_index` / `b_index`, the units that have a
/// counterpart on the other side. Both frontier vectors are sized once for
/// the whole input and reused by every sub-box.
struct SnakeSearch<'s, T> {
    a: &'s [T],
    b: &'s [T],
    a_index: Vec<usize>,
    b_index: Vec<usize>,
    forward: Vec<isize>,
    backward: Vec<isize>,
    offset: isize,
    pairs: Vec<(usize, usize)>,
}

impl<'s, T: Eq> SnakeSearch<'s, T> {
    fn new(a: &'s [T], b: &'s [T], a_index: Vec<usize>, b_index: Vec<usize>) -> Self {
        let max_d = (a_index.len() + b_index.len()).div_ceil(2) as isize;
        let offset = max_d + 1;

        SnakeSearch {
            a,
            b,
            a_index,
            b_index,
            forward: vec![0; 2 * offset as usize + 1],
            backward: vec![0; 2 * offset as usize + 1],
            offset,
            pairs: Vec::new(),
        }
    }

    fn same(&self, x: usize, y: usize) -> bool {
        self.a[self.a_index[x]] == self.b[self.b_index[y]]
    }

    fn matched(&mut self, x: usize, y: usize) {
        self.pairs.push((self.a_index[x], self.b_index[y]));
    }

    fn conquer(&mut self, mut a_lo: usize, mut a_hi: usize, mut b_lo: usize, mut b_hi: usize) {
        while a_lo < a_hi && b_lo < b_hi && self.same(a_lo, b_lo) {
            self.matched(a_lo, b_lo);
            a_lo += 1;
            b_lo += 1;
        }

        let mut suffix = 0;
        while a_lo < a_hi && b_lo < b_hi && self.same(a_hi - 1, b_hi - 1) {
            a_hi -= 1;
            b_hi -= 1;
            suffix += 1;
        }

        if a_lo < a_hi && b_lo < b_hi {
            // a box with both sides non-empty always has a middle snake
            if let Some((x, y)) = self.middle_snake(a_lo, a_hi, b_lo, b_hi) {
                self.conquer(a_lo, x, b_lo, y);
                self.conquer(x, a_hi, y, b_hi);
            }
        }

        for step in 0..suffix {
            self.matched(a_hi + step, b_hi + step);
        }
    }

    /// Finds a point on an optimal path through the box that splits its
    /// edit distance roughly in half.
    fn middle_snake(
        &mut self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> Option<(usize, usize)> {
        let (n, m) = ((a_hi - a_lo) as isize, (b_hi - b_lo) as isize);
        let delta = n - m;
        let odd = delta % 2 != 0;
        let o = self.offset;

        self.forward[(o + 1) as usize] = 0;
        self.backward[(o + 1) as usize] = 0;

        for d in 0..=(n + m + 1) / 2 {
            for k in (-d..=d).step_by(2) {
                let idx = (o + k) as usize;
                let insertion =
                    k == -d || (k != d && self.forward[idx - 1] < self.forward[idx + 1]);
                let mut x = if insertion {
                    self.forward[idx + 1]
                } else {
                    self.forward[idx - 1] + 1
                };
                let mut y = x - k;
                let (start_x, start_y) = (x, y);

                while x < n && y < m && self.same(a_lo + x as usize, b_lo + y as usize) {
                    x += 1;
                    y += 1;
                }
                self.forward[idx] = x;

                if odd
                    && (k - delta).abs() < d
                    && x + self.backward[(o - (k - delta)) as usize] >= n
                {
                    return Some((a_lo + start_x as usize, b_lo + start_y as usize));
                }
            }

            for k in (-d..=d).step_by(2) {
                let idx = (o + k) as usize;
                let insertion =
                    k == -d || (k != d && self.backward[idx - 1] < self.backward[idx + 1]);
                let mut x = if insertion {
                    self.backward[idx + 1]
                } else {
                    self.backward[idx - 1] + 1
                };
                let mut y = x - k;

                while x < n
                    && y < m
                    && self.same(a_hi - 1 - x as usize, b_hi - 1 - y as usize)
                {
                    x += 1;
                    y += 1;
                }
                self.backward[idx] = x;

                if !odd
                    && (k - delta).abs() <= d
                    && x + self.forward[(o - (k - delta)) as usize] >= n
                {
                    return Some((a_hi - x as usize, b_hi - y as usize));
                }
            }
        }

        None
    }
}
