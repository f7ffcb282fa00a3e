//! Owned T×N result tables (α, β, δ, ψ, γ).
//!
//! Rows are time steps and columns are states. Storage is a single row-major
//! buffer with 0-based layout; every accessor takes 1-based `t` and `i`.

use std::fmt;
use std::ops::Index;

/// A T×N matrix indexed by 1-based time step and 1-based state.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    n_states: usize,
    data: Vec<T>,
}

impl<T: Copy> Table<T> {
    /// Assemble a table from 0-based per-time-step rows.
    pub(crate) fn from_rows<I>(n_states: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<T>>,
    {
        assert!(n_states > 0, "a table needs at least one state column");
        let mut data = Vec::new();
        for row in rows {
            debug_assert_eq!(row.len(), n_states, "ragged table row");
            data.extend(row);
        }
        Self { n_states, data }
    }

    /// Number of time steps `T`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / self.n_states
    }

    /// True when the table holds no time steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of state columns `N`.
    #[inline]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Entry at time `t` (1..=T) for state `i` (1..=N).
    pub fn get(&self, t: usize, i: usize) -> Option<T> {
        if i == 0 || i > self.n_states {
            return None;
        }
        self.row(t).map(|r| r[i - 1])
    }

    /// All state entries at time `t` (1..=T). Element `k` of the slice is
    /// state `k + 1`.
    pub fn row(&self, t: usize) -> Option<&[T]> {
        if t == 0 || t > self.len() {
            return None;
        }
        let start = (t - 1) * self.n_states;
        Some(&self.data[start..start + self.n_states])
    }

    /// Iterate rows in time order, starting at `t = 1`.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data.chunks(self.n_states)
    }
}

/// 1-based `(t, i)` indexing.
///
/// # Panics
/// Panics if `t` or `i` is zero or out of range.
impl<T: Copy> Index<(usize, usize)> for Table<T> {
    type Output = T;

    fn index(&self, (t, i): (usize, usize)) -> &T {
        assert!(
            (1..=self.len()).contains(&t) && (1..=self.n_states).contains(&i),
            "table index ({t}, {i}) out of range for {}x{}",
            self.len(),
            self.n_states
        );
        &self.data[(t - 1) * self.n_states + (i - 1)]
    }
}

impl<T: Copy + fmt::Display> fmt::Display for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for (k, v) in row.iter().enumerate() {
                if k > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{v}")?;
            }
        }
        Ok(())
    }
}
