use crate::error::{HmmError, Result};
use crate::utils::DEFAULT_TOLERANCE;
use crate::Hmm;

/// Step-wise construction of an [`Hmm`].
///
/// ```
/// use hmm_dp::HmmBuilder;
///
/// let hmm = HmmBuilder::new(2, 2)
///     .transition(vec![vec![0.9, 0.1], vec![0.2, 0.8]])
///     .emission(vec![vec![0.5, 0.5], vec![0.8, 0.2]])
///     .initial(vec![0.5, 0.5])
///     .tolerance(1e-9)
///     .build()
///     .unwrap();
/// assert_eq!(hmm.n_states(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct HmmBuilder {
    n_states: usize,
    n_symbols: usize,
    transition: Option<Vec<Vec<f64>>>,
    emission: Option<Vec<Vec<f64>>>,
    initial: Option<Vec<f64>>,
    tolerance: Option<f64>,
}

impl HmmBuilder {
    pub fn new(n_states: usize, n_symbols: usize) -> Self {
        Self {
            n_states,
            n_symbols,
            transition: None,
            emission: None,
            initial: None,
            tolerance: None,
        }
    }
    pub fn transition(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.transition = Some(rows);
        self
    }
    pub fn emission(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.emission = Some(rows);
        self
    }
    pub fn initial(mut self, pi: Vec<f64>) -> Self {
        self.initial = Some(pi);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn build(self) -> Result<Hmm> {
        let missing = |what: &str| HmmError::Configuration(format!("{what} was not provided"));
        let transition = self.transition.ok_or_else(|| missing("transition matrix"))?;
        let emission = self.emission.ok_or_else(|| missing("emission matrix"))?;
        let initial = self.initial.ok_or_else(|| missing("initial distribution"))?;
        Hmm::with_tolerance(
            self.n_states,
            self.n_symbols,
            transition,
            emission,
            initial,
            self.tolerance.unwrap_or(DEFAULT_TOLERANCE),
        )
    }
}
