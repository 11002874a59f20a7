//! Time grid and simulated path containers.
//!
//! Both are plain ordered `f64` sequences so that any consumer (plotting,
//! export, statistics) can read them through `as_slice()` without depending
//! on engine types.

use super::error::SimulationError;

/// Upper bound on steps per path.
pub const MAX_STEPS: usize = 50_000_000;

/// Uniform time grid `t0, t0 + h, ..., t0 + N·h` with `N = floor((tn - t0) / h)`.
///
/// The quotient is floored as computed, so a horizon that is not an exact
/// binary multiple of `h` may lose its last step (`0.3 / 0.1` gives 2 steps).
/// Immutable once built. Points are computed as `t0 + i·h` rather than by
/// repeated addition, so consecutive differences stay within rounding of `h`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::TimeGrid;
///
/// let grid = TimeGrid::uniform(0.25, 0.0, 1.0).unwrap();
/// assert_eq!(grid.as_slice(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(grid.n_steps(), 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
    step: f64,
}

impl TimeGrid {
    /// Builds the grid for `(step, t0, tn)`.
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidConfiguration` if `step` is not a positive
    /// finite number, a bound is not finite, `t0 > tn`, or the grid would
    /// exceed [`MAX_STEPS`].
    pub fn uniform(step: f64, t0: f64, tn: f64) -> Result<Self, SimulationError> {
        let n_steps = step_count(step, t0, tn)?;
        let points = (0..=n_steps).map(|i| t0 + i as f64 * step).collect();
        Ok(Self { points, step })
    }

    /// Grid points as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.points
    }

    /// Number of points (`n_steps() + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a grid holds at least `t0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of integration steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.points.len() - 1
    }

    /// Step size `h`.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// First point, `t0`.
    #[inline]
    pub fn start(&self) -> f64 {
        self.points[0]
    }

    /// Last point, `t0 + N·h` (at most `tn` up to rounding).
    #[inline]
    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Consumes the grid, returning its points.
    pub fn into_vec(self) -> Vec<f64> {
        self.points
    }
}

impl AsRef<[f64]> for TimeGrid {
    fn as_ref(&self) -> &[f64] {
        &self.points
    }
}

/// State values of one trajectory, aligned one-to-one with a [`TimeGrid`].
///
/// Owned by whoever requested the integration.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    values: Vec<f64>,
}

impl Path {
    pub(crate) fn with_capacity(initial: f64, capacity: usize) -> Self {
        let mut values = Vec::with_capacity(capacity);
        values.push(initial);
        Self { values }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Values as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: a path holds at least `y0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Initial condition `y0`.
    #[inline]
    pub fn initial(&self) -> f64 {
        self.values[0]
    }

    /// Terminal value, the last element.
    #[inline]
    pub fn terminal(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Consumes the path, returning its values.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

impl AsRef<[f64]> for Path {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Validates `(step, t0, tn)` and returns `N = floor((tn - t0) / step)`.
pub(crate) fn step_count(step: f64, t0: f64, tn: f64) -> Result<usize, SimulationError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(SimulationError::invalid(
            "step_size",
            format!("must be positive and finite, got {}", step),
        ));
    }
    if !t0.is_finite() {
        return Err(SimulationError::invalid(
            "start_time",
            format!("must be finite, got {}", t0),
        ));
    }
    if !tn.is_finite() {
        return Err(SimulationError::invalid(
            "end_time",
            format!("must be finite, got {}", tn),
        ));
    }
    if t0 > tn {
        return Err(SimulationError::invalid(
            "start_time",
            format!("must not exceed end_time ({} > {})", t0, tn),
        ));
    }

    let steps = ((tn - t0) / step).floor();
    if steps > MAX_STEPS as f64 {
        return Err(SimulationError::invalid(
            "step_size",
            format!(
                "{} over [{}, {}] needs {} steps (limit {})",
                step, t0, tn, steps, MAX_STEPS
            ),
        ));
    }
    Ok(steps as usize)
}
