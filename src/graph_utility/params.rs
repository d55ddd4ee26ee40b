//! Generation parameters and the quantities derived from them.
//!
//! Defaults follow the Graph500 generator: edge factor 16 and partition
//! probabilities a = 0.57, b = c = 0.19, d = 0.05.

use crate::error::GraphError;

pub const DEFAULT_EDGE_FACTOR: u64 = 16;

pub const GRAPH500_A: f64 = 0.57;
pub const GRAPH500_B: f64 = 0.19;
pub const GRAPH500_C: f64 = 0.19;

/// Largest accepted scale. Keeps every vertex index and derived count in `u64`.
pub const MAX_SCALE: u32 = 48;

/// Allowed deviation of `a + b + c + d` from one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Quadrant selection probabilities of the R-MAT model.
///
/// `a` selects the top-left quadrant, `b` the top-right, `c` the bottom-left
/// and `d` the bottom-right. Rows are sources, columns destinations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RMatParams {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl RMatParams {
    /// Validates and builds a probability set.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameter`] if any probability is negative
    /// or not finite, or if the four do not sum to one within
    /// [`PROBABILITY_TOLERANCE`].
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Result<RMatParams, GraphError> {
        for (name, value) in [("a", a), ("b", b), ("c", c), ("d", d)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::invalid(
                    "probabilities",
                    format!("{name} = {value} must be a finite non-negative number"),
                ));
            }
        }
        let sum = a + b + c + d;
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(GraphError::invalid(
                "probabilities",
                format!("a + b + c + d = {sum}, expected 1"),
            ));
        }
        Ok(RMatParams { a, b, c, d })
    }

    /// Builds a probability set where `d` absorbs the remainder `1 - a - b - c`.
    ///
    /// # Errors
    /// Same conditions as [`RMatParams::new`]; a remainder below zero is
    /// reported as a negative `d`.
    pub fn from_abc(a: f64, b: f64, c: f64) -> Result<RMatParams, GraphError> {
        let d = 1.0 - a - b - c;
        // Absorb rounding noise so that e.g. 0.5/0.25/0.25 yields d = 0.
        let d = if d < 0.0 && d > -PROBABILITY_TOLERANCE { 0.0 } else { d };
        RMatParams::new(a, b, c, d)
    }

    /// The Graph500 recommended probabilities.
    pub fn graph500() -> RMatParams {
        RMatParams {
            a: GRAPH500_A,
            b: GRAPH500_B,
            c: GRAPH500_C,
            d: 1.0 - GRAPH500_A - GRAPH500_B - GRAPH500_C,
        }
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    /// Cumulative thresholds `[a, a + b, a + b + c]`; anything above the last
    /// one falls into the `d` quadrant.
    pub fn thresholds(&self) -> [f64; 3] {
        [self.a, self.a + self.b, self.a + self.b + self.c]
    }
}

impl Default for RMatParams {
    fn default() -> Self {
        RMatParams::graph500()
    }
}

/// Scale and edge factor of a generated graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphSize {
    scale: u32,
    edgefactor: u64,
}

impl GraphSize {
    /// # Errors
    /// Returns [`GraphError::InvalidParameter`] when `scale` exceeds
    /// [`MAX_SCALE`], when `edgefactor` is zero, or when the derived edge
    /// count does not fit in `u64`.
    pub fn new(scale: u32, edgefactor: u64) -> Result<GraphSize, GraphError> {
        if scale > MAX_SCALE {
            return Err(GraphError::invalid(
                "scale",
                format!("{scale} exceeds the maximum supported scale {MAX_SCALE}"),
            ));
        }
        if edgefactor == 0 {
            return Err(GraphError::invalid("edgefactor", "must be positive"));
        }
        let size = GraphSize { scale, edgefactor };
        if size.edge_count_wide() > u128::from(u64::MAX) {
            return Err(GraphError::invalid(
                "edgefactor",
                format!("{edgefactor} overflows the edge count at scale {scale}"),
            ));
        }
        Ok(size)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn edgefactor(&self) -> u64 {
        self.edgefactor
    }

    /// `2^scale`.
    pub fn nnodes(&self) -> u64 {
        1u64 << self.scale
    }

    /// `min(nnodes * edgefactor, nnodes * (nnodes - 1) / 2)`.
    ///
    /// The second term only binds for tiny scales; scale 0 yields no edges.
    pub fn nedges(&self) -> u64 {
        // Bounded by `new`.
        self.edge_count_wide() as u64
    }

    fn edge_count_wide(&self) -> u128 {
        let nnodes = u128::from(self.nnodes());
        let by_factor = nnodes * u128::from(self.edgefactor);
        let pairs = nnodes * (nnodes - 1) / 2;
        by_factor.min(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1, 0)]
    #[case(1, 2, 1)]
    #[case(2, 4, 6)]
    #[case(3, 8, 28)]
    #[case(4, 16, 120)]
    #[case(5, 32, 496)]
    #[case(6, 64, 1024)]
    #[case(10, 1024, 16384)]
    fn derived_counts_with_default_edge_factor(
        #[case] scale: u32,
        #[case] nnodes: u64,
        #[case] nedges: u64,
    ) {
        let size = GraphSize::new(scale, DEFAULT_EDGE_FACTOR).expect("valid size");
        assert_eq!(size.nnodes(), nnodes);
        assert_eq!(size.nedges(), nedges);
    }

    #[test]
    fn scale_above_maximum_is_rejected() {
        let err = GraphSize::new(MAX_SCALE + 1, DEFAULT_EDGE_FACTOR).expect_err("too large");
        assert!(matches!(
            err,
            GraphError::InvalidParameter { parameter: "scale", .. }
        ));
    }

    #[test]
    fn zero_edge_factor_is_rejected() {
        let err = GraphSize::new(4, 0).expect_err("zero edge factor");
        assert!(matches!(
            err,
            GraphError::InvalidParameter { parameter: "edgefactor", .. }
        ));
    }

    #[test]
    fn overflowing_edge_factor_is_rejected() {
        assert!(GraphSize::new(MAX_SCALE, u64::MAX).is_err());
    }

    #[test]
    fn graph500_defaults_are_valid() {
        let params = RMatParams::graph500();
        let rebuilt = RMatParams::new(params.a(), params.b(), params.c(), params.d())
            .expect("defaults sum to one");
        assert_eq!(params, rebuilt);
        assert!((params.d() - 0.05).abs() < 1e-12);
    }

    #[rstest]
    #[case::sums_above_one(0.57, 0.19, 0.19, 0.15)]
    #[case::sums_below_one(0.5, 0.1, 0.1, 0.1)]
    #[case::negative(0.7, 0.4, -0.1, 0.0)]
    #[case::nan(f64::NAN, 0.5, 0.25, 0.25)]
    #[case::infinite(f64::INFINITY, 0.0, 0.0, 0.0)]
    fn malformed_probabilities_are_rejected(
        #[case] a: f64,
        #[case] b: f64,
        #[case] c: f64,
        #[case] d: f64,
    ) {
        let err = RMatParams::new(a, b, c, d).expect_err("must be rejected");
        assert!(matches!(
            err,
            GraphError::InvalidParameter { parameter: "probabilities", .. }
        ));
    }

    #[test]
    fn sum_within_tolerance_is_accepted() {
        assert!(RMatParams::new(0.25, 0.25, 0.25, 0.25 + 5e-10).is_ok());
        assert!(RMatParams::new(0.25, 0.25, 0.25, 0.25 + 5e-9).is_err());
    }

    #[test]
    fn from_abc_derives_remainder() {
        let params = RMatParams::from_abc(0.45, 0.15, 0.15).expect("valid");
        assert!((params.d() - 0.25).abs() < 1e-12);
        assert!(RMatParams::from_abc(0.6, 0.3, 0.2).is_err());
    }

    #[test]
    fn thresholds_are_cumulative() {
        let params = RMatParams::new(0.4, 0.3, 0.2, 0.1).expect("valid");
        let [t0, t1, t2] = params.thresholds();
        assert!((t0 - 0.4).abs() < 1e-12);
        assert!((t1 - 0.7).abs() < 1e-12);
        assert!((t2 - 0.9).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn nedges_respects_both_caps(scale in 0u32..=MAX_SCALE, edgefactor in 1u64..=64) {
            let size = GraphSize::new(scale, edgefactor).expect("valid size");
            let nnodes = u128::from(size.nnodes());
            prop_assert_eq!(size.nnodes(), 1u64 << scale);
            prop_assert!(u128::from(size.nedges()) <= nnodes * (nnodes - 1) / 2);
            prop_assert!(u128::from(size.nedges()) <= nnodes * u128::from(edgefactor));
        }
    }
}
