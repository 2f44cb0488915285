#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Small-angle series
//!
//! Several closed forms in Lie group theory are quotients that evaluate to `0/0` at the
//! origin, e.g. the coefficients of the SE(3) `V` matrix. Each [`Series`] evaluates the exact
//! expression away from zero and switches to its Taylor polynomial when `|x|` drops below
//! [`SERIES_TAYLOR_THRESHOLD`].
//!
//! ## Example
//!
//! ```rust
//! use rigid_series::Series;
//!
//! let a: f64 = Series::OneMinusCosOverXSq.eval(0.0);
//! assert_eq!(a, 0.5);
//!
//! let b: f64 = "(x - sin(x))/x^3".parse::<Series>().unwrap().eval(1.0);
//! assert!((b - (1.0 - 1f64.sin())).abs() < 1e-12);
//! ```

use std::fmt;
use std::str::FromStr;

use nalgebra::RealField;

/// Below this magnitude the Taylor polynomial is used instead of the exact quotient.
///
/// The polynomials are truncated after the `x^6` term, so the truncation error at the
/// threshold is below `1e-15` for every form.
pub const SERIES_TAYLOR_THRESHOLD: f64 = 1e-1;

/// An error type for the series module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// Error when the requested form has no registered series.
    #[error("unknown series form `{0}`")]
    Unknown(String),
}

/// A named canonical form with a removable singularity at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    /// `(1 - cos(x))/x^2`, tends to `1/2`.
    OneMinusCosOverXSq,
    /// `(x - sin(x))/x^3`, tends to `1/6`.
    XMinusSinOverXCubed,
    /// `(1 - x*sin(x)/(2*(1 - cos(x))))/x^2`, tends to `1/12`.
    ///
    /// This is the quadratic coefficient of the inverse SE(3) `V` matrix.
    InverseVCoefficient,
}

impl Series {
    /// All registered forms.
    pub const ALL: [Series; 3] = [
        Series::OneMinusCosOverXSq,
        Series::XMinusSinOverXCubed,
        Series::InverseVCoefficient,
    ];

    /// Textual name of the form, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Series::OneMinusCosOverXSq => "(1 - cos(x))/x^2",
            Series::XMinusSinOverXCubed => "(x - sin(x))/x^3",
            Series::InverseVCoefficient => "(1 - x*sin(x)/(2*(1 - cos(x))))/x^2",
        }
    }

    /// Taylor coefficients of the even powers `x^0, x^2, x^4, x^6`.
    fn taylor_coefficients(&self) -> [f64; 4] {
        match self {
            Series::OneMinusCosOverXSq => [1.0 / 2.0, -1.0 / 24.0, 1.0 / 720.0, -1.0 / 40320.0],
            Series::XMinusSinOverXCubed => {
                [1.0 / 6.0, -1.0 / 120.0, 1.0 / 5040.0, -1.0 / 362880.0]
            }
            Series::InverseVCoefficient => {
                [1.0 / 12.0, 1.0 / 720.0, 1.0 / 30240.0, 1.0 / 1209600.0]
            }
        }
    }

    /// Evaluate the exact quotient. Singular at `x = 0`.
    pub fn exact<T: RealField + Copy>(&self, x: T) -> T {
        let one = T::one();
        let two = one + one;
        match self {
            Series::OneMinusCosOverXSq => (one - x.cos()) / (x * x),
            Series::XMinusSinOverXCubed => (x - x.sin()) / (x * x * x),
            Series::InverseVCoefficient => {
                (one - x * x.sin() / (two * (one - x.cos()))) / (x * x)
            }
        }
    }

    /// Evaluate the truncated Taylor polynomial around zero.
    pub fn taylor<T: RealField + Copy>(&self, x: T) -> T {
        let x_sq = x * x;
        // Horner evaluation in x^2
        self.taylor_coefficients()
            .iter()
            .rev()
            .fold(T::zero(), |acc, &c| acc * x_sq + nalgebra::convert::<f64, T>(c))
    }

    /// Evaluate the form, using the Taylor polynomial near zero.
    pub fn eval<T: RealField + Copy>(&self, x: T) -> T {
        let threshold: T = nalgebra::convert(SERIES_TAYLOR_THRESHOLD);
        if x < threshold && -x < threshold {
            self.taylor(x)
        } else {
            self.exact(x)
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Series {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Series::ALL
            .iter()
            .find(|series| series.name() == s)
            .copied()
            .ok_or_else(|| SeriesError::Unknown(s.to_string()))
    }
}
