use std::f64::consts::PI;
use std::fmt;

use nalgebra::{DMatrix, DVector, Matrix3};
use rand::Rng;

use super::{Axis, EulerType, So3Algebra};
use crate::{
    algebra::Algebra,
    error::{LieError, LieResult},
    group::LieGroup,
    scalar::{constant, to_dmatrix, Scalar},
};

/// SO(3) parameterized by three angles about `sequence`.
///
/// `param[i]` is the angle about `sequence[i]`. Body-fixed sequences post-multiply the
/// elemental rotations (`R = R₀ R₁ R₂`), space-fixed sequences pre-multiply them
/// (`R = R₂ R₁ R₀`).
///
/// The product adds the angle vectors. This is only the true rotation composition when both
/// rotations share an axis, and is kept as a cheap approximation for small increments.
/// `exp`, `log` and `from_matrix` are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct So3EulerGroup {
    euler_type: EulerType,
    sequence: [Axis; 3],
}

impl So3EulerGroup {
    /// Create the realization for an axis sequence.
    pub const fn new(euler_type: EulerType, sequence: [Axis; 3]) -> Self {
        Self {
            euler_type,
            sequence,
        }
    }

    /// Moving or fixed frame convention.
    pub fn euler_type(&self) -> EulerType {
        self.euler_type
    }

    /// The rotation axes, in order of application to the parameters.
    pub fn sequence(&self) -> [Axis; 3] {
        self.sequence
    }

    fn rotation<S: Scalar>(&self, arg: &DVector<S>) -> Matrix3<S> {
        self.sequence
            .iter()
            .zip(arg.iter())
            .fold(Matrix3::identity(), |m, (axis, angle)| {
                let r = axis.rotation(*angle);
                match self.euler_type {
                    EulerType::BodyFixed => m * r,
                    EulerType::SpaceFixed => r * m,
                }
            })
    }
}

impl LieGroup for So3EulerGroup {
    fn algebra(&self) -> Algebra {
        Algebra::So3(So3Algebra)
    }

    fn dimension(&self) -> usize {
        3
    }

    fn matrix_shape(&self) -> (usize, usize) {
        (3, 3)
    }

    fn product<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        left + right
    }

    fn inverse<S: Scalar>(&self, arg: &DVector<S>) -> DVector<S> {
        -arg
    }

    fn identity<S: Scalar>(&self) -> DVector<S> {
        DVector::zeros(3)
    }

    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        self.to_matrix(arg)
    }

    fn exp<S: Scalar>(&self, _arg: &DVector<S>) -> LieResult<DVector<S>> {
        Err(LieError::not_implemented("exp", self))
    }

    fn log<S: Scalar>(&self, _arg: &DVector<S>) -> LieResult<DVector<S>> {
        Err(LieError::not_implemented("log", self))
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        to_dmatrix(&self.rotation(arg))
    }

    fn from_matrix<S: Scalar>(&self, _matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        Err(LieError::not_implemented("from_matrix", self))
    }

    fn random<S: Scalar, R: Rng + ?Sized>(&self, rng: &mut R) -> DVector<S> {
        DVector::from_fn(3, |_, _| constant(rng.random_range(-PI..PI)))
    }
}

impl fmt::Display for So3EulerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.sequence;
        write!(f, "SO3Euler({}, {a}-{b}-{c})", self.euler_type)
    }
}
