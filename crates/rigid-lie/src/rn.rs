use std::fmt;

use nalgebra::{DMatrix, DVector};
use rand::Rng;

use crate::{
    algebra::{Algebra, LieAlgebra},
    error::LieResult,
    group::LieGroup,
    scalar::{check_matrix_shape, constant, Scalar},
};

/// The abelian Lie algebra ℝⁿ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RnAlgebra {
    n: usize,
}

impl RnAlgebra {
    /// Create ℝⁿ.
    pub const fn new(n: usize) -> Self {
        Self { n }
    }
}

/// Homogeneous `(n+1)×(n+1)` matrix with `arg` in the last column above `corner`.
fn homogeneous<S: Scalar>(arg: &DVector<S>, diagonal: S, corner: S) -> DMatrix<S> {
    let n = arg.len();
    let mut m = DMatrix::identity(n + 1, n + 1) * diagonal;
    m.view_mut((0, n), (n, 1)).copy_from(arg);
    m[(n, n)] = corner;
    m
}

impl LieAlgebra for RnAlgebra {
    fn dimension(&self) -> usize {
        self.n
    }

    fn matrix_shape(&self) -> (usize, usize) {
        (self.n + 1, self.n + 1)
    }

    fn bracket<S: Scalar>(&self, _left: &DVector<S>, _right: &DVector<S>) -> DVector<S> {
        DVector::zeros(self.n)
    }

    fn adjoint<S: Scalar>(&self, _arg: &DVector<S>) -> DMatrix<S> {
        DMatrix::zeros(self.n, self.n)
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        homogeneous(arg, S::zero(), S::zero())
    }

    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        check_matrix_shape(matrix, self.matrix_shape())?;
        Ok(matrix.view((0, self.n), (self.n, 1)).column(0).into_owned())
    }
}

impl fmt::Display for RnAlgebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.n)
    }
}

/// The additive Lie group ℝⁿ, e.g. translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RnGroup {
    n: usize,
}

impl RnGroup {
    /// Create ℝⁿ.
    pub const fn new(n: usize) -> Self {
        Self { n }
    }
}

impl LieGroup for RnGroup {
    fn algebra(&self) -> Algebra {
        Algebra::Rn(RnAlgebra::new(self.n))
    }

    fn dimension(&self) -> usize {
        self.n
    }

    fn matrix_shape(&self) -> (usize, usize) {
        (self.n + 1, self.n + 1)
    }

    fn product<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        left + right
    }

    fn inverse<S: Scalar>(&self, arg: &DVector<S>) -> DVector<S> {
        -arg
    }

    fn identity<S: Scalar>(&self) -> DVector<S> {
        DVector::zeros(self.n)
    }

    fn adjoint<S: Scalar>(&self, _arg: &DVector<S>) -> DMatrix<S> {
        DMatrix::identity(self.n, self.n)
    }

    fn exp<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        Ok(arg.clone())
    }

    fn log<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        Ok(arg.clone())
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        homogeneous(arg, S::one(), S::one())
    }

    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        check_matrix_shape(matrix, self.matrix_shape())?;
        Ok(matrix.view((0, self.n), (self.n, 1)).column(0).into_owned())
    }

    fn random<S: Scalar, R: Rng + ?Sized>(&self, rng: &mut R) -> DVector<S> {
        DVector::from_fn(self.n, |_, _| constant(rng.random_range(-1.0..1.0)))
    }
}

impl fmt::Display for RnGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.n)
    }
}
