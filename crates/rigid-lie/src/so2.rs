//! # SO(2): rotations in the plane
//!
//! The algebra and the group share the single angle parameter, so `exp` and `log` are the
//! identity map and the product is the sum of the angles. No wrap-around to `(-π, π]` is
//! applied, which keeps the parameter continuous along a trajectory.

use std::f64::consts::PI;
use std::fmt;

use nalgebra::{dmatrix, dvector, DMatrix, DVector};
use rand::Rng;

use crate::{
    algebra::{Algebra, LieAlgebra},
    error::LieResult,
    group::LieGroup,
    scalar::{check_matrix_shape, constant, Scalar},
};

/// The Lie algebra so(2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct So2Algebra;

impl LieAlgebra for So2Algebra {
    fn dimension(&self) -> usize {
        1
    }

    fn matrix_shape(&self) -> (usize, usize) {
        (2, 2)
    }

    fn bracket<S: Scalar>(&self, _left: &DVector<S>, _right: &DVector<S>) -> DVector<S> {
        DVector::zeros(1)
    }

    fn adjoint<S: Scalar>(&self, _arg: &DVector<S>) -> DMatrix<S> {
        DMatrix::zeros(1, 1)
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        let theta = arg[0];
        dmatrix![S::zero(), -theta; theta, S::zero()]
    }

    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        check_matrix_shape(matrix, self.matrix_shape())?;
        Ok(dvector![matrix[(1, 0)]])
    }
}

impl fmt::Display for So2Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("so2")
    }
}

/// SO(2) parameterized by the rotation angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct So2Group;

impl LieGroup for So2Group {
    fn algebra(&self) -> Algebra {
        Algebra::So2(So2Algebra)
    }

    fn dimension(&self) -> usize {
        1
    }

    fn matrix_shape(&self) -> (usize, usize) {
        (2, 2)
    }

    fn product<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        left + right
    }

    fn inverse<S: Scalar>(&self, arg: &DVector<S>) -> DVector<S> {
        -arg
    }

    fn identity<S: Scalar>(&self) -> DVector<S> {
        DVector::zeros(1)
    }

    fn adjoint<S: Scalar>(&self, _arg: &DVector<S>) -> DMatrix<S> {
        DMatrix::identity(1, 1)
    }

    fn exp<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        Ok(arg.clone())
    }

    fn log<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        Ok(arg.clone())
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        let (sin_theta, cos_theta) = arg[0].sin_cos();
        dmatrix![cos_theta, -sin_theta; sin_theta, cos_theta]
    }

    /// Recovers the angle in `(-π, π]`.
    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        check_matrix_shape(matrix, self.matrix_shape())?;
        Ok(dvector![matrix[(1, 0)].atan2(matrix[(0, 0)])])
    }

    fn random<S: Scalar, R: Rng + ?Sized>(&self, rng: &mut R) -> DVector<S> {
        dvector![constant(rng.random_range(-PI..PI))]
    }
}

impl fmt::Display for So2Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SO2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::LieError, AlgebraElement, GroupElement, SO2, SO2_ALGEBRA};
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_identity() -> Result<(), LieError> {
        let e = GroupElement::identity(&SO2);
        let g = SO2.element(dvector![2.0])?;
        assert_eq!(e.product(&g)?, g);
        assert_eq!(g.product(&e)?, g);
        Ok(())
    }

    #[test]
    fn test_product_does_not_wrap() -> Result<(), LieError> {
        let g = SO2.element(dvector![3.0])?;
        assert_eq!(g.product(&g)?.into_param(), dvector![6.0]);
        Ok(())
    }

    #[test]
    fn test_to_matrix() -> Result<(), LieError> {
        let g = SO2.element(dvector![std::f64::consts::FRAC_PI_2])?;
        let p = g.act(&dvector![1.0, 0.0])?;
        assert_relative_eq!(p, dvector![0.0, 1.0], epsilon = EPSILON);
        Ok(())
    }

    #[test]
    fn test_matrix_roundtrip() -> Result<(), LieError> {
        for theta in [-3.0, -0.5, 0.0, 1.2, 3.1] {
            let g = SO2.element(dvector![theta])?;
            let h = GroupElement::from_matrix(&SO2, &g.to_matrix())?;
            assert_relative_eq!(h, g, epsilon = EPSILON);
        }
        Ok(())
    }

    #[test]
    fn test_exp_log() -> Result<(), LieError> {
        let a = SO2_ALGEBRA.element(dvector![0.7])?;
        let g = a.exp(&SO2)?;
        assert_eq!(g.param(), a.param());
        assert_eq!(g.log()?, a);
        assert_eq!(g.adjoint(), DMatrix::identity(1, 1));
        Ok(())
    }

    #[test]
    fn test_algebra() -> Result<(), LieError> {
        let a = SO2_ALGEBRA.element(dvector![0.7])?;
        let b = SO2_ALGEBRA.element(dvector![-1.5])?;
        assert_eq!(a.bracket(&b)?, AlgebraElement::zero(SO2_ALGEBRA));
        let m = a.to_matrix();
        assert_eq!(m, dmatrix![0.0, -0.7; 0.7, 0.0]);
        assert_eq!(AlgebraElement::from_matrix(SO2_ALGEBRA, &m)?, a);
        Ok(())
    }
}
