use std::fmt;

use nalgebra::{DMatrix, DVector, Matrix3, RealField, Vector3, Vector4};
use rand::Rng;

use super::{random_quaternion, So3Algebra};
use crate::{
    algebra::Algebra,
    error::LieResult,
    group::LieGroup,
    scalar::{check_matrix_shape, constant, small_angle, to_dmatrix, to_matrix3, vector3, Scalar},
};

/// SO(3) parameterized by a unit quaternion `[w, x, y, z]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct So3QuatGroup;

#[inline]
pub(crate) fn quaternion<S: Scalar>(param: &DVector<S>) -> Vector4<S> {
    Vector4::new(param[0], param[1], param[2], param[3])
}

#[inline]
fn to_param<S: Scalar>(q: &Vector4<S>) -> DVector<S> {
    DVector::from_column_slice(q.as_slice())
}

/// Hamilton product `q ⊗ p`.
pub(crate) fn hamilton_product<S: Scalar>(q: &Vector4<S>, p: &Vector4<S>) -> Vector4<S> {
    let (q0, q1, q2, q3) = (q[0], q[1], q[2], q[3]);
    let (p0, p1, p2, p3) = (p[0], p[1], p[2], p[3]);
    Vector4::new(
        q0 * p0 - q1 * p1 - q2 * p2 - q3 * p3,
        q1 * p0 + q0 * p1 - q3 * p2 + q2 * p3,
        q2 * p0 + q3 * p1 + q0 * p2 - q1 * p3,
        q3 * p0 - q2 * p1 + q1 * p2 + q0 * p3,
    )
}

pub(crate) fn quaternion_to_matrix<S: Scalar>(q: &Vector4<S>) -> Matrix3<S> {
    let (a, b, c, d) = (q[0], q[1], q[2], q[3]);
    let two = constant::<S>(2.0);
    Matrix3::new(
        a * a + b * b - c * c - d * d,
        two * (b * c - a * d),
        two * (a * c + b * d),
        two * (b * c + a * d),
        a * a - b * b + c * c - d * d,
        two * (c * d - a * b),
        two * (b * d - a * c),
        two * (a * b + c * d),
        a * a - b * b - c * c + d * d,
    )
}

/// Unit quaternion with `w ≥ 0` of a rotation matrix, branching on the largest diagonal
/// term (Shepperd).
pub(crate) fn quaternion_from_matrix<S: Scalar>(m: &Matrix3<S>) -> Vector4<S> {
    let one = S::one();
    let two = constant::<S>(2.0);
    let quarter = constant::<S>(0.25);
    let trace = m.trace();

    let q = if trace > S::zero() {
        let s = two * (one + trace).sqrt();
        Vector4::new(
            quarter * s,
            (m[(2, 1)] - m[(1, 2)]) / s,
            (m[(0, 2)] - m[(2, 0)]) / s,
            (m[(1, 0)] - m[(0, 1)]) / s,
        )
    } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
        let s = two * (one + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt();
        Vector4::new(
            (m[(2, 1)] - m[(1, 2)]) / s,
            quarter * s,
            (m[(0, 1)] + m[(1, 0)]) / s,
            (m[(0, 2)] + m[(2, 0)]) / s,
        )
    } else if m[(1, 1)] > m[(2, 2)] {
        let s = two * (one + m[(1, 1)] - m[(0, 0)] - m[(2, 2)]).sqrt();
        Vector4::new(
            (m[(0, 2)] - m[(2, 0)]) / s,
            (m[(0, 1)] + m[(1, 0)]) / s,
            quarter * s,
            (m[(1, 2)] + m[(2, 1)]) / s,
        )
    } else {
        let s = two * (one + m[(2, 2)] - m[(0, 0)] - m[(1, 1)]).sqrt();
        Vector4::new(
            (m[(1, 0)] - m[(0, 1)]) / s,
            (m[(0, 2)] + m[(2, 0)]) / s,
            (m[(1, 2)] + m[(2, 1)]) / s,
            quarter * s,
        )
    };

    let q = q.normalize();
    if q[0] < S::zero() {
        -q
    } else {
        q
    }
}

/// Quaternion of the rotation vector `omega`.
pub(crate) fn quaternion_exp<S: Scalar>(omega: &Vector3<S>) -> Vector4<S> {
    let theta = omega.norm();
    if theta > small_angle() {
        let half = theta / constant::<S>(2.0);
        let (sin_half, cos_half) = half.sin_cos();
        let v = omega * (sin_half / theta);
        Vector4::new(cos_half, v.x, v.y, v.z)
    } else {
        log::debug!("quaternion exp: angle below threshold, returning identity");
        Vector4::new(S::one(), S::zero(), S::zero(), S::zero())
    }
}

/// Rotation vector of the unit quaternion `q`, with angle in `[0, 2π]`.
pub(crate) fn quaternion_log<S: Scalar>(q: &Vector4<S>) -> Vector3<S> {
    let w = RealField::clamp(q[0], -S::one(), S::one());
    let theta = constant::<S>(2.0) * w.acos();
    let sin_half = (theta / constant::<S>(2.0)).sin();
    if sin_half > small_angle() || sin_half < -small_angle::<S>() {
        Vector3::new(q[1], q[2], q[3]) * (theta / sin_half)
    } else {
        log::debug!("quaternion log: angle below threshold, returning zero");
        Vector3::zeros()
    }
}

impl LieGroup for So3QuatGroup {
    fn algebra(&self) -> Algebra {
        Algebra::So3(So3Algebra)
    }

    fn dimension(&self) -> usize {
        4
    }

    fn matrix_shape(&self) -> (usize, usize) {
        (3, 3)
    }

    fn product<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        to_param(&hamilton_product(&quaternion(left), &quaternion(right)))
    }

    fn inverse<S: Scalar>(&self, arg: &DVector<S>) -> DVector<S> {
        let q = quaternion(arg);
        to_param(&Vector4::new(q[0], -q[1], -q[2], -q[3]))
    }

    fn identity<S: Scalar>(&self) -> DVector<S> {
        to_param(&Vector4::new(S::one(), S::zero(), S::zero(), S::zero()))
    }

    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        self.to_matrix(arg)
    }

    fn exp<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        Ok(to_param(&quaternion_exp(&vector3(arg, 0))))
    }

    fn log<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        let omega = quaternion_log(&quaternion(arg));
        Ok(DVector::from_column_slice(omega.as_slice()))
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        to_dmatrix(&quaternion_to_matrix(&quaternion(arg)))
    }

    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        check_matrix_shape(matrix, self.matrix_shape())?;
        Ok(to_param(&quaternion_from_matrix(&to_matrix3(matrix))))
    }

    fn random<S: Scalar, R: Rng + ?Sized>(&self, rng: &mut R) -> DVector<S> {
        to_param(&random_quaternion(rng))
    }
}

impl fmt::Display for So3QuatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SO3Quat")
    }
}
