//! # SO(3)
//!
//! The algebra so(3) is shared by three group realizations that describe the same rotations
//! with different parameters:
//!
//! - [`So3QuatGroup`]: unit quaternion `[w, x, y, z]`, scalar first, Hamilton product.
//! - [`So3MrpGroup`]: modified Rodrigues parameters `[r₁, r₂, r₃, shadow]`.
//! - [`So3EulerGroup`]: three angles about a configurable axis sequence.
//!
//! All of them produce the same rotation matrix for the same rotation, so results can be
//! compared across realizations through [`to_matrix`](crate::GroupElement::to_matrix).

mod euler;
mod mrp;
mod quat;

use std::fmt;

use nalgebra::{dvector, DMatrix, DVector, Matrix3, Vector4};
use rand::Rng;

use crate::{
    algebra::LieAlgebra,
    error::LieResult,
    scalar::{check_matrix_shape, constant, skew, to_dmatrix, vector3, Scalar},
};

pub use euler::So3EulerGroup;
pub use mrp::So3MrpGroup;
pub use quat::So3QuatGroup;

/// The Lie algebra so(3) of rotation vectors `ω`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct So3Algebra;

impl LieAlgebra for So3Algebra {
    fn dimension(&self) -> usize {
        3
    }

    fn matrix_shape(&self) -> (usize, usize) {
        (3, 3)
    }

    fn bracket<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        let c = vector3(left, 0).cross(&vector3(right, 0));
        dvector![c.x, c.y, c.z]
    }

    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        to_dmatrix(&skew(&vector3(arg, 0)))
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        to_dmatrix(&skew(&vector3(arg, 0)))
    }

    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        check_matrix_shape(matrix, self.matrix_shape())?;
        Ok(dvector![matrix[(2, 1)], matrix[(0, 2)], matrix[(1, 0)]])
    }
}

impl fmt::Display for So3Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("so3")
    }
}

/// A coordinate axis of an Euler angle sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// Elemental rotation matrix of `angle` about this axis.
    pub fn rotation<S: Scalar>(self, angle: S) -> Matrix3<S> {
        let (s, c) = angle.sin_cos();
        let (zero, one) = (S::zero(), S::one());
        match self {
            Axis::X => Matrix3::new(one, zero, zero, zero, c, -s, zero, s, c),
            Axis::Y => Matrix3::new(c, zero, s, zero, one, zero, -s, zero, c),
            Axis::Z => Matrix3::new(c, -s, zero, s, c, zero, zero, zero, one),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// Whether successive Euler rotations are about the moving or the fixed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EulerType {
    /// Intrinsic rotations: each one is about an axis of the already rotated frame.
    BodyFixed,
    /// Extrinsic rotations: each one is about an axis of the fixed frame.
    SpaceFixed,
}

impl fmt::Display for EulerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EulerType::BodyFixed => "body_fixed",
            EulerType::SpaceFixed => "space_fixed",
        })
    }
}

/// Uniformly distributed unit quaternion `[w, x, y, z]` with `w ≥ 0` (Shoemake).
pub(crate) fn random_quaternion<S: Scalar, R: Rng + ?Sized>(rng: &mut R) -> Vector4<S> {
    let r1: f64 = rng.random();
    let r2: f64 = rng.random();
    let r3: f64 = rng.random();

    let one_minus_r1_sqrt = (1.0 - r1).sqrt();
    let r1_sqrt = r1.sqrt();
    let (sin2, cos2) = (std::f64::consts::TAU * r2).sin_cos();
    let (sin3, cos3) = (std::f64::consts::TAU * r3).sin_cos();

    let q = Vector4::new(
        one_minus_r1_sqrt * cos2,
        one_minus_r1_sqrt * sin2,
        r1_sqrt * cos3,
        r1_sqrt * sin3,
    )
    .normalize();
    let q = if q[0] < 0.0 { -q } else { q };
    q.map(constant)
}
