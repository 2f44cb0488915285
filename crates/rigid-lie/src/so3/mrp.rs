use std::fmt;

use nalgebra::{ComplexField, DMatrix, DVector, Matrix3, Vector3};
use rand::Rng;

use super::{quat::quaternion_from_matrix, random_quaternion, So3Algebra};
use crate::{
    algebra::Algebra,
    error::{LieError, LieResult},
    group::{Group, GroupElement, LieGroup},
    scalar::{check_matrix_shape, constant, skew, small_angle, to_dmatrix, to_matrix3, vector3, Scalar},
};

/// SO(3) parameterized by modified Rodrigues parameters.
///
/// The parameter vector is `[r₁, r₂, r₃, shadow]`. The last slot records which of the two
/// antipodal charts the vector `r` lives in; it is reset to `0` by `product` and `identity`
/// and does not otherwise enter the group law. Composition does not switch charts on its own:
/// callers integrating long trajectories apply [`shadow_if_necessary`] to keep `‖r‖ ≤ 1`.
///
/// [`shadow_if_necessary`]: So3MrpGroup::shadow_if_necessary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct So3MrpGroup;

fn to_param<S: Scalar>(r: &Vector3<S>, shadow: S) -> DVector<S> {
    DVector::from_column_slice(&[r.x, r.y, r.z, shadow])
}

impl So3MrpGroup {
    /// Parameters of the same rotation in the antipodal chart, `r' = -r/‖r‖²`, with the shadow
    /// flag flipped. Undefined at the identity.
    pub fn shadow<S: Scalar>(&self, param: &DVector<S>) -> DVector<S> {
        let r = vector3(param, 0);
        let flag = if param[3] == S::zero() {
            S::one()
        } else {
            S::zero()
        };
        to_param(&(-r / r.norm_squared()), flag)
    }

    /// Switch to the antipodal chart when `‖r‖ > 1`, otherwise return the parameters unchanged.
    pub fn shadow_if_necessary<S: Scalar>(&self, param: &DVector<S>) -> DVector<S> {
        if vector3(param, 0).norm_squared() > S::one() {
            log::debug!("MRP norm above one, switching to the shadow chart");
            self.shadow(param)
        } else {
            param.clone()
        }
    }
}

impl LieGroup for So3MrpGroup {
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
        let a = vector3(left, 0);
        let b = vector3(right, 0);
        let (na, nb) = (a.norm_squared(), b.norm_squared());
        let one = S::one();
        let two = constant::<S>(2.0);

        let denominator = one + na * nb - two * a.dot(&b);
        if ComplexField::abs(denominator) < small_angle() {
            log::warn!("MRP composition denominator is close to zero, result is not finite");
        }
        let numerator = b * (one - na) + a * (one - nb) - b.cross(&a) * two;
        to_param(&(numerator / denominator), S::zero())
    }

    fn inverse<S: Scalar>(&self, arg: &DVector<S>) -> DVector<S> {
        to_param(&-vector3(arg, 0), arg[3])
    }

    fn identity<S: Scalar>(&self) -> DVector<S> {
        DVector::zeros(4)
    }

    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        self.to_matrix(arg)
    }

    fn exp<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        let omega = vector3(arg, 0);
        let theta = omega.norm();
        if theta < small_angle() {
            log::debug!("MRP exp: angle below threshold, returning identity");
            return Ok(self.identity());
        }
        let r = omega * ((theta / constant::<S>(4.0)).tan() / theta);
        Ok(to_param(&r, S::zero()))
    }

    fn log<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        let r = vector3(arg, 0);
        let n = r.norm();
        if n < small_angle() {
            log::debug!("MRP log: norm below threshold, returning zero");
            return Ok(DVector::zeros(3));
        }
        let omega = r * (constant::<S>(4.0) * n.atan() / n);
        Ok(DVector::from_column_slice(omega.as_slice()))
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        let r = vector3(arg, 0);
        let n_sq = r.norm_squared();
        let x = skew(&r);
        let one = S::one();
        let denominator = (one + n_sq) * (one + n_sq);
        let m: Matrix3<S> = Matrix3::identity()
            + (x * x * constant::<S>(8.0) - x * (constant::<S>(4.0) * (one - n_sq))) / denominator;
        to_dmatrix(&m.transpose())
    }

    /// Parameters in the primary chart (`‖r‖ ≤ 1`).
    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        check_matrix_shape(matrix, self.matrix_shape())?;
        let q = quaternion_from_matrix(&to_matrix3(matrix));
        let r = Vector3::new(q[1], q[2], q[3]) / (S::one() + q[0]);
        Ok(to_param(&r, S::zero()))
    }

    fn random<S: Scalar, R: Rng + ?Sized>(&self, rng: &mut R) -> DVector<S> {
        let q = random_quaternion::<S, R>(rng);
        let r = Vector3::new(q[1], q[2], q[3]) / (S::one() + q[0]);
        to_param(&r, S::zero())
    }
}

impl fmt::Display for So3MrpGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SO3Mrp")
    }
}

impl<S: Scalar> GroupElement<S> {
    /// The same rotation expressed in the antipodal MRP chart.
    ///
    /// Only defined for elements of [`Group::So3Mrp`] away from the identity, whose shadow lies
    /// at infinity. [`LieError::Undefined`] is returned when `‖r‖` is below
    /// [`SMALL_ANGLE_EPSILON`](crate::SMALL_ANGLE_EPSILON).
    pub fn shadow(&self) -> LieResult<Self> {
        match self.group() {
            Group::So3Mrp(_) if vector3(self.param(), 0).norm() < small_angle() => {
                Err(LieError::Undefined {
                    operation: "shadow",
                    point: self.to_string(),
                })
            }
            Group::So3Mrp(mrp) => Ok(Self::new_unchecked(
                self.group().clone(),
                mrp.shadow(self.param()),
            )),
            other => Err(LieError::not_implemented("shadow", other)),
        }
    }

    /// Switch an MRP element to the antipodal chart when `‖r‖ > 1`.
    ///
    /// Only defined for elements of [`Group::So3Mrp`].
    pub fn shadow_if_necessary(&self) -> LieResult<Self> {
        match self.group() {
            Group::So3Mrp(mrp) => Ok(Self::new_unchecked(
                self.group().clone(),
                mrp.shadow_if_necessary(self.param()),
            )),
            other => Err(LieError::not_implemented("shadow_if_necessary", other)),
        }
    }
}
