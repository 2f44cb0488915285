//! # SE(3): rigid motions
//!
//! Group elements are `[t₁, t₂, t₃, rotation params…]`, so the group dimension depends on the
//! rotation realization chosen at construction. Algebra elements are `[u₁, u₂, u₃, ω₁, ω₂, ω₃]`
//! with the translational part first.
//!
//! The exponential uses the left Jacobian of SO(3),
//!
//! ```text
//! V = I + A(θ) Ω + B(θ) Ω²,   A = (1 - cos θ)/θ²,   B = (θ - sin θ)/θ³
//! V⁻¹ = I - Ω/2 + C(θ) Ω²,    C = (1 - θ sin θ / (2 (1 - cos θ)))/θ²
//! ```
//!
//! with the coefficients evaluated through [`rigid_series::Series`] so that they stay accurate
//! near `θ = 0`.

use std::fmt;

use nalgebra::{DMatrix, DVector, Matrix3, Matrix4, Vector3};
use rand::Rng;
use rigid_series::Series;

use crate::{
    algebra::{Algebra, LieAlgebra},
    error::{LieError, LieResult},
    group::{Group, LieGroup},
    scalar::{check_matrix_shape, constant, skew, to_dmatrix, vector3, Scalar},
    so3::So3Algebra,
};

fn concat<S: Scalar>(head: &Vector3<S>, tail: &DVector<S>) -> DVector<S> {
    DVector::from_iterator(3 + tail.len(), head.iter().chain(tail.iter()).copied())
}

fn column<S: Scalar>(v: &Vector3<S>) -> DVector<S> {
    DVector::from_column_slice(v.as_slice())
}

fn block_matrix<S: Scalar>(
    top_left: &Matrix3<S>,
    top_right: &Matrix3<S>,
    bottom_right: &Matrix3<S>,
) -> DMatrix<S> {
    let mut m = DMatrix::zeros(6, 6);
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(top_left);
    m.fixed_view_mut::<3, 3>(0, 3).copy_from(top_right);
    m.fixed_view_mut::<3, 3>(3, 3).copy_from(bottom_right);
    m
}

/// The Lie algebra se(3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Se3Algebra;

impl Se3Algebra {
    fn matrix4<S: Scalar>(arg: &DVector<S>) -> Matrix4<S> {
        let mut m = Matrix4::zeros();
        m.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&skew(&vector3(arg, 3)));
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&vector3(arg, 0));
        m
    }

    fn vee4<S: Scalar>(m: &Matrix4<S>) -> DVector<S> {
        DVector::from_column_slice(&[
            m[(0, 3)],
            m[(1, 3)],
            m[(2, 3)],
            m[(2, 1)],
            m[(0, 2)],
            m[(1, 0)],
        ])
    }
}

impl LieAlgebra for Se3Algebra {
    fn dimension(&self) -> usize {
        6
    }

    fn matrix_shape(&self) -> (usize, usize) {
        (4, 4)
    }

    fn bracket<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        let a = Self::matrix4(left);
        let b = Self::matrix4(right);
        Self::vee4(&(a * b - b * a))
    }

    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        let v = skew(&vector3(arg, 0));
        let omega = skew(&vector3(arg, 3));
        block_matrix(&omega, &v, &omega)
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        to_dmatrix(&Self::matrix4(arg))
    }

    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        check_matrix_shape(matrix, self.matrix_shape())?;
        Ok(DVector::from_column_slice(&[
            matrix[(0, 3)],
            matrix[(1, 3)],
            matrix[(2, 3)],
            matrix[(2, 1)],
            matrix[(0, 2)],
            matrix[(1, 0)],
        ]))
    }
}

impl fmt::Display for Se3Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("se3")
    }
}

/// SE(3) = SO(3) ⋉ ℝ³ over an injected SO(3) realization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Se3Group {
    rotation: Box<Group>,
}

impl Se3Group {
    /// Create SE(3) over `rotation`, which must be a realization of SO(3).
    ///
    /// # Errors
    ///
    /// [`LieError::InvalidRotation`] if the algebra of `rotation` is not so(3).
    pub fn new(rotation: Group) -> LieResult<Self> {
        if rotation.algebra() != Algebra::So3(So3Algebra) {
            return Err(LieError::InvalidRotation(rotation.to_string()));
        }
        Ok(Self::new_unchecked(rotation))
    }

    pub(crate) fn new_unchecked(rotation: Group) -> Self {
        Self {
            rotation: Box::new(rotation),
        }
    }

    /// The rotation realization.
    pub fn rotation(&self) -> &Group {
        &self.rotation
    }

    fn split<S: Scalar>(&self, arg: &DVector<S>) -> (Vector3<S>, DVector<S>) {
        (vector3(arg, 0), arg.rows(3, arg.len() - 3).into_owned())
    }

    fn rotation_matrix<S: Scalar>(&self, rotation: &DVector<S>) -> Matrix3<S> {
        Matrix3::from_column_slice(self.rotation.to_matrix(rotation).as_slice())
    }
}

impl LieGroup for Se3Group {
    fn algebra(&self) -> Algebra {
        Algebra::Se3(Se3Algebra)
    }

    fn dimension(&self) -> usize {
        3 + self.rotation.dimension()
    }

    fn matrix_shape(&self) -> (usize, usize) {
        (4, 4)
    }

    fn product<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        let (t1, r1) = self.split(left);
        let (t2, r2) = self.split(right);
        let t = self.rotation_matrix(&r1) * t2 + t1;
        concat(&t, &self.rotation.product(&r1, &r2))
    }

    fn inverse<S: Scalar>(&self, arg: &DVector<S>) -> DVector<S> {
        let (t, r) = self.split(arg);
        let t = -(self.rotation_matrix(&r).transpose() * t);
        concat(&t, &self.rotation.inverse(&r))
    }

    fn identity<S: Scalar>(&self) -> DVector<S> {
        concat(&Vector3::zeros(), &self.rotation.identity())
    }

    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        let (t, r) = self.split(arg);
        let rotation = self.rotation_matrix(&r);
        block_matrix(&rotation, &(skew(&t) * rotation), &rotation)
    }

    fn exp<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        let u = vector3(arg, 0);
        let omega = vector3(arg, 3);
        let theta = omega.norm();
        let omega_hat = skew(&omega);

        let v = Matrix3::identity()
            + omega_hat * Series::OneMinusCosOverXSq.eval(theta)
            + omega_hat * omega_hat * Series::XMinusSinOverXCubed.eval(theta);
        let rotation = self.rotation.exp(&column(&omega))?;
        Ok(concat(&(v * u), &rotation))
    }

    fn log<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        let (t, r) = self.split(arg);
        let omega = vector3(&self.rotation.log(&r)?, 0);
        let theta = omega.norm();
        let omega_hat = skew(&omega);

        let v_inv = Matrix3::identity() - omega_hat * constant::<S>(0.5)
            + omega_hat * omega_hat * Series::InverseVCoefficient.eval(theta);
        let u = v_inv * t;
        Ok(DVector::from_iterator(
            6,
            u.iter().chain(omega.iter()).copied(),
        ))
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        let (t, r) = self.split(arg);
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&self.rotation_matrix(&r));
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&t);
        to_dmatrix(&m)
    }

    fn from_matrix<S: Scalar>(&self, _matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        Err(LieError::not_implemented("from_matrix", self))
    }

    fn random<S: Scalar, R: Rng + ?Sized>(&self, rng: &mut R) -> DVector<S> {
        let t = Vector3::from_fn(|_, _| constant(rng.random_range(-1.0..1.0)));
        let rotation = self.rotation.random(rng);
        concat(&t, &rotation)
    }
}

impl fmt::Display for Se3Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SE3({})", self.rotation)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Se3Group {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            rotation: Group,
        }

        let raw = <Raw as serde::Deserialize>::deserialize(deserializer)?;
        Se3Group::new(raw.rotation).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AlgebraElement, GroupElement, SE3_ALGEBRA, SE3_MRP, SE3_QUAT, SO2, SO3_ALGEBRA,
        SO3_EULER_321, SO3_QUAT,
    };
    use approx::assert_relative_eq;
    use nalgebra::dvector;
    use rand::{rngs::StdRng, SeedableRng};
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_new_requires_so3() {
        assert!(Se3Group::new(SO3_QUAT).is_ok());
        assert_eq!(
            Se3Group::new(SO2),
            Err(LieError::InvalidRotation("SO2".to_string()))
        );
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(SE3_QUAT.dimension(), 7);
        assert_eq!(SE3_MRP.dimension(), 7);
        assert_eq!(SE3_QUAT.algebra().dimension(), 6);
        assert_eq!(SE3_QUAT.matrix_shape(), (4, 4));
    }

    #[test]
    fn test_exp_log_roundtrip() -> Result<(), LieError> {
        let tau = SE3_ALGEBRA.element(dvector![0.5, -1.0, 2.0, 0.3, -0.8, 1.1])?;
        for group in [&*SE3_QUAT, &*SE3_MRP] {
            let g = tau.exp(group)?;
            assert_relative_eq!(g.log()?, tau, epsilon = EPSILON);
        }
        Ok(())
    }

    #[test]
    fn test_exp_pure_translation() -> Result<(), LieError> {
        let tau = SE3_ALGEBRA.element(dvector![1.0, 2.0, 3.0, 0.0, 0.0, 0.0])?;
        let g = tau.exp(&SE3_QUAT)?;
        assert_relative_eq!(
            g.param(),
            &dvector![1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0],
            epsilon = EPSILON
        );
        assert_relative_eq!(g.log()?, tau, epsilon = EPSILON);
        Ok(())
    }

    #[test]
    fn test_exp_matches_matrix_exponential() -> Result<(), LieError> {
        let tau = SE3_ALGEBRA.element(dvector![0.2, 0.1, -0.4, 0.0, 0.0, FRAC_PI_2])?;
        let g = tau.exp(&SE3_QUAT)?;
        let expected = tau.to_matrix().exp();
        assert_relative_eq!(g.to_matrix(), expected, epsilon = EPSILON);
        Ok(())
    }

    #[test]
    fn test_product_matches_matrix_product() -> Result<(), LieError> {
        let mut rng = StdRng::seed_from_u64(4);
        let a = GroupElement::<f64>::random(&SE3_MRP, &mut rng);
        let b = GroupElement::<f64>::random(&SE3_MRP, &mut rng);
        let ab = a.product(&b)?;
        assert_relative_eq!(
            ab.to_matrix(),
            a.to_matrix() * b.to_matrix(),
            epsilon = EPSILON
        );
        let e = GroupElement::identity(&SE3_MRP);
        assert_relative_eq!(a.product(&a.inverse())?, e, epsilon = EPSILON);
        Ok(())
    }

    #[test]
    fn test_act() -> Result<(), LieError> {
        let rotation = SO3_ALGEBRA
            .element(dvector![0.0, 0.0, FRAC_PI_2])?
            .exp(&SO3_QUAT)?;
        let mut param = dvector![1.0, 0.0, 0.0];
        param.extend(rotation.param().iter().copied());
        let g = SE3_QUAT.element(param)?;
        let p = g.act(&dvector![1.0, 0.0, 0.0])?;
        assert_relative_eq!(p, dvector![1.0, 1.0, 0.0], epsilon = EPSILON);
        Ok(())
    }

    #[test]
    fn test_adjoint_conjugation() -> Result<(), LieError> {
        let mut rng = StdRng::seed_from_u64(9);
        let g = GroupElement::<f64>::random(&SE3_QUAT, &mut rng);
        let tau = SE3_ALGEBRA.element(dvector![0.1, -0.2, 0.05, 0.2, 0.1, -0.3])?;
        let conjugated = g.product(&tau.exp(&SE3_QUAT)?)?.product(&g.inverse())?;
        let ad_tau = SE3_ALGEBRA.element(g.adjoint() * tau.param())?;
        assert_relative_eq!(
            ad_tau.exp(&SE3_QUAT)?.to_matrix(),
            conjugated.to_matrix(),
            epsilon = EPSILON
        );
        Ok(())
    }

    #[test]
    fn test_bracket_and_algebra_adjoint() -> Result<(), LieError> {
        let a = SE3_ALGEBRA.element(dvector![1.0, 0.5, -0.2, 0.3, -0.1, 0.7])?;
        let b = SE3_ALGEBRA.element(dvector![-0.4, 0.2, 0.9, 0.0, 0.6, -0.5])?;
        let bracket = a.bracket(&b)?;
        assert_relative_eq!(bracket.param(), &(a.ad() * b.param()), epsilon = EPSILON);
        let m = a.to_matrix();
        assert_eq!(AlgebraElement::from_matrix(SE3_ALGEBRA, &m)?, a);
        Ok(())
    }

    #[test]
    fn test_unsupported() -> Result<(), LieError> {
        let g = GroupElement::<f64>::identity(&SE3_QUAT);
        assert!(matches!(
            GroupElement::from_matrix(&SE3_QUAT, &g.to_matrix()),
            Err(LieError::NotImplemented { .. })
        ));

        let euler = Group::Se3(Se3Group::new(SO3_EULER_321)?);
        let tau = SE3_ALGEBRA.element(dvector![0.0, 0.0, 0.0, 0.1, 0.0, 0.0])?;
        assert!(matches!(
            tau.exp(&euler),
            Err(LieError::NotImplemented { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_display() {
        assert_eq!(SE3_QUAT.to_string(), "SE3(SO3Quat)");
        assert_eq!(SE3_MRP.to_string(), "SE3(SO3Mrp)");
        assert_eq!(SE3_ALGEBRA.to_string(), "se3");
    }
}
