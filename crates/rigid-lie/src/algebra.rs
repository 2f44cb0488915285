use std::fmt;
use std::ops::{Mul, Neg};

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{DMatrix, DVector};

use crate::{
    error::{LieError, LieResult},
    group::{Group, GroupElement, LieGroup},
    product::ProductAlgebra,
    rn::RnAlgebra,
    scalar::Scalar,
    se3::Se3Algebra,
    so2::So2Algebra,
    so3::So3Algebra,
};

/// Contract implemented by every Lie algebra realization.
///
/// The operations work on raw parameter vectors that were already validated against
/// [`dimension`](LieAlgebra::dimension); [`AlgebraElement`] performs the validation.
pub trait LieAlgebra {
    /// Number of parameters of an element.
    fn dimension(&self) -> usize;

    /// Shape of the faithful matrix representation.
    fn matrix_shape(&self) -> (usize, usize);

    /// Lie bracket `[left, right]`. Bilinear and antisymmetric.
    fn bracket<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S>;

    /// Vector space addition.
    fn addition<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        left + right
    }

    /// Vector space scaling.
    fn scalar_multiplication<S: Scalar>(&self, scalar: S, arg: &DVector<S>) -> DVector<S> {
        arg * scalar
    }

    /// Matrix of the linear map `x ↦ [arg, x]` in the parameter basis.
    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S>;

    /// Faithful matrix representation of the element.
    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S>;

    /// Parameters of the element represented by `matrix`.
    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>>;
}

/// Descriptor of a Lie algebra realization.
///
/// Two elements can only be combined when their descriptors compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algebra {
    /// The abelian algebra ℝⁿ.
    Rn(RnAlgebra),
    /// so(2).
    So2(So2Algebra),
    /// so(3).
    So3(So3Algebra),
    /// se(3).
    Se3(Se3Algebra),
    /// Direct product of algebras.
    Product(ProductAlgebra),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Algebra::Rn($inner) => $body,
            Algebra::So2($inner) => $body,
            Algebra::So3($inner) => $body,
            Algebra::Se3($inner) => $body,
            Algebra::Product($inner) => $body,
        }
    };
}

impl LieAlgebra for Algebra {
    fn dimension(&self) -> usize {
        dispatch!(self, a => a.dimension())
    }

    fn matrix_shape(&self) -> (usize, usize) {
        dispatch!(self, a => a.matrix_shape())
    }

    fn bracket<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        dispatch!(self, a => a.bracket(left, right))
    }

    fn addition<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        dispatch!(self, a => a.addition(left, right))
    }

    fn scalar_multiplication<S: Scalar>(&self, scalar: S, arg: &DVector<S>) -> DVector<S> {
        dispatch!(self, a => a.scalar_multiplication(scalar, arg))
    }

    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        dispatch!(self, a => a.adjoint(arg))
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        dispatch!(self, a => a.to_matrix(arg))
    }

    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        dispatch!(self, a => a.from_matrix(matrix))
    }
}

impl Algebra {
    /// Create an element of this algebra from its parameters.
    pub fn element<S: Scalar>(&self, param: DVector<S>) -> LieResult<AlgebraElement<S>> {
        AlgebraElement::new(self.clone(), param)
    }

    /// Create an element from a parameter vector (hat / wedge map).
    pub fn wedge<S: Scalar>(&self, param: DVector<S>) -> LieResult<AlgebraElement<S>> {
        self.element(param)
    }

    /// Parameters of an element of this algebra (vee map).
    pub fn vee<S: Scalar>(&self, arg: &AlgebraElement<S>) -> LieResult<DVector<S>> {
        check_same(self, arg.algebra())?;
        Ok(arg.param().clone())
    }

    /// Direct product `self × other`.
    pub fn direct_product(&self, other: &Algebra) -> Algebra {
        Algebra::Product(ProductAlgebra::from_pair(self.clone(), other.clone()))
    }
}

impl fmt::Display for Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, a => fmt::Display::fmt(a, f))
    }
}

pub(crate) fn check_same(left: &Algebra, right: &Algebra) -> LieResult<()> {
    if left != right {
        return Err(LieError::MismatchedAlgebra {
            left: left.to_string(),
            right: right.to_string(),
        });
    }
    Ok(())
}

/// An element of a Lie algebra: a descriptor plus a parameter vector.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgebraElement<S: Scalar> {
    algebra: Algebra,
    param: DVector<S>,
}

impl<S: Scalar> AlgebraElement<S> {
    /// Create an element, checking the parameter count against the algebra.
    pub fn new(algebra: Algebra, param: DVector<S>) -> LieResult<Self> {
        if param.len() != algebra.dimension() {
            return Err(LieError::parameter_length(algebra.dimension(), param.len()));
        }
        Ok(Self { algebra, param })
    }

    pub(crate) fn new_unchecked(algebra: Algebra, param: DVector<S>) -> Self {
        debug_assert_eq!(param.len(), algebra.dimension());
        Self { algebra, param }
    }

    /// Create an element from a parameter vector, alias of [`new`](Self::new).
    pub fn wedge(algebra: Algebra, param: DVector<S>) -> LieResult<Self> {
        Self::new(algebra, param)
    }

    /// The zero element.
    pub fn zero(algebra: Algebra) -> Self {
        let param = DVector::zeros(algebra.dimension());
        Self { algebra, param }
    }

    /// Create an element from its matrix representation.
    pub fn from_matrix(algebra: Algebra, matrix: &DMatrix<S>) -> LieResult<Self> {
        let param = algebra.from_matrix(matrix)?;
        Ok(Self::new_unchecked(algebra, param))
    }

    /// The algebra this element belongs to.
    pub fn algebra(&self) -> &Algebra {
        &self.algebra
    }

    /// The parameter vector.
    pub fn param(&self) -> &DVector<S> {
        &self.param
    }

    /// Consume the element and return its parameter vector.
    pub fn into_param(self) -> DVector<S> {
        self.param
    }

    /// The parameter vector (vee map).
    pub fn vee(&self) -> DVector<S> {
        self.param.clone()
    }

    fn with_param(&self, param: DVector<S>) -> Self {
        Self::new_unchecked(self.algebra.clone(), param)
    }

    /// Lie bracket `[self, other]`.
    pub fn bracket(&self, other: &Self) -> LieResult<Self> {
        check_same(&self.algebra, &other.algebra)?;
        Ok(self.with_param(self.algebra.bracket(&self.param, &other.param)))
    }

    /// `self + other`.
    pub fn addition(&self, other: &Self) -> LieResult<Self> {
        check_same(&self.algebra, &other.algebra)?;
        Ok(self.with_param(self.algebra.addition(&self.param, &other.param)))
    }

    /// `self - other`.
    pub fn subtraction(&self, other: &Self) -> LieResult<Self> {
        self.addition(&-other)
    }

    /// `scalar * self`.
    pub fn scalar_multiplication(&self, scalar: S) -> Self {
        self.with_param(self.algebra.scalar_multiplication(scalar, &self.param))
    }

    /// Adjoint matrix `ad(self)`.
    pub fn ad(&self) -> DMatrix<S> {
        self.algebra.adjoint(&self.param)
    }

    /// Matrix representation.
    pub fn to_matrix(&self) -> DMatrix<S> {
        self.algebra.to_matrix(&self.param)
    }

    /// Exponential map into `group`, whose algebra must be this element's algebra.
    pub fn exp(&self, group: &Group) -> LieResult<GroupElement<S>> {
        check_same(&group.algebra(), &self.algebra)?;
        let param = group.exp(&self.param)?;
        Ok(GroupElement::new_unchecked(group.clone(), param))
    }
}

impl<S: Scalar> Neg for AlgebraElement<S> {
    type Output = AlgebraElement<S>;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<S: Scalar> Neg for &AlgebraElement<S> {
    type Output = AlgebraElement<S>;

    fn neg(self) -> Self::Output {
        self.scalar_multiplication(-S::one())
    }
}

impl<S: Scalar> Mul<S> for AlgebraElement<S> {
    type Output = AlgebraElement<S>;

    fn mul(self, rhs: S) -> Self::Output {
        self.scalar_multiplication(rhs)
    }
}

impl<S: Scalar> fmt::Display for AlgebraElement<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.algebra, ParamList(&self.param))
    }
}

impl<S: Scalar> AbsDiffEq for AlgebraElement<S> {
    type Epsilon = S;

    fn default_epsilon() -> Self::Epsilon {
        S::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.algebra == other.algebra && self.param.abs_diff_eq(&other.param, epsilon)
    }
}

impl<S: Scalar> RelativeEq for AlgebraElement<S> {
    fn default_max_relative() -> Self::Epsilon {
        S::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.algebra == other.algebra
            && self.param.relative_eq(&other.param, epsilon, max_relative)
    }
}

/// Formats a parameter vector as `[a, b, c]`.
pub(crate) struct ParamList<'a, S: Scalar>(pub(crate) &'a DVector<S>);

impl<S: Scalar> fmt::Display for ParamList<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SE3_ALGEBRA, SO2_ALGEBRA, SO3_ALGEBRA, SO3_QUAT};
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    #[test]
    fn test_element_checks_length() {
        let err = SO3_ALGEBRA.element(dvector![1.0, 2.0]).unwrap_err();
        assert_eq!(err, LieError::parameter_length(3, 2));
    }

    #[test]
    fn test_addition() -> Result<(), LieError> {
        let g = SO3_ALGEBRA.element(dvector![1.0, 2.0, 3.0])?;
        assert_eq!(g.addition(&g)?, g.clone() * 2.0);
        assert_eq!(g.subtraction(&g)?, AlgebraElement::zero(SO3_ALGEBRA));
        assert_eq!(-g, SO3_ALGEBRA.element(dvector![-1.0, -2.0, -3.0])?);
        Ok(())
    }

    #[test]
    fn test_mismatched_algebra() -> Result<(), LieError> {
        let a = SO3_ALGEBRA.element(dvector![1.0, 2.0, 3.0])?;
        let b = SE3_ALGEBRA.element(dvector![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        assert!(matches!(
            a.addition(&b),
            Err(LieError::MismatchedAlgebra { .. })
        ));
        assert!(matches!(
            a.bracket(&b),
            Err(LieError::MismatchedAlgebra { .. })
        ));
        assert!(matches!(
            SO2_ALGEBRA.vee(&a),
            Err(LieError::MismatchedAlgebra { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_wedge_vee() -> Result<(), LieError> {
        let v = dvector![0.1, -0.2, 0.3];
        let a = SO3_ALGEBRA.wedge(v.clone())?;
        assert_eq!(SO3_ALGEBRA.vee(&a)?, v);
        assert_eq!(a.vee(), v);
        Ok(())
    }

    #[test]
    fn test_exp_checks_algebra() -> Result<(), LieError> {
        let a = SE3_ALGEBRA.element(dvector![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        assert!(matches!(
            a.exp(&SO3_QUAT),
            Err(LieError::MismatchedAlgebra { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_approx_eq() -> Result<(), LieError> {
        let a = SO3_ALGEBRA.element(dvector![1.0, 2.0, 3.0])?;
        let b = SO3_ALGEBRA.element(dvector![1.0, 2.0, 3.0 + 1e-12])?;
        assert_relative_eq!(a, b, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_display() -> Result<(), LieError> {
        let a = SO3_ALGEBRA.element(dvector![1.0, 2.5, -3.0])?;
        assert_eq!(a.to_string(), "so3: [1, 2.5, -3]");
        Ok(())
    }
}
