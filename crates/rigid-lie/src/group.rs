use std::fmt;

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{DMatrix, DVector};
use rand::Rng;

use crate::{
    algebra::{Algebra, AlgebraElement, ParamList},
    error::{LieError, LieResult},
    product::ProductGroup,
    rn::RnGroup,
    scalar::{check_matrix_shape, Scalar},
    se3::Se3Group,
    so2::So2Group,
    so3::{So3EulerGroup, So3MrpGroup, So3QuatGroup},
};

/// Contract implemented by every Lie group realization.
///
/// The operations work on raw parameter vectors that were already validated against
/// [`dimension`](LieGroup::dimension) (group parameters) or the dimension of
/// [`algebra`](LieGroup::algebra) (algebra parameters); [`GroupElement`] performs the
/// validation.
pub trait LieGroup {
    /// The associated Lie algebra.
    fn algebra(&self) -> Algebra;

    /// Number of parameters of an element. May differ from the algebra dimension.
    fn dimension(&self) -> usize;

    /// Shape of the matrix representation.
    fn matrix_shape(&self) -> (usize, usize);

    /// Group multiplication `left · right`. Associative.
    fn product<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S>;

    /// Group inverse.
    fn inverse<S: Scalar>(&self, arg: &DVector<S>) -> DVector<S>;

    /// The neutral element.
    fn identity<S: Scalar>(&self) -> DVector<S>;

    /// Matrix of the conjugation action on the algebra parameters.
    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S>;

    /// Exponential map, algebra parameters to group parameters.
    fn exp<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>>;

    /// Logarithm map, group parameters to algebra parameters.
    fn log<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>>;

    /// Matrix representation of the element.
    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S>;

    /// Parameters of the element represented by `matrix`.
    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>>;

    /// Parameters of a randomly sampled element.
    fn random<S: Scalar, R: Rng + ?Sized>(&self, rng: &mut R) -> DVector<S>;
}

/// Descriptor of a Lie group realization.
///
/// Two elements can only be combined when their descriptors compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Group {
    /// The additive group ℝⁿ.
    Rn(RnGroup),
    /// SO(2) parameterized by the rotation angle.
    So2(So2Group),
    /// SO(3) parameterized by a sequence of Euler angles.
    So3Euler(So3EulerGroup),
    /// SO(3) parameterized by a unit quaternion.
    So3Quat(So3QuatGroup),
    /// SO(3) parameterized by modified Rodrigues parameters.
    So3Mrp(So3MrpGroup),
    /// SE(3) over one of the SO(3) realizations.
    Se3(Se3Group),
    /// Direct product of groups.
    Product(ProductGroup),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Group::Rn($inner) => $body,
            Group::So2($inner) => $body,
            Group::So3Euler($inner) => $body,
            Group::So3Quat($inner) => $body,
            Group::So3Mrp($inner) => $body,
            Group::Se3($inner) => $body,
            Group::Product($inner) => $body,
        }
    };
}

impl LieGroup for Group {
    fn algebra(&self) -> Algebra {
        dispatch!(self, g => g.algebra())
    }

    fn dimension(&self) -> usize {
        dispatch!(self, g => g.dimension())
    }

    fn matrix_shape(&self) -> (usize, usize) {
        dispatch!(self, g => g.matrix_shape())
    }

    fn product<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        dispatch!(self, g => g.product(left, right))
    }

    fn inverse<S: Scalar>(&self, arg: &DVector<S>) -> DVector<S> {
        dispatch!(self, g => g.inverse(arg))
    }

    fn identity<S: Scalar>(&self) -> DVector<S> {
        dispatch!(self, g => g.identity())
    }

    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        dispatch!(self, g => g.adjoint(arg))
    }

    fn exp<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        dispatch!(self, g => g.exp(arg))
    }

    fn log<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        dispatch!(self, g => g.log(arg))
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        dispatch!(self, g => g.to_matrix(arg))
    }

    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        dispatch!(self, g => g.from_matrix(matrix))
    }

    fn random<S: Scalar, R: Rng + ?Sized>(&self, rng: &mut R) -> DVector<S> {
        dispatch!(self, g => g.random(rng))
    }
}

impl Group {
    /// Create an element of this group from its parameters.
    pub fn element<S: Scalar>(&self, param: DVector<S>) -> LieResult<GroupElement<S>> {
        GroupElement::new(self.clone(), param)
    }

    /// Direct product `self × other`.
    pub fn direct_product(&self, other: &Group) -> Group {
        Group::Product(ProductGroup::from_pair(self.clone(), other.clone()))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, g => fmt::Display::fmt(g, f))
    }
}

pub(crate) fn check_same(left: &Group, right: &Group) -> LieResult<()> {
    if left != right {
        return Err(LieError::MismatchedGroup {
            left: left.to_string(),
            right: right.to_string(),
        });
    }
    Ok(())
}

/// An element of a Lie group: a descriptor plus a parameter vector.
///
/// The parameters are expected to lie on the group manifold (e.g. a unit quaternion); this is
/// not re-enforced after each operation.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupElement<S: Scalar> {
    group: Group,
    param: DVector<S>,
}

impl<S: Scalar> GroupElement<S> {
    /// Create an element, checking the parameter count against the group.
    pub fn new(group: Group, param: DVector<S>) -> LieResult<Self> {
        if param.len() != group.dimension() {
            return Err(LieError::parameter_length(group.dimension(), param.len()));
        }
        Ok(Self { group, param })
    }

    pub(crate) fn new_unchecked(group: Group, param: DVector<S>) -> Self {
        debug_assert_eq!(param.len(), group.dimension());
        Self { group, param }
    }

    /// The neutral element of `group`.
    pub fn identity(group: &Group) -> Self {
        Self::new_unchecked(group.clone(), group.identity())
    }

    /// Create an element from its matrix representation.
    pub fn from_matrix(group: &Group, matrix: &DMatrix<S>) -> LieResult<Self> {
        check_matrix_shape(matrix, group.matrix_shape())?;
        let param = group.from_matrix(matrix)?;
        Ok(Self::new_unchecked(group.clone(), param))
    }

    /// Sample a random element of `group`.
    pub fn random<R: Rng + ?Sized>(group: &Group, rng: &mut R) -> Self {
        Self::new_unchecked(group.clone(), group.random(rng))
    }

    /// The group this element belongs to.
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// The parameter vector.
    pub fn param(&self) -> &DVector<S> {
        &self.param
    }

    /// Consume the element and return its parameter vector.
    pub fn into_param(self) -> DVector<S> {
        self.param
    }

    fn with_param(&self, param: DVector<S>) -> Self {
        Self::new_unchecked(self.group.clone(), param)
    }

    /// Group multiplication `self · other`.
    pub fn product(&self, other: &Self) -> LieResult<Self> {
        check_same(&self.group, &other.group)?;
        Ok(self.with_param(self.group.product(&self.param, &other.param)))
    }

    /// Group inverse.
    pub fn inverse(&self) -> Self {
        self.with_param(self.group.inverse(&self.param))
    }

    /// Adjoint matrix `Ad(self)`.
    pub fn adjoint(&self) -> DMatrix<S> {
        self.group.adjoint(&self.param)
    }

    /// Logarithm map into the group's algebra.
    pub fn log(&self) -> LieResult<AlgebraElement<S>> {
        let param = self.group.log(&self.param)?;
        Ok(AlgebraElement::new_unchecked(self.group.algebra(), param))
    }

    /// Matrix representation.
    pub fn to_matrix(&self) -> DMatrix<S> {
        self.group.to_matrix(&self.param)
    }

    /// Apply the element to a point.
    ///
    /// Points with as many entries as the matrix representation has rows are multiplied
    /// directly; points with one entry fewer are treated in homogeneous coordinates, so that
    /// SE(3) maps `p ↦ R p + t`.
    pub fn act(&self, point: &DVector<S>) -> LieResult<DVector<S>> {
        let matrix = self.to_matrix();
        let rows = matrix.nrows();
        if point.len() == rows {
            return Ok(matrix * point);
        }
        if point.len() + 1 == rows {
            let homogeneous = point.push(S::one());
            let mapped = matrix * homogeneous;
            return Ok(mapped.rows(0, rows - 1).into_owned());
        }
        Err(LieError::ShapeMismatch {
            context: "point",
            expected: (rows, 1),
            actual: (point.len(), 1),
        })
    }

    /// Right perturbation `self · exp(tau)`.
    pub fn rplus(&self, tau: &AlgebraElement<S>) -> LieResult<Self> {
        self.product(&tau.exp(&self.group)?)
    }

    /// Right difference `log(self⁻¹ · other)`.
    pub fn rminus(&self, other: &Self) -> LieResult<AlgebraElement<S>> {
        self.inverse().product(other)?.log()
    }

    /// Left perturbation `exp(tau) · self`.
    pub fn lplus(&self, tau: &AlgebraElement<S>) -> LieResult<Self> {
        tau.exp(&self.group)?.product(self)
    }

    /// Left difference `log(self · other⁻¹)`.
    pub fn lminus(&self, other: &Self) -> LieResult<AlgebraElement<S>> {
        self.product(&other.inverse())?.log()
    }
}

impl<S: Scalar> fmt::Display for GroupElement<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.group, ParamList(&self.param))
    }
}

impl<S: Scalar> AbsDiffEq for GroupElement<S> {
    type Epsilon = S;

    fn default_epsilon() -> Self::Epsilon {
        S::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.group == other.group && self.param.abs_diff_eq(&other.param, epsilon)
    }
}

impl<S: Scalar> RelativeEq for GroupElement<S> {
    fn default_max_relative() -> Self::Epsilon {
        S::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.group == other.group && self.param.relative_eq(&other.param, epsilon, max_relative)
    }
}
