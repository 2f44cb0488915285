//! A direct product `G₁ × G₂ × …` stores the parameters of its components back to back, in
//! construction order and without padding. Every operation slices the parameter vector into the
//! component sub-vectors, delegates to the matching component and concatenates the results.
//! Components never interact, so this is valid for the product, inverse, exp and log alike.

use std::fmt;

use nalgebra::{DMatrix, DVector};
use rand::Rng;

use crate::{
    algebra::{self, Algebra, AlgebraElement, LieAlgebra},
    error::{LieError, LieResult},
    group::{check_same, Group, GroupElement, LieGroup},
    scalar::{block_diagonal, Scalar},
};

/// Split `param` into consecutive sub-vectors of the given lengths.
fn split<S: Scalar>(param: &DVector<S>, dims: impl Iterator<Item = usize>) -> Vec<DVector<S>> {
    let mut offset = 0;
    dims.map(|dim| {
        let part = param.rows(offset, dim).into_owned();
        offset += dim;
        part
    })
    .collect()
}

/// Concatenate sub-vectors in order.
fn concat<S: Scalar>(parts: &[DVector<S>]) -> DVector<S> {
    DVector::from_iterator(
        parts.iter().map(|p| p.len()).sum(),
        parts.iter().flat_map(|p| p.iter().copied()),
    )
}

/// Read the diagonal blocks of `matrix` with the given shapes.
fn diagonal_blocks<S: Scalar>(
    matrix: &DMatrix<S>,
    shapes: impl Iterator<Item = (usize, usize)>,
) -> Vec<DMatrix<S>> {
    let (mut r, mut c) = (0, 0);
    shapes
        .map(|shape| {
            let block = matrix.view((r, c), shape).into_owned();
            r += shape.0;
            c += shape.1;
            block
        })
        .collect()
}

fn sum_shapes(shapes: impl Iterator<Item = (usize, usize)>) -> (usize, usize) {
    shapes.fold((0, 0), |acc, s| (acc.0 + s.0, acc.1 + s.1))
}

fn check_component_count(expected: usize, actual: usize) -> LieResult<()> {
    if expected != actual {
        return Err(LieError::ShapeMismatch {
            context: "direct product components",
            expected: (expected, 1),
            actual: (actual, 1),
        });
    }
    Ok(())
}

fn component_index_error(count: usize, index: usize) -> LieError {
    LieError::ShapeMismatch {
        context: "direct product component index",
        expected: (count, 1),
        actual: (index + 1, 1),
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" x ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Direct product of Lie algebras.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProductAlgebra {
    components: Vec<Algebra>,
}

impl ProductAlgebra {
    /// Create the product of at least two algebras.
    pub fn new(components: Vec<Algebra>) -> LieResult<Self> {
        if components.len() < 2 {
            return Err(LieError::ShapeMismatch {
                context: "direct product needs at least two components",
                expected: (2, 1),
                actual: (components.len(), 1),
            });
        }
        Ok(Self { components })
    }

    pub(crate) fn from_pair(first: Algebra, second: Algebra) -> Self {
        Self {
            components: vec![first, second],
        }
    }

    /// The component algebras, in order.
    pub fn components(&self) -> &[Algebra] {
        &self.components
    }

    /// Split a parameter vector into the component parameter vectors.
    pub fn split<S: Scalar>(&self, param: &DVector<S>) -> LieResult<Vec<DVector<S>>> {
        if param.len() != self.dimension() {
            return Err(LieError::parameter_length(self.dimension(), param.len()));
        }
        Ok(split(param, self.components.iter().map(|a| a.dimension())))
    }

    /// Concatenate component parameter vectors into a parameter vector of the product.
    pub fn join<S: Scalar>(&self, parts: &[DVector<S>]) -> LieResult<DVector<S>> {
        check_component_count(self.components.len(), parts.len())?;
        for (algebra, part) in self.components.iter().zip(parts) {
            if part.len() != algebra.dimension() {
                return Err(LieError::parameter_length(algebra.dimension(), part.len()));
            }
        }
        Ok(concat(parts))
    }

    /// Offset of component `index` inside the parameter vector, `None` when `index` is past
    /// the number of components.
    pub fn offset(&self, index: usize) -> Option<usize> {
        let preceding = self.components.get(..index)?;
        Some(preceding.iter().map(|a| a.dimension()).sum())
    }

    /// Component `index` of an element of this product.
    pub fn component<S: Scalar>(
        &self,
        index: usize,
        element: &AlgebraElement<S>,
    ) -> LieResult<AlgebraElement<S>> {
        self.check_owner(element)?;
        let (algebra, offset) = self
            .components
            .get(index)
            .zip(self.offset(index))
            .ok_or_else(|| component_index_error(self.components.len(), index))?;
        let param = element.param().rows(offset, algebra.dimension()).into_owned();
        Ok(AlgebraElement::new_unchecked(algebra.clone(), param))
    }

    /// Assemble an element of this product from one element per component.
    pub fn from_components<S: Scalar>(
        &self,
        elements: &[AlgebraElement<S>],
    ) -> LieResult<AlgebraElement<S>> {
        check_component_count(self.components.len(), elements.len())?;
        for (expected, element) in self.components.iter().zip(elements) {
            algebra::check_same(expected, element.algebra())?;
        }
        let parts: Vec<_> = elements.iter().map(|e| e.param().clone()).collect();
        Ok(AlgebraElement::new_unchecked(
            Algebra::Product(self.clone()),
            concat(&parts),
        ))
    }

    fn check_owner<S: Scalar>(&self, element: &AlgebraElement<S>) -> LieResult<()> {
        match element.algebra() {
            Algebra::Product(owner) if owner == self => Ok(()),
            other => Err(LieError::MismatchedAlgebra {
                left: self.to_string(),
                right: other.to_string(),
            }),
        }
    }

    fn parts<S: Scalar>(&self, param: &DVector<S>) -> Vec<DVector<S>> {
        split(param, self.components.iter().map(|a| a.dimension()))
    }
}

impl LieAlgebra for ProductAlgebra {
    fn dimension(&self) -> usize {
        self.components.iter().map(|a| a.dimension()).sum()
    }

    fn matrix_shape(&self) -> (usize, usize) {
        sum_shapes(self.components.iter().map(|a| a.matrix_shape()))
    }

    fn bracket<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        let parts: Vec<_> = self
            .components
            .iter()
            .zip(self.parts(left).iter().zip(self.parts(right).iter()))
            .map(|(a, (l, r))| a.bracket(l, r))
            .collect();
        concat(&parts)
    }

    fn addition<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        let parts: Vec<_> = self
            .components
            .iter()
            .zip(self.parts(left).iter().zip(self.parts(right).iter()))
            .map(|(a, (l, r))| a.addition(l, r))
            .collect();
        concat(&parts)
    }

    fn scalar_multiplication<S: Scalar>(&self, scalar: S, arg: &DVector<S>) -> DVector<S> {
        let parts: Vec<_> = self
            .components
            .iter()
            .zip(self.parts(arg).iter())
            .map(|(a, p)| a.scalar_multiplication(scalar, p))
            .collect();
        concat(&parts)
    }

    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        let blocks: Vec<_> = self
            .components
            .iter()
            .zip(self.parts(arg).iter())
            .map(|(a, p)| a.adjoint(p))
            .collect();
        block_diagonal(&blocks)
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        let blocks: Vec<_> = self
            .components
            .iter()
            .zip(self.parts(arg).iter())
            .map(|(a, p)| a.to_matrix(p))
            .collect();
        block_diagonal(&blocks)
    }

    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        crate::scalar::check_matrix_shape(matrix, self.matrix_shape())?;
        let blocks = diagonal_blocks(matrix, self.components.iter().map(|a| a.matrix_shape()));
        let parts = self
            .components
            .iter()
            .zip(blocks.iter())
            .map(|(a, m)| a.from_matrix(m))
            .collect::<LieResult<Vec<_>>>()?;
        Ok(concat(&parts))
    }
}

impl fmt::Display for ProductAlgebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.components)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ProductAlgebra {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            components: Vec<Algebra>,
        }

        let raw = <Raw as serde::Deserialize>::deserialize(deserializer)?;
        ProductAlgebra::new(raw.components).map_err(serde::de::Error::custom)
    }
}

/// Direct product of Lie groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProductGroup {
    components: Vec<Group>,
}

impl ProductGroup {
    /// Create the product of at least two groups.
    pub fn new(components: Vec<Group>) -> LieResult<Self> {
        if components.len() < 2 {
            return Err(LieError::ShapeMismatch {
                context: "direct product needs at least two components",
                expected: (2, 1),
                actual: (components.len(), 1),
            });
        }
        Ok(Self { components })
    }

    pub(crate) fn from_pair(first: Group, second: Group) -> Self {
        Self {
            components: vec![first, second],
        }
    }

    /// The component groups, in order.
    pub fn components(&self) -> &[Group] {
        &self.components
    }

    /// Offset of component `index` inside the parameter vector, `None` when `index` is past
    /// the number of components.
    pub fn offset(&self, index: usize) -> Option<usize> {
        let preceding = self.components.get(..index)?;
        Some(preceding.iter().map(|g| g.dimension()).sum())
    }

    /// Split a parameter vector into the component parameter vectors.
    pub fn split<S: Scalar>(&self, param: &DVector<S>) -> LieResult<Vec<DVector<S>>> {
        if param.len() != self.dimension() {
            return Err(LieError::parameter_length(self.dimension(), param.len()));
        }
        Ok(self.parts(param))
    }

    /// Concatenate component parameter vectors into a parameter vector of the product.
    pub fn join<S: Scalar>(&self, parts: &[DVector<S>]) -> LieResult<DVector<S>> {
        check_component_count(self.components.len(), parts.len())?;
        for (group, part) in self.components.iter().zip(parts) {
            if part.len() != group.dimension() {
                return Err(LieError::parameter_length(group.dimension(), part.len()));
            }
        }
        Ok(concat(parts))
    }

    /// Component `index` of an element of this product.
    pub fn component<S: Scalar>(
        &self,
        index: usize,
        element: &GroupElement<S>,
    ) -> LieResult<GroupElement<S>> {
        self.check_owner(element)?;
        let (group, offset) = self
            .components
            .get(index)
            .zip(self.offset(index))
            .ok_or_else(|| component_index_error(self.components.len(), index))?;
        let param = element.param().rows(offset, group.dimension()).into_owned();
        Ok(GroupElement::new_unchecked(group.clone(), param))
    }

    /// Assemble an element of this product from one element per component.
    pub fn from_components<S: Scalar>(
        &self,
        elements: &[GroupElement<S>],
    ) -> LieResult<GroupElement<S>> {
        check_component_count(self.components.len(), elements.len())?;
        for (group, element) in self.components.iter().zip(elements) {
            check_same(group, element.group())?;
        }
        let parts: Vec<_> = elements.iter().map(|e| e.param().clone()).collect();
        Ok(GroupElement::new_unchecked(
            Group::Product(self.clone()),
            concat(&parts),
        ))
    }

    fn check_owner<S: Scalar>(&self, element: &GroupElement<S>) -> LieResult<()> {
        match element.group() {
            Group::Product(owner) if owner == self => Ok(()),
            other => Err(LieError::MismatchedGroup {
                left: self.to_string(),
                right: other.to_string(),
            }),
        }
    }

    fn parts<S: Scalar>(&self, param: &DVector<S>) -> Vec<DVector<S>> {
        split(param, self.components.iter().map(|g| g.dimension()))
    }

    fn algebra_parts<S: Scalar>(&self, param: &DVector<S>) -> Vec<DVector<S>> {
        split(param, self.components.iter().map(|g| g.algebra().dimension()))
    }
}

impl LieGroup for ProductGroup {
    fn algebra(&self) -> Algebra {
        Algebra::Product(ProductAlgebra {
            components: self.components.iter().map(|g| g.algebra()).collect(),
        })
    }

    fn dimension(&self) -> usize {
        self.components.iter().map(|g| g.dimension()).sum()
    }

    fn matrix_shape(&self) -> (usize, usize) {
        sum_shapes(self.components.iter().map(|g| g.matrix_shape()))
    }

    fn product<S: Scalar>(&self, left: &DVector<S>, right: &DVector<S>) -> DVector<S> {
        let parts: Vec<_> = self
            .components
            .iter()
            .zip(self.parts(left).iter().zip(self.parts(right).iter()))
            .map(|(g, (l, r))| g.product(l, r))
            .collect();
        concat(&parts)
    }

    fn inverse<S: Scalar>(&self, arg: &DVector<S>) -> DVector<S> {
        let parts: Vec<_> = self
            .components
            .iter()
            .zip(self.parts(arg).iter())
            .map(|(g, p)| g.inverse(p))
            .collect();
        concat(&parts)
    }

    fn identity<S: Scalar>(&self) -> DVector<S> {
        let parts: Vec<_> = self.components.iter().map(|g| g.identity()).collect();
        concat(&parts)
    }

    fn adjoint<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        let blocks: Vec<_> = self
            .components
            .iter()
            .zip(self.parts(arg).iter())
            .map(|(g, p)| g.adjoint(p))
            .collect();
        block_diagonal(&blocks)
    }

    fn exp<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        let parts = self
            .components
            .iter()
            .zip(self.algebra_parts(arg).iter())
            .map(|(g, p)| g.exp(p))
            .collect::<LieResult<Vec<_>>>()?;
        Ok(concat(&parts))
    }

    fn log<S: Scalar>(&self, arg: &DVector<S>) -> LieResult<DVector<S>> {
        let parts = self
            .components
            .iter()
            .zip(self.parts(arg).iter())
            .map(|(g, p)| g.log(p))
            .collect::<LieResult<Vec<_>>>()?;
        Ok(concat(&parts))
    }

    fn to_matrix<S: Scalar>(&self, arg: &DVector<S>) -> DMatrix<S> {
        let blocks: Vec<_> = self
            .components
            .iter()
            .zip(self.parts(arg).iter())
            .map(|(g, p)| g.to_matrix(p))
            .collect();
        block_diagonal(&blocks)
    }

    fn from_matrix<S: Scalar>(&self, matrix: &DMatrix<S>) -> LieResult<DVector<S>> {
        crate::scalar::check_matrix_shape(matrix, self.matrix_shape())?;
        let blocks = diagonal_blocks(matrix, self.components.iter().map(|g| g.matrix_shape()));
        let parts = self
            .components
            .iter()
            .zip(blocks.iter())
            .map(|(g, m)| g.from_matrix(m))
            .collect::<LieResult<Vec<_>>>()?;
        Ok(concat(&parts))
    }

    fn random<S: Scalar, R: Rng + ?Sized>(&self, rng: &mut R) -> DVector<S> {
        let parts: Vec<_> = self.components.iter().map(|g| g.random(rng)).collect();
        concat(&parts)
    }
}

impl fmt::Display for ProductGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.components)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ProductGroup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            components: Vec<Group>,
        }

        let raw = <Raw as serde::Deserialize>::deserialize(deserializer)?;
        ProductGroup::new(raw.components).map_err(serde::de::Error::custom)
    }
}
