use nalgebra::{DMatrix, DVector, Matrix3, RealField, SMatrix, Vector3};

use crate::error::{LieError, LieResult};

/// Rotation angles below this magnitude collapse to the exact identity in exp/log.
pub const SMALL_ANGLE_EPSILON: f64 = 1e-7;

/// Scalar type of parameter vectors and matrices.
///
/// Any real field with value semantics qualifies: `f32`, `f64`, or a dual number type used for
/// forward-mode differentiation through the group operations.
pub trait Scalar: RealField + Copy {}

impl<T: RealField + Copy> Scalar for T {}

/// Build a scalar from a numeric literal.
#[inline]
pub fn constant<S: Scalar>(value: f64) -> S {
    nalgebra::convert(value)
}

#[inline]
pub(crate) fn small_angle<S: Scalar>() -> S {
    constant(SMALL_ANGLE_EPSILON)
}

/// Skew-symmetric matrix `[v]×` such that `[v]× w = v × w`.
pub fn skew<S: Scalar>(v: &Vector3<S>) -> Matrix3<S> {
    let zero = S::zero();
    Matrix3::new(zero, -v.z, v.y, v.z, zero, -v.x, -v.y, v.x, zero)
}

/// Read three consecutive entries of a parameter vector.
#[inline]
pub(crate) fn vector3<S: Scalar>(param: &DVector<S>, offset: usize) -> Vector3<S> {
    Vector3::new(param[offset], param[offset + 1], param[offset + 2])
}

pub(crate) fn to_dmatrix<S: Scalar, const R: usize, const C: usize>(
    m: &SMatrix<S, R, C>,
) -> DMatrix<S> {
    DMatrix::from_column_slice(R, C, m.as_slice())
}

pub(crate) fn to_matrix3<S: Scalar>(m: &DMatrix<S>) -> Matrix3<S> {
    Matrix3::from_column_slice(m.as_slice())
}

/// Stack the blocks along the diagonal, zero elsewhere.
pub(crate) fn block_diagonal<S: Scalar>(blocks: &[DMatrix<S>]) -> DMatrix<S> {
    let rows = blocks.iter().map(|b| b.nrows()).sum();
    let cols = blocks.iter().map(|b| b.ncols()).sum();
    let mut out = DMatrix::zeros(rows, cols);
    let (mut r, mut c) = (0, 0);
    for block in blocks {
        out.view_mut((r, c), block.shape()).copy_from(block);
        r += block.nrows();
        c += block.ncols();
    }
    out
}

pub(crate) fn check_matrix_shape<S: Scalar>(
    matrix: &DMatrix<S>,
    expected: (usize, usize),
) -> LieResult<()> {
    if matrix.shape() != expected {
        return Err(LieError::ShapeMismatch {
            context: "matrix representation",
            expected,
            actual: matrix.shape(),
        });
    }
    Ok(())
}
