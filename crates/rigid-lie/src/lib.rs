#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Rigid Lie groups
//!
//! This crate provides Lie groups and Lie algebras for rigid-body rotations and motions, with
//! several interchangeable parameterizations of the same group. Every realization implements
//! the same contract ([`LieAlgebra`] / [`LieGroup`]) over plain parameter vectors, and
//! [`AlgebraElement`] / [`GroupElement`] wrap a parameter vector together with the descriptor
//! of the structure it belongs to.
//!
//! ## Supported realizations
//!
//! | Group | Descriptor | Params | Algebra |
//! |-------|------------|--------|---------|
//! | ℝⁿ | [`Group::Rn`] | n | ℝⁿ |
//! | SO(2) | [`Group::So2`] | 1 | so(2) |
//! | SO(3), Euler angles | [`Group::So3Euler`] | 3 | so(3) |
//! | SO(3), unit quaternion | [`Group::So3Quat`] | 4 | so(3) |
//! | SO(3), modified Rodrigues parameters | [`Group::So3Mrp`] | 3 + shadow flag | so(3) |
//! | SE(3) = SO(3) ⋉ ℝ³ | [`Group::Se3`] | 3 + rotation params | se(3) |
//! | G₁ × G₂ × … | [`Group::Product`] | Σ params | 𝔤₁ × 𝔤₂ × … |
//!
//! The scalar type is generic: anything implementing [`Scalar`] (`f32`, `f64`, dual numbers
//! implementing `nalgebra::RealField`) can be used for the parameters.
//!
//! ## Example
//!
//! ```rust
//! use nalgebra::dvector;
//! use rigid_lie::{GroupElement, SO3_ALGEBRA, SO3_QUAT};
//!
//! let yaw = SO3_ALGEBRA.element(dvector![0.0, 0.0, std::f64::consts::FRAC_PI_2]).unwrap();
//! let rotation = GroupElement::identity(&SO3_QUAT)
//!     .product(&yaw.exp(&SO3_QUAT).unwrap())
//!     .unwrap();
//!
//! let rotated = rotation.act(&dvector![1.0, 0.0, 0.0]).unwrap();
//! assert!((rotated - dvector![0.0, 1.0, 0.0]).norm() < 1e-6);
//! ```

/// Lie algebra contract, descriptors and elements.
pub mod algebra;

/// Process-wide default algebra and group instances.
pub mod defaults;

/// Error types for the Lie group operations.
pub mod error;

/// Lie group contract, descriptors and elements.
pub mod group;

/// Direct products of Lie algebras and Lie groups.
pub mod product;

/// The additive group ℝⁿ.
pub mod rn;

/// Scalar abstraction and shared matrix helpers.
pub mod scalar;

/// Rigid motions SE(3).
pub mod se3;

/// Rotations in the plane SO(2).
pub mod so2;

/// Rotations in space SO(3) and its realizations.
pub mod so3;

pub use algebra::{Algebra, AlgebraElement, LieAlgebra};
pub use defaults::{
    SE3_ALGEBRA, SE3_MRP, SE3_QUAT, SO2, SO2_ALGEBRA, SO3_ALGEBRA, SO3_EULER_321, SO3_MRP,
    SO3_QUAT,
};
pub use error::{LieError, LieResult};
pub use group::{Group, GroupElement, LieGroup};
pub use product::{ProductAlgebra, ProductGroup};
pub use rn::{RnAlgebra, RnGroup};
pub use scalar::{Scalar, SMALL_ANGLE_EPSILON};
pub use se3::{Se3Algebra, Se3Group};
pub use so2::{So2Algebra, So2Group};
pub use so3::{Axis, EulerType, So3Algebra, So3EulerGroup, So3MrpGroup, So3QuatGroup};
