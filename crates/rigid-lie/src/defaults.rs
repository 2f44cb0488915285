//! Shared descriptors for the commonly used realizations.
//!
//! Descriptors are immutable value types, so these can be used from any thread. The SE(3)
//! groups own their rotation descriptor and are built on first use.

use std::sync::LazyLock;

use crate::{
    algebra::Algebra,
    group::Group,
    se3::{Se3Algebra, Se3Group},
    so2::{So2Algebra, So2Group},
    so3::{Axis, EulerType, So3Algebra, So3EulerGroup, So3MrpGroup, So3QuatGroup},
};

/// so(2).
pub const SO2_ALGEBRA: Algebra = Algebra::So2(So2Algebra);

/// so(3).
pub const SO3_ALGEBRA: Algebra = Algebra::So3(So3Algebra);

/// se(3).
pub const SE3_ALGEBRA: Algebra = Algebra::Se3(Se3Algebra);

/// SO(2) parameterized by the angle.
pub const SO2: Group = Group::So2(So2Group);

/// SO(3) as body-fixed z-y-x (yaw, pitch, roll) Euler angles.
pub const SO3_EULER_321: Group = Group::So3Euler(So3EulerGroup::new(
    EulerType::BodyFixed,
    [Axis::Z, Axis::Y, Axis::X],
));

/// SO(3) as a unit quaternion.
pub const SO3_QUAT: Group = Group::So3Quat(So3QuatGroup);

/// SO(3) as modified Rodrigues parameters.
pub const SO3_MRP: Group = Group::So3Mrp(So3MrpGroup);

/// SE(3) with a quaternion rotation.
pub static SE3_QUAT: LazyLock<Group> =
    LazyLock::new(|| Group::Se3(Se3Group::new_unchecked(SO3_QUAT)));

/// SE(3) with an MRP rotation.
pub static SE3_MRP: LazyLock<Group> =
    LazyLock::new(|| Group::Se3(Se3Group::new_unchecked(SO3_MRP)));
