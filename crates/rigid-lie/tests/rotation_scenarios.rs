use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use nalgebra::{dvector, DVector, UnitQuaternion, Vector3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rigid_lie::{
    Group, GroupElement, LieError, LieGroup, ProductGroup, Se3Group, SE3_ALGEBRA, SE3_MRP,
    SE3_QUAT, SO2, SO3_ALGEBRA, SO3_EULER_321, SO3_MRP, SO3_QUAT,
};

#[test]
fn quarter_turn_about_z() -> Result<(), LieError> {
    let yaw = SO3_ALGEBRA.element(dvector![0.0, 0.0, FRAC_PI_2])?;
    for group in [&SO3_QUAT, &SO3_MRP] {
        let g = GroupElement::identity(group).product(&yaw.exp(group)?)?;
        let p = g.act(&dvector![1.0, 0.0, 0.0])?;
        assert_relative_eq!(p, dvector![0.0, 1.0, 0.0], epsilon = 1e-6);
    }
    Ok(())
}

#[test]
fn euler_yaw_agrees_with_quaternion() -> Result<(), LieError> {
    let euler = SO3_EULER_321.element(dvector![FRAC_PI_2, 0.0, 0.0])?;
    let quat = SO3_ALGEBRA
        .element(dvector![0.0, 0.0, FRAC_PI_2])?
        .exp(&SO3_QUAT)?;
    assert_relative_eq!(euler.to_matrix(), quat.to_matrix(), epsilon = 1e-12);
    Ok(())
}

#[test]
fn euler_yaw_pitch_roll_agrees_with_nalgebra() -> Result<(), LieError> {
    let (roll, pitch, yaw) = (0.2, -0.7, 1.9);
    let euler = SO3_EULER_321.element(dvector![yaw, pitch, roll])?;
    let expected = UnitQuaternion::from_euler_angles(roll, pitch, yaw).to_rotation_matrix();
    let m = euler.to_matrix();
    for r in 0..3 {
        for c in 0..3 {
            assert_relative_eq!(m[(r, c)], expected[(r, c)], epsilon = 1e-12);
        }
    }
    Ok(())
}

#[test]
fn realizations_agree_on_random_rotations() -> Result<(), LieError> {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let q = GroupElement::<f64>::random(&SO3_QUAT, &mut rng);
        let m = q.to_matrix();
        let r = GroupElement::from_matrix(&SO3_MRP, &m)?;
        assert_relative_eq!(r.to_matrix(), m, epsilon = 1e-9);
        assert_relative_eq!(r.log()?, q.log()?, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn mrp_integration_with_shadow_switching() -> Result<(), LieError> {
    // Spin about a fixed axis well past a half turn, keeping the MRP bounded.
    let step = SO3_ALGEBRA.element(dvector![0.0, 0.3, 0.4])?;
    let mut mrp = GroupElement::identity(&SO3_MRP);
    let mut quat = GroupElement::identity(&SO3_QUAT);
    for _ in 0..40 {
        mrp = mrp.rplus(&step)?.shadow_if_necessary()?;
        quat = quat.rplus(&step)?;
        assert!(mrp.param().rows(0, 3).norm() <= 1.0 + 1e-12);
        assert_relative_eq!(mrp.to_matrix(), quat.to_matrix(), epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn shadow_switching_threshold() -> Result<(), LieError> {
    let axis = Vector3::new(1.0, -2.0, 0.5).normalize();
    let below = SO3_ALGEBRA.element(DVector::from_column_slice((axis * (PI - 1e-3)).as_slice()))?;
    let g = below.exp(&SO3_MRP)?;
    assert_eq!(g.shadow_if_necessary()?, g);

    let above = SO3_ALGEBRA.element(DVector::from_column_slice((axis * (PI + 1e-1)).as_slice()))?;
    let h = above.exp(&SO3_MRP)?;
    let s = h.shadow_if_necessary()?;
    assert_ne!(s, h);
    assert!(s.param().rows(0, 3).norm() <= 1.0);
    assert_relative_eq!(s.to_matrix(), h.to_matrix(), epsilon = 1e-9);
    Ok(())
}

#[test]
fn se3_exp_log_for_both_rotations() -> Result<(), LieError> {
    let mut rng = StdRng::seed_from_u64(2);
    for group in [&*SE3_QUAT, &*SE3_MRP] {
        for _ in 0..20 {
            let param = DVector::from_fn(6, |_, _| rng.random_range(-1.5..1.5));
            let tau = SE3_ALGEBRA.element(param)?;
            assert_relative_eq!(tau.exp(group)?.log()?, tau, epsilon = 1e-9);
        }
    }
    Ok(())
}

#[test]
fn se3_rotation_must_be_so3() {
    let planar = SO2.direct_product(&SO2);
    assert!(matches!(
        Se3Group::new(planar),
        Err(LieError::InvalidRotation(_))
    ));
    assert!(matches!(
        Se3Group::new(SE3_QUAT.clone()),
        Err(LieError::InvalidRotation(_))
    ));
}

#[test]
fn direct_product_of_euler_and_quaternion() -> Result<(), LieError> {
    let group = SO3_QUAT.direct_product(&SO3_EULER_321);
    assert_eq!(group.dimension(), 7);
    assert_eq!(group.to_string(), "SO3Quat x SO3Euler(body_fixed, z-y-x)");

    let Group::Product(product) = &group else {
        panic!("expected a product group");
    };
    let q = SO3_ALGEBRA
        .element(dvector![0.1, 0.2, 0.3])?
        .exp(&SO3_QUAT)?;
    let e = SO3_EULER_321.element(dvector![0.3, 0.2, 0.1])?;
    let g = product.from_components(&[q.clone(), e.clone()])?;
    assert_eq!(product.component(0, &g)?, q);
    assert_eq!(product.component(1, &g)?, e);
    Ok(())
}

#[test]
fn product_of_three_groups() -> Result<(), LieError> {
    let product = ProductGroup::new(vec![SO2, SO3_MRP, SE3_QUAT.clone()])?;
    assert_eq!(product.dimension(), 1 + 4 + 7);
    assert_eq!(product.matrix_shape(), (2 + 3 + 4, 2 + 3 + 4));
    assert!(matches!(
        ProductGroup::new(vec![SO2]),
        Err(LieError::ShapeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn mismatched_operands_are_rejected() -> Result<(), LieError> {
    let q = GroupElement::<f64>::identity(&SO3_QUAT);
    let t = GroupElement::<f64>::identity(&SE3_QUAT);
    assert!(matches!(q.product(&t), Err(LieError::MismatchedGroup { .. })));

    let so3 = SO3_ALGEBRA.element(dvector![0.1, 0.2, 0.3])?;
    let se3 = SE3_ALGEBRA.element(dvector![0.0, 0.0, 0.0, 0.1, 0.2, 0.3])?;
    assert!(matches!(
        so3.bracket(&se3),
        Err(LieError::MismatchedAlgebra { .. })
    ));
    assert!(matches!(
        so3.exp(&SE3_QUAT),
        Err(LieError::MismatchedAlgebra { .. })
    ));
    Ok(())
}
