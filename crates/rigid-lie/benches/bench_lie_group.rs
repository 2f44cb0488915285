use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{DVector, Isometry3, Translation3, UnitQuaternion, Vector3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rigid_lie::{AlgebraElement, GroupElement, SE3_ALGEBRA, SE3_QUAT, SO3_ALGEBRA, SO3_MRP, SO3_QUAT};

fn bench_so3(c: &mut Criterion) {
    let mut group = c.benchmark_group("so3");

    let data_size = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    let omegas: Vec<Vector3<f64>> = (0..data_size)
        .map(|_| Vector3::new(rng.random(), rng.random(), rng.random()))
        .collect();

    let taus: Vec<AlgebraElement<f64>> = omegas
        .iter()
        .filter_map(|v| {
            SO3_ALGEBRA
                .element(DVector::from_column_slice(v.as_slice()))
                .ok()
        })
        .collect();
    let quats: Vec<GroupElement<f64>> = taus.iter().filter_map(|t| t.exp(&SO3_QUAT).ok()).collect();
    let mrps: Vec<GroupElement<f64>> = taus.iter().filter_map(|t| t.exp(&SO3_MRP).ok()).collect();
    let quats_na: Vec<UnitQuaternion<f64>> = omegas
        .iter()
        .map(|&v| UnitQuaternion::from_scaled_axis(v))
        .collect();

    group.bench_function(BenchmarkId::new("exp_quat", ""), |b| {
        b.iter(|| {
            for tau in taus.iter() {
                std::hint::black_box(std::hint::black_box(tau).exp(&SO3_QUAT).ok());
            }
        })
    });

    group.bench_function(BenchmarkId::new("exp_mrp", ""), |b| {
        b.iter(|| {
            for tau in taus.iter() {
                std::hint::black_box(std::hint::black_box(tau).exp(&SO3_MRP).ok());
            }
        })
    });

    group.bench_function(BenchmarkId::new("exp_nalgebra", ""), |b| {
        b.iter(|| {
            for omega in omegas.iter() {
                std::hint::black_box(UnitQuaternion::from_scaled_axis(std::hint::black_box(
                    *omega,
                )));
            }
        })
    });

    group.bench_function(BenchmarkId::new("log_quat", ""), |b| {
        b.iter(|| {
            for rot in quats.iter() {
                std::hint::black_box(std::hint::black_box(rot).log().ok());
            }
        })
    });

    group.bench_function(BenchmarkId::new("log_nalgebra", ""), |b| {
        b.iter(|| {
            for quat in quats_na.iter() {
                std::hint::black_box(std::hint::black_box(*quat).scaled_axis());
            }
        })
    });

    group.bench_function(BenchmarkId::new("product_quat", ""), |b| {
        b.iter(|| {
            for (a, c) in quats.iter().zip(quats.iter().rev()) {
                std::hint::black_box(std::hint::black_box(a).product(c).ok());
            }
        })
    });

    group.bench_function(BenchmarkId::new("product_mrp", ""), |b| {
        b.iter(|| {
            for (a, c) in mrps.iter().zip(mrps.iter().rev()) {
                std::hint::black_box(std::hint::black_box(a).product(c).ok());
            }
        })
    });

    group.bench_function(BenchmarkId::new("product_nalgebra", ""), |b| {
        b.iter(|| {
            for (a, c) in quats_na.iter().zip(quats_na.iter().rev()) {
                std::hint::black_box(std::hint::black_box(*a) * *c);
            }
        })
    });
}

fn bench_se3(c: &mut Criterion) {
    let mut group = c.benchmark_group("se3");

    let data_size = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    let poses: Vec<GroupElement<f64>> = (0..data_size)
        .map(|_| GroupElement::random(&SE3_QUAT, &mut rng))
        .collect();
    let taus: Vec<AlgebraElement<f64>> = poses.iter().filter_map(|p| p.log().ok()).collect();

    let iso_na: Vec<Isometry3<f64>> = poses
        .iter()
        .map(|p| {
            let v = p.param();
            let q = UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(v[3], v[4], v[5], v[6]));
            Isometry3::from_parts(Translation3::new(v[0], v[1], v[2]), q)
        })
        .collect();

    group.bench_function(BenchmarkId::new("exp", ""), |b| {
        b.iter(|| {
            for tau in taus.iter() {
                std::hint::black_box(std::hint::black_box(tau).exp(&SE3_QUAT).ok());
            }
        })
    });

    group.bench_function(BenchmarkId::new("log", ""), |b| {
        b.iter(|| {
            for pose in poses.iter() {
                std::hint::black_box(std::hint::black_box(pose).log().ok());
            }
        })
    });

    group.bench_function(BenchmarkId::new("product", ""), |b| {
        b.iter(|| {
            for (a, c) in poses.iter().zip(poses.iter().rev()) {
                std::hint::black_box(std::hint::black_box(a).product(c).ok());
            }
        })
    });

    group.bench_function(BenchmarkId::new("product_nalgebra", ""), |b| {
        b.iter(|| {
            for (a, c) in iso_na.iter().zip(iso_na.iter().rev()) {
                std::hint::black_box(std::hint::black_box(*a) * *c);
            }
        })
    });

    let point = DVector::from_column_slice(&[0.5, -1.0, 2.0]);
    group.bench_function(BenchmarkId::new("act", ""), |b| {
        b.iter(|| {
            for pose in poses.iter() {
                std::hint::black_box(std::hint::black_box(pose).act(&point).ok());
            }
        })
    });

    let tau = SE3_ALGEBRA.element(DVector::from_column_slice(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]));
    if let Ok(tau) = tau {
        group.bench_function(BenchmarkId::new("adjoint", ""), |b| {
            b.iter(|| std::hint::black_box(std::hint::black_box(&tau).ad()))
        });
    }
}

criterion_group!(benches, bench_so3, bench_se3);
criterion_main!(benches);
