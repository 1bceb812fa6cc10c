//! Inverts a batch of random matrices and reports how many were singular.
//!
//! Run with `RUST_LOG=debug` to see the spans of each product and inversion.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallmat_matrix::{ColumnMajor, Matrix, Matrix3, SMatrix};
use tracing::info;
use tracing_forest::ForestLayer;
use tracing_forest::util::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

const TRIALS: usize = 16;

fn main() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let mut rng = SmallRng::seed_from_u64(42);

    let mut singular = 0;
    let mut worst_residual = 0.0f64;
    for _ in 0..TRIALS {
        // Small integer entries make singular matrices likely enough to show up.
        let m = Matrix3::<i32>::from_fn(|_, _| rng.random_range(-2..=2));
        match m.inverted() {
            Some(inverse) => {
                let product = m.map(f64::from) * &inverse;
                let residual = (0..3)
                    .flat_map(|r| (0..3).map(move |c| (r, c)))
                    .map(|(r, c)| {
                        let expected = if r == c { 1.0 } else { 0.0 };
                        (product.value(r, c) - expected).abs()
                    })
                    .fold(0.0, f64::max);
                worst_residual = worst_residual.max(residual);
            }
            None => singular += 1,
        }
    }
    info!(trials = TRIALS, singular, worst_residual, "3x3 integer matrices");

    let mut m = SMatrix::<f64, 4, 4, ColumnMajor>::from_fn(|r, c| {
        let x: f64 = rng.random();
        if r == c { x + 4.0 } else { x }
    });
    let original = m;
    m.invert();
    info!(determinant = original.determinant(), "inverted a 4x4 matrix\n{m}");
    info!("product with the original\n{}", original * &m);
}
