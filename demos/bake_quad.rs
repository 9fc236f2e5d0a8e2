//! Bakes a mask for a small two-island mesh and writes it as a PNG.
//!
//! Usage:
//! ```text
//! cargo run --example bake_quad                 # writes mask.png
//! cargo run --example bake_quad -- out.png 256 4
//! ```

use islandmask::bake::BakeParams;
use islandmask::mask::{MaskSession, SelectionMode};
use islandmask::math::{Matrix4, Point2, Point3, Vector3};
use islandmask::mesh::SourceMesh;
use islandmask::query::Ray;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default: WARN for everything, DEBUG for islandmask.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("islandmask=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "mask.png".into());
    let resolution = args.next().map(|s| s.parse::<u32>()).transpose()?.unwrap_or(512);
    let padding = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(2);

    let mut session = MaskSession::load(two_quads())?;
    tracing::info!(islands = session.islands().island_count(), "mesh loaded");

    // click the right-hand quad from above
    let ray = Ray::new(Point3::new(2.5, 0.5, 5.0), -Vector3::z());
    let island = session.select_at(ray, Matrix4::identity(), SelectionMode::Add, |mask| {
        tracing::info!(selected = mask.count_selected(), "mask changed");
    })?;
    tracing::info!(?island, "picked");

    let params = BakeParams::default()
        .with_resolution(resolution)
        .with_padding(padding);
    let png = session.bake(&params)?.encode_png()?;
    std::fs::write(&path, png)?;
    tracing::info!(%path, resolution, padding, "wrote mask texture");
    Ok(())
}

/// Two unit quads side by side with a texel gap between their UV charts.
fn two_quads() -> SourceMesh {
    let mut source = SourceMesh::default();
    for (i, (x0, u0)) in [(0.0, 0.05), (2.0, 0.55)].into_iter().enumerate() {
        let base = u32::try_from(i * 4).unwrap_or_default();
        source.positions.extend([
            Point3::new(x0, 0.0, 0.0),
            Point3::new(x0 + 1.0, 0.0, 0.0),
            Point3::new(x0, 1.0, 0.0),
            Point3::new(x0 + 1.0, 1.0, 0.0),
        ]);
        source.uvs.extend([
            Point2::new(u0, 0.05),
            Point2::new(u0 + 0.4, 0.05),
            Point2::new(u0, 0.95),
            Point2::new(u0 + 0.4, 0.95),
        ]);
        source
            .indices
            .extend([base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }
    source
}
