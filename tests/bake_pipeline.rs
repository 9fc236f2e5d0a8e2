#![allow(clippy::unwrap_used)]

use islandmask::bake::{BakeParams, BakeTexture, Connectivity};
use islandmask::mask::{MaskEditor, MaskSession, SelectionMode, VertexMask};
use islandmask::math::{Matrix4, Point2, Point3, Vector3};
use islandmask::mesh::{segment_islands, MeshTopology, SourceMesh};
use islandmask::query::{Ray, Raycast};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .with_test_writer()
        .try_init();
}

/// A unit quad (island 0) in the left half of UV space and a bowtie
/// (island 1, two triangles meeting at one vertex) in the right half.
fn quad_and_bowtie() -> SourceMesh {
    SourceMesh {
        positions: vec![
            // quad
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            // bowtie, shared vertex 6
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(3.0, 0.5, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 1.0, 0.0),
        ],
        uvs: vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.5, 1.0),
            Point2::new(0.5, 0.0),
            Point2::new(0.5, 1.0),
            Point2::new(0.75, 0.5),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ],
        indices: vec![0, 1, 2, 2, 1, 3, 4, 6, 5, 6, 7, 8],
        ..SourceMesh::default()
    }
}

#[test]
fn bowtie_is_one_island_and_quad_another() {
    let topo = MeshTopology::load(quad_and_bowtie()).unwrap();
    let islands = segment_islands(&topo);
    assert_eq!(islands.island_ids(), &[0, 0, 1, 1]);
    assert_eq!(islands.vertices_in(&topo, 1).unwrap(), vec![4, 5, 6, 7, 8]);
}

#[test]
fn pick_edit_and_bake_end_to_end() {
    init_tracing();
    let mut session = MaskSession::load(quad_and_bowtie()).unwrap();

    // object sits 10 units up the Z axis
    let transform = Matrix4::new_translation(&Vector3::new(0.0, 0.0, 10.0));
    let ray = Ray::new(Point3::new(3.8, 0.5, 20.0), -Vector3::z());

    let mut commits = 0;
    let island = session
        .select_at(ray, transform, SelectionMode::Add, |_| commits += 1)
        .unwrap();
    assert_eq!(island, Some(1));
    assert_eq!(commits, 1);
    assert_eq!(session.mask().count_selected(), 5);
    assert!(session.mask().iter().take(4).all(|b| !b));

    let params = BakeParams::default()
        .with_resolution(16)
        .with_padding(2)
        .with_connectivity(Connectivity::Eight);
    let texture = session.bake(&params).unwrap();
    assert_eq!(texture.resolution(), 16);
    // bowtie wing near u = 0.9 is fully masked
    assert_eq!(texture.coverage(14, 8), 255);
    // quad interior is far from the bowtie and stays empty
    assert_eq!(texture.coverage(2, 8), 0);

    let png = texture.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (16, 16));
    assert!(decoded.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn padding_only_grows_the_bake() {
    let topo = MeshTopology::load(quad_and_bowtie()).unwrap();
    let islands = segment_islands(&topo);
    let mask = MaskEditor::new(&topo, &islands)
        .set_island(&VertexMask::new(topo.vertex_count()), 0, SelectionMode::Add)
        .unwrap();

    let bake = |padding| {
        BakeTexture::new(BakeParams::default().with_resolution(32).with_padding(padding))
            .execute(&topo, &mask)
            .unwrap()
    };
    let base = bake(0);
    let padded = bake(3);
    let mut grew = false;
    for y in 0..32 {
        for x in 0..32 {
            assert!(padded.coverage(x, y) >= base.coverage(x, y));
            grew |= padded.coverage(x, y) > base.coverage(x, y);
        }
    }
    assert!(grew);
}

#[test]
fn raycast_reports_nearest_triangle_index() {
    let topo = MeshTopology::load(quad_and_bowtie()).unwrap();
    let hit = Raycast::new(Ray::new(Point3::new(0.9, 0.9, 1.0), -Vector3::z()))
        .execute(&topo)
        .unwrap();
    assert_eq!(hit.triangle, 1);
}
