//! Integration tests for spritemesh-reconstruction
//!
//! These tests run every stage together, from visibility grids and image
//! buffers to the final mesh.

use approx::assert_relative_eq;
use image::{Rgba, RgbaImage};
use spritemesh_algorithms::{convex_hull, extract_corners, HullParams};
use spritemesh_core::{ChannelView, Point2d, Polygon, SpriteMesh, VisibilityGrid};
use spritemesh_reconstruction::*;

/// Disc of `radius` texels centred in a `size` x `size` grid
fn disc_grid(size: usize, radius: f64) -> VisibilityGrid {
    let centre = size as f64 / 2.0;
    let mut cells = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 + 0.5 - centre;
            let dy = y as f64 + 0.5 - centre;
            cells.push(dx * dx + dy * dy <= radius * radius);
        }
    }
    VisibilityGrid::from_bools(size, size, cells).unwrap()
}

/// Two overlapping discs and a stray texel, an irregular sprite
fn blob_grid() -> VisibilityGrid {
    let size = 40;
    let mut cells = vec![false; size * size];
    for y in 0..size {
        for x in 0..size {
            let (fx, fy) = (x as f64 + 0.5, y as f64 + 0.5);
            let a = (fx - 14.0).powi(2) + (fy - 15.0).powi(2) <= 81.0;
            let b = (fx - 26.0).powi(2) + (fy - 24.0).powi(2) <= 36.0;
            cells[y * size + x] = a || b;
        }
    }
    cells[37 * size + 5] = true;
    VisibilityGrid::from_bools(size, size, cells).unwrap()
}

fn uv_polygon(mesh: &SpriteMesh) -> Polygon {
    Polygon::from_points(mesh.uvs.clone())
}

#[test]
fn test_opaque_square_yields_two_triangles() {
    let grid = VisibilityGrid::from_bools(4, 4, vec![true; 16]).unwrap();
    let result = MeshPipeline::default().build_from_grid(&grid).unwrap();

    assert!(result.is_complete());
    assert_eq!(result.candidate_points, 4);
    assert_eq!(result.hull_vertices, 4);
    assert_eq!(result.stats.collapses, 0);
    assert_eq!(result.mesh.triangle_count(), 2);
    assert_eq!(
        result.mesh.uvs,
        vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(0.0, 1.0),
        ]
    );
    assert_eq!(result.mesh.vertices[0], Point2d::new(-0.5, -0.5));
    assert_eq!(result.mesh.vertices[2], Point2d::new(0.5, 0.5));
    assert_relative_eq!(result.mesh.area(), 1.0);
}

#[test]
fn test_single_texel_yields_unit_cell() {
    let grid = VisibilityGrid::from_bools(1, 1, vec![true]).unwrap();
    let mesh = generate_sprite_mesh(&grid, 100).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert_relative_eq!(mesh.area(), 1.0);
}

#[test]
fn test_centred_texel_covers_its_cell() {
    let mut cells = vec![false; 9];
    cells[4] = true;
    let grid = VisibilityGrid::from_bools(3, 3, cells).unwrap();
    let mesh = generate_sprite_mesh(&grid, 100).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert_relative_eq!(mesh.area(), 1.0 / 9.0, epsilon = 1e-12);
    for v in &mesh.vertices {
        assert_relative_eq!(v.x.abs(), 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(v.y.abs(), 1.0 / 6.0, epsilon = 1e-12);
    }
}

#[test]
fn test_disc_decimates_to_budget() {
    let size = 128;
    let radius = 48.0;
    let grid = disc_grid(size, radius);
    let result = MeshPipeline::with_max_vertices(12)
        .build_from_grid(&grid)
        .unwrap();

    assert!(result.is_complete(), "{result}");
    assert!(result.hull_vertices > 12);
    assert_eq!(result.mesh.vertex_count(), 12);
    assert_eq!(result.mesh.triangle_count(), 10);

    let expected = std::f64::consts::PI * (radius / size as f64).powi(2);
    let area = result.mesh.area();
    assert!(
        (area - expected).abs() / expected < 0.10,
        "mesh area {area} too far from disc area {expected}"
    );
    assert!(uv_polygon(&result.mesh).is_convex(1e-9));
}

#[test]
fn test_candidates_lie_inside_hull() {
    let grid = blob_grid();
    let candidates = extract_corners(&grid);
    let all = candidates.clone();
    let hull = convex_hull(candidates, &HullParams::default());

    assert!(hull.len() >= 3);
    assert!(!hull.has_consecutive_duplicates(1e-12));
    for p in &all {
        assert!(hull.contains(p, 1e-9), "{p:?} outside hull");
    }
}

#[test]
fn test_mesh_contains_every_visible_texel() {
    let grid = blob_grid();
    for budget in [4, 8, 16, 100] {
        let result = MeshPipeline::with_max_vertices(budget)
            .build_from_grid(&grid)
            .unwrap();
        let outline = uv_polygon(&result.mesh);
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if !grid.is_visible(x as isize, y as isize) {
                    continue;
                }
                let centre = Point2d::new(
                    (x as f64 + 0.5) / grid.width() as f64,
                    (y as f64 + 0.5) / grid.height() as f64,
                );
                assert!(outline.contains(&centre, 1e-9));
            }
        }
    }
}

#[test]
fn test_triangle_count_and_area_per_budget() {
    let grid = disc_grid(64, 20.0);
    for budget in 3..=24 {
        let result = MeshPipeline::with_max_vertices(budget)
            .build_from_grid(&grid)
            .unwrap();
        let mesh = &result.mesh;
        let stalled = result
            .warnings
            .iter()
            .any(|w| matches!(w, PipelineWarning::DecimationStalled { .. }));
        assert!(mesh.vertex_count() <= budget || stalled);
        assert!(mesh.indices_in_bounds());

        if result.warnings.iter().all(|w| {
            !matches!(w, PipelineWarning::TriangulationIncomplete { .. })
        }) {
            assert_eq!(mesh.triangle_count(), mesh.vertex_count() - 2);
            assert_relative_eq!(mesh.area(), uv_polygon(mesh).area(), epsilon = 1e-9);
        }
    }
}

#[test]
fn test_hull_then_decimation_is_monotone() {
    let grid = disc_grid(96, 40.0);
    let mut previous = usize::MAX;
    for budget in [64, 32, 16, 8, 4] {
        let result = MeshPipeline::with_max_vertices(budget)
            .build_from_grid(&grid)
            .unwrap();
        let vertices = result.mesh.vertex_count();
        assert!(vertices <= previous);
        assert_eq!(
            result.stats.collapses,
            result.hull_vertices - result.stats.decimated_vertices
        );
        previous = vertices;
    }
}

#[test]
fn test_alpha_image_source() {
    // Opaque block in the top-left corner of the image
    let mut image = RgbaImage::new(8, 8);
    for y in 0..4 {
        for x in 0..4 {
            image.put_pixel(x, y, Rgba([255, 255, 255, 200]));
        }
    }

    let result = MeshPipeline::default()
        .build_from_source(&ChannelView::alpha(&image))
        .unwrap();
    println!("✓ Image sprite: {result}");

    assert_eq!(result.mesh.triangle_count(), 2);
    // Image rows run top-down, UVs bottom-up
    for uv in &result.mesh.uvs {
        assert!(uv.x <= 0.5);
        assert!(uv.y >= 0.5);
    }
    assert_relative_eq!(result.mesh.area(), 0.25);
}

#[test]
fn test_threshold_hides_faint_texels() {
    let mut image = RgbaImage::new(4, 4);
    for y in 0..4 {
        for x in 0..4 {
            let alpha = if x == 0 { 255 } else { 20 };
            image.put_pixel(x, y, Rgba([0, 0, 0, alpha]));
        }
    }

    let view = ChannelView::alpha(&image);
    let full = MeshPipeline::default().build_from_source(&view).unwrap();
    assert_relative_eq!(full.mesh.area(), 1.0);

    let pipeline = MeshPipeline::new(PipelineConfig::default().with_threshold(0.5));
    let strip = pipeline.build_from_source(&view).unwrap();
    assert_relative_eq!(strip.mesh.area(), 0.25);
}

#[test]
fn test_transparent_image_is_rejected() {
    let image = RgbaImage::new(5, 5);
    let result = MeshPipeline::default().build_from_source(&ChannelView::alpha(&image));
    assert!(result.is_err());
}

#[test]
fn test_batch_of_images() {
    let mut images = Vec::new();
    for size in 1..=4u32 {
        let mut image = RgbaImage::new(8, 8);
        for y in 0..size {
            for x in 0..size {
                image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        images.push(image);
    }
    let views: Vec<ChannelView> = images.iter().map(ChannelView::alpha).collect();

    let results = build_batch(&views, &PipelineConfig::default());
    for (size, result) in (1..=4).zip(&results) {
        let mesh = &result.as_ref().unwrap().mesh;
        let side = size as f64 / 8.0;
        assert_relative_eq!(mesh.area(), side * side, epsilon = 1e-12);
    }
}
