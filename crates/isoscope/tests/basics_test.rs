//! Basic integration tests for isoscope.
//!
//! Note: isoscope keeps its registry in process-wide state (`OnceLock`), so
//! all checks run in sequence inside a single test function.

use std::sync::Arc;

use isoscope::*;

fn ramp() -> Grid2 {
    // Value equals x over [0, 4] x [0, 1].
    Grid2::uniform(|x, _| x, 5, 2, Vec2::ZERO, Vec2::new(4.0, 1.0)).expect("valid grid")
}

fn sphere() -> Arc<Grid3> {
    let grid = Grid3::uniform(
        |x, y, z| (x * x + y * y + z * z).sqrt(),
        UVec3::splat(16),
        Vec3::splat(-1.0),
        Vec3::splat(1.0),
    )
    .expect("valid grid");
    Arc::new(grid)
}

/// Main integration test that runs all basic tests in sequence.
#[test]
fn test_basics() {
    init().expect("init failed");
    assert!(is_initialized());
    assert!(matches!(init(), Err(IsoscopeError::AlreadyInitialized)));

    // Test 1: Register a contour
    {
        let contour = register_contour("ramp", ramp()).expect("register failed");
        assert!(get_contour("ramp").is_some());
        assert!(get_contour("nonexistent").is_none());
        assert!(get_isosurface("ramp").is_none());
        assert!(matches!(
            register_contour("ramp", ramp()),
            Err(IsoscopeError::StructureExists(_))
        ));

        let color = with_contour_ref("ramp", |c| c.color().color(&[0.0; 4], 0.0));
        assert_eq!(color, Some(options().contour_color));
        assert_eq!(contour.threshold(), Some(2.0));
    }

    // Test 2: Threshold changes recompute once per update
    {
        let contour = get_contour("ramp").expect("contour registered");
        contour.set_threshold(1.5);
        assert_eq!(update(), 1);
        assert_eq!(contour.vertex_count(), 2);
        assert_eq!(update(), 0);
        assert_eq!(contour.recompute_count(), 1);

        contour.raise_threshold();
        let raised = contour.threshold().expect("contour registered");
        assert!((raised - 1.55).abs() < 1e-6);
        contour.lower_threshold().lower_threshold();
        let lowered = contour.threshold().expect("contour registered");
        assert!((lowered - 1.45).abs() < 1e-6);
        assert_eq!(update(), 1);
        assert_eq!(contour.recompute_count(), 2);
    }

    // Test 3: Filled contours and custom colors
    {
        let contour = get_contour("ramp").expect("contour registered");
        contour
            .set_style(ContourStyle::Filled)
            .set_placement(ContourPlacement::Plane(0.0))
            .set_color(Vec4::ONE);
        update();
        let count = contour.vertex_count();
        assert!(count > 0);
        assert_eq!(count % 3, 0);
        let all_white = with_contour_ref("ramp", |c| {
            c.cached_vertices().iter().all(|v| v.color == [1.0; 4])
        });
        assert_eq!(all_white, Some(true));
    }

    // Test 4: Register an isosurface
    {
        let surface = register_isosurface("sphere", sphere()).expect("register failed");
        surface.set_threshold(0.5);
        assert_eq!(update(), 1);
        let count = surface.vertex_count();
        assert!(count > 0);
        assert_eq!(count % 3, 0);
        assert_eq!(update(), 0);

        surface.set_threshold(0.5);
        update();
        assert_eq!(surface.recompute_count(), 1);

        surface.set_color_map("coolwarm");
        update();
        assert_eq!(surface.recompute_count(), 2);

        let (min, max) = bounding_box();
        assert!(min.x <= -1.0 + 1e-6);
        assert!(max.x >= 4.0 - 1e-6);
        // Contour spans x in [0, 4], the sphere x in [-1, 1].
        assert!((center().x - 1.5).abs() < 1e-5);
        assert!((length_scale() - (max - min).length()).abs() < 1e-5);
    }

    // Test 5: Voxel volumes
    {
        let mut voxels = vec![0u8; 64];
        for k in 1..3 {
            for j in 1..3 {
                for i in 1..3 {
                    voxels[i + 4 * (j + 4 * k)] = 200;
                }
            }
        }
        let cube = register_voxels("cube", UVec3::splat(4), &voxels, Vec3::splat(0.5))
            .expect("register failed");
        assert_eq!(cube.threshold(), Some(100.0));
        update();
        assert!(cube.vertex_count() > 0);
        assert!(matches!(
            register_voxels("short", UVec3::splat(4), &voxels[..10], Vec3::ONE),
            Err(IsoscopeError::SizeMismatch { .. })
        ));
    }

    // Test 6: Slicing a volume
    {
        let axis = || Axis::uniform(-1.0, 1.0, 16).expect("valid axis");
        let slice = register_slice_contour(
            "equator",
            sphere(),
            SlicePlane::new(Vec3::ZERO, Vec3::Z),
            axis(),
            axis(),
        )
        .expect("register failed");
        slice.set_threshold(0.5);
        update();
        assert!(slice.vertex_count() > 0);
    }

    // Test 7: Disabled structures are skipped
    {
        let surface = get_isosurface("sphere").expect("isosurface registered");
        surface.set_enabled(false).set_threshold(0.25);
        assert_eq!(update(), 0);
        assert_eq!(surface.recompute_count(), 2);
        surface.set_enabled(true);
        assert_eq!(update(), 1);
    }

    // Test 8: Options
    {
        let mut opts = options();
        opts.threshold_step = 0.0;
        assert!(set_options(opts.clone()).is_err());
        opts.threshold_step = 0.5;
        set_options(opts).expect("valid options");
        assert!((options().threshold_step - 0.5).abs() < 1e-6);

        let contour = get_contour("ramp").expect("contour registered");
        contour.set_threshold(1.0).raise_threshold();
        assert_eq!(contour.threshold(), Some(1.5));
    }

    // Test 9: Remove structures
    {
        remove_structure("ramp");
        assert!(get_contour("ramp").is_none());
        assert!(get_isosurface("sphere").is_some());
        remove_all_structures();
        assert!(get_isosurface("sphere").is_none());
        assert!(get_isosurface("cube").is_none());
    }

    shutdown();
    assert!(!is_initialized());

    // Re-initialization starts from an empty registry
    init().expect("re-init failed");
    assert!(get_contour("equator").is_none());
    shutdown();
}
