use mask_editor::{
    Color, Error, Point, Raster, RgbRaster, create_binary_save_image, flood_fill, load_binary_mask,
    smooth_image, smooth_thin_smooth_image, thin_image,
};

const PEN: Color = Color::rgb(255, 165, 0);
const RED: Color = Color::rgb(255, 0, 0);

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn disk(size: u32, cx: i32, cy: i32, radius: i32) -> Raster {
    let mut r = Raster::new(size, size).unwrap();
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            if (x - cx).pow(2) + (y - cy).pow(2) <= radius * radius {
                r.put_pixel(x as u32, y as u32, Color::rgb(7, 7, 7));
            }
        }
    }
    r
}

/// Number of 8-connected painted components.
fn components(r: &Raster) -> usize {
    let (w, h) = (r.width() as i32, r.height() as i32);
    let mut seen = vec![false; (w * h) as usize];
    let mut count = 0;
    for sy in 0..h {
        for sx in 0..w {
            let si = (sy * w + sx) as usize;
            if seen[si] || r.alpha(sx as u32, sy as u32) == Some(0) {
                continue;
            }
            count += 1;
            seen[si] = true;
            let mut stack = vec![(sx, sy)];
            while let Some((x, y)) = stack.pop() {
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let (nx, ny) = (x + dx, y + dy);
                        if nx < 0 || ny < 0 || nx >= w || ny >= h {
                            continue;
                        }
                        let ni = (ny * w + nx) as usize;
                        if !seen[ni] && r.alpha(nx as u32, ny as u32).unwrap_or(0) > 0 {
                            seen[ni] = true;
                            stack.push((nx, ny));
                        }
                    }
                }
            }
        }
    }
    count
}

#[test]
fn every_algorithm_preserves_dimensions() {
    init();
    for (w, h) in [(1, 1), (1, 9), (9, 1), (13, 7)] {
        let mut r = Raster::new(w, h).unwrap();
        r.put_pixel(0, 0, PEN);
        r.put_pixel(w - 1, h - 1, PEN);
        assert_eq!(smooth_image(&r, PEN).unwrap().dimensions(), (w, h));
        assert_eq!(thin_image(&r, PEN).unwrap().dimensions(), (w, h));
        assert_eq!(smooth_thin_smooth_image(&r, PEN).unwrap().dimensions(), (w, h));
        assert_eq!(create_binary_save_image(&r).unwrap().dimensions(), (w, h));
        assert_eq!(flood_fill(&r, Point::new(0, 0), RED).unwrap().dimensions(), (w, h));
    }
}

#[test]
fn empty_input_gives_no_result_everywhere() {
    let empty = Raster::new(0, 4).unwrap();
    assert!(smooth_image(&empty, PEN).is_none());
    assert!(thin_image(&empty, PEN).is_none());
    assert!(smooth_thin_smooth_image(&empty, PEN).is_none());
    assert!(create_binary_save_image(&empty).is_none());
    assert!(flood_fill(&empty, Point::new(0, 0), RED).is_none());
}

#[test]
fn malformed_raster_fails_fast() {
    assert!(matches!(Raster::from_raw(4, 4, vec![0; 60]), Err(Error::DimensionMismatch { .. })));
    assert!(matches!(RgbRaster::from_raw(4, 4, vec![0; 49]), Err(Error::DimensionMismatch { .. })));
    // A size whose byte count overflows is refused before anything can index it.
    assert!(matches!(
        Raster::from_raw(1 << 31, 1 << 31, Vec::new()),
        Err(Error::DimensionOverflow { .. })
    ));
}

#[test]
fn binary_export_is_two_valued_and_idempotent() {
    init();
    let mut r = disk(16, 8, 8, 5);
    r.put_pixel(0, 0, Color::rgba(3, 90, 4, 1));
    let saved = create_binary_save_image(&r).unwrap();
    assert!(saved.as_raw().chunks_exact(3).all(|p| p == [0, 0, 0] || p == [255, 255, 255]));
    assert_eq!(saved.pixel(0, 0), Some([255, 255, 255]));

    let reloaded = load_binary_mask(&saved, Color::rgb(0, 0, 200)).unwrap();
    assert_eq!(create_binary_save_image(&reloaded).unwrap(), saved);
}

#[test]
fn flood_fill_no_op_laws() {
    let mut r = Raster::new(6, 6).unwrap();
    r.put_pixel(3, 3, Color::rgba(10, 10, 10, 200));

    // Both opaque.
    assert_eq!(flood_fill(&r, Point::new(3, 3), RED).unwrap(), r);
    // Both transparent.
    assert_eq!(flood_fill(&r, Point::new(0, 0), Color::rgba(1, 2, 3, 0)).unwrap(), r);
    // Out of bounds.
    assert_eq!(flood_fill(&r, Point::new(-1, 0), RED).unwrap(), r);
    assert_eq!(flood_fill(&r, Point::new(6, 6), RED).unwrap(), r);
}

#[test]
fn flood_fill_connectivity() {
    init();
    let r = Raster::new(5, 5).unwrap();
    let out = flood_fill(&r, Point::new(2, 2), RED).unwrap();
    assert_eq!(out, Raster::filled(5, 5, RED).unwrap());

    // Horizontal wall through row 2; seed below it.
    let mut walled = Raster::new(5, 5).unwrap();
    for x in 0..5 {
        walled.put_pixel(x, 2, Color::rgb(0, 0, 255));
    }
    let out = flood_fill(&walled, Point::new(2, 4), RED).unwrap();
    for x in 0..5 {
        for y in 0..2 {
            assert_eq!(out.pixel(x, y), Some(Color::TRANSPARENT));
        }
        assert_eq!(out.pixel(x, 2), Some(Color::rgb(0, 0, 255)));
        for y in 3..5 {
            assert_eq!(out.pixel(x, y), Some(RED));
        }
    }
    // Input untouched.
    assert_eq!(walled.pixel(2, 4), Some(Color::TRANSPARENT));
}

#[test]
fn flood_fill_from_fractional_position() {
    let r = Raster::new(4, 4).unwrap();
    let out = flood_fill(&r, Point::from_f32(3.99, 0.5), RED).unwrap();
    assert_eq!(out.painted_count(), 16);
}

#[test]
fn thinning_keeps_a_disk_connected() {
    init();
    let radius = 6;
    let r = disk(21, 10, 10, radius);
    let before = r.painted_count();
    let out = thin_image(&r, PEN).unwrap();
    let kept = out.painted_count();
    assert!(kept >= 1, "skeleton vanished");
    assert!(kept <= 2 * radius as usize + 1, "kept {kept} of {before}");
    assert_eq!(components(&out), 1);
}

#[test]
fn thinning_keeps_branches_connected() {
    init();
    // Thick plus sign: four arms meeting in the middle.
    let mut r = Raster::new(25, 25).unwrap();
    for y in 0..25 {
        for x in 0..25 {
            let vertical = (10..15).contains(&x) && (2..23).contains(&y);
            let horizontal = (10..15).contains(&y) && (2..23).contains(&x);
            if vertical || horizontal {
                r.put_pixel(x, y, PEN);
            }
        }
    }
    let out = thin_image(&r, PEN).unwrap();
    assert_eq!(components(&out), 1);
    assert!(out.painted_count() < r.painted_count() / 3);
    // Arms still reach out past the crossing.
    assert!(out.painted_count() >= 20, "kept {}", out.painted_count());
}

#[test]
fn thinning_keeps_separate_blobs_separate() {
    let mut r = disk(30, 8, 8, 5);
    let other = disk(30, 21, 21, 5);
    for y in 0..30 {
        for x in 0..30 {
            if other.alpha(x, y) != Some(0) {
                r.put_pixel(x, y, PEN);
            }
        }
    }
    assert_eq!(components(&r), 2);
    assert_eq!(components(&thin_image(&r, PEN).unwrap()), 2);
}

#[test]
fn composite_pipeline_is_deterministic() {
    init();
    let mut r = disk(32, 15, 16, 7);
    for x in 2..30 {
        r.put_pixel(x, 4, PEN);
        r.put_pixel(x, 5 + (x % 3), PEN);
    }
    let a = smooth_thin_smooth_image(&r, PEN).unwrap();
    let b = smooth_thin_smooth_image(&r, PEN).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
    assert!(a.painted_count() > 0);
}

#[test]
fn isolated_pixel_threshold_behavior() {
    // Peak blurred coverage of a lone pixel is ~0.159, just above 0.1, and its
    // neighbours sit at ~0.097: it survives, without growing.
    let mut r = Raster::new(11, 11).unwrap();
    r.put_pixel(5, 5, Color::rgba(1, 1, 1, 1));
    let out = smooth_image(&r, PEN).unwrap();
    assert_eq!(out.painted_count(), 1);
    assert_eq!(out.pixel(5, 5), Some(PEN));
}
