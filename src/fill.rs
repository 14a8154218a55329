// Seeded 4-connected flood fill across the transparency boundary.
// Visual: clicking inside a hole of the mask paints the whole hole; clicking
// on paint, or filling with a color of the same transparency class, does nothing.

use crate::types::{Color, Point, Raster};

/// One bit per pixel, row-major.
struct VisitedSet {
    width: usize,
    bits: Vec<u64>,
}

impl VisitedSet {
    fn new(width: usize, height: usize) -> Self {
        Self { width, bits: vec![0; (width * height).div_ceil(64)] }
    }

    /// Marks (x, y); false if it was already marked.
    #[inline]
    fn insert(&mut self, x: usize, y: usize) -> bool {
        let i = y * self.width + x;
        let (word, bit) = (i / 64, 1u64 << (i % 64));
        let fresh = self.bits[word] & bit == 0;
        self.bits[word] |= bit;
        fresh
    }

    #[inline]
    fn contains_index(&self, i: usize) -> bool {
        self.bits[i / 64] & (1u64 << (i % 64)) != 0
    }
}

/// Pixels 4-connected to `seed` whose alpha equals the seed's alpha exactly.
fn reach(image: &Raster, seed: (u32, u32)) -> (VisitedSet, usize) {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let raw = image.as_raw();
    let alpha_at = |x: usize, y: usize| raw[(y * w + x) * Raster::CHANNELS + 3];

    let (sx, sy) = (seed.0 as usize, seed.1 as usize);
    let target_alpha = alpha_at(sx, sy);

    let mut visited = VisitedSet::new(w, h);
    let mut stack: Vec<(usize, usize)> = vec![(sx, sy)];
    visited.insert(sx, sy);
    let mut reached = 1usize;

    while let Some((cx, cy)) = stack.pop() {
        let neighbours = [
            (cx + 1 < w).then(|| (cx + 1, cy)),
            (cx > 0).then(|| (cx - 1, cy)),
            (cy + 1 < h).then(|| (cx, cy + 1)),
            (cy > 0).then(|| (cx, cy - 1)),
        ];
        for (nx, ny) in neighbours.into_iter().flatten() {
            if alpha_at(nx, ny) == target_alpha && visited.insert(nx, ny) {
                stack.push((nx, ny));
                reached += 1;
            }
        }
    }

    (visited, reached)
}

/// Flood fill from `seed` with `fill`.
///
/// * `None` for an empty raster.
/// * Seed outside the raster, or seed and `fill` in the same transparency
///   class: an unchanged copy of `image`.
/// * Otherwise the region reachable through pixels of the seed's exact alpha
///   is painted with `fill` at full opacity, but only when the seed pixel is
///   transparent. An opaque seed with a transparent fill (erasing) is
///   computed but not written.
pub fn flood_fill(image: &Raster, seed: Point, fill: Color) -> Option<Raster> {
    if image.is_empty() {
        return None;
    }
    if !image.contains(seed) {
        log::debug!("flood fill seed {:?} outside {:?}, no-op", seed, image.dimensions());
        return Some(image.clone());
    }

    let (x, y) = (seed.x as u32, seed.y as u32);
    let target_alpha = image.alpha(x, y)?;
    let target_transparent = target_alpha == 0;
    if target_transparent == fill.is_transparent() {
        log::debug!("flood fill at {:?}: seed and fill share transparency, no-op", seed);
        return Some(image.clone());
    }

    let (visited, reached) = reach(image, (x, y));
    let mut result = image.clone();

    if target_transparent {
        let paint = fill.opaque().to_bytes();
        for (i, px) in result.as_raw_mut().chunks_exact_mut(Raster::CHANNELS).enumerate() {
            if visited.contains_index(i) {
                px.copy_from_slice(&paint);
            }
        }
    }

    log::debug!(
        "flood fill at {:?}: reached {} px (alpha {}), painted: {}",
        seed,
        reached,
        target_alpha,
        target_transparent
    );
    Some(result)
}
