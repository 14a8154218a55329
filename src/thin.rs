// Morphological thinning (Guo-Hall, two sub-iterations, table driven).
// Visual: a filled stroke collapses to its one-pixel centerline; a blob
// collapses to a point. Connected pieces stay connected (8-connectivity).
//
// Neighbourhood code: bit i is set when neighbour x(i+1) is foreground,
// counter-clockwise from east:
//
//     x4 x3 x2        bit3 bit2 bit1
//     x5  p x1   ->   bit4  --  bit0
//     x6 x7 x8        bit5 bit6 bit7

use crate::types::{Color, Raster};

/// Deletion decisions for every 8-neighbourhood, one table per sub-iteration.
pub struct ThinningLut {
    first: [bool; 256],
    second: [bool; 256],
}

impl Default for ThinningLut {
    fn default() -> Self {
        Self::new()
    }
}

impl ThinningLut {
    /// Build both tables.
    pub fn new() -> Self {
        let mut first = [false; 256];
        let mut second = [false; 256];
        for code in 0..256usize {
            let bits = neighbours(code as u8);
            let removable = crossing_is_one(&bits) && endpoint_safe(&bits);
            // First pass peels north/east borders, second south/west.
            first[code] = removable && !((bits[1] || bits[2] || !bits[7]) && bits[0]);
            second[code] = removable && !((bits[5] || bits[6] || !bits[3]) && bits[4]);
        }
        Self { first, second }
    }

    #[inline]
    pub fn deletable(&self, pass: usize, code: u8) -> bool {
        if pass == 0 { self.first[code as usize] } else { self.second[code as usize] }
    }
}

#[inline]
fn neighbours(code: u8) -> [bool; 8] {
    std::array::from_fn(|i| code >> i & 1 == 1)
}

// Exactly one 4-connected background gap around p; deleting p keeps topology.
fn crossing_is_one(b: &[bool; 8]) -> bool {
    let crossings = [0usize, 2, 4, 6]
        .iter()
        .filter(|&&i| !b[i] && (b[i + 1] || b[(i + 2) % 8]))
        .count();
    crossings == 1
}

// min(N1, N2) in {2, 3}: p is neither an end point nor buried.
fn endpoint_safe(b: &[bool; 8]) -> bool {
    let mut n1 = 0;
    let mut n2 = 0;
    for k in [1usize, 3, 5, 7] {
        if b[k] || b[k - 1] {
            n1 += 1;
        }
        if b[k] || b[(k + 1) % 8] {
            n2 += 1;
        }
    }
    matches!(n1.min(n2), 2 | 3)
}

/// Neighbourhood code of (x, y). Pixels outside the grid count as background.
fn code_at(grid: &[u8], w: usize, h: usize, x: usize, y: usize) -> u8 {
    const OFFSETS: [(isize, isize); 8] =
        [(1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1), (1, 1)];
    let mut code = 0u8;
    for (bit, (dx, dy)) in OFFSETS.iter().enumerate() {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
            continue;
        }
        if grid[ny as usize * w + nx as usize] != 0 {
            code |= 1 << bit;
        }
    }
    code
}

/// Thin a 0/1 grid in place until no pixel is deletable. Returns the number of
/// full iterations run.
pub fn thin_binary(grid: &mut [u8], width: usize, height: usize, lut: &ThinningLut) -> usize {
    debug_assert_eq!(grid.len(), width * height);
    let mut iterations = 0;
    let mut count = grid.iter().filter(|&&v| v != 0).count();
    let mut doomed = Vec::new();

    loop {
        let before = count;
        for pass in 0..2 {
            // Decide from the current snapshot, then delete together.
            doomed.clear();
            for y in 0..height {
                for x in 0..width {
                    let i = y * width + x;
                    if grid[i] != 0 && lut.deletable(pass, code_at(grid, width, height, x, y)) {
                        doomed.push(i);
                    }
                }
            }
            for &i in &doomed {
                grid[i] = 0;
            }
            count -= doomed.len();
        }
        iterations += 1;
        log::trace!("thin iteration {iterations}: {before} -> {count} px");
        if count == before {
            break;
        }
    }
    iterations
}

/// Skeletonize the mask and paint the skeleton with `pen`. `None` for an
/// empty raster.
pub fn thin_image(image: &Raster, pen: Color) -> Option<Raster> {
    if image.is_empty() {
        return None;
    }
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);

    let mut grid: Vec<u8> = image.alpha_channel().map(|a| u8::from(a > 0)).collect();
    let iterations = thin_binary(&mut grid, w, h, &ThinningLut::new());

    let out = Raster::from_predicate(width, height, pen, |i| grid[i] != 0);
    log::debug!(
        "thin {}x{}: {} -> {} painted px in {} iterations",
        width,
        height,
        image.painted_count(),
        out.painted_count(),
        iterations
    );
    Some(out)
}
