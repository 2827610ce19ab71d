//! Quad rasterizer: flattens the fluid-mesh frame into a [`PixelGrid`] so
//! the half-block painter can draw it. Quads arrive in painter's order and
//! are alpha-blended over whatever is already in the cell.

use phasefield::render::{PixelGrid, Quad, Rgb, Viewport};

const BACKDROP: Rgb = Rgb(4, 6, 14);

pub fn rasterize(quads: &[Quad], viewport: Viewport) -> PixelGrid {
    let mut grid = PixelGrid::new(viewport.width, viewport.height, BACKDROP);

    for quad in quads {
        let (min_x, max_x, min_y, max_y) = bounds(quad);
        let x0 = min_x.floor().max(0.0) as usize;
        let y0 = min_y.floor().max(0.0) as usize;
        let x1 = (max_x.ceil() as usize).min(viewport.width.saturating_sub(1));
        let y1 = (max_y.ceil() as usize).min(viewport.height.saturating_sub(1));

        for y in y0..=y1 {
            for x in x0..=x1 {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                if inside(quad, px, py) {
                    let under = grid.get(x, y);
                    grid.set(x, y, under.lerp(quad.color, quad.opacity));
                }
            }
        }
    }
    grid
}

fn bounds(quad: &Quad) -> (f32, f32, f32, f32) {
    let xs = quad.corners.iter().map(|c| c.0);
    let ys = quad.corners.iter().map(|c| c.1);
    (
        xs.clone().fold(f32::INFINITY, f32::min),
        xs.fold(f32::NEG_INFINITY, f32::max),
        ys.clone().fold(f32::INFINITY, f32::min),
        ys.fold(f32::NEG_INFINITY, f32::max),
    )
}

/// Point-in-convex-quad test: the point must fall on the same side of every
/// edge. Winding may be either direction, so both all-positive and
/// all-negative cross products count as inside.
fn inside(quad: &Quad, px: f32, py: f32) -> bool {
    let mut sign = 0.0f32;
    for i in 0..4 {
        let (x1, y1) = quad.corners[i];
        let (x2, y2) = quad.corners[(i + 1) % 4];
        let cross = (x2 - x1) * (py - y1) - (y2 - y1) * (px - x1);
        if cross.abs() < 1e-9 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}
