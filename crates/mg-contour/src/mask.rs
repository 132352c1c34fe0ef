use mg_core::Image;

use crate::curvature::round_half_even;
use crate::trace::Contour;

/// Rasterizes contour points into a binary mask of the given shape.
///
/// Both coordinates are rounded half-to-even; repeated writes to the same
/// cell are idempotent. Points outside the shape are skipped.
pub fn rasterize_contours(contours: &[Contour], width: usize, height: usize) -> Image<u8> {
    let mut mask = Image::new_fill(width, height, 0u8);
    let data = mask.data_mut();

    for contour in contours {
        for p in &contour.points {
            let r = round_half_even(p.row);
            let c = round_half_even(p.col);
            if r < 0.0 || c < 0.0 {
                continue;
            }
            let (r, c) = (r as usize, c as usize);
            if r >= height || c >= width {
                continue;
            }
            data[r * width + c] = 1;
        }
    }

    mask
}

const DX: [isize; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
const DY: [isize; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// Number of 8-connected components among nonzero mask cells.
pub fn count_components_8(mask: &Image<u8>) -> usize {
    let w = mask.width();
    let h = mask.height();
    let n = w * h;
    let data = mask.data();

    let mut seen = vec![0u8; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut count = 0usize;

    for i in 0..n {
        if data[i] == 0 || seen[i] != 0 {
            continue;
        }

        count += 1;
        seen[i] = 1;
        stack.push(i);

        while let Some(p) = stack.pop() {
            let x = p % w;
            let y = p / w;
            for dir in 0..8 {
                let nx = x as isize + DX[dir];
                let ny = y as isize + DY[dir];
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let nb = ny as usize * w + nx as usize;
                if data[nb] != 0 && seen[nb] == 0 {
                    seen[nb] = 1;
                    stack.push(nb);
                }
            }
        }
    }

    count
}
