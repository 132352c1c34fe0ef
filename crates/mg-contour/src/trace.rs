use std::collections::{HashMap, VecDeque};

use mg_core::Image;

/// One sub-pixel contour sample in `(row, col)` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourPoint {
    pub row: f64,
    pub col: f64,
}

/// An ordered zero-crossing curve. Closed contours repeat the first point at
/// the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() > 1 => a == b,
            _ => false,
        }
    }
}

type RawPoint = (f64, f64);

/// Zero-level contours of `src` via marching squares.
///
/// A grid corner counts as "inside" when its value is strictly greater than
/// zero; crossing positions are linearly interpolated along cell edges, so
/// coordinates are sub-pixel. Saddle cells are disambiguated by connecting
/// the low side. Squares touching a NaN sample produce no segments. Contours
/// are reported in creation order (scan order top-left to bottom-right).
pub fn zero_contours(src: &Image<f64>) -> Vec<Contour> {
    assemble_contours(&collect_segments(src))
}

/// Interpolated crossing offset between two corner values.
fn fraction(from: f64, to: f64) -> f64 {
    if to == from {
        return 0.0;
    }
    -from / (to - from)
}

fn collect_segments(src: &Image<f64>) -> Vec<(RawPoint, RawPoint)> {
    let w = src.width();
    let h = src.height();
    let mut segments = Vec::new();
    if w < 2 || h < 2 {
        return segments;
    }

    let data = src.data();
    for r0 in 0..h - 1 {
        let r1 = r0 + 1;
        for c0 in 0..w - 1 {
            let c1 = c0 + 1;
            let ul = data[r0 * w + c0];
            let ur = data[r0 * w + c1];
            let ll = data[r1 * w + c0];
            let lr = data[r1 * w + c1];

            if ul.is_nan() || ur.is_nan() || ll.is_nan() || lr.is_nan() {
                continue;
            }

            let mut case = 0u8;
            if ul > 0.0 {
                case |= 1;
            }
            if ur > 0.0 {
                case |= 2;
            }
            if ll > 0.0 {
                case |= 4;
            }
            if lr > 0.0 {
                case |= 8;
            }
            if case == 0 || case == 15 {
                continue;
            }

            let rf0 = r0 as f64;
            let rf1 = r1 as f64;
            let cf0 = c0 as f64;
            let cf1 = c1 as f64;

            let top = (rf0, cf0 + fraction(ul, ur));
            let bottom = (rf1, cf0 + fraction(ll, lr));
            let left = (rf0 + fraction(ul, ll), cf0);
            let right = (rf0 + fraction(ur, lr), cf1);

            match case {
                1 => segments.push((top, left)),
                2 => segments.push((right, top)),
                3 => segments.push((right, left)),
                4 => segments.push((left, bottom)),
                5 => segments.push((top, bottom)),
                6 => {
                    // Saddle: connect the low-valued side.
                    segments.push((right, top));
                    segments.push((left, bottom));
                }
                7 => segments.push((right, bottom)),
                8 => segments.push((bottom, right)),
                9 => {
                    segments.push((top, left));
                    segments.push((bottom, right));
                }
                10 => segments.push((bottom, top)),
                11 => segments.push((bottom, left)),
                12 => segments.push((left, right)),
                13 => segments.push((top, right)),
                14 => segments.push((left, top)),
                _ => unreachable!("cases 0 and 15 are filtered above"),
            }
        }
    }

    segments
}

/// Bit key for exact endpoint matching. Shared cell edges compute the same
/// crossing from the same corner values, so matching is exact by
/// construction; negative zero is normalized to positive.
fn key(p: RawPoint) -> (u64, u64) {
    let norm = |v: f64| if v == 0.0 { 0.0f64 } else { v };
    (norm(p.0).to_bits(), norm(p.1).to_bits())
}

fn assemble_contours(segments: &[(RawPoint, RawPoint)]) -> Vec<Contour> {
    let mut chains: Vec<Option<VecDeque<RawPoint>>> = Vec::new();
    let mut starts: HashMap<(u64, u64), usize> = HashMap::new();
    let mut ends: HashMap<(u64, u64), usize> = HashMap::new();

    for &(from_p, to_p) in segments {
        if from_p == to_p {
            continue;
        }

        let tail_num = starts.remove(&key(to_p));
        let head_num = ends.remove(&key(from_p));

        match (tail_num, head_num) {
            (Some(t), Some(h)) if t == h => {
                // The chain closes on itself; repeat its first point.
                chains[t].as_mut().expect("chain slot is live").push_back(to_p);
            }
            (Some(t), Some(h)) if t > h => {
                // Append the younger tail chain onto the older head chain.
                let tail = chains[t].take().expect("chain slot is live");
                let head = chains[h].as_mut().expect("chain slot is live");
                head.extend(tail);
                starts.insert(key(*head.front().expect("chain is non-empty")), h);
                ends.insert(key(*head.back().expect("chain is non-empty")), h);
            }
            (Some(t), Some(h)) => {
                // Prepend the younger head chain onto the older tail chain.
                let head = chains[h].take().expect("chain slot is live");
                starts.remove(&key(*head.front().expect("chain is non-empty")));
                let tail = chains[t].as_mut().expect("chain slot is live");
                for p in head.into_iter().rev() {
                    tail.push_front(p);
                }
                starts.insert(key(*tail.front().expect("chain is non-empty")), t);
                ends.insert(key(*tail.back().expect("chain is non-empty")), t);
            }
            (Some(t), None) => {
                chains[t].as_mut().expect("chain slot is live").push_front(from_p);
                starts.insert(key(from_p), t);
            }
            (None, Some(h)) => {
                chains[h].as_mut().expect("chain slot is live").push_back(to_p);
                ends.insert(key(to_p), h);
            }
            (None, None) => {
                let idx = chains.len();
                chains.push(Some(VecDeque::from([from_p, to_p])));
                starts.insert(key(from_p), idx);
                ends.insert(key(to_p), idx);
            }
        }
    }

    chains
        .into_iter()
        .flatten()
        .map(|chain| Contour {
            points: chain
                .into_iter()
                .map(|(row, col)| ContourPoint { row, col })
                .collect(),
        })
        .collect()
}
