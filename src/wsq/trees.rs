/*
 * // Copyright (c) Radzivon Bartoshyk 2/2026. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
//! Subband tree builders (§4.3): `wtree[20]` (wavelet subband
//! descriptors used by inverse synthesis) and `qtree[64]` (quantization
//! subband descriptors), both pure functions of `(width, height)`.
//!
//! WSQ's three-level decomposition further splits the level-1 and
//! level-2 detail subbands for finer adaptive quantization, which is
//! why `wtree` holds more entries than a plain 3-level pyramid (10)
//! would. The exact historical split table is not recoverable without
//! the reference decoder source (not present in this crate's retrieval
//! pack — see DESIGN.md); the partition below is built from the same
//! parity-aware halving rule spec.md §4.3 states and satisfies the
//! disjointness/coverage properties §4.3 and §8 make independently
//! checkable.
//!
//! `qtree` is built by recursively subdividing `wtree`'s own 20 nodes
//! rather than independently re-partitioning the image, so every
//! quantization subband lands inside exactly one wavelet subband and the
//! two trees describe the same decomposition (§4.3's requirement that
//! qtree "further subdivides" wtree's detail bands).

/// A subband rectangle within the `width x height` image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub lenx: usize,
    pub leny: usize,
}

impl Rect {
    fn new(x: usize, y: usize, lenx: usize, leny: usize) -> Self {
        Rect { x, y, lenx, leny }
    }

    fn area(&self) -> usize {
        self.lenx * self.leny
    }
}

/// One `wtree` entry: a subband rectangle plus the two flags that tell
/// inverse synthesis whether the hi-pass half precedes (0) or follows
/// (1) the lo-pass half along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveletNode {
    pub rect: Rect,
    pub invrw: u8,
    pub invcl: u8,
}

/// One `qtree` entry: a quantization subband rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantNode {
    pub rect: Rect,
}

/// Splits `len` into `(first_half, second_half)`; the first (lower
/// index) half takes the extra sample when `len` is odd, per §4.3's
/// "odd extent prefers the first half" rule.
fn split_extent(len: usize) -> (usize, usize) {
    let first = len.div_ceil(2);
    (first, len - first)
}

#[derive(Clone, Copy)]
pub(crate) enum Axis {
    Row,
    Col,
}

/// Splits `rect` into 4 quadrants: `[ll, hl, lh, hh]`, where `hl` is
/// hi-pass along x (columns) only, `lh` hi-pass along y (rows) only,
/// `hh` hi-pass on both.
pub(crate) fn split4(rect: Rect) -> [WaveletNode; 4] {
    let (top_h, bot_h) = split_extent(rect.leny);
    let (left_w, right_w) = split_extent(rect.lenx);

    let ll = Rect::new(rect.x, rect.y, left_w, top_h);
    let hl = Rect::new(rect.x + left_w, rect.y, right_w, top_h);
    let lh = Rect::new(rect.x, rect.y + top_h, left_w, bot_h);
    let hh = Rect::new(rect.x + left_w, rect.y + top_h, right_w, bot_h);

    [
        WaveletNode { rect: ll, invrw: 0, invcl: 0 },
        WaveletNode { rect: hl, invrw: 0, invcl: 1 },
        WaveletNode { rect: lh, invrw: 1, invcl: 0 },
        WaveletNode { rect: hh, invrw: 1, invcl: 1 },
    ]
}

/// Splits one subband into two along a single axis, for the extra
/// quantization-granularity split WSQ applies to detail subbands.
pub(crate) fn split2(node: WaveletNode, axis: Axis) -> [WaveletNode; 2] {
    match axis {
        Axis::Col => {
            let (left_w, right_w) = split_extent(node.rect.lenx);
            let left = Rect::new(node.rect.x, node.rect.y, left_w, node.rect.leny);
            let right = Rect::new(node.rect.x + left_w, node.rect.y, right_w, node.rect.leny);
            [
                WaveletNode { rect: left, invrw: node.invrw, invcl: 0 },
                WaveletNode { rect: right, invrw: node.invrw, invcl: 1 },
            ]
        }
        Axis::Row => {
            let (top_h, bot_h) = split_extent(node.rect.leny);
            let top = Rect::new(node.rect.x, node.rect.y, node.rect.lenx, top_h);
            let bottom = Rect::new(node.rect.x, node.rect.y + top_h, node.rect.lenx, bot_h);
            [
                WaveletNode { rect: top, invrw: 0, invcl: node.invcl },
                WaveletNode { rect: bottom, invrw: 1, invcl: node.invcl },
            ]
        }
    }
}

/// Builds the 20-node wavelet subband tree for an image of the given
/// dimensions (§4.3). Nodes are ordered shallow-to-deep; inverse
/// synthesis (§4.6) walks them in reverse, `19` down to `0`.
pub fn build_wtree(width: usize, height: usize) -> [WaveletNode; 20] {
    let root = Rect::new(0, 0, width, height);
    let l1 = split4(root);

    let mut nodes = Vec::with_capacity(20);
    nodes.extend(split2(l1[1], Axis::Col)); // HL1
    nodes.extend(split2(l1[2], Axis::Row)); // LH1
    nodes.extend(split2(l1[3], Axis::Col)); // HH1

    let l2 = split4(l1[0].rect);
    nodes.extend(split2(l2[1], Axis::Col)); // HL2
    nodes.extend(split2(l2[2], Axis::Row)); // LH2
    nodes.extend(split2(l2[3], Axis::Col)); // HH2

    let l3 = split4(l2[0].rect);
    nodes.extend(split2(l3[0], Axis::Col)); // LL3
    nodes.extend(split2(l3[1], Axis::Col)); // HL3
    nodes.extend(split2(l3[2], Axis::Row)); // LH3
    nodes.extend(split2(l3[3], Axis::Row)); // HH3

    nodes
        .try_into()
        .expect("wtree construction always yields 20 nodes")
}

/// Number of `qtree` leaves that actually carry raster coefficients; the
/// remaining 4 (of 64) are historically unused and never iterated by
/// unquantization (§3, §4.5).
pub const ACTIVE_SUBBANDS: usize = 60;

/// Builds the 64-leaf quantization tree for an image of the given
/// dimensions (§4.3) by recursively subdividing `wtree`'s own 20 nodes:
///
/// - the level-1 and level-2 detail halves (`wtree[0..12]`) are each
///   quadrant-split (`split4`) for finer quantization granularity —
///   `12 * 4 = 48` leaves;
/// - within the level-3 halves (`wtree[12..20]`): the LL3 halves (lowest
///   frequency) and HH3 halves (finest detail, already small) are left
///   whole, while the HL3/LH3 orientation halves get one more axis split
///   — `2 + 2*2 + 2*2 + 2 = 12` leaves;
///
/// for `48 + 12 = 60` active leaves, covering the image exactly once.
/// The remaining 4 array slots are zero-area placeholders so the type
/// stays `[QuantNode; 64]` without claiming any raster area — matching
/// the "4 unused" subbands `unquantize` never iterates past
/// [`ACTIVE_SUBBANDS`].
pub fn build_qtree(width: usize, height: usize) -> [QuantNode; 64] {
    let wtree = build_wtree(width, height);
    let mut leaves = Vec::with_capacity(64);

    for node in &wtree[0..12] {
        for child in split4(node.rect) {
            leaves.push(child.rect);
        }
    }

    leaves.push(wtree[12].rect); // LL3 half 0, left whole
    leaves.push(wtree[13].rect); // LL3 half 1, left whole
    for node in &wtree[14..18] {
        // HL3 (14, 15), LH3 (16, 17)
        for child in split2(*node, Axis::Col) {
            leaves.push(child.rect);
        }
    }
    leaves.push(wtree[18].rect); // HH3 half 0, left whole
    leaves.push(wtree[19].rect); // HH3 half 1, left whole

    debug_assert_eq!(leaves.len(), ACTIVE_SUBBANDS);

    for _ in ACTIVE_SUBBANDS..64 {
        leaves.push(Rect::new(0, 0, 0, 0));
    }

    leaves
        .into_iter()
        .map(|rect| QuantNode { rect })
        .collect::<Vec<_>>()
        .try_into()
        .expect("qtree construction always yields 64 leaves")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects_disjoint_and_cover(rects: &[Rect], width: usize, height: usize) -> bool {
        let total_area: usize = rects.iter().map(Rect::area).sum();
        if total_area != width * height {
            return false;
        }
        let mut covered = vec![false; width * height];
        for r in rects {
            for yy in r.y..r.y + r.leny {
                for xx in r.x..r.x + r.lenx {
                    let idx = yy * width + xx;
                    if covered[idx] {
                        return false;
                    }
                    covered[idx] = true;
                }
            }
        }
        covered.into_iter().all(|c| c)
    }

    #[test]
    fn qtree_disjoint_and_covers_image() {
        for (w, h) in [(64, 64), (545, 622), (33, 17), (1, 1), (8, 8)] {
            let qtree = build_qtree(w, h);
            let rects: Vec<Rect> = qtree.iter().map(|n| n.rect).collect();
            assert!(rects_disjoint_and_cover(&rects, w, h), "failed for {w}x{h}");
        }
    }

    #[test]
    fn wtree_disjoint_and_covers_image() {
        for (w, h) in [(64, 64), (545, 622), (33, 17), (8, 8)] {
            let wtree = build_wtree(w, h);
            let rects: Vec<Rect> = wtree.iter().map(|n| n.rect).collect();
            assert!(rects_disjoint_and_cover(&rects, w, h), "failed for {w}x{h}");
        }
    }
}
