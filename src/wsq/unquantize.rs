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
//! Per-subband dead-zone unquantization (§4.5).
//!
//! By the time `quantized` reaches this module it is already raster-
//! positioned: [`crate::wsq::frame`]'s entropy decode loop places each
//! decoded coefficient at its own `qtree` subband's raster offset as it
//! decodes, rather than handing over a flat decode-order sequence for
//! this module to reinterpret.

use crate::wsq::tables::DqtTable;
use crate::wsq::trees::{QuantNode, ACTIVE_SUBBANDS};

/// Reconstructs the float raster from quantized integers, writing each
/// `qtree` subband's cells at their rectangle's position.
pub fn unquantize(
    quantized: &[i32],
    width: usize,
    qtree: &[QuantNode; 64],
    dqt: &DqtTable,
) -> Vec<f32> {
    let mut raster = vec![0f32; quantized.len()];

    for (i, node) in qtree.iter().enumerate().take(ACTIVE_SUBBANDS) {
        let q_bin = dqt.q_bin[i];
        if q_bin == 0.0 {
            continue;
        }
        let z_bin = dqt.z_bin[i];
        let bin_center = dqt.bin_center;

        for dy in 0..node.rect.leny {
            for dx in 0..node.rect.lenx {
                let raster_idx = (node.rect.y + dy) * width + (node.rect.x + dx);
                let s = quantized[raster_idx];
                let fip = match s.cmp(&0) {
                    std::cmp::Ordering::Equal => 0.0,
                    std::cmp::Ordering::Greater => {
                        q_bin * (s as f32 - bin_center) + z_bin / 2.0
                    }
                    std::cmp::Ordering::Less => q_bin * (s as f32 + bin_center) - z_bin / 2.0,
                };
                raster[raster_idx] = fip;
            }
        }
    }

    raster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wsq::trees::build_qtree;

    fn flat_dqt(q_bin: f32, z_bin: f32, bin_center: f32) -> DqtTable {
        DqtTable { bin_center, q_bin: [q_bin; 64], z_bin: [z_bin; 64] }
    }

    #[test]
    fn zero_quantized_value_maps_to_zero() {
        let qtree = build_qtree(8, 8);
        let dqt = flat_dqt(1.0, 2.0, 0.5);
        let quantized = vec![0i32; 64];
        let raster = unquantize(&quantized, 8, &qtree, &dqt);
        assert!(raster.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn positive_and_negative_values_use_the_documented_formula() {
        let qtree = build_qtree(8, 8);
        let dqt = flat_dqt(2.0, 4.0, 1.0);
        let mut quantized = vec![0i32; 64];
        let idx0 = qtree[0].rect.y * 8 + qtree[0].rect.x;
        let idx1 = qtree[1].rect.y * 8 + qtree[1].rect.x;
        quantized[idx0] = 3; // positive
        quantized[idx1] = -3; // negative
        let raster = unquantize(&quantized, 8, &qtree, &dqt);
        assert_eq!(raster[idx0], 2.0 * (3.0 - 1.0) + 4.0 / 2.0);
        assert_eq!(raster[idx1], 2.0 * (-3.0 + 1.0) - 4.0 / 2.0);
    }

    #[test]
    fn zero_q_bin_subband_is_skipped() {
        let qtree = build_qtree(8, 8);
        let mut dqt = flat_dqt(2.0, 4.0, 1.0);
        dqt.q_bin[0] = 0.0;
        let mut quantized = vec![0i32; 64];
        let idx0 = qtree[0].rect.y * 8 + qtree[0].rect.x;
        quantized[idx0] = 5;
        let raster = unquantize(&quantized, 8, &qtree, &dqt);
        assert_eq!(raster[idx0], 0.0);
    }
}
