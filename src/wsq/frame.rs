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
//! SOF header parsing and the top-level `decode` entry point (§4.2, §4.7).

use crate::error::DecodeError;
use crate::wsq::bitstream::{BitReader, MarkerContext, COM, DHT, DQT, DTT, EOI, SOB, SOF};
use crate::wsq::huffman::{self, Symbol};
use crate::wsq::synthesis::synthesize;
use crate::wsq::tables::{self, DqtTable, DttFilters, HuffmanSpec};
use crate::wsq::trees::{build_qtree, QuantNode, Rect, ACTIVE_SUBBANDS};
use crate::wsq::unquantize::unquantize;

/// A decoded WSQ grayscale raster (§3, §6).
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

struct Sof {
    width: u16,
    height: u16,
    m_shift: f32,
    r_scale: f32,
}

fn read_scaled(reader: &mut BitReader) -> Result<f32, DecodeError> {
    let scale = reader.read_u8()?;
    let raw = reader.read_u16()?;
    Ok(raw as f32 / 10f32.powi(scale as i32))
}

/// Parses the SOF body (after the marker has been consumed): a 16-bit
/// table-size prefix, `black:u8, white:u8` (read, unused), `height`,
/// `width`, two scaled floats (`m_shift`, `r_scale`), `encoder:u8`, and
/// a 16-bit software field.
fn parse_sof(reader: &mut BitReader) -> Result<Sof, DecodeError> {
    let _table_size = reader.read_u16()?;
    let _black = reader.read_u8()?;
    let _white = reader.read_u8()?;
    let height = reader.read_u16()?;
    let width = reader.read_u16()?;
    let m_shift = read_scaled(reader)?;
    let r_scale = read_scaled(reader)?;
    let _encoder = reader.read_u8()?;
    let _software = reader.read_u16()?;
    Ok(Sof { width, height, m_shift, r_scale })
}

struct TableState {
    dtt: Option<DttFilters>,
    dqt: Option<DqtTable>,
    dht: [Option<HuffmanSpec>; 8],
}

impl TableState {
    fn new() -> Self {
        TableState { dtt: None, dqt: None, dht: Default::default() }
    }

    fn apply_marker(&mut self, marker: u16, reader: &mut BitReader) -> Result<(), DecodeError> {
        match marker {
            DTT => self.dtt = Some(tables::parse_dtt(reader)?),
            DQT => self.dqt = Some(tables::parse_dqt(reader)?),
            DHT => {
                for (slot, parsed) in self.dht.iter_mut().zip(tables::parse_dht(reader)?) {
                    if parsed.is_some() {
                        *slot = parsed;
                    }
                }
            }
            COM => tables::skip_com(reader)?,
            other => {
                return Err(DecodeError::at(
                    format!("Marker 0x{other:04X} is not a table marker"),
                    reader.offset(),
                ))
            }
        }
        Ok(())
    }
}

/// Tracks where the next decoded Huffman symbol lands in the output
/// raster (§4.5): `qtree`'s active subbands contribute their
/// `lenx * leny` cells to the entropy-coded stream in order, so a
/// dense, decode-order index does not correspond to a raster index once
/// a subband is narrower than the image (i.e. always, past the first
/// subband). Zero-area subbands (degenerate splits of a 1-pixel-wide
/// image) are skipped; they never appear in the coded stream.
struct RasterCursor {
    active: Vec<Rect>,
    total: usize,
    decoded: usize,
    subband: usize,
    cell: usize,
}

impl RasterCursor {
    fn new(qtree: &[QuantNode; 64]) -> Self {
        let active: Vec<Rect> = qtree[..ACTIVE_SUBBANDS]
            .iter()
            .map(|n| n.rect)
            .filter(|r| r.lenx > 0 && r.leny > 0)
            .collect();
        let total = active.iter().map(|r| r.lenx * r.leny).sum();
        RasterCursor { active, total, decoded: 0, subband: 0, cell: 0 }
    }

    fn done(&self) -> bool {
        self.decoded >= self.total
    }

    fn remaining(&self) -> usize {
        self.total - self.decoded
    }

    /// Advances past `n` zero-valued cells without writing; the raster
    /// starts zero-filled so there is nothing to do but move the cursor.
    fn skip_zeros(&mut self, mut n: usize) {
        while n > 0 {
            let rect = self.active[self.subband];
            let area = rect.lenx * rect.leny;
            let take = n.min(area - self.cell);
            self.cell += take;
            self.decoded += take;
            n -= take;
            if self.cell == area {
                self.subband += 1;
                self.cell = 0;
            }
        }
    }

    /// Writes one decoded value at the current cell's raster position
    /// and advances by one.
    fn place_value(&mut self, raster: &mut [i32], width: usize, value: i32) {
        let rect = self.active[self.subband];
        let dy = self.cell / rect.lenx;
        let dx = self.cell % rect.lenx;
        raster[(rect.y + dy) * width + (rect.x + dx)] = value;
        self.cell += 1;
        self.decoded += 1;
        if self.cell == rect.lenx * rect.leny {
            self.subband += 1;
            self.cell = 0;
        }
    }
}

/// Runs the Huffman decoding loop (§4.4): reads `TBLS_N_SOB` markers,
/// dispatching table markers to `tables` and entropy-coded symbols into
/// their `qtree` subband's raster position, until every active subband
/// cell has been decoded or `EOI` is seen.
fn decode_entropy(
    reader: &mut BitReader,
    tables: &mut TableState,
    width: usize,
    height: usize,
    qtree: &[QuantNode; 64],
) -> Result<Vec<i32>, DecodeError> {
    let mut raster = vec![0i32; width * height];
    let mut cursor = RasterCursor::new(qtree);
    let mut current_table = None;

    loop {
        if cursor.done() {
            break;
        }

        let Some(table) = &current_table else {
            let marker = reader.read_marker(MarkerContext::TblsAndSob)?;
            match marker {
                SOB => {
                    let _block_size = reader.read_u16()?;
                    let huff_id = reader.read_u8()?;
                    let spec = tables
                        .dht
                        .get(huff_id as usize)
                        .and_then(|t| t.as_ref())
                        .ok_or_else(|| {
                            DecodeError::at(
                                format!("SOB references undefined Huffman table {huff_id}"),
                                reader.offset(),
                            )
                        })?;
                    current_table = Some(huffman::build_table(spec));
                }
                EOI => {
                    return Err(DecodeError::at(
                        "Unexpected EOI before the image was fully decoded",
                        reader.offset(),
                    ))
                }
                other => tables.apply_marker(other, reader)?,
            }
            continue;
        };

        match huffman::decode_next(reader, table)? {
            Some(Symbol::Zeros(n)) => {
                let n = n as usize;
                if n > cursor.remaining() {
                    return Err(DecodeError::at(
                        "Huffman zero-run exceeds the declared image size",
                        reader.offset(),
                    ));
                }
                cursor.skip_zeros(n);
            }
            Some(Symbol::Value(v)) => {
                if cursor.done() {
                    return Err(DecodeError::at(
                        "Huffman literal exceeds the declared image size",
                        reader.offset(),
                    ));
                }
                cursor.place_value(&mut raster, width, v);
            }
            None => current_table = None, // marker hit; outer loop routes it
        }
    }

    Ok(raster)
}

/// Converts synthesized floats to bytes (§4.7): `p = f * r_scale +
/// m_shift + 0.5`, clamped to `[0, 255]` and truncated.
fn floats_to_bytes(raster: &[f32], m_shift: f32, r_scale: f32) -> Vec<u8> {
    raster
        .iter()
        .map(|&f| {
            let p = f * r_scale + m_shift + 0.5;
            p.clamp(0.0, 255.0) as u8
        })
        .collect()
}

/// Decodes a WSQ-compressed grayscale image (§4.2–§4.7), the top-level
/// entry point the rest of the crate calls `decode`.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let mut reader = BitReader::new(bytes);
    reader.read_marker(MarkerContext::Soi)?;

    let mut tables = TableState::new();
    let sof = loop {
        let marker = reader.read_marker(MarkerContext::TblsAndSof)?;
        match marker {
            SOF => break parse_sof(&mut reader)?,
            EOI => {
                return Err(DecodeError::at(
                    "Unexpected EOI before SOF",
                    reader.offset(),
                ))
            }
            other => tables.apply_marker(other, &mut reader)?,
        }
    };

    let width = sof.width as usize;
    let height = sof.height as usize;

    let qtree = build_qtree(width, height);

    let quantized = decode_entropy(&mut reader, &mut tables, width, height, &qtree)?;

    let dqt = tables
        .dqt
        .ok_or_else(|| DecodeError::new("No DQT table present before frame reconstruction"))?;
    let dtt = tables
        .dtt
        .ok_or_else(|| DecodeError::new("No DTT table present before frame reconstruction"))?;

    let mut raster = unquantize(&quantized, width, &qtree, &dqt);
    synthesize(&mut raster, width, height, &dtt);

    let pixels = floats_to_bytes(&raster, sof.m_shift, sof.r_scale);

    Ok(DecodedImage { width, height, pixels })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fails_without_leading_soi() {
        let bytes = [0xFF, 0xA1]; // EOI, not SOI
        let err = decode(&bytes).unwrap_err();
        assert!(err.to_string().contains("not valid here"));
    }

    #[test]
    fn fails_on_truncated_stream_after_soi() {
        let bytes = [0xFF, 0xA0]; // SOI only, nothing after
        let err = decode(&bytes).unwrap_err();
        assert!(err.to_string().contains("Unexpected end of data"));
    }

    #[test]
    fn fails_on_eoi_before_sof() {
        let mut bytes = vec![0xFF, 0xA0]; // SOI
        bytes.extend_from_slice(&[0xFF, 0xA1]); // EOI
        let err = decode(&bytes).unwrap_err();
        assert!(err.to_string().contains("before SOF"));
    }

    #[test]
    fn raster_cursor_total_spans_every_active_subband_cell() {
        let qtree = build_qtree(8, 8);
        let cursor = RasterCursor::new(&qtree);
        assert_eq!(cursor.total, 64);
    }

    #[test]
    fn raster_cursor_places_a_value_at_its_subband_rectangle_not_index_zero() {
        let qtree = build_qtree(8, 8);
        let mut cursor = RasterCursor::new(&qtree);
        let mut raster = vec![0i32; 64];

        cursor.place_value(&mut raster, 8, 42);

        let first = qtree[0].rect;
        let pos = first.y * 8 + first.x;
        assert_eq!(raster[pos], 42);
        // qtree[0] is a detail subband, not the top-left corner of the
        // image: a flat decode-order write (the bug under test) would
        // have landed at raster[0] instead.
        if pos != 0 {
            assert_eq!(raster[0], 0);
        }
    }

    #[test]
    fn raster_cursor_skip_zeros_crosses_subband_boundaries() {
        let qtree = build_qtree(8, 8);
        let mut cursor = RasterCursor::new(&qtree);
        let first_area = qtree[0].rect.lenx * qtree[0].rect.leny;

        cursor.skip_zeros(first_area);
        assert_eq!(cursor.subband, 1);
        assert_eq!(cursor.cell, 0);
        assert_eq!(cursor.decoded, first_area);
    }
}
