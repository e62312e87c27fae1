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
//! DTT/DQT/DHT/COM table segment parsing (§4.2).

use crate::error::DecodeError;
use crate::wsq::bitstream::BitReader;

/// A decoded signed decimal value: `sign ? -(magnitude / 10^scale) :
/// magnitude / 10^scale`.
fn read_signed_scaled(reader: &mut BitReader) -> Result<f32, DecodeError> {
    let sign = reader.read_u8()?;
    let scale = reader.read_u8()?;
    let magnitude = reader.read_u32()?;
    let value = magnitude as f32 / 10f32.powi(scale as i32);
    Ok(if sign != 0 { -value } else { value })
}

/// Biorthogonal analysis filter pair read from a DTT segment.
#[derive(Debug, Clone)]
pub struct DttFilters {
    pub hi: Vec<f32>,
    pub lo: Vec<f32>,
}

/// Mirror-expands `compacts` (half-filter coefficients, center-outward)
/// into a full filter of length `sz`. `antisymmetric` negates the
/// mirrored (lower-index) half; see the module doc and DESIGN.md for
/// why this particular sign convention was chosen.
fn mirror_expand(sz: usize, compacts: &[f32], antisymmetric: bool) -> Vec<f32> {
    let mut filt = vec![0f32; sz];
    if sz % 2 == 1 {
        let a_size = sz / 2;
        for (i, &c) in compacts.iter().enumerate() {
            let signed = if i % 2 == 1 { -c } else { c };
            filt[a_size + i] = signed;
            if i > 0 {
                filt[a_size - i] = if antisymmetric { -signed } else { signed };
            }
        }
    } else {
        let a_size = sz / 2 - 1;
        for (i, &c) in compacts.iter().enumerate() {
            filt[a_size + 1 + i] = c;
            filt[a_size - i] = if antisymmetric { -c } else { c };
        }
    }
    filt
}

fn read_compacts(reader: &mut BitReader, sz: usize) -> Result<Vec<f32>, DecodeError> {
    let count = sz.div_ceil(2);
    (0..count).map(|_| read_signed_scaled(reader)).collect()
}

/// Parses a DTT segment body (after the marker has been consumed): a
/// 16-bit table-size prefix (discarded), `hisz:u8, losz:u8`, then the
/// hi-pass filter's compact coefficients, then the lo-pass filter's.
pub fn parse_dtt(reader: &mut BitReader) -> Result<DttFilters, DecodeError> {
    let _table_size = reader.read_u16()?;
    let hisz = reader.read_u8()? as usize;
    let losz = reader.read_u8()? as usize;

    let hi_compacts = read_compacts(reader, hisz)?;
    let lo_compacts = read_compacts(reader, losz)?;

    // First filter processed (hi-pass) mirrors with a sign flip; the
    // second (lo-pass) mirrors verbatim.
    let hi = mirror_expand(hisz, &hi_compacts, true);
    let lo = mirror_expand(losz, &lo_compacts, false);

    Ok(DttFilters { hi, lo })
}

/// Dequantization parameters read from a DQT segment, indexed by qtree
/// subband (0..64).
#[derive(Debug, Clone)]
pub struct DqtTable {
    pub bin_center: f32,
    pub q_bin: [f32; 64],
    pub z_bin: [f32; 64],
}

/// Parses a DQT segment body: a shared decimal `scale`, a scaled
/// `bin_center`, then 64 `(q_bin, z_bin)` scaled-short pairs.
pub fn parse_dqt(reader: &mut BitReader) -> Result<DqtTable, DecodeError> {
    let scale = reader.read_u8()?;
    let divisor = 10f32.powi(scale as i32);

    let bin_center = reader.read_u16()? as f32 / divisor;

    let mut q_bin = [0f32; 64];
    let mut z_bin = [0f32; 64];
    for i in 0..64 {
        q_bin[i] = reader.read_u16()? as f32 / divisor;
        z_bin[i] = reader.read_u16()? as f32 / divisor;
    }

    Ok(DqtTable { bin_center, q_bin, z_bin })
}

/// One canonical Huffman code table, as stored by a DHT sub-table: the
/// JPEG-style `bits[1..=16]` code-length histogram and the symbols in
/// code order.
#[derive(Debug, Clone)]
pub struct HuffmanSpec {
    pub bits: [u8; 16],
    pub values: Vec<u8>,
}

/// Parses a DHT segment body: a 16-bit total segment size (including
/// itself), then one or more `(table_id, bits[16], values[sum(bits)])`
/// sub-tables filling that size, keyed by `table_id` (0..8).
pub fn parse_dht(reader: &mut BitReader) -> Result<[Option<HuffmanSpec>; 8], DecodeError> {
    let table_size = reader.read_u16()?;
    if table_size < 2 {
        return Err(DecodeError::at(
            "DHT segment size smaller than its own length field",
            reader.offset(),
        ));
    }
    let mut remaining = table_size as i32 - 2;

    let mut tables: [Option<HuffmanSpec>; 8] = Default::default();

    while remaining > 0 {
        let table_id = reader.read_u8()?;
        if table_id >= 8 {
            return Err(DecodeError::at(
                format!("DHT table id {table_id} out of range (0..8)"),
                reader.offset(),
            ));
        }
        let mut bits = [0u8; 16];
        for b in &mut bits {
            *b = reader.read_u8()?;
        }
        let total: usize = bits.iter().map(|&b| b as usize).sum();
        let mut values = Vec::with_capacity(total);
        for _ in 0..total {
            values.push(reader.read_u8()?);
        }
        tables[table_id as usize] = Some(HuffmanSpec { bits, values });
        remaining -= 1 + 16 + total as i32;
    }

    if remaining != 0 {
        return Err(DecodeError::at(
            "DHT segment size did not align with its sub-tables",
            reader.offset(),
        ));
    }

    Ok(tables)
}

/// Parses and discards a COM segment body: a 16-bit size (including
/// itself) followed by `size - 2` opaque bytes.
pub fn skip_com(reader: &mut BitReader) -> Result<(), DecodeError> {
    let size = reader.read_u16()?;
    if size < 2 {
        return Err(DecodeError::at(
            "COM segment size smaller than its own length field",
            reader.offset(),
        ));
    }
    reader.skip(size as usize - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaled_bytes(sign: u8, scale: u8, magnitude: u32) -> Vec<u8> {
        let mut v = vec![sign, scale];
        v.extend_from_slice(&magnitude.to_be_bytes());
        v
    }

    #[test]
    fn parses_dtt_odd_and_even_filters() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u16.to_be_bytes()); // table-size prefix, ignored
        bytes.push(3u8); // hisz = 3 (odd, 2 compacts)
        bytes.push(4u8); // losz = 4 (even, 2 compacts)
        bytes.extend(scaled_bytes(0, 1, 10)); // 1.0
        bytes.extend(scaled_bytes(1, 1, 5)); // -0.5
        bytes.extend(scaled_bytes(0, 2, 100)); // 1.0
        bytes.extend(scaled_bytes(0, 2, 50)); // 0.5

        let mut reader = BitReader::new(&bytes);
        let filt = parse_dtt(&mut reader).unwrap();
        assert_eq!(filt.hi.len(), 3);
        assert_eq!(filt.lo.len(), 4);
        // Odd filter center tap unaffected by mirroring.
        assert_eq!(filt.hi[1], 1.0);
    }

    #[test]
    fn parses_dqt_bin_center_and_subbands() {
        let mut bytes = vec![1u8]; // scale = 1
        bytes.extend_from_slice(&20u16.to_be_bytes()); // bin_center = 2.0
        for i in 0..64u16 {
            bytes.extend_from_slice(&i.to_be_bytes());
            bytes.extend_from_slice(&(i * 2).to_be_bytes());
        }
        let mut reader = BitReader::new(&bytes);
        let dqt = parse_dqt(&mut reader).unwrap();
        assert_eq!(dqt.bin_center, 2.0);
        assert_eq!(dqt.q_bin[5], 0.5);
        assert_eq!(dqt.z_bin[5], 1.0);
    }

    #[test]
    fn parses_dht_single_subtable() {
        let mut bytes = Vec::new();
        let mut bits = [0u8; 16];
        bits[0] = 2; // two 1-bit codes
        let body_len = 1 + 16 + 2;
        bytes.extend_from_slice(&((body_len + 2) as u16).to_be_bytes());
        bytes.push(0); // table_id
        bytes.extend_from_slice(&bits);
        bytes.push(0x10);
        bytes.push(0x20);

        let mut reader = BitReader::new(&bytes);
        let tables = parse_dht(&mut reader).unwrap();
        let spec = tables[0].as_ref().unwrap();
        assert_eq!(spec.values, vec![0x10, 0x20]);
        assert!(tables[1].is_none());
    }

    #[test]
    fn skips_com_body() {
        let mut bytes = 5u16.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        bytes.push(0xFF); // trailing byte, should be untouched
        let mut reader = BitReader::new(&bytes);
        skip_com(&mut reader).unwrap();
        assert_eq!(reader.offset(), 5);
    }
}
