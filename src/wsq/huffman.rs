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
//! Canonical Huffman decode tables and the symbol decode loop (§4.4).

use crate::error::DecodeError;
use crate::wsq::bitstream::BitReader;
use crate::wsq::tables::HuffmanSpec;

/// Canonical (min/max/valptr) decode table, indexed `1..=16` by code
/// length; index `0` is unused.
#[derive(Debug, Clone)]
pub struct DecodeTable {
    mincode: [i32; 17],
    maxcode: [i32; 17],
    valptr: [usize; 17],
    values: Vec<u8>,
}

/// Builds the canonical table from a DHT sub-table's `bits`/`values`
/// (standard JPEG/NBIS canonical-code assignment).
pub fn build_table(spec: &HuffmanSpec) -> DecodeTable {
    let mut mincode = [0i32; 17];
    let mut maxcode = [-1i32; 17];
    let mut valptr = [0usize; 17];

    let mut code: i32 = 0;
    let mut p: usize = 0;
    for len in 1..=16usize {
        let count = spec.bits[len - 1] as i32;
        if count == 0 {
            maxcode[len] = -1;
        } else {
            valptr[len] = p;
            mincode[len] = code;
            code += count - 1;
            maxcode[len] = code;
            p += count as usize;
            code += 1;
        }
        code <<= 1;
    }

    DecodeTable { mincode, maxcode, valptr, values: spec.values.clone() }
}

/// What one decoded Huffman symbol produces in the quantized raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Zeros(u32),
    Value(i32),
}

fn read_bit_value(reader: &mut BitReader, bits: u32) -> Result<u32, DecodeError> {
    let mut v = 0u32;
    for _ in 0..bits {
        match reader.get_bit()? {
            Some(b) => v = (v << 1) | b as u32,
            None => {
                return Err(DecodeError::at(
                    "Unexpected marker inside a Huffman literal",
                    reader.offset(),
                ))
            }
        }
    }
    Ok(v)
}

fn symbol_from_nodeptr(nodeptr: u8, reader: &mut BitReader) -> Result<Symbol, DecodeError> {
    match nodeptr {
        1..=100 => Ok(Symbol::Zeros(nodeptr as u32)),
        101 => Ok(Symbol::Value(read_bit_value(reader, 8)? as i32)),
        102 => Ok(Symbol::Value(-(read_bit_value(reader, 8)? as i32))),
        103 => Ok(Symbol::Value(read_bit_value(reader, 16)? as i32)),
        104 => Ok(Symbol::Value(-(read_bit_value(reader, 16)? as i32))),
        105 => Ok(Symbol::Zeros(read_bit_value(reader, 8)?)),
        106 => Ok(Symbol::Zeros(read_bit_value(reader, 16)?)),
        107..=254 => Ok(Symbol::Value(nodeptr as i32 - 180)),
        _ => Err(DecodeError::at(
            format!("Huffman symbol {nodeptr} is out of the documented ranges"),
            reader.offset(),
        )),
    }
}

/// Decodes one Huffman symbol. `Ok(None)` means a marker was hit while
/// walking the code bits and the caller should abandon the current
/// block (the outer loop will route the marker).
pub fn decode_next(
    reader: &mut BitReader,
    table: &DecodeTable,
) -> Result<Option<Symbol>, DecodeError> {
    let mut code: i32 = 0;
    for len in 1..=16usize {
        let bit = match reader.get_bit()? {
            Some(b) => b,
            None => return Ok(None),
        };
        code = (code << 1) | bit as i32;
        if table.maxcode[len] != -1 && code <= table.maxcode[len] {
            let idx = table.valptr[len] + (code - table.mincode[len]) as usize;
            let nodeptr = *table
                .values
                .get(idx)
                .ok_or_else(|| DecodeError::at("Huffman value index out of range", reader.offset()))?;
            return Ok(Some(symbol_from_nodeptr(nodeptr, reader)?));
        }
    }
    Err(DecodeError::at(
        "Invalid Huffman code (no match within 16 bits)",
        reader.offset(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wsq::tables::HuffmanSpec;

    fn spec_single_bit_codes() -> HuffmanSpec {
        // Two 1-bit codes: 0 -> value 150 (literal 150-180=-30), 1 -> value 5 (zero-run of 5).
        let mut bits = [0u8; 16];
        bits[0] = 2;
        HuffmanSpec { bits, values: vec![150, 5] }
    }

    #[test]
    fn canonical_table_assigns_shortest_codes_first() {
        let table = build_table(&spec_single_bit_codes());
        assert_eq!(table.maxcode[1], 1);
        assert_eq!(table.mincode[1], 0);
        assert_eq!(table.valptr[1], 0);
    }

    #[test]
    fn decodes_literal_and_zero_run_symbols() {
        let table = build_table(&spec_single_bit_codes());
        // Bits: 0 then 1.
        let bytes = [0b0100_0000u8];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(decode_next(&mut reader, &table).unwrap(), Some(Symbol::Value(-30)));
        assert_eq!(decode_next(&mut reader, &table).unwrap(), Some(Symbol::Zeros(5)));
    }

    #[test]
    fn decodes_extended_literal_with_trailing_bits() {
        let mut bits = [0u8; 16];
        bits[0] = 1; // one 1-bit code -> symbol 101 (next 8-bit literal)
        let spec = HuffmanSpec { bits, values: vec![101] };
        let table = build_table(&spec);
        // code bit '0', then literal byte 0x2A (0,0,1,0,1,0,1,0), spanning two bytes.
        let bytes = [0b0001_0101u8, 0b0000_0000u8];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(decode_next(&mut reader, &table).unwrap(), Some(Symbol::Value(0x2A)));
    }

    #[test]
    fn nodeptr_100_is_a_zero_run_not_out_of_range() {
        assert_eq!(
            symbol_from_nodeptr(100, &mut BitReader::new(&[])).unwrap(),
            Symbol::Zeros(100)
        );
    }

    #[test]
    fn rejects_out_of_range_symbol() {
        let mut bits = [0u8; 16];
        bits[0] = 1;
        let spec = HuffmanSpec { bits, values: vec![0] }; // 0 is not in any documented range
        let table = build_table(&spec);
        let bytes = [0u8];
        let mut reader = BitReader::new(&bytes);
        assert!(decode_next(&mut reader, &table).is_err());
    }

    #[test]
    fn abandons_symbol_at_marker() {
        let table = build_table(&spec_single_bit_codes());
        let bytes = [0xFF, 0xA1]; // EOI right at the start
        let mut reader = BitReader::new(&bytes);
        assert_eq!(decode_next(&mut reader, &table).unwrap(), None);
    }
}
