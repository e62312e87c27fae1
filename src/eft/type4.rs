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
//! Type-4 binary record reader (§3, §4.1 step 5): an 18-byte fixed
//! header followed by an opaque image payload.

use crate::eft::bytes::{read_u16_be, read_u32_be};
use crate::eft::cnt::CntEntry;
use crate::error::ParseError;
use crate::lookup;

pub const TYPE4_HEADER_SIZE: usize = 18;

/// One parsed Type-4 record.
#[derive(Debug, Clone)]
pub struct Type4Record {
    pub length: u32,
    pub idc: u8,
    pub impression_type: u8,
    pub finger_position: u8,
    pub isr: u8,
    pub width: u16,
    pub height: u16,
    pub compression: u8,
    pub image_data: Vec<u8>,
}

impl Type4Record {
    /// Scanning resolution in pixels per inch: `isr == 0` means 500 PPI,
    /// any other byte is surfaced verbatim (§4.1 edge policy, §9).
    pub fn ppi(&self) -> u32 {
        if self.isr == 0 { 500 } else { self.isr as u32 }
    }

    pub fn impression_name(&self) -> &'static str {
        lookup::impression_name(self.impression_type)
    }

    pub fn finger_name(&self) -> &'static str {
        lookup::finger_name(self.finger_position)
    }

    pub fn compression_name(&self) -> &'static str {
        lookup::compression_name(self.compression)
    }
}

/// Parses a Type-4 record at `offset`, checking it against the CNT entry
/// that named it. Returns the record and the absolute offset of the byte
/// following it.
pub fn parse_type4(
    bytes: &[u8],
    offset: usize,
    cnt_entry: &CntEntry,
) -> Result<(Type4Record, usize), ParseError> {
    if offset + TYPE4_HEADER_SIZE > bytes.len() {
        return Err(
            ParseError::at("Type-4 record smaller than header", offset).with_record_type(4),
        );
    }

    let length = read_u32_be(bytes, offset).map_err(|e| e.with_record_type(4))?;
    if length < TYPE4_HEADER_SIZE as u32 {
        return Err(
            ParseError::at("Type-4 record smaller than header", offset).with_record_type(4),
        );
    }
    if offset as u64 + length as u64 > bytes.len() as u64 {
        return Err(
            ParseError::at("Type-4 record exceeds buffer", offset).with_record_type(4),
        );
    }

    let idc = bytes[offset + 4];
    if idc as u32 != cnt_entry.idc {
        return Err(ParseError::at("IDC mismatch", offset).with_record_type(4));
    }

    let impression_type = bytes[offset + 5];
    let finger_position = bytes[offset + 6];
    let isr = bytes[offset + 12];
    let width = read_u16_be(bytes, offset + 13).map_err(|e| e.with_record_type(4))?;
    let height = read_u16_be(bytes, offset + 15).map_err(|e| e.with_record_type(4))?;
    let compression = bytes[offset + 17];

    let end = offset + length as usize;
    let image_data = bytes[offset + TYPE4_HEADER_SIZE..end].to_vec();

    let record = Type4Record {
        length,
        idc,
        impression_type,
        finger_position,
        isr,
        width,
        height,
        compression,
        image_data,
    };

    Ok((record, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(length: u32, idc: u8, fgp: u8, isr: u8, w: u16, h: u16, compression: u8) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(&length.to_be_bytes());
        v.push(idc);
        v.push(3); // impression_type
        v.push(fgp);
        v.extend_from_slice(&[0u8; 5]); // rest of FGP field
        v.push(isr);
        v.extend_from_slice(&w.to_be_bytes());
        v.extend_from_slice(&h.to_be_bytes());
        v.push(compression);
        v
    }

    #[test]
    fn parses_header_and_payload() {
        let mut bytes = header(22, 1, 6, 0, 5, 6, 0);
        bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);
        let entry = CntEntry { record_type: 4, idc: 1 };
        let (rec, end) = parse_type4(&bytes, 0, &entry).unwrap();
        assert_eq!(rec.width, 5);
        assert_eq!(rec.height, 6);
        assert_eq!(rec.ppi(), 500);
        assert_eq!(rec.image_data, vec![0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(end, bytes.len());
    }

    #[test]
    fn rejects_length_smaller_than_header() {
        let bytes = header(10, 1, 6, 0, 5, 6, 0);
        let entry = CntEntry { record_type: 4, idc: 1 };
        let err = parse_type4(&bytes, 0, &entry).unwrap_err();
        assert!(err.to_string().contains("smaller than header"));
    }

    #[test]
    fn rejects_length_exceeding_buffer() {
        let bytes = header(100, 1, 6, 0, 5, 6, 0);
        let entry = CntEntry { record_type: 4, idc: 1 };
        let err = parse_type4(&bytes, 0, &entry).unwrap_err();
        assert!(err.to_string().contains("exceeds buffer"));
    }

    #[test]
    fn rejects_idc_mismatch() {
        let bytes = header(18, 2, 6, 0, 0, 0, 0);
        let entry = CntEntry { record_type: 4, idc: 1 };
        let err = parse_type4(&bytes, 0, &entry).unwrap_err();
        assert!(err.to_string().contains("IDC mismatch"));
    }

    #[test]
    fn isr_nonzero_is_verbatim() {
        let bytes = header(18, 1, 6, 19, 0, 0, 0);
        let entry = CntEntry { record_type: 4, idc: 1 };
        let (rec, _) = parse_type4(&bytes, 0, &entry).unwrap();
        assert_eq!(rec.ppi(), 19);
    }
}
