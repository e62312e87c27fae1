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
//! Delimiter constants and bounds-checked big-endian reads (§2, §6).

use crate::error::ParseError;

/// Field separator — terminates an ASCII Type-1/Type-2 record.
pub const FS: u8 = 0x1C;
/// Group separator — separates tag:value segments within a record.
pub const GS: u8 = 0x1D;
/// Record separator — separates CNT subfields.
pub const RS: u8 = 0x1E;
/// Unit separator — separates fields within a CNT subfield.
pub const US: u8 = 0x1F;

/// Reads a big-endian `u16` at `offset`, failing if it would run past `buf`.
pub fn read_u16_be(buf: &[u8], offset: usize) -> Result<u16, ParseError> {
    if offset + 2 > buf.len() {
        return Err(ParseError::at("Unexpected end of data", offset));
    }
    Ok(u16::from_be_bytes([buf[offset], buf[offset + 1]]))
}

/// Reads a big-endian `u32` at `offset`, failing if it would run past `buf`.
pub fn read_u32_be(buf: &[u8], offset: usize) -> Result<u32, ParseError> {
    if offset + 4 > buf.len() {
        return Err(ParseError::at("Unexpected end of data", offset));
    }
    Ok(u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_be_u16() {
        assert_eq!(read_u16_be(&[0x01, 0x02], 0).unwrap(), 0x0102);
    }

    #[test]
    fn reads_be_u32() {
        assert_eq!(read_u32_be(&[0x00, 0x00, 0x02, 0x31], 0).unwrap(), 0x0231);
    }

    #[test]
    fn rejects_truncated_reads() {
        assert!(read_u16_be(&[0x01], 0).is_err());
        assert!(read_u32_be(&[0x01, 0x02, 0x03], 0).is_err());
    }
}
