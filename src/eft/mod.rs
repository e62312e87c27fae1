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
//! EFT (ANSI/NIST-ITL transmission file) parser (§3, §4.1).
//!
//! Decodes the mixed text/binary container: delimited-ASCII Type-1 and
//! Type-2 records, and fixed-width binary Type-4 records, linked by the
//! Type-1 `1.03` content manifest (CNT).

pub mod bytes;
pub mod cnt;
pub mod record;
pub mod type2;
pub mod type4;

use self::cnt::parse_cnt;
use self::record::{parse_ascii_record, TagMap};
use self::type2::Demographics;
use self::type4::{parse_type4, Type4Record};
use crate::error::ParseError;

/// Top-level parse result: a decoded EFT container (§3).
#[derive(Debug, Clone)]
pub struct EftFile {
    pub type1: TagMap,
    pub type2: Demographics,
    pub type4_records: Vec<Type4Record>,
    pub file_size: usize,
}

/// Parses an EFT byte buffer into an [`EftFile`], or fails with the
/// first ill-formed record encountered (§4.1, §4.8).
pub fn parse(bytes: &[u8]) -> Result<EftFile, ParseError> {
    let (type1, offset) = parse_ascii_record(bytes, 0, 1)?;
    let cnt_entries = parse_cnt(&type1)?;

    let mut offset = offset;
    let mut type2 = None;
    let mut type4_records = Vec::new();

    for entry in &cnt_entries {
        match entry.record_type {
            2 => {
                let (raw, next) = parse_ascii_record(bytes, offset, 2)?;
                type2 = Some(type2::shape(raw));
                offset = next;
            }
            4 => {
                let (record, next) = parse_type4(bytes, offset, entry)?;
                type4_records.push(record);
                offset = next;
            }
            other => {
                return Err(
                    ParseError::at(format!("Unsupported record type {other}"), offset)
                        .with_record_type(other),
                );
            }
        }
    }

    let type2 = type2.unwrap_or_default();

    Ok(EftFile {
        type1,
        type2,
        type4_records,
        file_size: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii_record(tag_len: &str, segments: &[&str]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(tag_len.as_bytes());
        out.push(0x1d);
        out.extend_from_slice(segments.join("\x1d").as_bytes());
        out.push(0x1c);
        out
    }

    fn type4_bytes(length: u32, idc: u8, fgp: u8) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(&length.to_be_bytes());
        v.push(idc);
        v.push(1); // impression
        v.push(fgp);
        v.extend_from_slice(&[0u8; 5]);
        v.push(0); // isr -> 500 ppi
        v.extend_from_slice(&5u16.to_be_bytes());
        v.extend_from_slice(&6u16.to_be_bytes());
        v.push(0); // compression -> WSQ
        let header_len = v.len();
        let payload_len = length as usize - header_len;
        v.extend(std::iter::repeat(0xABu8).take(payload_len));
        v
    }

    #[test]
    fn parses_minimal_eft() {
        // Declared lengths (T.01/2.01) are the record's own byte span
        // including its FS terminator; computed by hand here and checked
        // by the assertions below (a wrong length would misalign the
        // Type-4 record and fail to parse).
        let type1 =
            "1.01:0030\x1d1.03:1\x1f03\x1e2\x1f00\x1e4\x1f00\x1c".as_bytes().to_vec();
        let type2 = ascii_record("2.01:0030", &["2.018:SCOTT,MICHAEL"]);
        let t4 = type4_bytes(24, 0, 6);

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&type1);
        bytes.extend_from_slice(&type2);
        bytes.extend_from_slice(&t4);

        let eft = parse(&bytes).unwrap();
        assert_eq!(eft.type4_records.len(), 1);
        assert_eq!(eft.type4_records[0].finger_position, 6);
        assert_eq!(eft.type4_records[0].width, 5);
        assert_eq!(eft.type4_records[0].height, 6);
        assert_eq!(
            eft.type2.name.as_ref().unwrap().full_name(),
            "Michael Scott"
        );
        assert_eq!(eft.file_size, bytes.len());
    }

    #[test]
    fn fails_on_unsupported_record_type() {
        let type1 = "1.01:0030\x1d1.03:1\x1f03\x1e2\x1f00\x1e3\x1f00\x1c".as_bytes().to_vec();
        let type2 = ascii_record("2.01:0030", &["2.018:SCOTT,MICHAEL"]);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&type1);
        bytes.extend_from_slice(&type2);

        let err = parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("Unsupported record type 3"));
    }
}
