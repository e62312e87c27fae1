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
//! CNT (content manifest, tag `1.03`) parser (§4.1 step 2).

use crate::eft::bytes::{RS, US};
use crate::eft::record::TagMap;
use crate::error::ParseError;

/// One manifest entry: `(record_type, idc)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CntEntry {
    pub record_type: u32,
    pub idc: u32,
}

/// Decodes the Type-1 `1.03` field into an ordered list of manifest
/// entries, discarding subfield 0 (it describes the Type-1 record
/// itself, not a physical record to parse).
pub fn parse_cnt(type1: &TagMap) -> Result<Vec<CntEntry>, ParseError> {
    let raw = type1
        .get("1.03")
        .ok_or_else(|| ParseError::new("Missing CNT field 1.03"))?;

    let mut subfields = raw.split(|c| c == RS as char);
    subfields.next(); // discard subfield 0

    let mut entries = Vec::new();
    for subfield in subfields {
        if subfield.is_empty() {
            continue;
        }
        let mut fields = subfield.split(|c| c == US as char);
        let record_type = fields
            .next()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .ok_or_else(|| ParseError::new("Malformed CNT"))?;
        let idc = fields
            .next()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .ok_or_else(|| ParseError::new("Malformed CNT"))?;
        entries.push(CntEntry { record_type, idc });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type1_with_cnt(cnt: &str) -> TagMap {
        let bytes = format!("1.01:0040\x1d1.03:{cnt}\x1c").into_bytes();
        crate::eft::record::parse_ascii_record(&bytes, 0, 1)
            .unwrap()
            .0
    }

    #[test]
    fn parses_entries_discarding_subfield_zero() {
        let map = type1_with_cnt("1\x1f03\x1e2\x1f00\x1e4\x1f01");
        let entries = parse_cnt(&map).unwrap();
        assert_eq!(
            entries,
            vec![
                CntEntry {
                    record_type: 2,
                    idc: 0
                },
                CntEntry {
                    record_type: 4,
                    idc: 1
                },
            ]
        );
    }

    #[test]
    fn fails_on_missing_cnt() {
        let bytes = b"1.01:0010\x1c".to_vec();
        let (map, _) = crate::eft::record::parse_ascii_record(&bytes, 0, 1).unwrap();
        assert!(parse_cnt(&map).is_err());
    }

    #[test]
    fn fails_on_malformed_subfield() {
        let map = type1_with_cnt("1\x1f03\x1eX\x1fY");
        assert!(parse_cnt(&map).is_err());
    }
}
