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
//! ASCII record reader (§4.1): splits one GS-delimited, FS-terminated
//! record into an ordered `tag -> value` map and locates its declared
//! length.

use crate::eft::bytes::{FS, GS};
use crate::error::ParseError;

/// Ordered `tag -> value` map, preserving the order tags appeared in the
/// source record (per §3 "ordered mapping").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: Vec<(String, String)>,
}

impl TagMap {
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, tag: String, value: String) {
        self.entries.push((tag, value));
    }
}

/// Parses one ASCII record starting at `offset`. Returns the tag map and
/// the absolute offset immediately following the record.
pub fn parse_ascii_record(
    bytes: &[u8],
    offset: usize,
    record_type: u32,
) -> Result<(TagMap, usize), ParseError> {
    let tail = bytes.get(offset..).ok_or_else(|| {
        ParseError::at("Record offset past end of input", offset).with_record_type(record_type)
    })?;
    let fs_pos = tail
        .iter()
        .position(|&b| b == FS)
        .map(|p| offset + p)
        .ok_or_else(|| {
            ParseError::at("No FS terminator", offset).with_record_type(record_type)
        })?;

    let content = &bytes[offset..fs_pos];
    let mut map = TagMap::default();

    for segment in content.split(|&b| b == GS) {
        let Some(colon) = segment.iter().position(|&b| b == b':') else {
            continue;
        };
        let tag = String::from_utf8_lossy(&segment[..colon]).into_owned();
        let value = String::from_utf8_lossy(&segment[colon + 1..]).into_owned();
        map.push(tag, value);
    }

    let length_tag = format!("{record_type}.01");
    let next_offset = match map.get(&length_tag).and_then(|v| v.trim().parse::<usize>().ok()) {
        Some(declared_length) => offset + declared_length,
        None => fs_pos + 1,
    };

    Ok((map, next_offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(segments: &[&str]) -> Vec<u8> {
        let mut out = segments.join("\x1d").into_bytes();
        out.push(FS);
        out
    }

    #[test]
    fn splits_tag_value_segments() {
        let bytes = record(&["1.01:0040", "1.03:1\x1e03\x1f02\x1e04\x1f01"]);
        let (map, advance) = parse_ascii_record(&bytes, 0, 1).unwrap();
        assert_eq!(map.get("1.01"), Some("0040"));
        assert_eq!(advance, 40);
    }

    #[test]
    fn falls_back_to_fs_position_when_length_tag_absent() {
        let bytes = record(&["1.02:whatever"]);
        let (map, advance) = parse_ascii_record(&bytes, 0, 1).unwrap();
        assert_eq!(map.get("1.01"), None);
        assert_eq!(advance, bytes.len());
    }

    #[test]
    fn skips_segments_without_a_colon() {
        let bytes = record(&["1.01:0010", "garbage-no-colon"]);
        let (map, _) = parse_ascii_record(&bytes, 0, 1).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn fails_gracefully_when_offset_past_end() {
        let bytes = record(&["1.01:0005"]);
        let err = parse_ascii_record(&bytes, bytes.len() + 1, 1).unwrap_err();
        assert!(err.to_string().contains("past end of input"));
    }

    #[test]
    fn fails_without_fs_terminator() {
        let bytes = b"no terminator here".to_vec();
        let err = parse_ascii_record(&bytes, 0, 1).unwrap_err();
        assert_eq!(err.to_string(), "No FS terminator (at offset 0) (record type 1)");
    }
}
