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
//! Type-2 demographic shaper (§3, §4.1): maps the raw Type-2 tag map
//! into a structured [`Demographics`] record.

use crate::eft::bytes::US;
use crate::eft::record::TagMap;

/// A parsed `LAST,FIRST MIDDLE` name (tag `2.018`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    pub last: String,
    pub first: String,
    pub middle: String,
}

impl Name {
    /// `"First Middle Last"` with empty parts omitted.
    pub fn full_name(&self) -> String {
        [self.first.as_str(), self.middle.as_str(), self.last.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A `YYYYMMDD` date (tag `2.022`/`2.023` etc). Month/day are not
/// bounds-checked here; out-of-range values are resolved to `"Unknown"`
/// by the formatting layer (§6 `format_date`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

/// Scanner make/model/serial (tag `2.067`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scanner {
    pub make: String,
    pub model: String,
    pub serial: String,
}

/// Structured Type-2 demographics. All fields except `raw` are optional:
/// `None` when the source tag was absent.
#[derive(Debug, Clone, Default)]
pub struct Demographics {
    pub raw: TagMap,
    pub name: Option<Name>,
    pub dob: Option<Date>,
    pub date_captured: Option<Date>,
    pub sex: Option<String>,
    pub race: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub purpose: Option<String>,
    pub address: Option<String>,
    pub height: Option<String>,
    pub weight: Option<i32>,
    pub scanner: Option<Scanner>,
}

/// Title-cases a string: lowercase the whole thing, then uppercase any
/// character immediately following a word boundary (start of string or a
/// run of non-alphabetic characters).
pub fn title_case(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut at_boundary = true;
    for c in lower.chars() {
        if at_boundary && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = !c.is_alphabetic();
    }
    out
}

/// Splits `2.018` on the first `','`: left side is the last name, right
/// side is split on whitespace runs into first/middle. Each component is
/// title-cased. Missing comma puts the whole value in `last`.
pub fn parse_name(raw: &str) -> Name {
    let (last_raw, rest_raw) = match raw.split_once(',') {
        Some((l, r)) => (l, r),
        None => (raw, ""),
    };

    let mut tokens = rest_raw.split_whitespace();
    let first_raw = tokens.next().unwrap_or("");
    let middle_raw = tokens.collect::<Vec<_>>().join(" ");

    Name {
        last: title_case(last_raw.trim()),
        first: title_case(first_raw),
        middle: title_case(&middle_raw),
    }
}

/// Parses a `YYYYMMDD` tag value. Returns `None` if it isn't exactly 8
/// ASCII digits.
pub fn parse_date(raw: &str) -> Option<Date> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = raw[0..4].parse().ok()?;
    let month = raw[4..6].parse().ok()?;
    let day = raw[6..8].parse().ok()?;
    Some(Date { year, month, day })
}

/// Splits `2.067` on US into make/model/serial; missing trailing
/// components become empty strings.
pub fn parse_scanner(raw: &str) -> Scanner {
    let mut parts = raw.split(US as char);
    Scanner {
        make: parts.next().unwrap_or("").to_string(),
        model: parts.next().unwrap_or("").to_string(),
        serial: parts.next().unwrap_or("").to_string(),
    }
}

/// Shapes a raw Type-2 tag map into structured [`Demographics`].
pub fn shape(raw: TagMap) -> Demographics {
    let name = raw.get("2.018").map(parse_name);
    let dob = raw.get("2.022").and_then(parse_date);
    let date_captured = raw.get("2.023").and_then(parse_date);
    let sex = raw.get("2.024").map(str::to_string);
    let race = raw.get("2.025").map(str::to_string);
    let height = raw.get("2.027").map(str::to_string);
    let weight = raw.get("2.029").and_then(|v| v.trim().parse::<i32>().ok());
    let eye_color = raw.get("2.031").map(str::to_string);
    let hair_color = raw.get("2.032").map(str::to_string);
    let purpose = raw.get("2.037").map(str::to_string);
    let address = raw.get("2.041").map(str::to_string);
    let scanner = raw.get("2.067").map(parse_scanner);

    Demographics {
        raw,
        name,
        dob,
        date_captured,
        sex,
        race,
        eye_color,
        hair_color,
        purpose,
        address,
        height,
        weight,
        scanner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_is_idempotent() {
        for s in ["SMITH", "mcdonald-o'brien", "  van der berg", ""] {
            let once = title_case(s);
            let twice = title_case(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn name_with_comma() {
        let n = parse_name("SMITH,JOHN");
        assert_eq!(n.last, "Smith");
        assert_eq!(n.first, "John");
        assert_eq!(n.middle, "");
    }

    #[test]
    fn name_leading_comma() {
        let n = parse_name(",JOHN MICHAEL");
        assert_eq!(n.last, "");
        assert_eq!(n.first, "John");
        assert_eq!(n.middle, "Michael");
    }

    #[test]
    fn name_trailing_comma() {
        let n = parse_name("SMITH,");
        assert_eq!(n.last, "Smith");
        assert_eq!(n.first, "");
        assert_eq!(n.middle, "");
    }

    #[test]
    fn name_without_comma() {
        let n = parse_name("SMITH");
        assert_eq!(n.last, "Smith");
        assert_eq!(n.first, "");
        assert_eq!(n.middle, "");
    }

    #[test]
    fn full_name_round_trip_elides_empty_parts() {
        let n = parse_name("SCOTT,MICHAEL");
        assert_eq!(n.full_name(), "Michael Scott");
    }

    #[test]
    fn date_parses_without_bounds_check() {
        let d = parse_date("19620315").unwrap();
        assert_eq!(d, Date { year: 1962, month: 3, day: 15 });
        let bad_month = parse_date("20000001").unwrap();
        assert_eq!(bad_month.month, 0);
    }

    #[test]
    fn scanner_fills_missing_trailing_components() {
        let s = parse_scanner("TESTSCAN\x1fMODEL1");
        assert_eq!(s.make, "TESTSCAN");
        assert_eq!(s.model, "MODEL1");
        assert_eq!(s.serial, "");
    }
}
