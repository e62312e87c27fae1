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
//! Collaborator-consumed helpers (§6): produced entirely from §3 data,
//! needed by the out-of-scope CLI but specified here since they are
//! small pure functions over the core's output types.

use crate::eft::type2::Date;
use crate::eft::type4::Type4Record;
use crate::error::ValidationError;
use crate::lookup;

/// `"FII"`/`"FFII"` (feet + zero-padded inches) becomes `"F'II\""`.
/// Non-numeric, too-short, or too-long inputs pass through unchanged.
pub fn format_height(raw: &str) -> String {
    let len = raw.len();
    if (len == 3 || len == 4) && raw.bytes().all(|b| b.is_ascii_digit()) {
        let (feet, inches) = raw.split_at(len - 2);
        format!("{feet}'{inches}\"")
    } else {
        raw.to_string()
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `"<Month> <day>, <year>"`; `None` or an out-of-range month yields
/// `"Unknown"` (whole string for `None`, just the month slot otherwise).
pub fn format_date(date: Option<Date>) -> String {
    let Some(date) = date else {
        return "Unknown".to_string();
    };
    let month_name = usize::try_from(date.month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|idx| MONTH_NAMES.get(idx))
        .copied()
        .unwrap_or("Unknown");
    format!("{month_name} {}, {}", date.day, date.year)
}

fn normalize_alias(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Resolves a finger position from `None`, a decimal string `1..14`, or
/// a case-insensitive alias (`-`/space normalized to `_`). Unknown input
/// fails with [`ValidationError`].
pub fn resolve_finger(input: Option<&str>) -> Result<Option<u32>, ValidationError> {
    let Some(input) = input else {
        return Ok(None);
    };

    if let Ok(n) = input.trim().parse::<u32>() {
        return if (1..=14).contains(&n) {
            Ok(Some(n))
        } else {
            Err(ValidationError::new(format!(
                "Unknown finger position '{input}'"
            )))
        };
    }

    let normalized = normalize_alias(input);
    lookup::finger_by_slug_or_alias(&normalized.replace('_', "-"))
        .map(Some)
        .ok_or_else(|| ValidationError::new(format!("Unknown finger position '{input}'")))
}

/// Filters `records` by resolved finger position; returns all records
/// when `selector` is empty or absent, fails when the selector resolves
/// but matches nothing.
pub fn filter_records(
    records: &[Type4Record],
    selector: Option<&str>,
) -> Result<Vec<Type4Record>, ValidationError> {
    let selector = selector.filter(|s| !s.is_empty());
    let Some(position) = resolve_finger(selector)? else {
        return Ok(records.to_vec());
    };

    let filtered: Vec<Type4Record> = records
        .iter()
        .filter(|r| r.finger_position as u32 == position)
        .cloned()
        .collect();

    if filtered.is_empty() {
        return Err(ValidationError::new(format!(
            "No record found for finger position {position}"
        )));
    }

    Ok(filtered)
}

/// `"<pos padded to 2>-<slug>.<format>"`, falling back to
/// `"finger-<pos>"` for unknown positions. `format` defaults to `"tiff"`.
pub fn export_filename(position: u32, format: Option<&str>) -> String {
    let format = format.unwrap_or("tiff");
    let slug = lookup::finger_slug(position)
        .map(str::to_string)
        .unwrap_or_else(|| format!("finger-{position}"));
    format!("{position:02}-{slug}.{format}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_height_converts_three_digit() {
        assert_eq!(format_height("511"), "5'11\"");
    }

    #[test]
    fn format_height_passes_through_non_numeric() {
        assert_eq!(format_height("abc"), "abc");
        assert_eq!(format_height("12"), "12");
        assert_eq!(format_height(""), "");
    }

    #[test]
    fn format_date_variants() {
        assert_eq!(
            format_date(Some(Date { year: 1990, month: 11, day: 2 })),
            "November 2, 1990"
        );
        assert_eq!(
            format_date(Some(Date { year: 2000, month: 0, day: 1 })),
            "Unknown 1, 2000"
        );
        assert_eq!(format_date(None), "Unknown");
    }

    #[test]
    fn resolve_finger_accepts_aliases_and_digits() {
        assert_eq!(resolve_finger(Some("right_thumb")).unwrap(), Some(1));
        assert_eq!(resolve_finger(Some("Right-Thumb")).unwrap(), Some(1));
        assert_eq!(resolve_finger(Some("RIGHT THUMB")).unwrap(), Some(1));
        assert_eq!(resolve_finger(Some("1")).unwrap(), Some(1));
        assert_eq!(resolve_finger(None).unwrap(), None);
    }

    #[test]
    fn resolve_finger_rejects_unknown_and_out_of_range() {
        assert!(resolve_finger(Some("pinky")).is_err());
        assert!(resolve_finger(Some("0")).is_err());
        assert!(resolve_finger(Some("99")).is_err());
    }

    #[test]
    fn export_filename_known_and_unknown() {
        assert_eq!(export_filename(1, Some("tiff")), "01-right-thumb.tiff");
        assert_eq!(export_filename(14, Some("png")), "14-plain-left-four.png");
        assert_eq!(export_filename(99, None), "99-finger-99.tiff");
    }
}
