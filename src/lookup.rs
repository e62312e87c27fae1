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
//! Pure lookup tables (§6): finger position, sex/race/eye/hair codes,
//! and impression/compression codes mapped to display labels. Unknown
//! codes fall back to `"Unknown (N)"` rather than failing (§4.1 edge
//! policy).

/// `(finger_position, display_name, slug)` for the 15 codes this core
/// recognizes (0..14). Slugs are used by [`crate::helpers::export_filename`]
/// and by the `_` aliases accepted by [`crate::helpers::resolve_finger`].
const FINGER_TABLE: &[(u8, &str, &str)] = &[
    (0, "Unknown", "unknown"),
    (1, "Right thumb", "right-thumb"),
    (2, "Right index finger", "right-index"),
    (3, "Right middle finger", "right-middle"),
    (4, "Right ring finger", "right-ring"),
    (5, "Right little finger", "right-little"),
    (6, "Left thumb", "left-thumb"),
    (7, "Left index finger", "left-index"),
    (8, "Left middle finger", "left-middle"),
    (9, "Left ring finger", "left-ring"),
    (10, "Left little finger", "left-little"),
    (11, "Plain right thumb", "plain-right-thumb"),
    (12, "Plain left thumb", "plain-left-thumb"),
    (13, "Plain right four fingers", "plain-right-four"),
    (14, "Plain left four fingers", "plain-left-four"),
];

pub(crate) fn finger_entry(code: u8) -> Option<&'static (u8, &'static str, &'static str)> {
    FINGER_TABLE.iter().find(|(c, _, _)| *c == code)
}

pub(crate) fn finger_slug(position: u32) -> Option<&'static str> {
    FINGER_TABLE
        .iter()
        .find(|(c, _, _)| *c as u32 == position)
        .map(|(_, _, slug)| *slug)
}

pub(crate) fn finger_by_slug_or_alias(alias: &str) -> Option<u32> {
    FINGER_TABLE
        .iter()
        .find(|(_, _, slug)| *slug == alias)
        .map(|(c, _, _)| *c as u32)
}

/// Display name for a Type-4 finger position byte (§3); falls back to
/// `"Unknown (N)"` for codes outside 0..14.
pub fn finger_name(code: u8) -> &'static str {
    match finger_entry(code) {
        Some((_, name, _)) => name,
        None => unknown_label(code),
    }
}

const IMPRESSION_TABLE: &[(u8, &str)] = &[
    (0, "Live-scan plain"),
    (1, "Live-scan rolled"),
    (2, "Nonlive-scan plain"),
    (3, "Nonlive-scan rolled"),
    (4, "Latent impression"),
    (5, "Latent tracing"),
    (6, "Latent photo"),
    (7, "Latent lift"),
    (8, "Live-scan vertical swipe"),
];

/// Display name for a Type-4 impression type byte (§3).
pub fn impression_name(code: u8) -> &'static str {
    IMPRESSION_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or_else(|| unknown_label(code))
}

const COMPRESSION_TABLE: &[(u8, &str)] = &[
    (0, "WSQ"),
    (1, "JPEG"),
    (2, "JPEG 2000"),
    (3, "PNG"),
];

/// Display name for a Type-4 compression byte (§3).
pub fn compression_name(code: u8) -> &'static str {
    COMPRESSION_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or_else(|| unknown_label(code))
}

const SEX_TABLE: &[(&str, &str)] = &[("M", "Male"), ("F", "Female"), ("U", "Unknown")];
const RACE_TABLE: &[(&str, &str)] = &[
    ("A", "Asian"),
    ("B", "Black"),
    ("I", "American Indian or Alaska Native"),
    ("W", "White"),
    ("U", "Unknown"),
];
const EYE_COLOR_TABLE: &[(&str, &str)] = &[
    ("BLK", "Black"),
    ("BLU", "Blue"),
    ("BRO", "Brown"),
    ("GRY", "Gray"),
    ("GRN", "Green"),
    ("HAZ", "Hazel"),
    ("MAR", "Maroon"),
    ("PNK", "Pink"),
    ("XXX", "Unknown"),
];
const HAIR_COLOR_TABLE: &[(&str, &str)] = &[
    ("BAL", "Bald"),
    ("BLK", "Black"),
    ("BLN", "Blond"),
    ("BRO", "Brown"),
    ("GRY", "Gray"),
    ("RED", "Red"),
    ("SDY", "Sandy"),
    ("WHI", "White"),
    ("XXX", "Unknown"),
];

fn code_label(table: &[(&str, &str)], code: &str) -> String {
    table
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| format!("Unknown ({code})"))
}

/// Display label for a `2.024` sex code.
pub fn sex_label(code: &str) -> String {
    code_label(SEX_TABLE, code)
}

/// Display label for a `2.025` race code.
pub fn race_label(code: &str) -> String {
    code_label(RACE_TABLE, code)
}

/// Display label for a `2.031` eye color code.
pub fn eye_color_label(code: &str) -> String {
    code_label(EYE_COLOR_TABLE, code)
}

/// Display label for a `2.032` hair color code.
pub fn hair_color_label(code: &str) -> String {
    code_label(HAIR_COLOR_TABLE, code)
}

/// Leaked-once `"Unknown (N)"` label, matching the integer-coded lookup
/// tables' fallback (§4.1 edge policy, §7).
fn unknown_label(code: u8) -> &'static str {
    // Small fixed alphabet (u8), so a lazily-built static table is cheap
    // and avoids allocating a new String on every unknown lookup.
    static LABELS: std::sync::OnceLock<Vec<String>> = std::sync::OnceLock::new();
    let labels = LABELS.get_or_init(|| (0..=255u16).map(|n| format!("Unknown ({n})")).collect());
    &labels[code as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_finger_codes_resolve() {
        assert_eq!(finger_name(1), "Right thumb");
        assert_eq!(finger_name(14), "Plain left four fingers");
    }

    #[test]
    fn unknown_codes_fall_back_without_failing() {
        assert_eq!(finger_name(99), "Unknown (99)");
        assert_eq!(impression_name(200), "Unknown (200)");
        assert_eq!(compression_name(255), "Unknown (255)");
    }

    #[test]
    fn string_code_labels_fall_back() {
        assert_eq!(sex_label("M"), "Male");
        assert_eq!(race_label("q"), "Unknown (q)");
    }
}
