/// Advance class of a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    /// Square glyphs such as CJK ideographs, kana and Hangul
    Full,
    /// Everything else
    Half,
}

// Inclusive, sorted, non-overlapping
const FULL_WIDTH_RANGES: &[(u32, u32)] = &[
    (0x1100, 0x115F),   // Hangul Jamo initial consonants
    (0x2E80, 0x2EFF),   // CJK Radicals Supplement
    (0x2F00, 0x2FDF),   // Kangxi Radicals
    (0x2FF0, 0x2FFF),   // Ideographic Description Characters
    (0x3000, 0x303F),   // CJK Symbols and Punctuation
    (0x3040, 0x309F),   // Hiragana
    (0x30A0, 0x30FF),   // Katakana
    (0x3100, 0x312F),   // Bopomofo
    (0x3130, 0x318F),   // Hangul Compatibility Jamo
    (0x3190, 0x31FF),   // Kanbun, Bopomofo Extended, CJK Strokes, Katakana Phonetic Extensions
    (0x3200, 0x32FF),   // Enclosed CJK Letters and Months
    (0x3300, 0x33FF),   // CJK Compatibility
    (0x3400, 0x4DBF),   // CJK Unified Ideographs Extension A
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0xA000, 0xA4CF),   // Yi Syllables and Radicals
    (0xA960, 0xA97F),   // Hangul Jamo Extended-A
    (0xAC00, 0xD7AF),   // Hangul Syllables
    (0xF900, 0xFAFF),   // CJK Compatibility Ideographs
    (0xFE10, 0xFE1F),   // Vertical Forms
    (0xFE30, 0xFE4F),   // CJK Compatibility Forms
    (0xFE50, 0xFE6F),   // Small Form Variants
    (0xFF00, 0xFF60),   // Fullwidth ASCII variants
    (0xFFE0, 0xFFE6),   // Fullwidth signs
    (0x1B000, 0x1B16F), // Kana Supplement and Extended-A
    (0x1F200, 0x1F2FF), // Enclosed Ideographic Supplement
    (0x20000, 0x2FFFD), // Supplementary Ideographic Plane
    (0x30000, 0x3FFFD), // Tertiary Ideographic Plane
];

impl WidthClass {
    pub fn of(code_point: u32) -> WidthClass {
        let found = FULL_WIDTH_RANGES
            .binary_search_by(|&(start, end)| {
                if end < code_point {
                    std::cmp::Ordering::Less
                } else if start > code_point {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok();
        if found {
            WidthClass::Full
        } else {
            WidthClass::Half
        }
    }

    pub fn advance_width(self, canvas_size: f64) -> f64 {
        match self {
            WidthClass::Full => canvas_size,
            WidthClass::Half => canvas_size / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::cjk_first(0x4E00, WidthClass::Full)]
    #[case::cjk_last(0x9FFF, WidthClass::Full)]
    #[case::hiragana(0x3042, WidthClass::Full)]
    #[case::hangul(0xAC00, WidthClass::Full)]
    #[case::ideographic_space(0x3000, WidthClass::Full)]
    #[case::fullwidth_a(0xFF21, WidthClass::Full)]
    #[case::halfwidth_katakana(0xFF71, WidthClass::Half)]
    #[case::ext_b(0x20BB7, WidthClass::Full)]
    #[case::latin(0x0041, WidthClass::Half)]
    #[case::digit(0x0030, WidthClass::Half)]
    #[case::greek(0x03A9, WidthClass::Half)]
    #[case::before_jamo(0x10FF, WidthClass::Half)]
    fn test_width_class(#[case] code_point: u32, #[case] expected: WidthClass) {
        assert_eq!(WidthClass::of(code_point), expected);
    }

    #[test]
    fn test_table_is_sorted() {
        for pair in FULL_WIDTH_RANGES.windows(2) {
            assert!(pair[0].0 <= pair[0].1);
            assert!(pair[0].1 < pair[1].0);
        }
    }

    #[test]
    fn test_advance_width() {
        assert_eq!(WidthClass::Full.advance_width(300.0), 300.0);
        assert_eq!(WidthClass::Half.advance_width(300.0), 150.0);
    }
}
