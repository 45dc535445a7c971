//! SMS length calculation: character set detection, billable characters and
//! transport segment count.
//!
//! All counts are computed on UTF-16 code units, which is how the gateway
//! measures Unicode messages.

/// Escape character that precedes every extension-table symbol.
pub const GSM7_ESCAPE: char = '\u{1b}';

/// Maximum length of a single-part 7-bit message.
pub const GSM7_SINGLE_SEGMENT: usize = 160;
/// Payload of one part of a concatenated 7-bit message.
pub const GSM7_MULTI_SEGMENT: usize = 153;
/// Maximum length of a single-part Unicode message.
pub const UNICODE_SINGLE_SEGMENT: usize = 70;
/// Payload of one part of a concatenated Unicode message.
pub const UNICODE_MULTI_SEGMENT: usize = 67;

/// GSM 03.38 default alphabet.
const GSM7_BASIC: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å',
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\u{1b}', 'Æ', 'æ', 'ß', 'É',
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§',
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à',
];

/// GSM 03.38 extension table (reachable only through [`GSM7_ESCAPE`]).
const GSM7_EXTENSION: [char; 10] = ['\u{0c}', '^', '{', '}', '\\', '[', '~', ']', '|', '€'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Character repertoire a message has to be sent in.
pub enum SmsCharset {
    /// GSM 7-bit default alphabet plus its escaped extension table.
    Basic7Bit,
    /// UCS-2 / UTF-16.
    Unicode16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Summary of how a message text will be billed and transported.
pub struct SmsLength {
    pub charset: SmsCharset,
    pub parts: usize,
    pub characters: usize,
}

impl SmsLength {
    /// Compute charset, part count and billable character count for `text`.
    pub fn of(text: &str) -> Self {
        Self {
            charset: charset(text),
            parts: part_count(text),
            characters: character_count(text),
        }
    }
}

fn is_basic(c: char) -> bool {
    GSM7_BASIC.contains(&c)
}

fn is_extension(c: char) -> bool {
    GSM7_EXTENSION.contains(&c)
}

/// Detect the charset `text` requires.
///
/// A single character outside both GSM tables forces [`SmsCharset::Unicode16`]
/// for the whole message.
pub fn charset(text: &str) -> SmsCharset {
    if text.chars().all(|c| is_basic(c) || is_extension(c)) {
        SmsCharset::Basic7Bit
    } else {
        SmsCharset::Unicode16
    }
}

/// Number of transport segments `text` occupies.
pub fn part_count(text: &str) -> usize {
    match charset(text) {
        SmsCharset::Basic7Bit => part_count_7bit(text),
        SmsCharset::Unicode16 => {
            let len = text.encode_utf16().count();
            if len <= UNICODE_SINGLE_SEGMENT {
                1
            } else {
                len.div_ceil(UNICODE_MULTI_SEGMENT)
            }
        }
    }
}

fn part_count_7bit(text: &str) -> usize {
    let mut septets = Vec::with_capacity(text.len() + 8);
    for c in text.chars() {
        if is_extension(c) {
            septets.push(GSM7_ESCAPE);
        }
        septets.push(c);
    }

    let len = septets.len();
    if len <= GSM7_SINGLE_SEGMENT {
        return 1;
    }

    let parts = len.div_ceil(GSM7_MULTI_SEGMENT);
    let free_chars = len % GSM7_MULTI_SEGMENT;
    // Enough slack in the last part to absorb every escape pushed across a boundary.
    if free_chars >= parts - 1 {
        return parts;
    }

    let mut parts = 0;
    let mut rest = septets.as_slice();
    while !rest.is_empty() {
        parts += 1;
        // An escape must stay in the same part as the symbol it prefixes.
        let take = if rest.get(GSM7_MULTI_SEGMENT - 1) == Some(&GSM7_ESCAPE) {
            GSM7_MULTI_SEGMENT - 1
        } else {
            GSM7_MULTI_SEGMENT
        };
        rest = &rest[take.min(rest.len())..];
    }
    parts
}

/// Billable character count.
///
/// Basic characters count once, extension characters twice. If any character
/// needs Unicode, the count is the UTF-16 length of the whole text.
pub fn character_count(text: &str) -> usize {
    let mut chars = 0;
    for c in text.chars() {
        if is_basic(c) {
            chars += 1;
        } else if is_extension(c) {
            chars += 2;
        } else {
            return text.encode_utf16().count();
        }
    }
    chars
}

#[cfg(test)]
mod tests {
    use super::*;

    const GSM_7BIT_SMS: &str = "This SMS contains only characters that are present in GSM charset!";
    const GSM_7BITEXT_SMS: &str =
        "This SMS contains some GSM charset characters that must be escaped like: €, [, ] etc.";
    const UNICODE_SMS: &str = "This SMS contains a unicode character: Õ";
    const UNICODE_7BITEXT_SMS: &str =
        "This SMS contains a unicode character Õ and GSM charset character € that needs to be escaped.";

    #[test]
    fn detects_charset() {
        assert_eq!(charset(GSM_7BIT_SMS), SmsCharset::Basic7Bit);
        assert_eq!(charset(GSM_7BITEXT_SMS), SmsCharset::Basic7Bit);
        assert_eq!(charset(UNICODE_SMS), SmsCharset::Unicode16);
        assert_eq!(charset(UNICODE_7BITEXT_SMS), SmsCharset::Unicode16);
        assert_eq!(charset(""), SmsCharset::Basic7Bit);
    }

    #[test]
    fn counts_parts_for_sample_messages() {
        assert_eq!(part_count(GSM_7BIT_SMS), 1);
        assert_eq!(part_count(GSM_7BITEXT_SMS), 1);
        assert_eq!(part_count(UNICODE_SMS), 1);
        assert_eq!(part_count(UNICODE_7BITEXT_SMS), 2);
    }

    #[test]
    fn counts_billable_characters() {
        assert_eq!(character_count(GSM_7BIT_SMS), 66);
        assert_eq!(character_count(GSM_7BITEXT_SMS), 88);
        assert_eq!(character_count(UNICODE_SMS), 40);
        assert_eq!(character_count(UNICODE_7BITEXT_SMS), 93);
    }

    #[test]
    fn basic_text_up_to_160_is_single_part() {
        for len in [1, 70, 153, 159, 160] {
            assert_eq!(part_count(&"a".repeat(len)), 1, "len {len}");
        }
        assert_eq!(part_count(&"a".repeat(161)), 2);
        assert_eq!(part_count(&"a".repeat(306)), 2);
        assert_eq!(part_count(&"a".repeat(307)), 3);
    }

    #[test]
    fn one_extension_character_costs_two_units() {
        let text = format!("{}€", "a".repeat(158));
        assert_eq!(character_count(&text), text.chars().count() + 1);
        assert_eq!(part_count(&text), 1);

        let text = format!("{}€", "a".repeat(159));
        assert_eq!(character_count(&text), 161);
        assert_eq!(part_count(&text), 2);
    }

    #[test]
    fn escape_at_segment_boundary_shortens_the_part() {
        // Expanded length 306; the escape lands on offset 152 of the first part.
        let text = format!("{}€{}", "a".repeat(152), "a".repeat(152));
        assert_eq!(character_count(&text), 306);
        assert_eq!(part_count(&text), 3);

        // Same expanded length, but the pair sits fully inside the first part.
        let text = format!("{}€{}", "a".repeat(151), "a".repeat(153));
        assert_eq!(character_count(&text), 306);
        assert_eq!(part_count(&text), 2);
    }

    #[test]
    fn slack_in_last_part_skips_the_walk() {
        // Expanded length 308: three parts, two free characters in the last one.
        let text = format!("{}€{}", "a".repeat(152), "a".repeat(154));
        assert_eq!(character_count(&text), 308);
        assert_eq!(part_count(&text), 3);
    }

    #[test]
    fn multi_part_walk_counts_every_chunk() {
        assert_eq!(part_count(&"a".repeat(459)), 3);
        assert_eq!(part_count(&"a".repeat(460)), 4);
    }

    #[test]
    fn unicode_boundaries() {
        assert_eq!(part_count(&"Õ".repeat(70)), 1);
        assert_eq!(part_count(&"Õ".repeat(71)), 2);
        assert_eq!(part_count(&"Õ".repeat(134)), 2);
        assert_eq!(part_count(&"Õ".repeat(135)), 3);
    }

    #[test]
    fn unicode_counts_utf16_units() {
        let text = "😀".repeat(35);
        assert_eq!(charset(&text), SmsCharset::Unicode16);
        assert_eq!(character_count(&text), 70);
        assert_eq!(part_count(&text), 1);
        assert_eq!(part_count(&"😀".repeat(36)), 2);
    }

    #[test]
    fn any_unicode_character_makes_count_equal_to_length() {
        let text = format!("{}€[]Ж", "a".repeat(20));
        let length = SmsLength::of(&text);
        assert_eq!(length.charset, SmsCharset::Unicode16);
        assert_eq!(length.characters, text.encode_utf16().count());
        assert_eq!(length.parts, 1);
    }
}
