//! Placeholder tokens standing in for masked regions.
//!
//! A token is `OPEN`, the region id in base 16 written with private-use digit
//! characters, then `CLOSE`. All of these sit in the Unicode private use area,
//! so they are neither word characters nor part of any region syntax.

pub const OPEN: char = '\u{E000}';
pub const CLOSE: char = '\u{E001}';
const DIGIT_ZERO: u32 = 0xE010;
const RADIX: usize = 16;

/// Any character reserved for placeholder tokens.
pub fn is_sentinel(c: char) -> bool {
    ('\u{E000}'..='\u{E01F}').contains(&c)
}

fn digit(value: usize) -> char {
    // value < RADIX, so the result is always in the reserved block
    char::from_u32(DIGIT_ZERO + value as u32).unwrap_or(CLOSE)
}

fn digit_value(c: char) -> Option<usize> {
    let value = (c as u32).checked_sub(DIGIT_ZERO)? as usize;
    (value < RADIX).then_some(value)
}

pub fn encode(id: usize) -> String {
    let mut digits = Vec::new();
    let mut rest = id;
    loop {
        digits.push(digit(rest % RADIX));
        rest /= RADIX;
        if rest == 0 {
            break;
        }
    }

    let mut token = String::with_capacity((digits.len() + 2) * OPEN.len_utf8());
    token.push(OPEN);
    token.extend(digits.iter().rev());
    token.push(CLOSE);
    token
}

/// Decode the token at the start of `text`, returning the id and the token's
/// byte length.
pub fn decode(text: &str) -> Option<(usize, usize)> {
    let mut chars = text.char_indices();
    if chars.next()?.1 != OPEN {
        return None;
    }

    let mut id: usize = 0;
    let mut width = 0;
    for (i, c) in chars {
        if c == CLOSE {
            return (width > 0).then_some((id, i + c.len_utf8()));
        }
        id = id.checked_mul(RADIX)?.checked_add(digit_value(c)?)?;
        width += 1;
    }

    None
}
