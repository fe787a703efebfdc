//! Typed access to XML attributes. All of the default policies live here: an absent attribute
//! becomes 0, 0.0, false, or an empty string. Malformed numbers keep whatever leading number they
//! have, like C's `strtol` and `strtod`, and fall back to 0 otherwise. Integers may be written in
//! `0x` hex, and out-of-range integers saturate instead of wrapping.

use roxmltree::Node;

/// Reads an optional sign, then decimal digits or `0x`-prefixed hex digits, stopping at the first
/// character that doesn't fit. Values beyond the `i32` range clamp to its limits.
pub fn coerce_int(raw: Option<&str>) -> i32 {
    let text = match raw {
        Some(x) => x.trim_start(),
        None => return 0,
    };
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(&b'-') => (true, &text[1..]),
        Some(&b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    // Past the i32 range already, so the accumulator can stop growing here
    let ceiling = i64::from(u32::MAX);
    let magnitude = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0_i64, |acc, digit| (acc * i64::from(radix) + i64::from(digit)).min(ceiling));
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

pub fn coerce_float(raw: Option<&str>) -> f64 {
    let text = match raw {
        Some(x) => x.trim(),
        None => return 0.0,
    };
    if let Ok(x) = text.parse::<f64>() {
        return x;
    }
    numeric_prefix(text)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Only the first character matters: "1", "true", "yes" (in any case) are true.
pub fn coerce_bool(raw: Option<&str>) -> bool {
    matches!(
        raw.and_then(|x| x.trim_start().chars().next()),
        Some('1' | 't' | 'T' | 'y' | 'Y')
    )
}

pub fn coerce_str(raw: Option<&str>) -> String {
    raw.map(|x| x.to_string()).unwrap_or_default()
}

// The longest leading slice of the text that looks like a decimal number, with an optional sign,
// fraction and exponent.
fn numeric_prefix(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let digits_from = |mut idx: usize| {
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        idx
    };

    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let integer_start = end;
    end = digits_from(end);
    let mut any_digits = end > integer_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let fraction_end = digits_from(fraction_start);
        if any_digits || fraction_end > fraction_start {
            any_digits = true;
            end = fraction_end;
        }
    }
    if any_digits && end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exponent_start = end + 1;
        if exponent_start < bytes.len()
            && (bytes[exponent_start] == b'+' || bytes[exponent_start] == b'-')
        {
            exponent_start += 1;
        }
        let exponent_end = digits_from(exponent_start);
        if exponent_end > exponent_start {
            end = exponent_end;
        }
    }

    if any_digits {
        Some(&text[..end])
    } else {
        None
    }
}

/// Typed attribute access and child lookup by tag name on top of roxmltree.
pub trait NodeExt<'a, 'input: 'a> {
    fn attr_int(&self, name: &str) -> i32;
    fn attr_float(&self, name: &str) -> f64;
    fn attr_bool(&self, name: &str) -> bool;
    fn attr_string(&self, name: &str) -> String;
    /// Only used when the attribute is missing entirely; an empty value is kept.
    fn attr_string_or(&self, name: &str, default: &str) -> String;

    fn child_named(&self, tag: &str) -> Option<Node<'a, 'input>>;
    /// Element children with this tag, in document order
    fn children_named(&self, tag: &str) -> Vec<Node<'a, 'input>>;
}

impl<'a, 'input: 'a> NodeExt<'a, 'input> for Node<'a, 'input> {
    fn attr_int(&self, name: &str) -> i32 {
        coerce_int(self.attribute(name))
    }

    fn attr_float(&self, name: &str) -> f64 {
        coerce_float(self.attribute(name))
    }

    fn attr_bool(&self, name: &str) -> bool {
        coerce_bool(self.attribute(name))
    }

    fn attr_string(&self, name: &str) -> String {
        coerce_str(self.attribute(name))
    }

    fn attr_string_or(&self, name: &str, default: &str) -> String {
        self.attribute(name).unwrap_or(default).to_string()
    }

    fn child_named(&self, tag: &str) -> Option<Node<'a, 'input>> {
        self.children()
            .find(|child| child.is_element() && child.has_tag_name(tag))
    }

    fn children_named(&self, tag: &str) -> Vec<Node<'a, 'input>> {
        self.children()
            .filter(|child| child.is_element() && child.has_tag_name(tag))
            .collect()
    }
}

/// Children of a node that might not exist, so callers don't have to special-case missing
/// optional elements like `<lanes>` or `<left>`.
pub fn children_of<'a, 'input: 'a>(
    parent: Option<Node<'a, 'input>>,
    tag: &str,
) -> Vec<Node<'a, 'input>> {
    parent
        .map(|node| node.children_named(tag))
        .unwrap_or_default()
}
