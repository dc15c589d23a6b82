/// Decimal digits of a numeric string, in order.
///
/// One leading `+`/`-` is stripped, every non-ASCII-digit character is dropped, and an
/// input with no digits yields `['0']`. Leading zeros survive (`"007"` keeps all three).
pub fn split_digits(s: &str) -> Vec<char> {
    let s = s
        .strip_prefix('+')
        .or_else(|| s.strip_prefix('-'))
        .unwrap_or(s);
    let digits: Vec<char> = s.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        vec!['0']
    } else {
        digits
    }
}

/// [`split_digits`] over the decimal rendering of `n`.
pub fn split_digits_int(n: i64) -> Vec<char> {
    split_digits(&n.to_string())
}

pub(crate) fn digit_value(ch: char) -> Option<u8> {
    ch.to_digit(10).map(|d| d as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/digits.rs"]
mod tests;
