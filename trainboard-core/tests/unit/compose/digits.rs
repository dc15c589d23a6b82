use super::*;

#[test]
fn keeps_leading_zeros_and_strips_one_sign() {
    assert_eq!(split_digits("-007"), vec!['0', '0', '7']);
    assert_eq!(split_digits("+42"), vec!['4', '2']);
    assert_eq!(split_digits("007"), vec!['0', '0', '7']);
}

#[test]
fn no_digits_defaults_to_zero() {
    assert_eq!(split_digits("abc"), vec!['0']);
    assert_eq!(split_digits(""), vec!['0']);
    assert_eq!(split_digits("-"), vec!['0']);
}

#[test]
fn drops_punctuation_but_keeps_order() {
    assert_eq!(split_digits("12.5"), vec!['1', '2', '5']);
    assert_eq!(split_digits("1a2b3"), vec!['1', '2', '3']);
    // Only one sign is stripped; the second is just another non-digit.
    assert_eq!(split_digits("--5"), vec!['5']);
}

#[test]
fn every_output_char_is_an_input_digit() {
    for s in ["", "0", "-1", "x9y8", "+-+", "١٢", "12:34", "９"] {
        let out = split_digits(s);
        assert!(!out.is_empty());
        let expected: Vec<char> = s
            .strip_prefix(['+', '-'])
            .unwrap_or(s)
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if expected.is_empty() {
            assert_eq!(out, vec!['0'], "input {s:?}");
        } else {
            assert_eq!(out, expected, "input {s:?}");
        }
    }
}

#[test]
fn integers_split_by_decimal_rendering() {
    assert_eq!(split_digits_int(12), vec!['1', '2']);
    assert_eq!(split_digits_int(-5), vec!['5']);
    assert_eq!(split_digits_int(0), vec!['0']);
}

#[test]
fn digit_value_only_accepts_ascii_digits() {
    assert_eq!(digit_value('7'), Some(7));
    assert_eq!(digit_value('a'), None);
    assert_eq!(digit_value('٣'), None);
}
