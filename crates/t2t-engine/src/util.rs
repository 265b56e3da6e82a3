//! Counter formatting for numbered titles and ordered lists.

/// Format `value` as a lowercase roman numeral.
///
/// Values outside `1..=3999` have no roman form and fall back to decimal.
///
/// # Examples
///
/// ```
/// use t2t_engine::to_roman;
///
/// assert_eq!(to_roman(14), "xiv");
/// assert_eq!(to_roman(0), "0");
/// ```
#[must_use]
pub fn to_roman(value: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];

    if !(1..4000).contains(&value) {
        return value.to_string();
    }

    let mut rest = value;
    let mut out = String::new();
    for (weight, numeral) in NUMERALS {
        while rest >= weight {
            out.push_str(numeral);
            rest -= weight;
        }
    }
    out
}

/// Format `value` as a lowercase letter sequence: 1 is `a`, 26 is `z`,
/// 27 is `aa`.
///
/// Zero has no letter form and renders as `0`.
///
/// # Examples
///
/// ```
/// use t2t_engine::to_lower_alpha;
///
/// assert_eq!(to_lower_alpha(2), "b");
/// assert_eq!(to_lower_alpha(28), "ab");
/// ```
#[must_use]
pub fn to_lower_alpha(value: usize) -> String {
    if value == 0 {
        return value.to_string();
    }

    let mut letters = Vec::new();
    let mut rest = value;
    while rest > 0 {
        rest -= 1;
        // rest % 26 < 26, so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation)]
        letters.push(char::from(b'a' + (rest % 26) as u8));
        rest /= 26;
    }
    letters.iter().rev().collect()
}
