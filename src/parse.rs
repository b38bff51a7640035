//! Splitting delimited text into integers.

const DEFAULT_SEPARATOR: &str = ",";

/// Split `s` on `separator` (`","` when `None`) and read an integer from the
/// start of each piece.
///
/// Each piece is read leniently: leading whitespace is skipped, an optional
/// `+`/`-` sign is accepted, then the longest run of ASCII digits is taken and
/// anything after it is ignored. A piece without digits, or whose digits do
/// not fit in an `i64`, yields `None`.
pub fn split_to_integers(s: &str, separator: Option<&str>) -> Vec<Option<i64>> {
    let separator = match separator {
        Some(sep) if !sep.is_empty() => sep,
        Some(_) => {
            // An empty separator splits between every character.
            return s.chars().map(|c| leading_integer(c.encode_utf8(&mut [0; 4]))).collect();
        }
        None => DEFAULT_SEPARATOR,
    };
    s.split(separator).map(leading_integer).collect()
}

fn leading_integer(piece: &str) -> Option<i64> {
    let piece = piece.trim_start();
    let sign = match piece.as_bytes().first() {
        Some(b'-' | b'+') => 1,
        _ => 0,
    };
    let digits = piece[sign..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    piece[..sign + digits].parse().ok()
}
