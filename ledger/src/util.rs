//! Small shared helpers.

/// Masks the middle of a string for logs: first 6 characters, `***`, last 4.
///
/// Strings of 10 characters or fewer pass through unmasked — there is
/// nothing left to hide once head and tail overlap. Meant for addresses and
/// transaction ids in log lines, where full values are noise and private
/// data at once.
pub fn mask_string_6p4(s: &str) -> String {
    let n = s.chars().count();
    if n <= 10 {
        return s.to_string();
    }
    let head: String = s.chars().take(6).collect();
    let tail: String = s.chars().skip(n - 4).collect();
    format!("{head}***{tail}")
}
