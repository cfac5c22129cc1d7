//! String helpers for console output.

const BANNER_FILLER: char = '#';
const GOLDEN_RATIO: f64 = 0.618;

/// Frame `text` in a three-line banner of `#`.
///
/// The text is trimmed and centred in a field `len / 0.618` wide.
///
/// ```
/// use cmdkit::string_utils::banner;
///
/// assert_eq!(
///     banner("Test Text"),
///     "################\n#  Test Text   #\n################"
/// );
/// ```
pub fn banner(text: &str) -> String {
    let text = text.trim();
    let width = (text.chars().count() as f64 / GOLDEN_RATIO) as usize;
    let middle = format!("{BANNER_FILLER}{}{BANNER_FILLER}", center(text, width));
    let edge: String = std::iter::repeat_n(BANNER_FILLER, middle.chars().count()).collect();
    [edge.as_str(), middle.as_str(), edge.as_str()].join("\n")
}

/// Pad `s` with spaces to `width` characters, centred.
///
/// When the padding is odd the extra space goes right, except for odd
/// widths where it goes left.
pub fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if width <= len {
        return s.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(margin - left))
}
