use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Calculates the display width of a string in terminal columns.
///
/// Handles Unicode correctly: CJK characters and emoji occupy two columns,
/// combining marks occupy zero, standard ASCII occupies one.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Ellipsis string used for truncation
const ELLIPSIS: &str = "...";
/// Display width of the ellipsis (3 columns for ASCII "...")
const ELLIPSIS_WIDTH: usize = 3;

/// Truncates a string to fit within a maximum display width.
///
/// If truncation is necessary, appends "..." to indicate text was cut off.
/// Width calculation is Unicode-aware so post content with CJK text or emoji
/// never overflows its card.
///
/// Returns `Cow::Borrowed` when the string already fits (no allocation).
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    // Degenerate case: not enough room for the ellipsis itself, take what fits
    if max_width <= ELLIPSIS_WIDTH {
        let mut out = String::new();
        let mut used = 0;
        for ch in s.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > max_width {
                break;
            }
            out.push(ch);
            used += w;
        }
        return Cow::Owned(out);
    }

    let budget = max_width - ELLIPSIS_WIDTH;
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_ascii() {
        assert_eq!(display_width("Hello"), 5);
    }

    #[test]
    fn width_cjk_is_double() {
        assert_eq!(display_width("你好"), 4);
    }

    #[test]
    fn truncate_fits_borrows() {
        let s = "short";
        assert!(matches!(truncate_to_width(s, 10), Cow::Borrowed(_)));
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_zero_width_is_empty() {
        assert_eq!(truncate_to_width("anything", 0), "");
    }

    #[test]
    fn truncate_never_exceeds_budget() {
        for max in 0..20 {
            let out = truncate_to_width("the quick brown fox 你好", max);
            assert!(display_width(&out) <= max, "width {} > {}", display_width(&out), max);
        }
    }

}
