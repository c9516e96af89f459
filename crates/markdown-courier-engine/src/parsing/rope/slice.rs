use xi_rope::Rope;

use super::span::Span;

/// Extracts the text for a span from the rope as an owned String.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    rope.slice_to_cow(sp.start..sp.end).into_owned()
}

/// Extracts text for a span, truncated to at most `max` bytes with a "..."
/// suffix. Truncation backs off to a char boundary.
///
/// Used for human-readable snapshot output.
pub fn preview(rope: &Rope, sp: Span, max: usize) -> String {
    let mut s = slice_to_string(rope, sp);
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_keeps_short_heading() {
        let rope = Rope::from("# Intro");
        assert_eq!(preview(&rope, Span::new(0, 7), 20), "# Intro");
    }

    #[test]
    fn preview_truncates_paragraph() {
        let rope = Rope::from("A long paragraph of text");
        assert_eq!(preview(&rope, Span::new(0, 24), 6), "A long...");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let rope = Rope::from("héllo");
        // byte 2 is inside the two-byte 'é'
        assert_eq!(preview(&rope, Span::new(0, 6), 2), "h...");
    }

    #[test]
    fn slice_to_string_partial_span() {
        let rope = Rope::from("- item one");
        assert_eq!(slice_to_string(&rope, Span::new(2, 10)), "item one");
    }
}
