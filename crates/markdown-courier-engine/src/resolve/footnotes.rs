use std::collections::HashMap;

use serde::Serialize;

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Footnote display numbers, assigned by first reference.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FootnoteTable {
    numbers: HashMap<String, usize>,
    /// Ids in number order; `order[n - 1]` has number `n`.
    order: Vec<String>,
}

impl FootnoteTable {
    /// Number for `id`, assigning the next one on first reference.
    pub fn reference(&mut self, id: &str) -> usize {
        if let Some(&n) = self.numbers.get(id) {
            return n;
        }
        self.order.push(id.to_string());
        let n = self.order.len();
        self.numbers.insert(id.to_string(), n);
        n
    }

    pub fn number(&self, id: &str) -> Option<usize> {
        self.numbers.get(id).copied()
    }

    /// The id holding display number `n`.
    pub fn id_for(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.order.get(i))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(number, id)` pairs in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.order.iter().enumerate().map(|(i, id)| (i + 1, id.as_str()))
    }
}

/// Element id of footnote `n`; references link to `#footnote-{n}`.
pub fn footnote_anchor(n: usize) -> String {
    format!("footnote-{n}")
}

/// `12` → `¹²`.
pub fn superscript(n: usize) -> String {
    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| SUPERSCRIPT_DIGITS[d as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_follow_first_reference() {
        let mut t = FootnoteTable::default();
        assert_eq!(t.reference("b"), 1);
        assert_eq!(t.reference("a"), 2);
        assert_eq!(t.reference("b"), 1);
        assert_eq!(t.number("a"), Some(2));
        assert_eq!(t.number("zzz"), None);
        assert_eq!(t.id_for(1), Some("b"));
        assert_eq!(t.id_for(0), None);
        assert_eq!(t.iter().collect::<Vec<_>>(), vec![(1, "b"), (2, "a")]);
    }

    #[test]
    fn superscript_digits() {
        assert_eq!(superscript(1), "¹");
        assert_eq!(superscript(10), "¹⁰");
        assert_eq!(superscript(42), "⁴²");
    }
}
