/// Horizontal rule: three or more of the same `-`, `*` or `_`, optionally
/// space-separated, and nothing else on the line.
///
/// Checked before list items so `- - -` and `*****` never open a list.
pub struct Rule;

impl Rule {
    pub const MARKERS: [char; 3] = ['-', '*', '_'];
    pub const MIN_RUN: usize = 3;

    pub fn matches(line: &str) -> bool {
        let t = line.trim();
        let Some(first) = t.chars().next() else {
            return false;
        };
        if !Self::MARKERS.contains(&first) {
            return false;
        }
        let mut count = 0usize;
        for c in t.chars() {
            if c == first {
                count += 1;
            } else if c != ' ' && c != '\t' {
                return false;
            }
        }
        count >= Self::MIN_RUN
    }
}
