/// Code span delimiter.
///
/// Code spans are raw zones: nothing inside them is scanned. A run of N
/// backticks is only closed by another run of exactly N.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: char = '`';

    /// Finds a closing run of exactly `n` ticks in `s`, returning its byte offset.
    pub fn find_close(s: &str, n: usize) -> Option<usize> {
        let b = s.as_bytes();
        let mut i = 0;
        while i < b.len() {
            if b[i] == Self::TICK as u8 {
                let run = b[i..].iter().take_while(|&&c| c == Self::TICK as u8).count();
                if run == n {
                    return Some(i);
                }
                i += run;
            } else {
                i += 1;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_must_match_run_length() {
        assert_eq!(CodeSpan::find_close("a `` b`", 1), Some(6));
        assert_eq!(CodeSpan::find_close("a ` b``", 2), Some(5));
        assert_eq!(CodeSpan::find_close("none", 1), None);
    }
}
