use super::types::{Marker, Token};

/// The open-token stack: paired markers opened on the current line and not
/// yet closed, innermost last.
#[derive(Debug, Default)]
pub struct OpenStack {
    open: Vec<Marker>,
}

impl OpenStack {
    pub fn is_open(&self, m: Marker) -> bool {
        self.open.contains(&m)
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Of two open markers, the one opened later.
    pub fn innermost(&self, a: Marker, b: Marker) -> Option<Marker> {
        self.open.iter().rev().find(|&&m| m == a || m == b).copied()
    }

    pub fn open(&mut self, m: Marker, out: &mut Vec<Token>) {
        self.open.push(m);
        out.push(m.token());
    }

    /// Closes `m`. Markers opened after it are closed first and reopened
    /// afterwards in their original order, so output nesting stays proper.
    pub fn close(&mut self, m: Marker, out: &mut Vec<Token>) {
        let Some(pos) = self.open.iter().rposition(|&x| x == m) else {
            return;
        };
        let above = self.open.split_off(pos + 1);
        out.extend(above.iter().rev().map(|a| a.token()));
        self.open.pop();
        out.push(m.token());
        for a in above {
            self.open(a, out);
        }
    }

    /// Closes `m` if open and closable, opens it if closed and openable.
    /// Returns false when neither applies and the marker is literal text.
    pub fn toggle(&mut self, m: Marker, can_open: bool, can_close: bool, out: &mut Vec<Token>) -> bool {
        if self.is_open(m) {
            if can_close {
                self.close(m, out);
                return true;
            }
            return false;
        }
        if can_open {
            self.open(m, out);
            return true;
        }
        false
    }

    /// Closes everything still open, innermost first.
    pub fn flush(&mut self, out: &mut Vec<Token>) {
        while let Some(m) = self.open.pop() {
            out.push(m.token());
        }
    }
}
