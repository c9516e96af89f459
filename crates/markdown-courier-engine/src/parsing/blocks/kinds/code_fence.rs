use std::sync::LazyLock;

use regex::Regex;

/// Which character a fence is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn marker(self) -> char {
        match self {
            FenceKind::Backticks => CodeFence::BACKTICK,
            FenceKind::Tildes => CodeFence::TILDE,
        }
    }
}

/// An opening fence line with its parsed info string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceOpen {
    pub kind: FenceKind,
    /// Length of the marker run; a closer must be at least this long.
    pub len: usize,
    pub language: String,
    pub caption: Option<String>,
    pub to_png: bool,
    pub use_light_theme: bool,
}

static INFO: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9#+\-]*)([!*]*)\s*(.*)$").ok());

/// Fenced code block delimiters and info-string modifiers.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: char = '`';
    pub const TILDE: char = '~';
    pub const MIN_LEN: usize = 3;
    /// Info-string modifier: always rasterize (or never, when code PNG is on).
    pub const TO_PNG: char = '!';
    /// Info-string modifier: invert the configured theme.
    pub const INVERT_THEME: char = '*';

    /// Leading marker run at the first non-space position.
    fn run(line: &str) -> Option<(FenceKind, usize, &str)> {
        let t = line.trim_start();
        let kind = match t.chars().next()? {
            Self::BACKTICK => FenceKind::Backticks,
            Self::TILDE => FenceKind::Tildes,
            _ => return None,
        };
        let len = t.chars().take_while(|&c| c == kind.marker()).count();
        (len >= Self::MIN_LEN).then(|| (kind, len, &t[len..]))
    }

    /// Detects an opening fence and parses `lang[!*] caption`.
    pub fn open(line: &str) -> Option<FenceOpen> {
        let (kind, len, info) = Self::run(line)?;
        let info = info.trim();
        let (language, flags, caption) = match INFO.as_ref().and_then(|re| re.captures(info)) {
            Some(c) => (
                c.get(1).map_or("", |m| m.as_str()),
                c.get(2).map_or("", |m| m.as_str()),
                c.get(3).map_or("", |m| m.as_str()),
            ),
            None => ("", "", info),
        };
        let caption = caption.trim();
        Some(FenceOpen {
            kind,
            len,
            language: language.to_string(),
            caption: (!caption.is_empty()).then(|| caption.to_string()),
            to_png: flags.contains(Self::TO_PNG),
            use_light_theme: flags.contains(Self::INVERT_THEME),
        })
    }

    /// True if `line` closes a fence opened by `open`: same marker, at least
    /// as long, nothing but whitespace after.
    pub fn closes(open: &FenceOpen, line: &str) -> bool {
        match Self::run(line) {
            Some((kind, len, rest)) => kind == open.kind && len >= open.len && rest.trim().is_empty(),
            None => false,
        }
    }
}
