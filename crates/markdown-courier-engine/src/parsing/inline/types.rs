use serde::Serialize;

/// The paired emphasis markers tracked on the open-token stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Marker {
    Strong,
    Em,
    Strike,
    Mark,
}

impl Marker {
    pub fn token(self) -> Token {
        match self {
            Marker::Strong => Token::Strong,
            Marker::Em => Token::Em,
            Marker::Strike => Token::Strike,
            Marker::Mark => Token::Mark,
        }
    }

    /// Canonical markdown delimiter.
    pub fn delimiter(self) -> &'static str {
        match self {
            Marker::Strong => "**",
            Marker::Em => "*",
            Marker::Strike => "~~",
            Marker::Mark => "==",
        }
    }

    /// Element tag the renderer uses for this marker.
    pub fn tag(self) -> &'static str {
        match self {
            Marker::Strong => "strong",
            Marker::Em => "em",
            Marker::Strike => "del",
            Marker::Mark => "mark",
        }
    }
}

/// Image size from a `|W` or `|WxH` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: Option<u32>,
}

impl Dimensions {
    /// Parses `W` or `WxH`. A non-numeric height means no height.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (w, h) = match s.split_once('x') {
            Some((w, h)) => (w, Some(h)),
            None => (s, None),
        };
        let width = w.trim().parse().ok()?;
        let height = h.and_then(|h| h.trim().parse().ok());
        Some(Self { width, height })
    }

    /// `W` or `WxH`.
    pub fn to_suffix(self) -> String {
        match self.height {
            Some(h) => format!("{}x{h}", self.width),
            None => self.width.to_string(),
        }
    }
}

/// One inline token.
///
/// `Strong`, `Em`, `Strike` and `Mark` are paired: the opening and closing
/// markers are separate instances of the same variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    Text(String),
    Strong,
    Em,
    Strike,
    Mark,
    Code(String),
    Math(String),
    Link {
        url: String,
        text: String,
    },
    Image {
        url: String,
        alt: String,
        caption: Option<String>,
        dimensions: Option<Dimensions>,
    },
    FootnoteRef {
        id: String,
    },
    Break,
}

impl Token {
    pub fn text(s: impl Into<String>) -> Self {
        Token::Text(s.into())
    }

    pub fn marker(&self) -> Option<Marker> {
        match self {
            Token::Strong => Some(Marker::Strong),
            Token::Em => Some(Marker::Em),
            Token::Strike => Some(Marker::Strike),
            Token::Mark => Some(Marker::Mark),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("200x100", Some(Dimensions { width: 200, height: Some(100) }))]
    #[case("200", Some(Dimensions { width: 200, height: None }))]
    #[case("200xauto", Some(Dimensions { width: 200, height: None }))]
    #[case("wide", None)]
    #[case("x100", None)]
    fn dimension_suffixes(#[case] s: &str, #[case] expected: Option<Dimensions>) {
        assert_eq!(Dimensions::parse(s), expected);
    }

    #[test]
    fn suffix_round_trips() {
        let d = Dimensions { width: 300, height: Some(200) };
        assert_eq!(d.to_suffix(), "300x200");
        assert_eq!(Dimensions { width: 5, height: None }.to_suffix(), "5");
    }
}
