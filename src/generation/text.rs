//! Text flavor. Content-type selector and inline text payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Flavor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFlavor;

impl Flavor for TextFlavor {
    type Params = ContentType;
    type Output = String;
    const NAME: &'static str = "text";
}

/// Which template the text generator fills in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Blog,
    Email,
    Story,
    Poem,
}

impl ContentType {
    /// Selector order, as shown in the panel.
    pub const ALL: [ContentType; 4] = [
        ContentType::Blog,
        ContentType::Email,
        ContentType::Story,
        ContentType::Poem,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Email => "email",
            ContentType::Story => "story",
            ContentType::Poem => "poem",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Blog => "Blog Post",
            ContentType::Email => "Email",
            ContentType::Story => "Story",
            ContentType::Poem => "Poem",
        }
    }

    /// Next entry in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ContentType::Blog => ContentType::Email,
            ContentType::Email => ContentType::Story,
            ContentType::Story => ContentType::Poem,
            ContentType::Poem => ContentType::Blog,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown content type '{s}' (expected blog, email, story or poem)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all() {
        let mut t = ContentType::Blog;
        let mut seen = vec![t];
        for _ in 0..3 {
            t = t.next();
            seen.push(t);
        }
        assert_eq!(seen, ContentType::ALL.to_vec());
        assert_eq!(t.next(), ContentType::Blog);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Poem".parse::<ContentType>().unwrap(), ContentType::Poem);
        assert_eq!(" email ".parse::<ContentType>().unwrap(), ContentType::Email);
        assert!("haiku".parse::<ContentType>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&ContentType::Story).unwrap();
        assert_eq!(json, "\"story\"");
    }
}
