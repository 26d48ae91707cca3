//! Package metadata records shown by the package installer.

use std::fmt;
use std::str::FromStr;

use crate::error::{AssemblyError, AssemblyResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub tag: Option<String>,
}

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into()).filter(|tag: &String| !tag.is_empty());
        self
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(tag) = &self.tag {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum YoutubeLinkKind {
    User,
    Channel,
}

impl YoutubeLinkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            YoutubeLinkKind::User => "user",
            YoutubeLinkKind::Channel => "channel",
        }
    }
}

impl fmt::Display for YoutubeLinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YoutubeLinkKind {
    type Err = AssemblyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(YoutubeLinkKind::User),
            "channel" => Ok(YoutubeLinkKind::Channel),
            other => Err(AssemblyError::InvalidYoutubeLinkKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YoutubeLink {
    pub target: String,
    pub kind: YoutubeLinkKind,
}

impl YoutubeLink {
    /// Pairs a youtube target with its link kind. Both must be given, or neither.
    pub fn from_parts(
        target: Option<String>,
        kind: Option<&str>,
    ) -> AssemblyResult<Option<YoutubeLink>> {
        let target = target.filter(|target| !target.is_empty());
        let kind = kind.filter(|kind| !kind.is_empty());
        match (target, kind) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(AssemblyError::MissingYoutubeLinkKind),
            (None, Some(_)) => Err(AssemblyError::MissingYoutube),
            (Some(target), Some(kind)) => Ok(Some(YoutubeLink {
                target,
                kind: kind.parse()?,
            })),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Author {
    pub display_name: String,
    pub action_link: Option<String>,
    pub web: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<YoutubeLink>,
}

impl Author {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Optional contact links in the order they appear in the document.
    pub(crate) fn links(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("actionLink", self.action_link.as_deref()),
            ("web", self.web.as_deref()),
            ("facebook", self.facebook.as_deref()),
            ("twitter", self.twitter.as_deref()),
        ]
        .into_iter()
        .filter_map(|(tag, value)| value.filter(|v| !v.is_empty()).map(|v| (tag, v)))
    }
}

/// Installer description text. The text is emitted as CDATA.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub footer_link: Option<String>,
    pub footer_link_title: Option<String>,
}

impl Description {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_footer_link(mut self, link: impl Into<String>, title: impl Into<String>) -> Self {
        self.footer_link = Some(link.into());
        self.footer_link_title = Some(title.into());
        self
    }
}

/// Licence text has the same shape as a description.
pub type Licence = Description;

/// Extended description shown on its own installer page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LargeDescription {
    pub description: Description,
    pub display_name: Option<String>,
}

impl LargeDescription {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            description: Description::new(text),
            display_name: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub version: Version,
    pub author: Author,
    pub description: Description,
    pub large_description: Option<LargeDescription>,
    pub licence: Option<Licence>,
}

impl Metadata {
    pub fn new(
        name: impl Into<String>,
        version: Version,
        author: Author,
        description: Description,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            author,
            description,
            large_description: None,
            licence: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_requires_link_kind() {
        assert!(matches!(
            YoutubeLink::from_parts(Some("modder".into()), None),
            Err(AssemblyError::MissingYoutubeLinkKind)
        ));
        assert!(matches!(
            YoutubeLink::from_parts(None, Some("user")),
            Err(AssemblyError::MissingYoutube)
        ));
        assert!(matches!(
            YoutubeLink::from_parts(Some("modder".into()), Some("playlist")),
            Err(AssemblyError::InvalidYoutubeLinkKind(kind)) if kind == "playlist"
        ));
    }

    #[test]
    fn youtube_link_accepts_pair() {
        let link = YoutubeLink::from_parts(Some("modder".into()), Some("channel"))
            .unwrap()
            .unwrap();
        assert_eq!(link.kind, YoutubeLinkKind::Channel);
        assert!(YoutubeLink::from_parts(None, None).unwrap().is_none());
    }

    #[test]
    fn author_links_skip_unset_and_empty_values() {
        let author = Author {
            web: Some("https://example.com".into()),
            twitter: Some(String::new()),
            ..Author::new("me")
        };
        let links: Vec<_> = author.links().collect();
        assert_eq!(links, vec![("web", "https://example.com")]);
    }

    #[test]
    fn version_display_includes_tag() {
        assert_eq!(Version::new(1, 2).with_tag("beta").to_string(), "1.2 beta");
        assert_eq!(Version::new(1, 2).with_tag("").tag, None);
    }
}
