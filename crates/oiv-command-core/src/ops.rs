//! Leaf operations.
//!
//! Every constructor validates the mode-specific field rules and renders the
//! markup fragment up front, so a value of any of these types is always a
//! valid instruction. Empty strings passed for optional fields are treated as
//! absent.

use std::fmt;
use std::str::FromStr;

use crate::error::{OperationKind, ValidationError, ValidationResult};
use crate::markup::{self, Render};

/// Tag used for the node created by an xml `add`/`replace` when none is given.
pub const DEFAULT_NODE_TAG: &str = "Item";

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, |$value:ident| $err:expr;
        $($variant:ident => $text:literal,)+
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Markup spellings, in declaration order.
            pub const KEYWORDS: &'static [&'static str] = &[$($text,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str($value: &str) -> Result<Self, Self::Err> {
                match $value {
                    $($text => Ok($name::$variant),)+
                    _ => Err($err),
                }
            }
        }
    };
}

keyword_enum! {
    /// Whether a file is added to or deleted from the target archive.
    FileMode, |value| invalid_mode(OperationKind::File, value, Self::KEYWORDS);
    Add => "add",
    Delete => "delete",
}

keyword_enum! {
    /// Line edit performed inside a text file.
    TextMode, |value| invalid_mode(OperationKind::Text, value, Self::KEYWORDS);
    Add => "add",
    Insert => "insert",
    Replace => "replace",
    Delete => "delete",
}

keyword_enum! {
    /// Node edit performed inside an xml file.
    XmlMode, |value| invalid_mode(OperationKind::Xml, value, Self::KEYWORDS);
    Add => "add",
    Replace => "replace",
    Remove => "remove",
}

keyword_enum! {
    /// Side of the matched line an `insert` writes to. Rendered as `where`.
    Position, |value| invalid_value(OperationKind::Text, "where", value, Self::KEYWORDS);
    Before => "Before",
    After => "After",
}

keyword_enum! {
    /// How the `line` of a text edit is matched.
    Condition, |value| invalid_value(OperationKind::Text, "condition", value, Self::KEYWORDS);
    Equal => "Equal",
    StartsWith => "StartsWith",
    Mask => "Mask",
}

keyword_enum! {
    /// Placement of a node created by an xml `add`.
    Append, |value| invalid_value(OperationKind::Xml, "append", value, Self::KEYWORDS);
    First => "First",
    Last => "Last",
    Before => "Before",
    After => "After",
}

fn invalid_mode(
    kind: OperationKind,
    value: &str,
    expected: &'static [&'static str],
) -> ValidationError {
    ValidationError::InvalidMode {
        kind,
        value: value.to_string(),
        expected,
    }
}

fn invalid_value(
    kind: OperationKind,
    field: &'static str,
    value: &str,
    expected: &'static [&'static str],
) -> ValidationError {
    ValidationError::InvalidEnumValue {
        kind,
        field,
        value: value.to_string(),
        expected,
    }
}

/// Per-mode field rule checks, reported against one operation kind and mode.
struct Rules {
    kind: OperationKind,
    mode: &'static str,
}

impl Rules {
    fn require(&self, field: &'static str, present: bool) -> ValidationResult<()> {
        if present {
            Ok(())
        } else {
            Err(ValidationError::MissingRequiredField {
                kind: self.kind,
                mode: self.mode,
                field,
            })
        }
    }

    fn forbid(&self, field: &'static str, present: bool) -> ValidationResult<()> {
        if present {
            Err(ValidationError::ForbiddenFieldPresent {
                kind: self.kind,
                mode: self.mode,
                field,
            })
        } else {
            Ok(())
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// `<defragmentation archive=".."/>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Defragment {
    archive: String,
    markup: String,
}

impl Defragment {
    pub fn new(archive: impl Into<String>) -> Self {
        let archive = archive.into();
        let mut markup = String::new();
        markup::push_empty(&mut markup, "defragmentation", [("archive", archive.as_str())]);
        Self { archive, markup }
    }

    pub fn archive(&self) -> &str {
        &self.archive
    }
}

impl Render for Defragment {
    fn markup(&self) -> &str {
        &self.markup
    }
}

/// Adds a file to, or deletes a file from, the enclosing archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileOp {
    mode: FileMode,
    file: String,
    source: Option<String>,
    markup: String,
}

impl FileOp {
    /// `source` is required for [`FileMode::Add`] and forbidden for [`FileMode::Delete`].
    pub fn new(
        mode: FileMode,
        file: impl Into<String>,
        source: Option<String>,
    ) -> ValidationResult<Self> {
        let file = file.into();
        let source = non_empty(source);

        let rules = Rules {
            kind: OperationKind::File,
            mode: mode.as_str(),
        };
        match mode {
            FileMode::Add => rules.require("source", source.is_some())?,
            FileMode::Delete => rules.forbid("source", source.is_some())?,
        }

        let markup = markup::element(
            mode.as_str(),
            source.as_deref().map(|source| ("source", source)),
            &file,
        );

        Ok(Self {
            mode,
            file,
            source,
            markup,
        })
    }

    pub fn add(file: impl Into<String>, source: impl Into<String>) -> ValidationResult<Self> {
        Self::new(FileMode::Add, file, Some(source.into()))
    }

    pub fn delete(file: impl Into<String>) -> Self {
        let file = file.into();
        let markup = markup::element(FileMode::Delete.as_str(), None, &file);
        Self {
            mode: FileMode::Delete,
            file,
            source: None,
            markup,
        }
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl Render for FileOp {
    fn markup(&self) -> &str {
        &self.markup
    }
}

/// Optional fields of a [`TextOp`]. Which ones are required depends on the mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextParams {
    pub position: Option<Position>,
    pub line: Option<String>,
    pub condition: Option<Condition>,
}

/// Line-level edit inside a text file.
///
/// | mode      | required                      | forbidden              |
/// |-----------|-------------------------------|------------------------|
/// | `add`     | text                          | where, line, condition |
/// | `insert`  | text, where, line, condition  |                        |
/// | `replace` | text, line, condition         | where                  |
/// | `delete`  | text, condition               | where, line            |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextOp {
    mode: TextMode,
    text: String,
    params: TextParams,
    markup: String,
}

impl TextOp {
    pub fn new(mode: TextMode, text: impl Into<String>, params: TextParams) -> ValidationResult<Self> {
        let text = text.into();
        let params = TextParams {
            line: non_empty(params.line),
            ..params
        };

        let has_where = params.position.is_some();
        let has_line = params.line.is_some();
        let has_condition = params.condition.is_some();

        let rules = Rules {
            kind: OperationKind::Text,
            mode: mode.as_str(),
        };
        match mode {
            TextMode::Add => {
                rules.forbid("where", has_where)?;
                rules.forbid("line", has_line)?;
                rules.forbid("condition", has_condition)?;
            }
            TextMode::Insert => {
                rules.require("where", has_where)?;
                rules.require("line", has_line)?;
                rules.require("condition", has_condition)?;
            }
            TextMode::Replace => {
                rules.require("line", has_line)?;
                rules.require("condition", has_condition)?;
                rules.forbid("where", has_where)?;
            }
            TextMode::Delete => {
                rules.require("condition", has_condition)?;
                rules.forbid("where", has_where)?;
                rules.forbid("line", has_line)?;
            }
        }

        let attrs = [
            params.position.map(|position| ("where", position.as_str())),
            params.line.as_deref().map(|line| ("line", line)),
            params
                .condition
                .map(|condition| ("condition", condition.as_str())),
        ];
        let markup = markup::element(mode.as_str(), attrs.into_iter().flatten(), &text);

        Ok(Self {
            mode,
            text,
            params,
            markup,
        })
    }

    /// Appends `text` to the end of the file.
    pub fn add(text: impl Into<String>) -> Self {
        let text = text.into();
        let markup = markup::element(TextMode::Add.as_str(), None, &text);
        Self {
            mode: TextMode::Add,
            text,
            params: TextParams::default(),
            markup,
        }
    }

    pub fn insert(
        text: impl Into<String>,
        position: Position,
        line: impl Into<String>,
        condition: Condition,
    ) -> ValidationResult<Self> {
        Self::new(
            TextMode::Insert,
            text,
            TextParams {
                position: Some(position),
                line: Some(line.into()),
                condition: Some(condition),
            },
        )
    }

    pub fn replace(
        text: impl Into<String>,
        line: impl Into<String>,
        condition: Condition,
    ) -> ValidationResult<Self> {
        Self::new(
            TextMode::Replace,
            text,
            TextParams {
                position: None,
                line: Some(line.into()),
                condition: Some(condition),
            },
        )
    }

    pub fn delete(text: impl Into<String>, condition: Condition) -> Self {
        let text = text.into();
        let markup = markup::element(
            TextMode::Delete.as_str(),
            [("condition", condition.as_str())],
            &text,
        );
        Self {
            mode: TextMode::Delete,
            text,
            params: TextParams {
                condition: Some(condition),
                ..TextParams::default()
            },
            markup,
        }
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Option<Position> {
        self.params.position
    }

    pub fn line(&self) -> Option<&str> {
        self.params.line.as_deref()
    }

    pub fn condition(&self) -> Option<Condition> {
        self.params.condition
    }
}

impl Render for TextOp {
    fn markup(&self) -> &str {
        &self.markup
    }
}

/// Optional fields of an [`XmlOp`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlParams {
    pub append: Option<Append>,
    pub node_value: Option<String>,
    /// Falls back to [`DEFAULT_NODE_TAG`].
    pub node_tag: Option<String>,
    pub node_attrs: Vec<(String, String)>,
}

/// Node-level edit inside an xml file, addressed by `xpath`.
///
/// `add` requires `append` and `node_value`, `replace` requires `node_value`
/// and rejects `append`, and `remove` accepts nothing but the xpath.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlOp {
    mode: XmlMode,
    xpath: String,
    append: Option<Append>,
    node_value: Option<String>,
    node_tag: String,
    node_attrs: Vec<(String, String)>,
    markup: String,
}

impl XmlOp {
    pub fn new(mode: XmlMode, xpath: impl Into<String>, params: XmlParams) -> ValidationResult<Self> {
        let xpath = xpath.into();
        let node_value = non_empty(params.node_value);
        let node_tag = non_empty(params.node_tag).unwrap_or_else(|| DEFAULT_NODE_TAG.to_string());

        let rules = Rules {
            kind: OperationKind::Xml,
            mode: mode.as_str(),
        };
        match mode {
            XmlMode::Add => {
                rules.require("append", params.append.is_some())?;
                rules.require("node_value", node_value.is_some())?;
            }
            XmlMode::Replace => {
                rules.forbid("append", params.append.is_some())?;
                rules.require("node_value", node_value.is_some())?;
            }
            XmlMode::Remove => {
                rules.forbid("append", params.append.is_some())?;
                rules.forbid("node_value", node_value.is_some())?;
                rules.forbid("node_tag", node_tag != DEFAULT_NODE_TAG)?;
                rules.forbid("node_attrs", !params.node_attrs.is_empty())?;
            }
        }

        let mut op = Self {
            mode,
            xpath,
            append: params.append,
            node_value,
            node_tag,
            node_attrs: params.node_attrs,
            markup: String::new(),
        };
        op.markup = op.render();
        Ok(op)
    }

    /// Removes every node matched by `xpath`.
    pub fn remove(xpath: impl Into<String>) -> Self {
        let mut op = Self {
            mode: XmlMode::Remove,
            xpath: xpath.into(),
            append: None,
            node_value: None,
            node_tag: DEFAULT_NODE_TAG.to_string(),
            node_attrs: Vec::new(),
            markup: String::new(),
        };
        op.markup = op.render();
        op
    }

    fn render(&self) -> String {
        let mode = self.mode.as_str();
        let mut out = String::new();

        if self.mode == XmlMode::Remove {
            markup::push_empty(&mut out, mode, [("xpath", self.xpath.as_str())]);
            return out;
        }

        let parent_attrs = [
            Some(("xpath", self.xpath.as_str())),
            self.append.map(|append| ("append", append.as_str())),
        ];
        markup::push_open(&mut out, mode, parent_attrs.into_iter().flatten());
        out.push_str(&markup::element(
            &self.node_tag,
            self.node_attrs
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
            self.node_value.as_deref().unwrap_or_default(),
        ));
        markup::push_close(&mut out, mode);
        out
    }

    pub fn mode(&self) -> XmlMode {
        self.mode
    }

    pub fn xpath(&self) -> &str {
        &self.xpath
    }

    pub fn append(&self) -> Option<Append> {
        self.append
    }

    pub fn node_value(&self) -> Option<&str> {
        self.node_value.as_deref()
    }

    pub fn node_tag(&self) -> &str {
        &self.node_tag
    }

    pub fn node_attrs(&self) -> &[(String, String)] {
        &self.node_attrs
    }
}

impl Render for XmlOp {
    fn markup(&self) -> &str {
        &self.markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_markup_spellings() {
        assert_eq!("insert".parse::<TextMode>().unwrap(), TextMode::Insert);
        assert_eq!("StartsWith".parse::<Condition>().unwrap(), Condition::StartsWith);
        assert_eq!("Last".parse::<Append>().unwrap(), Append::Last);
    }

    #[test]
    fn unknown_mode_is_invalid_mode() {
        let err = "modify".parse::<FileMode>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidMode {
                kind: OperationKind::File,
                value: "modify".into(),
                expected: &["add", "delete"],
            }
        );
    }

    #[test]
    fn unknown_enum_value_is_invalid_enum_value() {
        let err = "Middle".parse::<Position>().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidEnumValue {
                field: "where",
                ..
            }
        ));
    }

    #[test]
    fn keywords_follow_declaration_order() {
        assert_eq!(Append::KEYWORDS, &["First", "Last", "Before", "After"]);
        assert_eq!(Append::ALL.len(), Append::KEYWORDS.len());
    }

    #[test]
    fn empty_source_counts_as_missing() {
        let err = FileOp::new(FileMode::Add, "a.txt", Some(String::new())).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingRequiredField { field: "source", .. }
        ));
    }

    #[test]
    fn shorthand_constructors_match_validated_ones() {
        let delete = TextOp::delete("x", Condition::Mask);
        let validated = TextOp::new(
            TextMode::Delete,
            "x",
            TextParams {
                condition: Some(Condition::Mask),
                ..TextParams::default()
            },
        )
        .unwrap();
        assert_eq!(delete, validated);

        let remove = XmlOp::remove("/a");
        assert_eq!(
            remove,
            XmlOp::new(XmlMode::Remove, "/a", XmlParams::default()).unwrap()
        );
    }
}
