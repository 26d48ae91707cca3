//! Container operations: archive, text and xml scopes.
//!
//! A container renders its own tag around the markup of its children, in the
//! order they were supplied. Text and xml scopes only hold their own leaf type;
//! archives hold any [`Operation`], including other archives.

use crate::content::Operation;
use crate::markup::{self, Render};
use crate::ops::{TextOp, XmlOp};

/// Nested archive scope. Children apply to the files inside `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveContainer {
    path: String,
    create_if_not_exists: bool,
    children: Vec<Operation>,
    markup: String,
}

impl ArchiveContainer {
    /// Archive format written to the `type` attribute.
    pub const ARCHIVE_TYPE: &'static str = "RPF7";

    pub fn new(
        path: impl Into<String>,
        create_if_not_exists: bool,
        children: impl IntoIterator<Item = Operation>,
    ) -> Self {
        let path = path.into();
        let children: Vec<Operation> = children.into_iter().collect();
        let markup = markup::wrap(
            "archive",
            [
                ("path", path.as_str()),
                ("createIfNotExist", markup::bool_attr(create_if_not_exists)),
                ("type", Self::ARCHIVE_TYPE),
            ],
            &children,
        );
        Self {
            path,
            create_if_not_exists,
            children,
            markup,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn create_if_not_exists(&self) -> bool {
        self.create_if_not_exists
    }

    pub fn children(&self) -> &[Operation] {
        &self.children
    }
}

impl Render for ArchiveContainer {
    fn markup(&self) -> &str {
        &self.markup
    }
}

/// Text file scope holding line edits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextContainer {
    path: String,
    create_if_not_exists: bool,
    children: Vec<TextOp>,
    markup: String,
}

impl TextContainer {
    pub fn new(
        path: impl Into<String>,
        create_if_not_exists: bool,
        children: impl IntoIterator<Item = TextOp>,
    ) -> Self {
        let path = path.into();
        let children: Vec<TextOp> = children.into_iter().collect();
        let markup = markup::wrap(
            "text",
            [
                ("path", path.as_str()),
                ("createIfNotExist", markup::bool_attr(create_if_not_exists)),
            ],
            &children,
        );
        Self {
            path,
            create_if_not_exists,
            children,
            markup,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn create_if_not_exists(&self) -> bool {
        self.create_if_not_exists
    }

    pub fn children(&self) -> &[TextOp] {
        &self.children
    }
}

impl Render for TextContainer {
    fn markup(&self) -> &str {
        &self.markup
    }
}

/// Xml file scope holding node edits. The file must already exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlContainer {
    path: String,
    children: Vec<XmlOp>,
    markup: String,
}

impl XmlContainer {
    pub fn new(path: impl Into<String>, children: impl IntoIterator<Item = XmlOp>) -> Self {
        let path = path.into();
        let children: Vec<XmlOp> = children.into_iter().collect();
        let markup = markup::wrap("xml", [("path", path.as_str())], &children);
        Self {
            path,
            children,
            markup,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn children(&self) -> &[XmlOp] {
        &self.children
    }
}

impl Render for XmlContainer {
    fn markup(&self) -> &str {
        &self.markup
    }
}
