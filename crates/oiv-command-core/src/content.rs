//! The closed [`Operation`] enum and the top-level [`Content`] list.

use std::fmt;

use crate::container::{ArchiveContainer, TextContainer, XmlContainer};
use crate::markup::{self, Render};
use crate::ops::{Defragment, FileOp, TextOp, XmlOp};

/// Any leaf or container operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Defragment(Defragment),
    File(FileOp),
    Text(TextOp),
    Xml(XmlOp),
    Archive(ArchiveContainer),
    TextContainer(TextContainer),
    XmlContainer(XmlContainer),
}

impl Operation {
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Operation::Archive(_) | Operation::TextContainer(_) | Operation::XmlContainer(_)
        )
    }
}

impl Render for Operation {
    fn markup(&self) -> &str {
        match self {
            Operation::Defragment(op) => op.markup(),
            Operation::File(op) => op.markup(),
            Operation::Text(op) => op.markup(),
            Operation::Xml(op) => op.markup(),
            Operation::Archive(container) => container.markup(),
            Operation::TextContainer(container) => container.markup(),
            Operation::XmlContainer(container) => container.markup(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.markup())
    }
}

impl From<Defragment> for Operation {
    fn from(op: Defragment) -> Self {
        Operation::Defragment(op)
    }
}

impl From<FileOp> for Operation {
    fn from(op: FileOp) -> Self {
        Operation::File(op)
    }
}

impl From<TextOp> for Operation {
    fn from(op: TextOp) -> Self {
        Operation::Text(op)
    }
}

impl From<XmlOp> for Operation {
    fn from(op: XmlOp) -> Self {
        Operation::Xml(op)
    }
}

impl From<ArchiveContainer> for Operation {
    fn from(container: ArchiveContainer) -> Self {
        Operation::Archive(container)
    }
}

impl From<TextContainer> for Operation {
    fn from(container: TextContainer) -> Self {
        Operation::TextContainer(container)
    }
}

impl From<XmlContainer> for Operation {
    fn from(container: XmlContainer) -> Self {
        Operation::XmlContainer(container)
    }
}

/// Top-level operation list of a package, rendered as one `<content>` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Content {
    operations: Vec<Operation>,
    markup: String,
}

impl Content {
    pub fn new(operations: impl IntoIterator<Item = Operation>) -> Self {
        let operations: Vec<Operation> = operations.into_iter().collect();
        let markup = markup::wrap("content", None, &operations);
        Self { operations, markup }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The rendered `<content>..</content>` element.
    pub fn result(&self) -> &str {
        &self.markup
    }
}

impl Render for Content {
    fn markup(&self) -> &str {
        &self.markup
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

impl FromIterator<Operation> for Content {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Content::new(iter)
    }
}
