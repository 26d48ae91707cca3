//! Command algebra for OpenIV package (`.oiv`) assembly documents.
//!
//! Leaf operations (defragment, file, text and xml edits) are validated and
//! rendered to markup when they are constructed. Containers wrap an ordered
//! list of children and [`Content`] wraps the whole tree in the `<content>`
//! element consumed by the assembly step.

pub mod container;
pub mod content;
pub mod error;
pub mod markup;
pub mod ops;

pub use container::{ArchiveContainer, TextContainer, XmlContainer};
pub use content::{Content, Operation};
pub use error::{OperationKind, ValidationError, ValidationResult};
pub use markup::Render;
pub use ops::{
    Append, Condition, Defragment, FileMode, FileOp, Position, TextMode, TextOp, TextParams,
    XmlMode, XmlOp, XmlParams, DEFAULT_NODE_TAG,
};
