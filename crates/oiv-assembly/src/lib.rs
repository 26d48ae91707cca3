//! Package metadata, colours and the `assembly.xml` document of an OpenIV package.

pub mod colors;
pub mod diff;
pub mod document;
pub mod error;
pub mod fs;
pub mod metadata;

pub use colors::{Color, Colors, HeaderBackground, IconBackground};
pub use document::{Assembly, PACKAGE_FORMAT_VERSION, PACKAGE_TARGET};
pub use error::{AssemblyError, AssemblyResult};
pub use fs::{write_assembly, WriteOptions, WriteOutcome, ASSEMBLY_FILE_NAME, BACKUP_FILE_NAME};
pub use metadata::{
    Author, Description, LargeDescription, Licence, Metadata, Version, YoutubeLink,
    YoutubeLinkKind,
};
pub use oiv_command_core::Content;
