//! Serde shapes of the manifest file and their conversion into typed values.

use std::str::FromStr;

use oiv_assembly::{
    Author, Color, Colors, Description, HeaderBackground, IconBackground, LargeDescription,
    Metadata, Version, YoutubeLink,
};
use oiv_command_core::{
    Append, ArchiveContainer, Condition, Content, Defragment, FileMode, FileOp, Operation,
    Position, TextContainer, TextMode, TextOp, TextParams, ValidationError, XmlContainer, XmlMode,
    XmlOp, XmlParams,
};
use serde::Deserialize;

use crate::validation::{ManifestValidationError, ManifestValidationErrors};

#[derive(Debug, Deserialize)]
pub(crate) struct RawManifest {
    metadata: RawMetadata,
    #[serde(default)]
    colors: Option<RawColors>,
    #[serde(default)]
    content: Vec<RawOperation>,
}

impl RawManifest {
    pub(crate) fn into_parts(
        self,
    ) -> Result<(Metadata, Colors, Content), ManifestValidationErrors> {
        let mut errors = ManifestValidationErrors::default();

        let metadata = self.metadata.into_metadata(&mut errors);
        let colors = self
            .colors
            .map(|colors| colors.into_colors(&mut errors))
            .unwrap_or_default();
        let operations: Vec<Operation> = self
            .content
            .into_iter()
            .enumerate()
            .filter_map(|(idx, op)| op.into_operation(&format!("content[{idx}]"), &mut errors))
            .collect();

        match metadata {
            Some(metadata) if errors.is_empty() => {
                Ok((metadata, colors, Content::new(operations)))
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    name: String,
    version: RawVersion,
    author: RawAuthor,
    description: RawDescription,
    #[serde(default)]
    large_description: Option<RawLargeDescription>,
    #[serde(default)]
    licence: Option<RawDescriptionTable>,
}

impl RawMetadata {
    fn into_metadata(self, errors: &mut ManifestValidationErrors) -> Option<Metadata> {
        if self.name.trim().is_empty() {
            errors.push(ManifestValidationError::new(
                "metadata.name",
                "package name must not be empty",
            ));
        }

        let author = self.author.into_author(errors);
        let version = Version {
            major: self.version.major,
            minor: self.version.minor,
            tag: self.version.tag.filter(|tag| !tag.is_empty()),
        };

        Some(Metadata {
            name: self.name,
            version,
            author: author?,
            description: self.description.into_description(),
            large_description: self.large_description.map(|large| LargeDescription {
                description: Description {
                    text: large.text,
                    footer_link: large.footer_link,
                    footer_link_title: large.footer_link_title,
                },
                display_name: large.display_name,
            }),
            licence: self.licence.map(RawDescriptionTable::into_description),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawVersion {
    major: u32,
    minor: u32,
    #[serde(default)]
    tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    display_name: String,
    #[serde(default)]
    action_link: Option<String>,
    #[serde(default)]
    web: Option<String>,
    #[serde(default)]
    facebook: Option<String>,
    #[serde(default)]
    twitter: Option<String>,
    #[serde(default)]
    youtube: Option<String>,
    #[serde(default)]
    youtube_link_kind: Option<String>,
}

impl RawAuthor {
    fn into_author(self, errors: &mut ManifestValidationErrors) -> Option<Author> {
        match YoutubeLink::from_parts(self.youtube, self.youtube_link_kind.as_deref()) {
            Ok(youtube) => Some(Author {
                display_name: self.display_name,
                action_link: self.action_link,
                web: self.web,
                facebook: self.facebook,
                twitter: self.twitter,
                youtube,
            }),
            Err(err) => {
                errors.push(ManifestValidationError::new(
                    "metadata.author",
                    err.to_string(),
                ));
                None
            }
        }
    }
}

/// A description is either plain text or a table with footer links.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDescription {
    Text(String),
    Table(RawDescriptionTable),
}

impl RawDescription {
    fn into_description(self) -> Description {
        match self {
            RawDescription::Text(text) => Description::new(text),
            RawDescription::Table(table) => table.into_description(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDescriptionTable {
    text: String,
    #[serde(default)]
    footer_link: Option<String>,
    #[serde(default)]
    footer_link_title: Option<String>,
}

impl RawDescriptionTable {
    fn into_description(self) -> Description {
        Description {
            text: self.text,
            footer_link: self.footer_link,
            footer_link_title: self.footer_link_title,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawLargeDescription {
    text: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    footer_link: Option<String>,
    #[serde(default)]
    footer_link_title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawColors {
    #[serde(default)]
    header_background: Option<RawHeaderBackground>,
    #[serde(default)]
    icon_background: Option<RawIconBackground>,
}

impl RawColors {
    fn into_colors(self, errors: &mut ManifestValidationErrors) -> Colors {
        let defaults = Colors::default();

        let header_background = match self.header_background {
            Some(raw) => HeaderBackground {
                color: parse_color(&raw.color, "colors.header_background.color", errors),
                use_black_text_color: raw.use_black_text_color,
            },
            None => defaults.header_background,
        };
        let icon_background = match self.icon_background {
            Some(raw) => IconBackground {
                color: parse_color(&raw.color, "colors.icon_background.color", errors),
            },
            None => defaults.icon_background,
        };

        Colors {
            header_background,
            icon_background,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawHeaderBackground {
    color: String,
    #[serde(default)]
    use_black_text_color: bool,
}

#[derive(Debug, Deserialize)]
struct RawIconBackground {
    color: String,
}

fn parse_color(value: &str, context: &str, errors: &mut ManifestValidationErrors) -> Color {
    value.parse::<Color>().unwrap_or_else(|err| {
        errors.push(ManifestValidationError::new(context, err.to_string()));
        Color::default()
    })
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum RawOperation {
    Defragmentation {
        archive: String,
    },
    File(RawFileOp),
    TextEdit(RawTextOp),
    XmlEdit(RawXmlOp),
    Archive {
        path: String,
        #[serde(default)]
        create_if_not_exists: bool,
        #[serde(default)]
        children: Vec<RawOperation>,
    },
    Text {
        path: String,
        #[serde(default)]
        create_if_not_exists: bool,
        #[serde(default)]
        edits: Vec<RawTextOp>,
    },
    Xml {
        path: String,
        #[serde(default)]
        edits: Vec<RawXmlOp>,
    },
}

impl RawOperation {
    fn into_operation(
        self,
        context: &str,
        errors: &mut ManifestValidationErrors,
    ) -> Option<Operation> {
        match self {
            RawOperation::Defragmentation { archive } => Some(Defragment::new(archive).into()),
            RawOperation::File(raw) => record(context, raw.into_op(), errors).map(Operation::from),
            RawOperation::TextEdit(raw) => {
                record(context, raw.into_op(), errors).map(Operation::from)
            }
            RawOperation::XmlEdit(raw) => record(context, raw.into_op(), errors).map(Operation::from),
            RawOperation::Archive {
                path,
                create_if_not_exists,
                children,
            } => {
                let children: Vec<Operation> = children
                    .into_iter()
                    .enumerate()
                    .filter_map(|(idx, child)| {
                        child.into_operation(&format!("{context}.children[{idx}]"), errors)
                    })
                    .collect();
                Some(ArchiveContainer::new(path, create_if_not_exists, children).into())
            }
            RawOperation::Text {
                path,
                create_if_not_exists,
                edits,
            } => {
                let edits: Vec<TextOp> = edits
                    .into_iter()
                    .enumerate()
                    .filter_map(|(idx, edit)| {
                        record(&format!("{context}.edits[{idx}]"), edit.into_op(), errors)
                    })
                    .collect();
                Some(TextContainer::new(path, create_if_not_exists, edits).into())
            }
            RawOperation::Xml { path, edits } => {
                let edits: Vec<XmlOp> = edits
                    .into_iter()
                    .enumerate()
                    .filter_map(|(idx, edit)| {
                        record(&format!("{context}.edits[{idx}]"), edit.into_op(), errors)
                    })
                    .collect();
                Some(XmlContainer::new(path, edits).into())
            }
        }
    }
}

fn record<T>(
    context: &str,
    result: Result<T, ValidationError>,
    errors: &mut ManifestValidationErrors,
) -> Option<T> {
    result
        .map_err(|err| errors.push(ManifestValidationError::from_command(context, &err)))
        .ok()
}

/// Parses an optional keyword field; an empty string counts as absent.
fn parse_keyword<T>(value: Option<String>) -> Result<Option<T>, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    value
        .filter(|value| !value.is_empty())
        .as_deref()
        .map(str::parse::<T>)
        .transpose()
}

#[derive(Debug, Deserialize)]
struct RawFileOp {
    mode: String,
    file: String,
    #[serde(default)]
    source: Option<String>,
}

impl RawFileOp {
    fn into_op(self) -> Result<FileOp, ValidationError> {
        FileOp::new(self.mode.parse::<FileMode>()?, self.file, self.source)
    }
}

#[derive(Debug, Deserialize)]
struct RawTextOp {
    mode: String,
    text: String,
    #[serde(default, rename = "where")]
    position: Option<String>,
    #[serde(default)]
    line: Option<String>,
    #[serde(default)]
    condition: Option<String>,
}

impl RawTextOp {
    fn into_op(self) -> Result<TextOp, ValidationError> {
        let params = TextParams {
            position: parse_keyword::<Position>(self.position)?,
            line: self.line,
            condition: parse_keyword::<Condition>(self.condition)?,
        };
        TextOp::new(self.mode.parse::<TextMode>()?, self.text, params)
    }
}

#[derive(Debug, Deserialize)]
struct RawXmlOp {
    mode: String,
    xpath: String,
    #[serde(default)]
    append: Option<String>,
    #[serde(default)]
    node_value: Option<String>,
    #[serde(default)]
    node_tag: Option<String>,
    #[serde(default)]
    node_attrs: Vec<(String, String)>,
}

impl RawXmlOp {
    fn into_op(self) -> Result<XmlOp, ValidationError> {
        let params = XmlParams {
            append: parse_keyword::<Append>(self.append)?,
            node_value: self.node_value,
            node_tag: self.node_tag,
            node_attrs: self.node_attrs,
        };
        XmlOp::new(self.mode.parse::<XmlMode>()?, self.xpath, params)
    }
}
