//! Rendering of the complete `assembly.xml` package document.

use oiv_command_core::Content;
use uuid::Uuid;

use crate::colors::Colors;
use crate::metadata::{Description, Metadata};

/// Package format understood by the installer.
pub const PACKAGE_FORMAT_VERSION: &str = "2.2";

/// Game the package targets.
pub const PACKAGE_TARGET: &str = "Five";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// A package document: metadata, colours and the command content.
#[derive(Clone, Debug)]
pub struct Assembly {
    id: Uuid,
    metadata: Metadata,
    colors: Colors,
    content: Content,
}

impl Assembly {
    /// Creates a document with a fresh random package id.
    pub fn new(metadata: Metadata, colors: Colors, content: Content) -> Self {
        Self::with_id(Uuid::new_v4(), metadata, colors, content)
    }

    pub fn with_id(id: Uuid, metadata: Metadata, colors: Colors, content: Content) -> Self {
        Self {
            id,
            metadata,
            colors,
            content,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Renders the document. The content markup is embedded verbatim as the
    /// body of the package's own `<content>` element.
    pub fn render(&self) -> String {
        let id = self.id.braced().to_string();
        let mut doc = DocumentWriter::default();

        doc.line(XML_DECLARATION);
        doc.open(
            "package",
            &[
                ("version", PACKAGE_FORMAT_VERSION),
                ("id", id.as_str()),
                ("target", PACKAGE_TARGET),
            ],
        );

        self.render_metadata(&mut doc);
        self.render_colors(&mut doc);
        doc.open("content", &[]);
        doc.line(self.content.result());
        doc.close("content");

        doc.close("package");
        doc.finish()
    }

    fn render_metadata(&self, doc: &mut DocumentWriter) {
        let metadata = &self.metadata;
        doc.open("metadata", &[]);
        doc.leaf("name", &[], &metadata.name);

        doc.open("version", &[]);
        doc.leaf("major", &[], &metadata.version.major.to_string());
        doc.leaf("minor", &[], &metadata.version.minor.to_string());
        if let Some(tag) = &metadata.version.tag {
            doc.leaf("tag", &[], tag);
        }
        doc.close("version");

        let author = &metadata.author;
        doc.open("author", &[]);
        doc.leaf("displayName", &[], &author.display_name);
        for (tag, value) in author.links() {
            doc.leaf(tag, &[], value);
        }
        if let Some(youtube) = &author.youtube {
            doc.leaf("youtube", &[("linkKind", youtube.kind.as_str())], &youtube.target);
        }
        doc.close("author");

        render_description(doc, "description", &metadata.description, None);
        if let Some(large) = &metadata.large_description {
            render_description(
                doc,
                "largeDescription",
                &large.description,
                large.display_name.as_deref(),
            );
        }
        if let Some(licence) = &metadata.licence {
            render_description(doc, "licence", licence, None);
        }

        doc.close("metadata");
    }

    fn render_colors(&self, doc: &mut DocumentWriter) {
        let header = &self.colors.header_background;
        let header_color = header.color.to_string();
        let icon_color = self.colors.icon_background.color.to_string();

        doc.open("colors", &[]);
        doc.leaf(
            "headerBackground",
            &[(
                "useBlackTextColor",
                if header.use_black_text_color {
                    "True"
                } else {
                    "False"
                },
            )],
            &header_color,
        );
        doc.leaf("iconBackground", &[], &icon_color);
        doc.close("colors");
    }
}

fn render_description(
    doc: &mut DocumentWriter,
    tag: &str,
    description: &Description,
    display_name: Option<&str>,
) {
    let attrs: Vec<(&str, &str)> = [
        ("footerLink", description.footer_link.as_deref()),
        ("footerLinkTitle", description.footer_link_title.as_deref()),
        ("displayName", display_name),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
    .collect();

    doc.leaf(tag, &attrs, &format!("<![CDATA[{}]]>", description.text));
}

/// Line-oriented writer with two-space indentation.
#[derive(Default)]
struct DocumentWriter {
    out: String,
    depth: usize,
}

impl DocumentWriter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) {
        let tag = format!("<{name}{}>", format_attrs(attrs));
        self.line(&tag);
        self.depth += 1;
    }

    fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{name}>"));
    }

    fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) {
        self.line(&format!("<{name}{}>{text}</{name}>", format_attrs(attrs)));
    }

    fn finish(self) -> String {
        self.out
    }
}

fn format_attrs(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!(" {key}=\"{value}\""))
        .collect()
}
