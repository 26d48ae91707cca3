//! Minimal tag writer for the assembly markup dialect.
//!
//! Attribute values and text are written verbatim. Callers that need quotes,
//! ampersands or angle brackets in a value must escape them beforehand.

/// Anything that has a rendered markup fragment.
pub trait Render {
    fn markup(&self) -> &str;
}

pub(crate) fn push_open<'a>(
    out: &mut String,
    name: &str,
    attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
) {
    out.push('<');
    out.push_str(name);
    push_attrs(out, attrs);
    out.push('>');
}

pub(crate) fn push_close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

pub(crate) fn push_empty<'a>(
    out: &mut String,
    name: &str,
    attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
) {
    out.push('<');
    out.push_str(name);
    push_attrs(out, attrs);
    out.push_str("/>");
}

/// `<name attrs>text</name>`
pub(crate) fn element<'a>(
    name: &str,
    attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    text: &str,
) -> String {
    let mut out = String::with_capacity(name.len() * 2 + text.len() + 5);
    push_open(&mut out, name, attrs);
    out.push_str(text);
    push_close(&mut out, name);
    out
}

/// Wraps the concatenated markup of `children`, in order, inside `name`.
pub(crate) fn wrap<'a, 'c, R: Render + 'c>(
    name: &str,
    attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    children: impl IntoIterator<Item = &'c R>,
) -> String {
    let mut out = String::new();
    push_open(&mut out, name, attrs);
    for child in children {
        out.push_str(child.markup());
    }
    push_close(&mut out, name);
    out
}

pub(crate) fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn push_attrs<'a>(out: &mut String, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) {
    for (key, value) in attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}
