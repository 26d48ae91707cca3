use similar::TextDiff;

pub fn build_unified_diff(original: &str, modified: &str, path: &str) -> Option<String> {
    if original == modified {
        return None;
    }

    let diff = TextDiff::from_lines(original, modified);
    let header_old = format!("a/{path}");
    let header_new = format!("b/{path}");

    Some(
        diff.unified_diff()
            .header(&header_old, &header_new)
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_none_for_identical_documents() {
        assert!(build_unified_diff("<a/>\n", "<a/>\n", "assembly.xml").is_none());
    }

    #[test]
    fn new_document_diffs_against_empty() {
        let diff = build_unified_diff("", "<package>\n</package>\n", "assembly.xml").unwrap();
        assert!(diff.contains("+++ b/assembly.xml"));
        assert!(diff.contains("+<package>"));
    }
}
