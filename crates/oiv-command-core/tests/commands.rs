use oiv_command_core::{
    Append, ArchiveContainer, Condition, Content, Defragment, FileMode, FileOp, OperationKind,
    Position, Render, TextContainer, TextMode, TextOp, TextParams, ValidationError, XmlContainer,
    XmlMode, XmlOp, XmlParams,
};
use pretty_assertions::assert_eq;

fn text_params(
    position: Option<Position>,
    line: Option<&str>,
    condition: Option<Condition>,
) -> TextParams {
    TextParams {
        position,
        line: line.map(str::to_string),
        condition,
    }
}

fn missing(err: ValidationError) -> &'static str {
    match err {
        ValidationError::MissingRequiredField { field, .. } => field,
        other => panic!("expected MissingRequiredField, got {other:?}"),
    }
}

fn forbidden(err: ValidationError) -> &'static str {
    match err {
        ValidationError::ForbiddenFieldPresent { field, .. } => field,
        other => panic!("expected ForbiddenFieldPresent, got {other:?}"),
    }
}

#[test]
fn file_add_renders_source_attribute() {
    let op = FileOp::new(FileMode::Add, "a.txt", Some("b.txt".into())).unwrap();
    assert_eq!(op.markup(), r#"<add source="b.txt">a.txt</add>"#);
}

#[test]
fn file_add_without_source_is_rejected() {
    let err = FileOp::new(FileMode::Add, "a.txt", None).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingRequiredField {
            kind: OperationKind::File,
            mode: "add",
            field: "source",
        }
    );
}

#[test]
fn file_delete_rejects_source() {
    let err = FileOp::new(FileMode::Delete, "a.txt", Some("b.txt".into())).unwrap_err();
    assert_eq!(forbidden(err), "source");
    assert_eq!(FileOp::delete("a.txt").markup(), "<delete>a.txt</delete>");
}

#[test]
fn defragment_self_closes() {
    assert_eq!(
        Defragment::new("update/update.rpf").markup(),
        r#"<defragmentation archive="update/update.rpf"/>"#
    );
}

#[test]
fn text_insert_renders_all_attributes_in_order() {
    let op = TextOp::new(
        TextMode::Insert,
        "x",
        text_params(Some(Position::Before), Some("3"), Some(Condition::Equal)),
    )
    .unwrap();
    assert_eq!(
        op.markup(),
        r#"<insert where="Before" line="3" condition="Equal">x</insert>"#
    );
}

#[test]
fn text_modes_render_only_permitted_attributes() {
    assert_eq!(TextOp::add("y").markup(), "<add>y</add>");
    assert_eq!(
        TextOp::replace("new", "old", Condition::StartsWith)
            .unwrap()
            .markup(),
        r#"<replace line="old" condition="StartsWith">new</replace>"#
    );
    assert_eq!(
        TextOp::delete("gone", Condition::Mask).markup(),
        r#"<delete condition="Mask">gone</delete>"#
    );
}

#[test]
fn text_add_forbids_every_optional_field() {
    let cases = [
        (text_params(Some(Position::After), None, None), "where"),
        (text_params(None, Some("1"), None), "line"),
        (text_params(None, None, Some(Condition::Equal)), "condition"),
    ];
    for (params, field) in cases {
        let err = TextOp::new(TextMode::Add, "x", params).unwrap_err();
        assert_eq!(forbidden(err), field);
    }
}

#[test]
fn text_insert_requires_every_optional_field() {
    let cases = [
        (text_params(None, Some("1"), Some(Condition::Equal)), "where"),
        (text_params(Some(Position::After), None, Some(Condition::Equal)), "line"),
        (text_params(Some(Position::After), Some("1"), None), "condition"),
    ];
    for (params, field) in cases {
        let err = TextOp::new(TextMode::Insert, "x", params).unwrap_err();
        assert_eq!(missing(err), field);
    }
}

#[test]
fn text_replace_and_delete_follow_their_rows() {
    let err = TextOp::new(
        TextMode::Replace,
        "x",
        text_params(Some(Position::After), Some("1"), Some(Condition::Equal)),
    )
    .unwrap_err();
    assert_eq!(forbidden(err), "where");

    let err = TextOp::new(TextMode::Replace, "x", text_params(None, None, Some(Condition::Equal)))
        .unwrap_err();
    assert_eq!(missing(err), "line");

    let err = TextOp::new(TextMode::Delete, "x", text_params(None, None, None)).unwrap_err();
    assert_eq!(missing(err), "condition");

    let err = TextOp::new(
        TextMode::Delete,
        "x",
        text_params(None, Some("1"), Some(Condition::Equal)),
    )
    .unwrap_err();
    assert_eq!(forbidden(err), "line");
}

#[test]
fn text_rows_reject_remaining_combinations() {
    let cases = [
        (
            TextMode::Delete,
            text_params(Some(Position::Before), None, Some(Condition::Equal)),
            ValidationError::ForbiddenFieldPresent {
                kind: OperationKind::Text,
                mode: "delete",
                field: "where",
            },
        ),
        (
            TextMode::Insert,
            text_params(Some(Position::After), Some(""), Some(Condition::Equal)),
            ValidationError::MissingRequiredField {
                kind: OperationKind::Text,
                mode: "insert",
                field: "line",
            },
        ),
        (
            TextMode::Replace,
            text_params(None, Some(""), Some(Condition::Mask)),
            ValidationError::MissingRequiredField {
                kind: OperationKind::Text,
                mode: "replace",
                field: "line",
            },
        ),
    ];
    for (mode, params, expected) in cases {
        assert_eq!(TextOp::new(mode, "x", params).unwrap_err(), expected);
    }
}

#[test]
fn xml_remove_renders_self_closed_tag() {
    let op = XmlOp::new(XmlMode::Remove, "/a/b", XmlParams::default()).unwrap();
    assert_eq!(op.markup(), r#"<remove xpath="/a/b"/>"#);
}

#[test]
fn xml_add_wraps_node_with_attributes() {
    let op = XmlOp::new(
        XmlMode::Add,
        "/CVehicleModelInfo__InitDataList/InitDatas",
        XmlParams {
            append: Some(Append::Last),
            node_value: Some("adder".into()),
            node_tag: None,
            node_attrs: vec![
                ("type".into(), "car".into()),
                ("dlc".into(), "base".into()),
            ],
        },
    )
    .unwrap();
    assert_eq!(
        op.markup(),
        r#"<add xpath="/CVehicleModelInfo__InitDataList/InitDatas" append="Last"><Item type="car" dlc="base">adder</Item></add>"#
    );
}

#[test]
fn xml_replace_uses_custom_tag() {
    let op = XmlOp::new(
        XmlMode::Replace,
        "/root/value",
        XmlParams {
            node_value: Some("42".into()),
            node_tag: Some("value".into()),
            ..XmlParams::default()
        },
    )
    .unwrap();
    assert_eq!(
        op.markup(),
        r#"<replace xpath="/root/value"><value>42</value></replace>"#
    );
}

#[test]
fn xml_mode_rules_are_enforced() {
    let err = XmlOp::new(
        XmlMode::Add,
        "/a",
        XmlParams {
            node_value: Some("v".into()),
            ..XmlParams::default()
        },
    )
    .unwrap_err();
    assert_eq!(missing(err), "append");

    let err = XmlOp::new(
        XmlMode::Replace,
        "/a",
        XmlParams {
            append: Some(Append::First),
            node_value: Some("v".into()),
            ..XmlParams::default()
        },
    )
    .unwrap_err();
    assert_eq!(forbidden(err), "append");

    let err = XmlOp::new(XmlMode::Replace, "/a", XmlParams::default()).unwrap_err();
    assert_eq!(missing(err), "node_value");

    let err = XmlOp::new(
        XmlMode::Remove,
        "/a",
        XmlParams {
            node_attrs: vec![("k".into(), "v".into())],
            ..XmlParams::default()
        },
    )
    .unwrap_err();
    assert_eq!(forbidden(err), "node_attrs");

    let err = XmlOp::new(
        XmlMode::Remove,
        "/a",
        XmlParams {
            node_tag: Some("Entry".into()),
            ..XmlParams::default()
        },
    )
    .unwrap_err();
    assert_eq!(forbidden(err), "node_tag");
}

#[test]
fn xml_rows_reject_remaining_combinations() {
    let cases = [
        (
            XmlMode::Remove,
            XmlParams {
                append: Some(Append::Before),
                ..XmlParams::default()
            },
            ValidationError::ForbiddenFieldPresent {
                kind: OperationKind::Xml,
                mode: "remove",
                field: "append",
            },
        ),
        (
            XmlMode::Remove,
            XmlParams {
                node_value: Some("v".into()),
                ..XmlParams::default()
            },
            ValidationError::ForbiddenFieldPresent {
                kind: OperationKind::Xml,
                mode: "remove",
                field: "node_value",
            },
        ),
        (
            XmlMode::Add,
            XmlParams {
                append: Some(Append::Last),
                ..XmlParams::default()
            },
            ValidationError::MissingRequiredField {
                kind: OperationKind::Xml,
                mode: "add",
                field: "node_value",
            },
        ),
        (
            XmlMode::Add,
            XmlParams {
                append: Some(Append::First),
                node_value: Some(String::new()),
                ..XmlParams::default()
            },
            ValidationError::MissingRequiredField {
                kind: OperationKind::Xml,
                mode: "add",
                field: "node_value",
            },
        ),
    ];
    for (mode, params, expected) in cases {
        assert_eq!(XmlOp::new(mode, "/a", params).unwrap_err(), expected);
    }
}

#[test]
fn content_wraps_leaves_and_containers() {
    let content = Content::new([
        Defragment::new("p").into(),
        TextContainer::new("t", true, [TextOp::add("y")]).into(),
    ]);
    assert_eq!(
        content.result(),
        r#"<content><defragmentation archive="p"/><text path="t" createIfNotExist="true"><add>y</add></text></content>"#
    );
}

#[test]
fn nested_archives_render_innermost_first() {
    let inner = ArchiveContainer::new(
        "dlc.rpf",
        false,
        [FileOp::add("a.ytd", "content/a.ytd").unwrap().into()],
    );
    let outer = ArchiveContainer::new("update.rpf", true, [inner.into()]);
    let content = Content::new([outer.into()]);

    assert_eq!(
        content.result(),
        concat!(
            "<content>",
            r#"<archive path="update.rpf" createIfNotExist="true" type="RPF7">"#,
            r#"<archive path="dlc.rpf" createIfNotExist="false" type="RPF7">"#,
            r#"<add source="content/a.ytd">a.ytd</add>"#,
            "</archive>",
            "</archive>",
            "</content>",
        )
    );
}

#[test]
fn container_output_follows_child_order() {
    let a = XmlOp::remove("/a");
    let b = XmlOp::remove("/b");
    let c = XmlOp::remove("/c");

    let forward = XmlContainer::new("f.xml", [a.clone(), b.clone(), c.clone()]);
    let backward = XmlContainer::new("f.xml", [c.clone(), b.clone(), a.clone()]);

    let body = |ops: &[&XmlOp]| ops.iter().map(|op| op.markup()).collect::<String>();
    assert_eq!(
        forward.markup(),
        format!(r#"<xml path="f.xml">{}</xml>"#, body(&[&a, &b, &c]))
    );
    assert_eq!(
        backward.markup(),
        format!(r#"<xml path="f.xml">{}</xml>"#, body(&[&c, &b, &a]))
    );
}

#[test]
fn rendering_is_repeatable() {
    let content = Content::new([
        ArchiveContainer::new(
            "x.rpf",
            false,
            [
                XmlContainer::new("common/data/a.xml", [XmlOp::remove("/a")]).into(),
                TextContainer::new("b.txt", false, [TextOp::add("z")]).into(),
            ],
        )
        .into(),
    ]);
    let first = content.result().to_string();
    let cloned = content.clone();
    assert_eq!(first, content.to_string());
    assert_eq!(first, cloned.result());
}
