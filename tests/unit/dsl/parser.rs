use super::*;

fn lenient() -> DslOptions {
    DslOptions::default()
}

fn strict() -> DslOptions {
    DslOptions {
        strictness: Strictness::Strict,
        ..DslOptions::default()
    }
}

#[test]
fn text_then_operators() {
    let s = parse_line("hi +0.5,0.5 *0.8 @0.25", &strict()).unwrap();
    assert_eq!(s.text, "hi");
    assert_eq!(
        s.ops,
        vec![
            Op::Transform {
                kind: TransformKind::Translate,
                value: Value::Point(0.5, 0.5),
                offset: 3,
            },
            Op::Transform {
                kind: TransformKind::Scale,
                value: Value::Scalar(0.8),
                offset: 12,
            },
            Op::Transform {
                kind: TransformKind::Rotate,
                value: Value::Scalar(0.25),
                offset: 17,
            },
        ]
    );
    assert!(s.dropped.is_empty());
}

#[test]
fn multi_word_text_is_kept_verbatim() {
    let s = parse_line("  hello   world @1", &lenient()).unwrap();
    assert_eq!(s.text, "hello   world");
    assert_eq!(s.ops.len(), 1);
    assert_eq!(parse_line("*2", &lenient()).unwrap().text, "");
}

#[test]
fn fractions_and_ranges() {
    assert_eq!(value("1/4", 0).unwrap(), Value::Scalar(0.25));
    assert_eq!(value("-1/2,3", 0).unwrap(), Value::Point(-0.5, 3.0));
    assert_eq!(value("0~1/2", 0).unwrap(), Value::ScalarRange(vec![0.0, 0.5]));
    assert_eq!(
        value("0,0~1,1~2,0", 0).unwrap(),
        Value::PointRange(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])
    );
    assert!(value("0~1,1", 0).is_err());
    assert!(value("1/0", 0).is_err());
    assert!(value("1,2,3", 0).is_err());
    let err = value("0~x", 10).unwrap_err();
    assert_eq!(err.offset, 12);
}

#[test]
fn per_group_lists() {
    let s = parse_line("ab +[0,0 1,1] @[0 1/2]", &strict()).unwrap();
    assert_eq!(
        s.ops[0],
        Op::PerGroup {
            kind: TransformKind::Translate,
            values: vec![Value::Point(0.0, 0.0), Value::Point(1.0, 1.0)],
            offset: 3,
        }
    );
    let Op::PerGroup { values, .. } = &s.ops[1] else {
        panic!("expected per-group op");
    };
    assert_eq!(values, &vec![Value::Scalar(0.0), Value::Scalar(0.5)]);
}

#[test]
fn calls_take_their_arguments() {
    let s = parse_line("x \\seed 42 \\thickness 0.01~0.02 *2", &strict()).unwrap();
    assert_eq!(
        s.ops,
        vec![
            Op::Call {
                call: Call::Seed(42),
                offset: 2,
            },
            Op::Call {
                call: Call::Thickness(Value::ScalarRange(vec![0.01, 0.02])),
                offset: 11,
            },
            Op::Transform {
                kind: TransformKind::Scale,
                value: Value::Scalar(2.0),
                offset: 32,
            },
        ]
    );
}

#[test]
fn strict_mode_rejects_unknown_calls_with_offset() {
    let err = parse_line("hi \\wobble 3", &strict()).unwrap_err();
    assert_eq!(err.offset, 3);
    assert!(err.message.contains("wobble"));

    assert!(parse_line("hi @1,2", &strict()).is_err());
    assert!(parse_line("hi +[0 1", &strict()).is_err());
    assert!(parse_line("hi *2 stray", &strict()).is_err());
    assert!(parse_line("hi \\seed -1", &strict()).is_err());
}

#[test]
fn lenient_mode_records_dropped_tokens() {
    let s = parse_line("hi \\wobble 3 +x,1 *2 stray @[]", &lenient()).unwrap();
    assert_eq!(s.text, "hi");
    assert_eq!(s.ops.len(), 1);
    let dropped: Vec<&str> = s.dropped.iter().map(|d| d.token.as_str()).collect();
    assert_eq!(dropped, vec!["\\wobble", "3", "+x,1", "stray", "@[]"]);
    assert_eq!(s.dropped[0].offset, 3);
}

#[test]
fn dropped_calls_take_their_arguments_with_them() {
    let s = parse_line("hi \\wobble 1 2 +0.5", &lenient()).unwrap();
    assert_eq!(s.ops.len(), 1);
    let dropped: Vec<(usize, &str)> = s
        .dropped
        .iter()
        .map(|d| (d.offset, d.token.as_str()))
        .collect();
    assert_eq!(dropped, vec![(3, "\\wobble"), (11, "1"), (13, "2")]);
    assert!(s.dropped[1].reason.contains("wobble"));

    let s = parse_line("hi \\seed 1 2", &lenient()).unwrap();
    assert!(s.ops.is_empty());
    assert_eq!(s.dropped.len(), 3);
}

#[test]
fn script_serializes() {
    let s = parse_line("hi *1,2", &lenient()).unwrap();
    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["text"], "hi");
    assert_eq!(json["ops"][0]["op"], "transform");
    assert_eq!(json["ops"][0]["kind"], "scale");
}
