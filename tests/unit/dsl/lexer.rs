use super::*;

fn texts(src: &str) -> Vec<&str> {
    lex(src).into_iter().map(|t| t.text).collect()
}

#[test]
fn splits_on_whitespace_with_spans() {
    let toks = lex("hi  +0.5,0.5 @1/4");
    assert_eq!(toks.len(), 3);
    assert_eq!(toks[1].text, "+0.5,0.5");
    assert_eq!(toks[1].span, Span { start: 4, end: 12 });
    assert_eq!(toks[2].span.start, 13);
    assert!(!toks[0].is_operator());
    assert!(toks[1].is_operator());
}

#[test]
fn brackets_keep_inner_whitespace() {
    assert_eq!(texts("ab +[0,0 1,1] *2"), vec!["ab", "+[0,0 1,1]", "*2"]);
    assert_eq!(texts("@[0 0.5"), vec!["@[0 0.5"]);
    assert!(texts("   ").is_empty());
}

#[test]
fn split_offsets_are_absolute() {
    let parts = split_offsets("1,2~3,4", 10, '~');
    assert_eq!(parts, vec![(10, "1,2"), (14, "3,4")]);
    assert_eq!(words(" a  b", 5), vec![(6, "a"), (9, "b")]);
}
