use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StrokeError::authoring("x")
            .to_string()
            .contains("authoring error:")
    );
    assert!(
        StrokeError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        StrokeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StrokeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn dsl_errors_convert_and_keep_offset() {
    let err: StrokeError = DslError::new(7, "unknown function 'wobble'").into();
    let msg = err.to_string();
    assert!(msg.contains("byte 7"));
    assert!(msg.contains("wobble"));
}
