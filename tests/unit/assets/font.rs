use super::*;

#[test]
fn garbage_bytes_are_a_font_error() {
    let err = TextLayoutEngine::from_font_bytes(b"not a font at all".to_vec())
        .err()
        .unwrap();
    assert_eq!(err.kind(), "font");
}

#[test]
fn missing_font_file_is_io_error() {
    let err = TextLayoutEngine::from_path(Path::new("target/no-such-font.ttf"))
        .err()
        .unwrap();
    assert_eq!(err.kind(), "io");
    assert!(err.to_string().contains("no-such-font.ttf"));
}
