use super::*;

#[test]
fn defaults_match_the_stock_look() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.image_size, Size { width: 1280, height: 720 });
    assert_eq!(cfg.title_font_size, 110.0);
    assert_eq!(cfg.subtitle_font_size, 100.0);
    assert_eq!(cfg.caption.box_color.a, 238);
    assert_eq!(cfg.brackets.length, 90);
    assert_eq!(cfg.brackets.thickness, 7);
    assert_eq!(cfg.brackets.resolved_offset(&cfg.caption), 20);
    assert_eq!(cfg.extensions, vec!["png", "jpg", "jpeg"]);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: RenderConfig = serde_json::from_str(
        r#"{ "image_size": { "width": 320, "height": 180 }, "caption": { "padding": 4 }, "overflow": "clip" }"#,
    )
    .unwrap();
    assert_eq!(cfg.image_size.width, 320);
    assert_eq!(cfg.caption.padding, 4);
    assert_eq!(cfg.caption.bottom_offset, 160);
    assert_eq!(cfg.brackets.offset, None);
    assert_eq!(cfg.brackets.resolved_offset(&cfg.caption), 4);
    assert_eq!(cfg.overflow, OverflowPolicy::Clip);
    assert_eq!(cfg.output_naming, OutputNaming::PreserveExtension);
}

#[test]
fn validate_rejects_bad_values() {
    let mut cfg = RenderConfig::default();
    cfg.title_font_size = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.image_size.height = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.image_size.width = 70_000;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.jpeg_quality = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.extensions.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.stroke_width = f32::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn from_path_reports_missing_file() {
    let err = RenderConfig::from_path("target/does-not-exist/config.json").unwrap_err();
    assert_eq!(err.kind(), "io");
}

#[test]
fn explicit_bracket_offset_overrides_padding() {
    let cfg: RenderConfig =
        serde_json::from_str(r#"{ "caption": { "padding": 24 }, "brackets": { "offset": 10 } }"#)
            .unwrap();
    assert_eq!(cfg.brackets.resolved_offset(&cfg.caption), 10);
}
