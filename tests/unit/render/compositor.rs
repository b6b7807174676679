use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_compositor").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn new_rejects_invalid_config() {
    let cfg = RenderConfig {
        jpeg_quality: 0,
        ..RenderConfig::default()
    };
    assert!(Compositor::new(cfg).is_err());
}

#[test]
fn missing_source_fails_without_writing() {
    let dir = scratch("missing_source");
    let out = dir.join("thumbnail_nope.png");

    let mut c = Compositor::new(RenderConfig::default()).unwrap();
    let outcome = c.render(&dir.join("nope.png"), &out, "EPISODE 5", "Dawn of War");

    assert!(!outcome.is_written());
    assert_eq!(outcome.error().unwrap().kind(), "io");
    assert_eq!(outcome.source(), dir.join("nope.png"));
    assert!(!out.exists());
}

#[test]
fn missing_font_fails_without_writing() {
    let dir = scratch("missing_font");
    let src = dir.join("src.png");
    RgbaImage::from_pixel(8, 6, image::Rgba([50, 60, 70, 255]))
        .save(&src)
        .unwrap();
    let out = dir.join("thumbnail_src.png");

    let cfg = RenderConfig {
        font_path: dir.join("absent.ttf"),
        ..RenderConfig::default()
    };
    let mut c = Compositor::new(cfg).unwrap();
    let outcome = c.render(&src, &out, "A", "B");

    let err = outcome.error().unwrap();
    assert_eq!(err.kind(), "io");
    assert!(err.to_string().contains("absent.ttf"));
    assert!(!out.exists());
}

#[test]
fn corrupt_source_is_a_decode_failure() {
    let dir = scratch("corrupt");
    let src = dir.join("broken.jpg");
    std::fs::write(&src, b"\xFF\xD8 not really a jpeg").unwrap();

    let mut c = Compositor::new(RenderConfig::default()).unwrap();
    let outcome = c.render(&src, &dir.join("thumbnail_broken.jpg"), "A", "B");
    let err = outcome.error().unwrap();
    assert_eq!(err.kind(), "decode");
    assert!(err.to_string().contains("broken.jpg"));
}
