use super::*;
use crate::render::config::RenderConfig;

fn exts() -> Vec<String> {
    RenderConfig::default().extensions
}

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_batch").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn compositor_into(out: &Path, font: &Path) -> Compositor {
    Compositor::new(RenderConfig {
        output_dir: out.to_path_buf(),
        font_path: font.to_path_buf(),
        ..RenderConfig::default()
    })
    .unwrap()
}

#[test]
fn extension_filter_is_case_sensitive_suffix_match() {
    let exts = exts();
    for ok in ["a.png", "b.jpg", "c.jpeg", "archive.tar.png", ".png"] {
        assert!(is_supported_image(ok, &exts), "{ok}");
    }
    for no in ["a.PNG", "b.Jpg", "c.gif", "png", "notes.txt", "a.png.bak", "xpng"] {
        assert!(!is_supported_image(no, &exts), "{no}");
    }
}

#[test]
fn output_names_follow_naming_policy() {
    assert_eq!(
        output_file_name("cover.png", OutputNaming::PreserveExtension),
        "thumbnail_cover.png"
    );
    assert_eq!(
        output_file_name("cover.png", OutputNaming::JpgExtension),
        "thumbnail_cover.jpg"
    );
    assert_eq!(
        output_file_name("a.b.jpeg", OutputNaming::JpgExtension),
        "thumbnail_a.b.jpg"
    );
}

#[test]
fn missing_folder_aborts_the_batch() {
    let dir = scratch("missing_folder");
    let mut c = compositor_into(&dir.join("out"), &dir.join("font.ttf"));

    let err = process_folder(&mut c, &dir.join("not-here"), "T", "S").unwrap_err();
    assert_eq!(err.kind(), "io");
    assert!(err.to_string().contains("not-here"));
    assert!(!dir.join("out").exists());
}

#[test]
fn gif_only_folder_produces_nothing() {
    let dir = scratch("gif_only");
    let input = dir.join("in");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::write(input.join("anim.gif"), b"GIF89a").unwrap();
    let out = dir.join("out");

    let mut c = compositor_into(&out, &dir.join("font.ttf"));
    let report = process_folder(&mut c, &input, "T", "S").unwrap();

    assert!(report.outcomes().is_empty());
    assert!(report.is_success());
    assert_eq!(report.skipped(), &["anim.gif".to_string()]);
    assert!(out.is_dir());
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn every_matching_file_gets_exactly_one_outcome_and_failures_do_not_stop_the_batch() {
    let dir = scratch("mixed");
    let input = dir.join("in");
    std::fs::create_dir_all(input.join("nested.png")).unwrap();
    for name in ["one.png", "two.jpg", "three.jpeg"] {
        image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]))
            .save_with_format(input.join(name), image::ImageFormat::Png)
            .unwrap();
    }
    for name in ["readme.txt", "clip.gif", "UPPER.PNG"] {
        std::fs::write(input.join(name), b"x").unwrap();
    }

    // No font on disk: every matched file fails at the font step.
    let mut c = compositor_into(&dir.join("out"), &dir.join("missing.ttf"));
    let report = process_folder(&mut c, &input, "T", "S").unwrap();

    let summary = report.summary();
    assert_eq!(summary.matched, 3);
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.written, 0);
    assert_eq!(summary.skipped, 4);
    assert!(!report.is_success());

    let mut sources: Vec<String> = report
        .outcomes()
        .iter()
        .map(|o| o.source().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    sources.sort();
    assert_eq!(sources, vec!["one.png", "three.jpeg", "two.jpg"]);
    assert!(report.failed().all(|o| o.error().unwrap().kind() == "io"));
}

#[test]
fn summary_display_is_stable() {
    let s = BatchSummary {
        matched: 3,
        written: 2,
        failed: 1,
        skipped: 4,
    };
    assert_eq!(s.to_string(), "3 matched, 2 written, 1 failed, 4 skipped");
}
