#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// A TrueType font for tests: `THUMBSMITH_TEST_FONT`, else the first `.ttf` found in the
/// usual system font directories.
pub fn test_font() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os("THUMBSMITH_TEST_FONT").map(PathBuf::from)
        && p.is_file()
    {
        return Some(p);
    }

    let roots = [
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/Library/Fonts",
        "/System/Library/Fonts",
        "C:\\Windows\\Fonts",
    ];
    let mut found = Vec::new();
    for root in roots {
        collect_ttf(Path::new(root), 0, &mut found);
    }
    found.sort();
    found.into_iter().next()
}

fn collect_ttf(dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
    if depth > 4 {
        return;
    }
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_ttf(&path, depth + 1, out);
        } else if path.extension().is_some_and(|e| e == "ttf") {
            out.push(path);
        }
    }
}

pub fn scratch(group: &str, name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join(group).join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Noisy but deterministic source image so JPEG output is not trivially flat.
pub fn write_source_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x ^ y) & 0xFF) as u8,
            255,
        ])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}
