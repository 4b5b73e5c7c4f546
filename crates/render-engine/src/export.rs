//! PNG export: file naming, the keyboard shortcut, and writing to disk.

use std::path::{Path, PathBuf};

use compositor_common::error::CompositorResult;

use crate::surface::PngExport;

/// File stem used when the filename field is blank.
pub const DEFAULT_EXPORT_STEM: &str = "canvas_output";

/// Key that triggers an export while Alt is held. Case-sensitive: it is the
/// key value reported with Shift held.
pub const EXPORT_SHORTCUT_KEY: &str = "S";

/// Turn the filename field's contents into the download name.
///
/// Only the last path component is kept, so the file always lands directly
/// in the export directory. Surrounding whitespace is trimmed, a blank stem
/// (or `.`/`..`) becomes [`DEFAULT_EXPORT_STEM`], and `.png` is appended.
pub fn resolve_export_file_name(input: &str) -> String {
    let stem = input
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let stem = match stem {
        "" | "." | ".." => DEFAULT_EXPORT_STEM,
        stem => stem,
    };
    format!("{stem}.png")
}

/// Whether a key press is the export shortcut (Alt + "S").
pub fn is_export_shortcut(key: &str, alt: bool) -> bool {
    alt && key == EXPORT_SHORTCUT_KEY
}

/// Encode the surface as PNG and write it to `dir/file_name`.
pub fn export_png<S: PngExport>(
    surface: &S,
    dir: impl AsRef<Path>,
    file_name: &str,
) -> CompositorResult<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let output_path = dir.join(file_name);

    let bytes = surface.encode_png()?;
    std::fs::write(&output_path, &bytes)?;

    tracing::info!(
        output = %output_path.display(),
        bytes = bytes.len(),
        "Exported PNG"
    );
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterSurface;
    use crate::surface::DrawingSurface;

    #[test]
    fn test_blank_filename_uses_default() {
        assert_eq!(resolve_export_file_name(""), "canvas_output.png");
        assert_eq!(resolve_export_file_name("   \t"), "canvas_output.png");
    }

    #[test]
    fn test_filename_is_trimmed() {
        assert_eq!(resolve_export_file_name("  banner "), "banner.png");
    }

    #[test]
    fn test_filename_keeps_last_path_component() {
        assert_eq!(resolve_export_file_name("week/banner"), "banner.png");
        assert_eq!(resolve_export_file_name("/tmp/escape"), "escape.png");
        assert_eq!(resolve_export_file_name(r"C:\out\ poster "), "poster.png");
        assert_eq!(resolve_export_file_name("nested/"), "canvas_output.png");
        assert_eq!(resolve_export_file_name("../.."), "canvas_output.png");
    }

    #[test]
    fn test_export_png_stays_in_output_dir() {
        let dir = std::env::temp_dir().join("compositor_test_export_png_dir");
        let _ = std::fs::remove_dir_all(&dir);

        let mut surface = RasterSurface::new();
        surface.clear(2, 2);
        for name in ["week/banner", "/tmp/compositor_escape"] {
            let path = export_png(&surface, &dir, &resolve_export_file_name(name)).unwrap();
            assert_eq!(path.parent(), Some(dir.as_path()));
            assert!(path.exists());
        }
        assert!(!std::path::Path::new("/tmp/compositor_escape.png").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_shortcut() {
        assert!(is_export_shortcut("S", true));
        assert!(!is_export_shortcut("s", true));
        assert!(!is_export_shortcut("S", false));
    }

    #[test]
    fn test_export_png_writes_file() {
        let dir = std::env::temp_dir().join("compositor_test_export_png");
        let _ = std::fs::remove_dir_all(&dir);

        let mut surface = RasterSurface::new();
        surface.clear(4, 4);
        let path = export_png(&surface, &dir, &resolve_export_file_name("")).unwrap();

        assert_eq!(path, dir.join("canvas_output.png"));
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 4));

        std::fs::remove_dir_all(&dir).ok();
    }
}
