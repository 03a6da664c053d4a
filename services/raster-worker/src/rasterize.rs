//! SVG to PNG conversion via resvg.

use usvg::fontdb;

use locator_common::{LocatorError, LocatorResult};

/// Font family applied to text without an explicit family.
pub const DEFAULT_FONT_FAMILY: &str = "Poppins";

/// Load the worker's font set: every face in `font_dir` (all Poppins weights
/// in the standard deployment), plus system fonts as a fallback.
pub fn load_fonts(font_dir: Option<&str>) -> fontdb::Database {
    let mut db = fontdb::Database::new();
    if let Some(dir) = font_dir {
        db.load_fonts_dir(dir);
    }
    db.load_system_fonts();
    db
}

/// Rasterize SVG markup to a PNG at the markup's own dimensions.
pub fn svg_to_png(svg: &[u8], fonts: &fontdb::Database) -> LocatorResult<Vec<u8>> {
    let opt = usvg::Options {
        font_family: DEFAULT_FONT_FAMILY.to_string(),
        fontdb: std::sync::Arc::new(fonts.clone()),
        ..usvg::Options::default()
    };

    let tree = usvg::Tree::from_data(svg, &opt)
        .map_err(|e| LocatorError::Render(format!("SVG parse failed: {}", e)))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| LocatorError::Render("Invalid raster dimensions".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| LocatorError::Render(format!("PNG encode failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_rasterizes_simple_svg() {
        let svg = br##"<svg width="10" height="10" xmlns="http://www.w3.org/2000/svg">
            <rect width="10" height="10" fill="#2ed573"/>
        </svg>"##;

        let fonts = fontdb::Database::new();
        let png = svg_to_png(svg, &fonts).unwrap();
        assert!(png.starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_invalid_markup_is_a_render_error() {
        let fonts = fontdb::Database::new();
        let result = svg_to_png(b"not an svg", &fonts);
        assert!(matches!(result, Err(LocatorError::Render(_))));
    }
}
