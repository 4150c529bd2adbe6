//! Utility functions

use std::path::PathBuf;

// Rounded square with three article bars, matching the app palette
pub const LOGO_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><defs><style>.c1{fill:#18181b;stroke:#27272a;stroke-width:2px}.c2{fill:#38bdf8}.c3{fill:#e4e4e7}.c4{fill:#71717a}</style></defs><rect class="c1" x="2" y="2" width="60" height="60" rx="14"/><rect class="c2" x="14" y="16" width="36" height="7" rx="3.5"/><rect class="c3" x="14" y="29" width="26" height="7" rx="3.5"/><rect class="c4" x="14" y="42" width="31" height="7" rx="3.5"/></svg>"#;

/// Rasterize the logo SVG at the given width, preserving aspect ratio.
/// Used for both the header image and the window/taskbar icon.
pub fn rasterize_logo(width: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).unwrap();
    let svg_size = tree.size();
    let scale = width as f32 / svg_size.width();
    let height = (svg_size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), width, height)
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Application data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Article Recommender")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_rasterizes_at_requested_width() {
        let (pixels, w, h) = rasterize_logo(32);
        assert_eq!(w, 32);
        assert_eq!(h, 32); // square viewBox
        assert_eq!(pixels.len(), (w * h * 4) as usize);
        // At least one opaque pixel, otherwise the icon rendered blank
        assert!(pixels.chunks(4).any(|px| px[3] != 0));
    }
}
