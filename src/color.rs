use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Hues cycled through as layers are plotted.
const PALETTE_SIZE: usize = 10;

/// Colour assigned to the n-th plotted layer.
pub fn layer_color(index: usize) -> Color32 {
    let palette = generate_palette(PALETTE_SIZE);
    palette[index % PALETTE_SIZE]
}

/// Washed-out variant used for inactive (unselected) curves.
pub fn dim(color: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 80)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert_eq!(generate_palette(7).len(), 7);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn layer_colors_cycle() {
        assert_eq!(layer_color(0), layer_color(PALETTE_SIZE));
        assert_ne!(layer_color(0), layer_color(1));
    }
}
