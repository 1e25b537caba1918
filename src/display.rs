// Inline image preview. Decodes the downloaded file with the `image` crate
// and paints it into the terminal as colored half-block cells: each text
// cell carries two vertically stacked pixels (foreground on the upper
// half-block glyph, background below).

use crossterm::style::{Color, Stylize};
use image::imageops::FilterType;
use image::GenericImageView;
use std::path::Path;

use crate::error::Result;

/// Decode the image at `path` and render it scaled to the terminal.
pub fn render(path: &Path) -> Result<()> {
    let img = image::open(path)?;
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    // One terminal row shows two pixel rows; keep a couple of rows free for
    // the prompt that follows.
    let max_w = cols as u32;
    let max_h = u32::from(rows.saturating_sub(2).max(1)) * 2;
    let (w, h) = fit(img.dimensions(), max_w, max_h);
    let thumb = img.resize_exact(w, h, FilterType::Triangle).to_rgb8();

    for y in (0..thumb.height()).step_by(2) {
        let mut line = String::new();
        for x in 0..thumb.width() {
            let top = thumb.get_pixel(x, y);
            let bottom = if y + 1 < thumb.height() {
                thumb.get_pixel(x, y + 1)
            } else {
                top
            };
            let cell = "▀"
                .with(Color::Rgb {
                    r: top[0],
                    g: top[1],
                    b: top[2],
                })
                .on(Color::Rgb {
                    r: bottom[0],
                    g: bottom[1],
                    b: bottom[2],
                });
            line.push_str(&cell.to_string());
        }
        println!("{line}");
    }
    Ok(())
}

/// Scale `(w, h)` down to fit inside `(max_w, max_h)`, preserving aspect
/// ratio. Images already inside the bounds are left at their own size.
fn fit((w, h): (u32, u32), max_w: u32, max_h: u32) -> (u32, u32) {
    if w <= max_w && h <= max_h {
        return (w, h);
    }
    let scale = f64::min(max_w as f64 / w as f64, max_h as f64 / h as f64);
    let fitted_w = ((w as f64 * scale).round() as u32).max(1);
    let fitted_h = ((h as f64 * scale).round() as u32).max(1);
    (fitted_w, fitted_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_image_is_not_scaled() {
        assert_eq!(fit((40, 20), 80, 48), (40, 20));
    }

    #[test]
    fn wide_image_fits_the_columns() {
        let (w, h) = fit((1600, 900), 80, 48);
        assert_eq!(w, 80);
        assert!(h <= 48);
    }

    #[test]
    fn tall_image_fits_the_rows() {
        let (w, h) = fit((900, 1600), 80, 48);
        assert_eq!(h, 48);
        assert!(w <= 80);
    }

    #[test]
    fn degenerate_dimensions_stay_positive() {
        let (w, h) = fit((10000, 1), 80, 48);
        assert!(w >= 1 && h >= 1);
    }
}
