//! Rasterizes a payload into the surface that the export step reads from.

use image::{GrayImage, ImageBuffer, Luma};
use qrcode::{Color, EcLevel, QrCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::RenderError;

/// Error correction used for every symbol. Users cannot change it.
pub const EC_LEVEL: EcLevel = EcLevel::H;

/// Largest canvas side accepted, in pixels.
pub const MAX_CANVAS: u32 = 8192;
/// Largest quiet zone accepted, in modules.
pub const MAX_QUIET_ZONE: u32 = 64;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Canvas geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Side of the square canvas in pixels, quiet zone included.
    pub size: u32,
    /// Light border around the symbol, in modules.
    pub quiet_zone: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { size: 200, quiet_zone: 4 }
    }
}

/// A rendered QR code: the pixels shown to the user and the module grid they
/// were drawn from.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    image: GrayImage,
    modules: Vec<bool>,
    width: u32,
    quiet_zone: u32,
    payload: String,
}

impl RasterSurface {
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Symbol width in modules, quiet zone excluded.
    pub fn module_width(&self) -> u32 {
        self.width
    }

    pub fn quiet_zone(&self) -> u32 {
        self.quiet_zone
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Whether the module at (`x`, `y`) is dark. Coordinates outside the
    /// symbol, including the quiet zone, are light.
    pub fn is_dark(&self, x: i64, y: i64) -> bool {
        let w = i64::from(self.width);
        if x < 0 || y < 0 || x >= w || y >= w {
            return false;
        }
        self.modules[(y * w + x) as usize]
    }

    /// Number of dark modules in the symbol.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| **m).count()
    }

    /// Text rendering for terminals, two module rows per line.
    pub fn to_terminal_string(&self) -> String {
        let q = i64::from(self.quiet_zone);
        let end = i64::from(self.width) + q;
        let mut out = String::new();
        let mut y = -q;
        while y < end {
            for x in -q..end {
                let c = match (self.is_dark(x, y), self.is_dark(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                };
                out.push(c);
            }
            out.push('\n');
            y += 2;
        }
        out
    }
}

/// Encodes `payload` and draws it on a square grayscale canvas.
///
/// The symbol and its quiet zone are scaled by the largest whole factor that
/// fits in `options.size` and centered. When even a factor of one does not fit
/// the canvas grows to the symbol's module count.
///
/// # Example
///
/// ```
/// use qrforma::render::{render, RenderOptions};
///
/// let surface = render("Hello, World!", &RenderOptions::default()).unwrap();
/// assert_eq!(surface.dimensions(), (200, 200));
/// ```
pub fn render(payload: &str, options: &RenderOptions) -> Result<RasterSurface, RenderError> {
    if options.size > MAX_CANVAS || options.quiet_zone > MAX_QUIET_ZONE {
        return Err(RenderError::Geometry {
            size: options.size,
            quiet_zone: options.quiet_zone,
        });
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EC_LEVEL)?;
    let width = code.width() as u32;
    let modules: Vec<bool> = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();

    let span = options
        .quiet_zone
        .checked_mul(2)
        .and_then(|border| border.checked_add(width))
        .ok_or(RenderError::Geometry {
            size: options.size,
            quiet_zone: options.quiet_zone,
        })?;
    let (canvas, scale) = match options.size / span {
        0 => (span, 1),
        s => (options.size, s),
    };
    let offset = i64::from((canvas - span * scale) / 2);
    debug!(width, canvas, scale, "rasterizing symbol");

    let q = i64::from(options.quiet_zone);
    let scale = i64::from(scale);
    let w = i64::from(width);
    let image: GrayImage = ImageBuffer::from_fn(canvas, canvas, |x, y| {
        let px = i64::from(x) - offset;
        let py = i64::from(y) - offset;
        if px < 0 || py < 0 {
            return LIGHT;
        }
        let (mx, my) = (px / scale - q, py / scale - q);
        if mx >= 0 && my >= 0 && mx < w && my < w && modules[(my * w + mx) as usize] {
            DARK
        } else {
            LIGHT
        }
    });

    let surface = RasterSurface {
        image,
        modules,
        width,
        quiet_zone: options.quiet_zone,
        payload: payload.to_string(),
    };

    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_canvas_is_200() {
        let surface = render("https://example.com", &RenderOptions::default()).unwrap();
        assert_eq!(surface.dimensions(), (200, 200));
        assert_eq!(surface.payload(), "https://example.com");
        assert_eq!(surface.quiet_zone(), 4);
    }

    #[test]
    fn test_quiet_zone_is_light() {
        let surface = render("hello", &RenderOptions::default()).unwrap();
        let img = surface.image();
        for i in 0..200 {
            assert_eq!(img.get_pixel(i, 0), &LIGHT);
            assert_eq!(img.get_pixel(0, i), &LIGHT);
            assert_eq!(img.get_pixel(i, 199), &LIGHT);
        }
    }

    #[test]
    fn test_finder_pattern_corner_is_dark() {
        // Version 1 with level H: 21 modules, 29 with the quiet zone, scale 6.
        let surface = render("hi", &RenderOptions::default()).unwrap();
        assert_eq!(surface.module_width(), 21);
        assert!(surface.is_dark(0, 0));
        assert!(!surface.is_dark(-1, 0));
        let offset = (200 - 29 * 6) / 2;
        let first = offset + 4 * 6;
        assert_eq!(surface.image().get_pixel(first, first), &DARK);
        assert_eq!(surface.image().get_pixel(first - 1, first), &LIGHT);
    }

    #[test]
    fn test_small_canvas_grows_to_symbol() {
        let surface = render("hi", &RenderOptions { size: 10, quiet_zone: 4 }).unwrap();
        assert_eq!(surface.dimensions(), (29, 29));
    }

    #[test]
    fn test_payload_too_long() {
        let payload = "x".repeat(4000);
        assert!(matches!(
            render(&payload, &RenderOptions::default()),
            Err(RenderError::Encode(_))
        ));
    }

    #[test]
    fn test_oversized_geometry_is_an_error() {
        let huge_border = RenderOptions { size: 200, quiet_zone: 3_000_000_000 };
        assert!(matches!(render("hi", &huge_border), Err(RenderError::Geometry { .. })));

        let huge_canvas = RenderOptions { size: 100_000, quiet_zone: 4 };
        assert!(matches!(render("hi", &huge_canvas), Err(RenderError::Geometry { .. })));
    }

    #[test]
    fn test_terminal_string_shape() {
        let surface = render("hi", &RenderOptions::default()).unwrap();
        let text = surface.to_terminal_string();
        let lines: Vec<&str> = text.lines().collect();
        // 29 module rows folded two per line.
        assert_eq!(lines.len(), 15);
        assert!(lines.iter().all(|l| l.chars().count() == 29));
        assert!(text.contains('█'));
    }
}
