//! Turns a rendered surface into downloadable files.
//!
//! PNG output is the raster itself. SVG output is, by default, a real vector
//! re-encoding of the module grid; [`SvgMode::EmbeddedRaster`] keeps the older
//! behavior of wrapping the PNG inside a fixed-size SVG document.

use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{NaiveDate, Utc};
use image::ImageFormat;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ExportError, UnknownExportFormat, UnknownSvgMode};
use crate::render::RasterSurface;

/// Output file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            _ => Err(UnknownExportFormat(s.to_string())),
        }
    }
}

/// How SVG files are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SvgMode {
    /// One path of unit squares, scalable without loss.
    #[default]
    Vector,
    /// The PNG bytes inside an `<image>` element of a fixed-size canvas.
    #[serde(rename = "embedded")]
    EmbeddedRaster,
}

impl FromStr for SvgMode {
    type Err = UnknownSvgMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vector" => Ok(SvgMode::Vector),
            "embedded" => Ok(SvgMode::EmbeddedRaster),
            _ => Err(UnknownSvgMode(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    pub svg_mode: SvgMode,
    /// Canvas side used by [`SvgMode::EmbeddedRaster`].
    pub svg_canvas: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            svg_mode: SvgMode::default(),
            svg_canvas: 256,
        }
    }
}

/// A file ready to be saved. Built fresh on every export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// `qrcode-YYYY-MM-DD.<ext>` for the given day.
    pub fn file_name_for(format: ExportFormat, date: NaiveDate) -> String {
        format!("qrcode-{}.{}", date.format("%Y-%m-%d"), format.extension())
    }

    /// Writes the artifact into `dir`, creating the directory if needed.
    /// Returns the path written.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| ExportError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = self.bytes.len(), "saved export");
        Ok(path)
    }
}

/// Current UTC date, the day stamped into export file names.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Exports `surface` as `format`.
///
/// With no surface there is nothing to export: the result is `Ok(None)` and
/// nothing is reported.
pub fn export(
    surface: Option<&RasterSurface>,
    format: ExportFormat,
    options: &ExportOptions,
    date: NaiveDate,
) -> Result<Option<ExportArtifact>, ExportError> {
    let Some(surface) = surface else {
        debug!(%format, "export requested without a rendered code");
        return Ok(None);
    };

    let bytes = match format {
        ExportFormat::Png => to_png(surface)?,
        ExportFormat::Svg => match options.svg_mode {
            SvgMode::Vector => to_svg_string(surface).into_bytes(),
            SvgMode::EmbeddedRaster => to_embedded_svg_string(surface, options.svg_canvas)?.into_bytes(),
        },
    };

    Ok(Some(ExportArtifact {
        file_name: ExportArtifact::file_name_for(format, date),
        mime: format.mime(),
        bytes,
    }))
}

/// PNG encoding of the surface pixels.
pub fn to_png(surface: &RasterSurface) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    surface
        .image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// SVG with one unit square per dark module.
///
/// The view box spans the symbol plus its quiet zone; the nominal size matches
/// the raster canvas. Always uses Unix newlines.
pub fn to_svg_string(surface: &RasterSurface) -> String {
    let border = i64::from(surface.quiet_zone());
    let dimension = i64::from(surface.module_width()) + border * 2;
    let (canvas, _) = surface.dimensions();

    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{canvas}\" height=\"{canvas}\" viewBox=\"0 0 {dimension} {dimension}\" stroke=\"none\" shape-rendering=\"crispEdges\">\n"
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..i64::from(surface.module_width()) {
        for x in 0..i64::from(surface.module_width()) {
            if surface.is_dark(x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + border, y + border);
            }
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    result
}

/// SVG of side `canvas` that embeds the PNG as a data URI.
pub fn to_embedded_svg_string(surface: &RasterSurface, canvas: u32) -> Result<String, ExportError> {
    let png = to_png(surface)?;
    Ok(format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{canvas}\" height=\"{canvas}\" viewBox=\"0 0 {canvas} {canvas}\">\
<image width=\"{canvas}\" height=\"{canvas}\" href=\"data:image/png;base64,{}\"/></svg>",
        STANDARD.encode(png)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, RenderOptions};
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn surface() -> RasterSurface {
        render("https://example.com", &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_no_surface_is_silent() {
        for format in [ExportFormat::Png, ExportFormat::Svg] {
            let out = export(None, format, &ExportOptions::default(), date()).unwrap();
            assert!(out.is_none());
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ExportArtifact::file_name_for(ExportFormat::Png, date()), "qrcode-2024-03-09.png");
        assert_eq!(ExportArtifact::file_name_for(ExportFormat::Svg, date()), "qrcode-2024-03-09.svg");
    }

    #[test]
    fn test_png_decodes_to_same_pixels() {
        let surface = surface();
        let artifact = export(Some(&surface), ExportFormat::Png, &ExportOptions::default(), date())
            .unwrap()
            .unwrap();
        assert_eq!(artifact.mime, "image/png");
        assert_eq!(artifact.file_name, "qrcode-2024-03-09.png");

        let decoded = image::load_from_memory_with_format(&artifact.bytes, ImageFormat::Png)
            .unwrap()
            .into_luma8();
        assert_eq!(decoded.dimensions(), (200, 200));
        assert_eq!(decoded.as_raw(), surface.image().as_raw());
    }

    #[test]
    fn test_vector_svg_has_one_square_per_dark_module() {
        let surface = surface();
        let svg = to_svg_string(&surface);
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        let dimension = surface.module_width() + 8;
        assert!(svg.contains(&format!("viewBox=\"0 0 {dimension} {dimension}\"")));
        assert!(svg.contains("width=\"200\""));
        assert_eq!(svg.matches("h1v1h-1z").count(), surface.dark_count());
        // The top-left finder module sits right after the quiet zone.
        assert!(svg.contains("d=\"M4,4h1v1h-1z"));
    }

    #[test]
    fn test_embedded_svg_wraps_png() {
        let surface = surface();
        let options = ExportOptions {
            svg_mode: SvgMode::EmbeddedRaster,
            ..ExportOptions::default()
        };
        let artifact = export(Some(&surface), ExportFormat::Svg, &options, date())
            .unwrap()
            .unwrap();
        let svg = String::from_utf8(artifact.bytes).unwrap();
        assert!(svg.contains("viewBox=\"0 0 256 256\""));

        let start = svg.find("base64,").unwrap() + "base64,".len();
        let end = start + svg[start..].find('"').unwrap();
        let png = STANDARD.decode(&svg[start..end]).unwrap();
        assert_eq!(png, to_png(&surface).unwrap());
    }

    #[test]
    fn test_save_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("out");
        let artifact = export(Some(&surface()), ExportFormat::Svg, &ExportOptions::default(), date())
            .unwrap()
            .unwrap();
        let path = artifact.save_to(&dir).unwrap();
        assert_eq!(path, dir.join("qrcode-2024-03-09.svg"));
        assert_eq!(fs::read(path).unwrap(), artifact.bytes);
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!("PNG".parse::<ExportFormat>(), Ok(ExportFormat::Png));
        assert_eq!("svg".parse::<ExportFormat>(), Ok(ExportFormat::Svg));
        assert_eq!("gif".parse::<ExportFormat>(), Err(UnknownExportFormat("gif".into())));
        assert_eq!("embedded".parse::<SvgMode>(), Ok(SvgMode::EmbeddedRaster));
        assert_eq!(
            "raster".parse::<SvgMode>().unwrap_err().to_string(),
            "unknown svg mode `raster` (expected vector or embedded)"
        );
    }
}
