//! Image parts.
//!
//! An [`ImagePart`] holds the bytes of a picture together with what a
//! picture shape needs from them: the pixel size and resolution that give
//! its native extents, a description for `p:cNvPr/@descr`, and a SHA-256
//! digest used to share one part between pictures of the same image.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use super::dpi::detect_dpi;
use crate::common::unit::{DEFAULT_DPI, px_to_emu};
use crate::ooxml::error::Result;
#[cfg(not(feature = "imgconv"))]
use crate::ooxml::error::OoxmlError;

/// Image container format, recognized from the leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF8") {
            Some(Self::Gif)
        } else if bytes.starts_with(b"BM") {
            Some(Self::Bmp)
        } else if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            Some(Self::Tiff)
        } else {
            None
        }
    }
}

/// Where the bytes of a new picture come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// An image file; its file name becomes the picture description.
    Path(PathBuf),
    /// Image bytes already in memory.
    Blob(Vec<u8>),
    /// A prepared part, e.g. one built with explicit pixel dimensions.
    Part(Box<ImagePart>),
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(blob: Vec<u8>) -> Self {
        ImageSource::Blob(blob)
    }
}

impl From<&[u8]> for ImageSource {
    fn from(blob: &[u8]) -> Self {
        ImageSource::Blob(blob.to_vec())
    }
}

impl From<ImagePart> for ImageSource {
    fn from(part: ImagePart) -> Self {
        ImageSource::Part(Box::new(part))
    }
}

/// Image bytes plus the metadata picture shapes are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    blob: Vec<u8>,
    format: Option<ImageFormat>,
    px_size: (u32, u32),
    dpi: (u32, u32),
    desc: String,
    sha256: String,
}

impl ImagePart {
    /// Part with explicit pixel dimensions; no image decoding involved.
    ///
    /// The resolution comes from the PNG `pHYs` chunk or the JPEG JFIF or
    /// EXIF header, [`DEFAULT_DPI`] when the image declares none. An empty
    /// `desc` is replaced by `image.<ext>`.
    pub fn new(blob: Vec<u8>, px_size: (u32, u32), desc: impl Into<String>) -> Self {
        let format = ImageFormat::detect(&blob);
        let mut desc = desc.into();
        if desc.is_empty() {
            desc = format!("image.{}", format.map_or("bin", |f| f.extension()));
        }
        let dpi = detect_dpi(&blob).unwrap_or((DEFAULT_DPI, DEFAULT_DPI));
        let sha256 = sha256_hex(&blob);
        Self {
            blob,
            format,
            px_size,
            dpi,
            desc,
            sha256,
        }
    }

    /// Horizontal and vertical resolution; zero values fall back to
    /// [`DEFAULT_DPI`].
    pub fn with_dpi(mut self, dpi: (u32, u32)) -> Self {
        let fix = |d: u32| if d == 0 { DEFAULT_DPI } else { d };
        self.dpi = (fix(dpi.0), fix(dpi.1));
        self
    }

    /// Part from encoded image bytes, reading the pixel size and the
    /// resolution from the image header.
    #[cfg(feature = "imgconv")]
    pub fn from_blob(blob: Vec<u8>, desc: impl Into<String>) -> Result<Self> {
        let px_size = image::ImageReader::new(std::io::Cursor::new(&blob))
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(Self::new(blob, px_size, desc))
    }

    /// Pixel-size detection needs the `imgconv` feature; use
    /// [`ImagePart::new`] with explicit dimensions instead.
    #[cfg(not(feature = "imgconv"))]
    pub fn from_blob(_blob: Vec<u8>, _desc: impl Into<String>) -> Result<Self> {
        Err(OoxmlError::FeatureDisabled("imgconv".to_string()))
    }

    /// Part from an image file; the file name is the description.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let blob = fs::read(path)?;
        let desc = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_blob(blob, desc)
    }

    pub fn from_source(source: ImageSource) -> Result<Self> {
        match source {
            ImageSource::Path(path) => Self::from_path(path),
            ImageSource::Blob(blob) => Self::from_blob(blob, ""),
            ImageSource::Part(part) => Ok(*part),
        }
    }

    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// Content type for the package, `image/png` when unrecognized.
    pub fn content_type(&self) -> &'static str {
        self.format.map_or("image/png", |f| f.content_type())
    }

    /// Part-name extension, `png` when unrecognized.
    pub fn extension(&self) -> &'static str {
        self.format.map_or("png", |f| f.extension())
    }

    pub fn px_size(&self) -> (u32, u32) {
        self.px_size
    }

    pub fn dpi(&self) -> (u32, u32) {
        self.dpi
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Native extents in EMU at the image's resolution.
    pub fn native_size(&self) -> (i64, i64) {
        (
            px_to_emu(self.px_size.0, self.dpi.0),
            px_to_emu(self.px_size.1, self.dpi.1),
        )
    }

    /// Picture extents for the requested `cx`/`cy`. Both missing gives the
    /// native size; one missing is derived from the other, keeping the
    /// aspect ratio.
    pub fn scale(&self, cx: Option<i64>, cy: Option<i64>) -> (i64, i64) {
        let (native_cx, native_cy) = self.native_size();
        match (cx, cy) {
            (Some(cx), Some(cy)) => (cx, cy),
            (None, None) => (native_cx, native_cy),
            (None, Some(cy)) if native_cy != 0 => {
                let factor = cy as f64 / native_cy as f64;
                ((native_cx as f64 * factor).round() as i64, cy)
            }
            (Some(cx), None) if native_cx != 0 => {
                let factor = cx as f64 / native_cx as f64;
                (cx, (native_cy as f64 * factor).round() as i64)
            }
            (cx, cy) => (cx.unwrap_or(native_cx), cy.unwrap_or(native_cy)),
        }
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(hex, "{:02x}", byte);
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header() -> Vec<u8> {
        vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ImageFormat::detect(&png_header()), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::detect(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::detect(b"xx"), None);
    }

    #[test]
    fn test_default_desc_and_digest() {
        let part = ImagePart::new(png_header(), (10, 20), "");
        assert_eq!(part.desc(), "image.png");
        assert_eq!(part.content_type(), "image/png");
        assert_eq!(part.sha256().len(), 64);
        assert_eq!(part.sha256(), ImagePart::new(png_header(), (1, 1), "x").sha256());
    }

    #[test]
    fn test_native_size_and_scale() {
        // 144 x 72 px at 72 dpi is 2 x 1 inches
        let part = ImagePart::new(png_header(), (144, 72), "pic.png");
        assert_eq!(part.native_size(), (1_828_800, 914_400));
        assert_eq!(part.scale(None, None), (1_828_800, 914_400));
        assert_eq!(part.scale(Some(914_400), None), (914_400, 457_200));
        assert_eq!(part.scale(None, Some(457_200)), (914_400, 457_200));
        assert_eq!(part.scale(Some(5), Some(7)), (5, 7));

        let hi_res = part.clone().with_dpi((144, 0));
        assert_eq!(hi_res.dpi(), (144, 72));
        assert_eq!(hi_res.native_size(), (914_400, 914_400));
    }

    #[test]
    fn test_zero_size_image_scale() {
        let part = ImagePart::new(png_header(), (0, 0), "empty.png");
        assert_eq!(part.scale(Some(100), None), (100, 0));
    }

    #[test]
    fn test_from_source_part() {
        let part = ImagePart::new(png_header(), (3, 4), "a.png");
        let from_source = ImagePart::from_source(part.clone().into()).unwrap();
        assert_eq!(from_source, part);
    }

    #[cfg(feature = "imgconv")]
    #[test]
    fn test_from_blob_reads_dimensions() {
        let mut png = Vec::new();
        image::RgbImage::new(3, 2)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let part = ImagePart::from_blob(png, "").unwrap();
        assert_eq!(part.px_size(), (3, 2));
        assert_eq!(part.format(), Some(ImageFormat::Png));
        assert_eq!(part.dpi(), (DEFAULT_DPI, DEFAULT_DPI));
    }

    #[cfg(feature = "imgconv")]
    #[test]
    fn test_from_blob_reads_resolution() {
        use image::codecs::jpeg::{JpegEncoder, PixelDensity};

        let mut jpeg = Vec::new();
        {
            let mut encoder = JpegEncoder::new(&mut jpeg);
            encoder.set_pixel_density(PixelDensity::dpi(300));
            encoder.encode_image(&image::RgbImage::new(300, 300)).unwrap();
        }
        let part = ImagePart::from_blob(jpeg, "").unwrap();
        assert_eq!(part.px_size(), (300, 300));
        assert_eq!(part.dpi(), (300, 300));
        // 300 px at 300 dpi is one inch
        assert_eq!(part.native_size(), (914_400, 914_400));
        assert_eq!(part.scale(Some(457_200), None), (457_200, 457_200));
    }

    #[test]
    fn test_new_reads_png_resolution() {
        let mut png = png_header();
        png.extend_from_slice(&9u32.to_be_bytes());
        png.extend_from_slice(b"pHYs");
        // 3780 px/m is 96 dpi
        png.extend_from_slice(&3780u32.to_be_bytes());
        png.extend_from_slice(&3780u32.to_be_bytes());
        png.push(1);
        png.extend_from_slice(&[0; 4]);
        let part = ImagePart::new(png, (96, 192), "hi.png");
        assert_eq!(part.dpi(), (96, 96));
        assert_eq!(part.native_size(), (914_400, 1_828_800));
        assert_eq!(part.with_dpi((72, 72)).dpi(), (72, 72));
    }
}
