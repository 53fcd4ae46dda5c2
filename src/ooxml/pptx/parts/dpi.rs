//! Image resolution from file headers.
//!
//! PNG declares it in the `pHYs` chunk, JPEG in the JFIF `APP0` density
//! fields or in the EXIF `APP1` resolution tags. Only the header is read;
//! no pixel data is decoded.

use super::image::ImageFormat;

const INCHES_PER_METER: f64 = 0.0254;
const CM_PER_INCH: f64 = 2.54;

const EXIF_X_RESOLUTION: u16 = 0x011A;
const EXIF_Y_RESOLUTION: u16 = 0x011B;
const EXIF_RESOLUTION_UNIT: u16 = 0x0128;

/// Horizontal and vertical resolution the image declares, `None` when it
/// declares none or only a pixel aspect ratio.
pub(crate) fn detect_dpi(blob: &[u8]) -> Option<(u32, u32)> {
    match ImageFormat::detect(blob)? {
        ImageFormat::Png => png_dpi(blob),
        ImageFormat::Jpeg => jpeg_dpi(blob),
        _ => None,
    }
}

#[inline]
fn be_u16(data: &[u8], at: usize) -> Option<u16> {
    data.get(at..at + 2).map(|b| u16::from_be_bytes([b[0], b[1]]))
}

#[inline]
fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    data.get(at..at + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn to_dpi(value: f64) -> Option<u32> {
    let dpi = value.round();
    (1.0..=f64::from(u32::MAX)).contains(&dpi).then_some(dpi as u32)
}

fn png_dpi(blob: &[u8]) -> Option<(u32, u32)> {
    // chunks follow the 8-byte signature
    let mut pos = 8;
    while let (Some(len), Some(kind)) = (be_u32(blob, pos), blob.get(pos + 4..pos + 8)) {
        let data = pos + 8;
        match kind {
            b"pHYs" => {
                // unit 1 is pixels per meter, 0 is aspect ratio only
                if blob.get(data + 8) != Some(&1) {
                    return None;
                }
                let x = f64::from(be_u32(blob, data)?) * INCHES_PER_METER;
                let y = f64::from(be_u32(blob, data + 4)?) * INCHES_PER_METER;
                return Some((to_dpi(x)?, to_dpi(y)?));
            }
            b"IDAT" | b"IEND" => return None,
            _ => {}
        }
        pos = data.checked_add(len as usize)?.checked_add(4)?;
    }
    None
}

fn jpeg_dpi(blob: &[u8]) -> Option<(u32, u32)> {
    let mut exif = None;
    let mut pos = 2;
    while blob.get(pos) == Some(&0xFF) {
        let marker = *blob.get(pos + 1)?;
        match marker {
            0xFF => {
                pos += 1;
                continue;
            }
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            // start of scan, end of image
            0xDA | 0xD9 => break,
            _ => {}
        }
        let len = usize::from(be_u16(blob, pos + 2)?);
        let segment = blob.get(pos + 4..pos + 2 + len.max(2))?;
        match marker {
            0xE0 if segment.starts_with(b"JFIF\0") => {
                if let Some(dpi) = jfif_dpi(segment) {
                    return Some(dpi);
                }
            }
            0xE1 if exif.is_none() && segment.starts_with(b"Exif\0\0") => {
                exif = exif_dpi(&segment[6..]);
            }
            _ => {}
        }
        pos += 2 + len;
    }
    exif
}

/// Density fields of a JFIF `APP0` segment.
fn jfif_dpi(segment: &[u8]) -> Option<(u32, u32)> {
    let units = *segment.get(7)?;
    let x = f64::from(be_u16(segment, 8)?);
    let y = f64::from(be_u16(segment, 10)?);
    match units {
        1 => Some((to_dpi(x)?, to_dpi(y)?)),
        2 => Some((to_dpi(x * CM_PER_INCH)?, to_dpi(y * CM_PER_INCH)?)),
        _ => None,
    }
}

/// TIFF structure inside an EXIF segment.
struct Tiff<'a> {
    data: &'a [u8],
    little_endian: bool,
}

impl Tiff<'_> {
    fn u16(&self, at: usize) -> Option<u16> {
        let b = self.data.get(at..at + 2)?;
        Some(if self.little_endian {
            u16::from_le_bytes([b[0], b[1]])
        } else {
            u16::from_be_bytes([b[0], b[1]])
        })
    }

    fn u32(&self, at: usize) -> Option<u32> {
        let b = self.data.get(at..at + 4)?;
        let bytes = [b[0], b[1], b[2], b[3]];
        Some(if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    }

    /// RATIONAL value stored at `offset`.
    fn rational(&self, offset: usize) -> Option<f64> {
        let num = self.u32(offset)?;
        let den = self.u32(offset + 4)?;
        (den != 0).then(|| f64::from(num) / f64::from(den))
    }
}

/// X/YResolution and ResolutionUnit of IFD0.
fn exif_dpi(data: &[u8]) -> Option<(u32, u32)> {
    let little_endian = match data.get(0..2)? {
        b"II" => true,
        b"MM" => false,
        _ => return None,
    };
    let tiff = Tiff { data, little_endian };
    let ifd = tiff.u32(4)? as usize;
    let count = usize::from(tiff.u16(ifd)?);

    let (mut x, mut y, mut unit) = (None, None, 2);
    for i in 0..count {
        let entry = ifd + 2 + i * 12;
        match tiff.u16(entry)? {
            EXIF_X_RESOLUTION => x = tiff.rational(tiff.u32(entry + 8)? as usize),
            EXIF_Y_RESOLUTION => y = tiff.rational(tiff.u32(entry + 8)? as usize),
            EXIF_RESOLUTION_UNIT => unit = tiff.u16(entry + 8)?,
            _ => {}
        }
    }
    let scale = match unit {
        2 => 1.0,
        3 => CM_PER_INCH,
        _ => return None,
    };
    Some((to_dpi(x? * scale)?, to_dpi(y? * scale)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut chunk = (data.len() as u32).to_be_bytes().to_vec();
        chunk.extend_from_slice(kind);
        chunk.extend_from_slice(data);
        chunk.extend_from_slice(&[0; 4]);
        chunk
    }

    fn png_with_phys(x: u32, y: u32, unit: u8) -> Vec<u8> {
        let mut png = PNG_SIGNATURE.to_vec();
        png.extend(png_chunk(b"IHDR", &[0; 13]));
        let mut phys = x.to_be_bytes().to_vec();
        phys.extend_from_slice(&y.to_be_bytes());
        phys.push(unit);
        png.extend(png_chunk(b"pHYs", &phys));
        png.extend(png_chunk(b"IEND", &[]));
        png
    }

    fn jpeg_with_segment(marker: u8, payload: &[u8]) -> Vec<u8> {
        let mut jpeg = vec![0xFF, 0xD8, 0xFF, marker];
        jpeg.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        jpeg.extend_from_slice(payload);
        jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0xFF, 0xD9]);
        jpeg
    }

    fn jfif(units: u8, x: u16, y: u16) -> Vec<u8> {
        let mut payload = b"JFIF\0\x01\x02".to_vec();
        payload.push(units);
        payload.extend_from_slice(&x.to_be_bytes());
        payload.extend_from_slice(&y.to_be_bytes());
        payload.extend_from_slice(&[0, 0]);
        jpeg_with_segment(0xE0, &payload)
    }

    /// Little-endian EXIF payload with X/YResolution of `dpi`/1 and
    /// ResolutionUnit `unit`.
    fn exif(dpi: u32, unit: u16) -> Vec<u8> {
        let mut tiff = b"II*\0".to_vec();
        tiff.extend_from_slice(&8u32.to_le_bytes());
        tiff.extend_from_slice(&3u16.to_le_bytes());
        let rationals = 8 + 2 + 3 * 12 + 4;
        for (tag, kind, value) in [
            (EXIF_X_RESOLUTION, 5u16, rationals as u32),
            (EXIF_Y_RESOLUTION, 5, rationals as u32 + 8),
            (EXIF_RESOLUTION_UNIT, 3, u32::from(unit)),
        ] {
            tiff.extend_from_slice(&tag.to_le_bytes());
            tiff.extend_from_slice(&kind.to_le_bytes());
            tiff.extend_from_slice(&1u32.to_le_bytes());
            tiff.extend_from_slice(&value.to_le_bytes());
        }
        tiff.extend_from_slice(&0u32.to_le_bytes());
        for _ in 0..2 {
            tiff.extend_from_slice(&dpi.to_le_bytes());
            tiff.extend_from_slice(&1u32.to_le_bytes());
        }
        let mut payload = b"Exif\0\0".to_vec();
        payload.extend(tiff);
        jpeg_with_segment(0xE1, &payload)
    }

    #[test]
    fn test_png_phys() {
        // 11811 px/m is 300 dpi, 3780 px/m is 96 dpi
        assert_eq!(detect_dpi(&png_with_phys(11811, 3780, 1)), Some((300, 96)));
        assert_eq!(detect_dpi(&png_with_phys(1, 1, 0)), None);
        assert_eq!(detect_dpi(&PNG_SIGNATURE), None);
    }

    #[test]
    fn test_png_without_phys() {
        let mut png = PNG_SIGNATURE.to_vec();
        png.extend(png_chunk(b"IHDR", &[0; 13]));
        png.extend(png_chunk(b"IDAT", &[0; 4]));
        assert_eq!(detect_dpi(&png), None);
    }

    #[test]
    fn test_jfif_density() {
        assert_eq!(detect_dpi(&jfif(1, 300, 150)), Some((300, 150)));
        // 118 dots per cm
        assert_eq!(detect_dpi(&jfif(2, 118, 118)), Some((300, 300)));
        assert_eq!(detect_dpi(&jfif(0, 1, 1)), None);
    }

    #[test]
    fn test_exif_resolution() {
        assert_eq!(detect_dpi(&exif(150, 2)), Some((150, 150)));
        assert_eq!(detect_dpi(&exif(100, 3)), Some((254, 254)));
        assert_eq!(detect_dpi(&exif(150, 1)), None);
    }

    #[test]
    fn test_truncated_headers() {
        let png = png_with_phys(11811, 11811, 1);
        assert_eq!(detect_dpi(&png[..png.len() - 20]), None);
        let jpeg = jfif(1, 300, 300);
        assert_eq!(detect_dpi(&jpeg[..8]), None);
        assert_eq!(detect_dpi(b"GIF89a"), None);
    }
}
