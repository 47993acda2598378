use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image data too short to identify a format")]
    TooShort,
    #[error("unrecognized image format (expected PNG or JPEG)")]
    UnknownFormat,
    #[error("JPEG data ended before a frame header")]
    JpegNoFrameHeader,
    #[error("unsupported JPEG channel count: {0} (expected 1 or 3)")]
    JpegChannels(u8),
    #[error("failed to decode PNG: {0}")]
    PngDecode(#[from] png::DecodingError),
    #[error("unsupported PNG color type: {0:?}")]
    PngColorType(png::ColorType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Jpeg,
    Png,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Rgb,
    Gray,
}

impl ColorSpace {
    pub(crate) fn pdf_name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "DeviceRGB",
            ColorSpace::Gray => "DeviceGray",
        }
    }
}

/// Raster content ready for embedding: decoded pixels for PNG sources,
/// untouched compressed bytes for JPEG sources.
#[derive(Debug)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub format: RasterFormat,
    pub color_space: ColorSpace,
    pub data: Vec<u8>,
    /// Alpha channel split out of RGBA/gray-alpha PNGs, embedded as an SMask.
    pub alpha: Option<Vec<u8>>,
}

/// Identify the format from magic bytes.
pub fn sniff(data: &[u8]) -> Result<RasterFormat, ImageError> {
    if data.len() < 4 {
        return Err(ImageError::TooShort);
    }
    if data[..2] == [0xFF, 0xD8] {
        Ok(RasterFormat::Jpeg)
    } else if data[..4] == [0x89, b'P', b'N', b'G'] {
        Ok(RasterFormat::Png)
    } else {
        Err(ImageError::UnknownFormat)
    }
}

pub fn decode(data: &[u8]) -> Result<Raster, ImageError> {
    match sniff(data)? {
        RasterFormat::Jpeg => decode_jpeg(data),
        RasterFormat::Png => decode_png(data),
    }
}

/// JPEG bytes are embedded as-is with DCTDecode; only the frame header is
/// read, for the pixel dimensions and channel count.
fn decode_jpeg(data: &[u8]) -> Result<Raster, ImageError> {
    let (width, height, channels) = jpeg_frame_header(data)?;
    let color_space = match channels {
        1 => ColorSpace::Gray,
        3 => ColorSpace::Rgb,
        other => return Err(ImageError::JpegChannels(other)),
    };
    Ok(Raster {
        width,
        height,
        format: RasterFormat::Jpeg,
        color_space,
        data: data.to_vec(),
        alpha: None,
    })
}

/// Scan for a SOF0-SOF3 marker and return (width, height, channels).
fn jpeg_frame_header(data: &[u8]) -> Result<(u32, u32, u8), ImageError> {
    let mut pos = 0;
    while pos + 3 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        match data[pos + 1] {
            // Fill bytes and escaped 0xFF in entropy-coded data.
            0xFF | 0x00 => pos += 1,
            // Standalone markers carry no length field.
            0xD8 | 0xD9 | 0xD0..=0xD7 => pos += 2,
            0xC0..=0xC3 => {
                if pos + 9 >= data.len() {
                    return Err(ImageError::JpegNoFrameHeader);
                }
                let height = u16::from_be_bytes([data[pos + 5], data[pos + 6]]) as u32;
                let width = u16::from_be_bytes([data[pos + 7], data[pos + 8]]) as u32;
                return Ok((width, height, data[pos + 9]));
            }
            _ => {
                let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
                pos += 2 + seg_len;
            }
        }
    }
    Err(ImageError::JpegNoFrameHeader)
}

fn decode_png(data: &[u8]) -> Result<Raster, ImageError> {
    let mut reader = png::Decoder::new(data).read_info()?;
    let mut pixels = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut pixels)?;
    pixels.truncate(frame.buffer_size());

    let raster = |color_space, data, alpha| Raster {
        width: frame.width,
        height: frame.height,
        format: RasterFormat::Png,
        color_space,
        data,
        alpha,
    };

    match frame.color_type {
        png::ColorType::Rgb => Ok(raster(ColorSpace::Rgb, pixels, None)),
        png::ColorType::Grayscale => Ok(raster(ColorSpace::Gray, pixels, None)),
        png::ColorType::Rgba => {
            let (rgb, alpha) = split_alpha(&pixels, 4);
            Ok(raster(ColorSpace::Rgb, rgb, Some(alpha)))
        }
        png::ColorType::GrayscaleAlpha => {
            let (gray, alpha) = split_alpha(&pixels, 2);
            Ok(raster(ColorSpace::Gray, gray, Some(alpha)))
        }
        other => Err(ImageError::PngColorType(other)),
    }
}

/// Separate interleaved pixels into color components and the trailing alpha
/// byte of each pixel.
fn split_alpha(pixels: &[u8], stride: usize) -> (Vec<u8>, Vec<u8>) {
    let count = pixels.len() / stride;
    let mut color = Vec::with_capacity(count * (stride - 1));
    let mut alpha = Vec::with_capacity(count);
    for px in pixels.chunks_exact(stride) {
        color.extend_from_slice(&px[..stride - 1]);
        alpha.push(px[stride - 1]);
    }
    (color, alpha)
}
