use std::path::Path;

/// Errors from texture loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Decoded RGBA8 image ready for upload, stored bottom row first so that
/// texture coordinate `v = 0` samples the bottom of the picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureImage {
    /// Read and decode a PNG or JPEG file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let texture = Self::from_encoded(&bytes)?;
        tracing::info!(
            "loaded texture {} ({}x{})",
            path.display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Decode an in-memory image file.
    pub fn from_encoded(bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)?;
        let rgba = image.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Load `path`, or log the failure and fall back to a checkerboard so the
    /// viewer keeps running.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(texture) => texture,
            Err(e) => {
                tracing::error!("unable to load texture {}: {e}", path.display());
                Self::checkerboard(64, 8)
            }
        }
    }

    /// Two-tone checkerboard of `cells` x `cells` squares.
    pub fn checkerboard(size: u32, cells: u32) -> Self {
        const LIGHT: [u8; 4] = [178, 92, 64, 255];
        const DARK: [u8; 4] = [96, 48, 36, 255];

        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let color = if (x / cell + y / cell) % 2 == 0 {
                    LIGHT
                } else {
                    DARK
                };
                pixels.extend_from_slice(&color);
            }
        }
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed RGBA8 rows.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// 2x2 image with a red top row and a blue bottom row.
    fn two_row_image() -> RgbaImage {
        RgbaImage::from_fn(2, 2, |_, y| if y == 0 { RED } else { BLUE })
    }

    #[test]
    fn load_png_flips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.png");
        two_row_image().save(&path).unwrap();

        let texture = TextureImage::load(&path).unwrap();
        assert_eq!(texture.width(), 2);
        assert_eq!(texture.height(), 2);
        assert_eq!(texture.pixels().len(), 16);
        // Bottom (blue) row comes first.
        assert_eq!(&texture.pixels()[..4], &BLUE.0);
        assert_eq!(&texture.pixels()[8..12], &RED.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextureImage::load(dir.path().join("missing.jpg")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn garbage_bytes_are_decode_error() {
        let err = TextureImage::from_encoded(b"definitely not an image").unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
    }

    #[test]
    fn fallback_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let texture = TextureImage::load_or_fallback(dir.path().join("Brick.jpg"));
        assert_eq!(texture, TextureImage::checkerboard(64, 8));
    }

    #[test]
    fn checkerboard_alternates() {
        let texture = TextureImage::checkerboard(4, 2);
        assert_eq!(texture.width(), 4);
        assert_eq!(texture.pixels().len(), 4 * 4 * 4);

        let pixel = |x: usize, y: usize| &texture.pixels()[(y * 4 + x) * 4..][..4];
        assert_eq!(pixel(0, 0), pixel(1, 1));
        assert_ne!(pixel(0, 0), pixel(2, 0));
        assert_ne!(pixel(0, 0), pixel(0, 2));
        assert_eq!(pixel(0, 0), pixel(2, 2));
    }

    #[test]
    fn checkerboard_tolerates_zero_sizes() {
        let texture = TextureImage::checkerboard(0, 0);
        assert_eq!(texture.width(), 1);
        assert_eq!(texture.pixels().len(), 4);
    }
}
