use crate::error::BridgeError;

/// An image that has been loaded into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    bytes: Vec<u8>,
    dimensions: (u32, u32),
}

impl DecodedImage {
    /// Decode an image from a byte slice.
    ///
    /// Attempts to guess the format of the image from the data. Non-RGBA images
    /// will be converted to RGBA.
    #[cfg(feature = "image")]
    pub fn decode(bytes: &[u8]) -> Result<Self, BridgeError> {
        use image::GenericImageView;
        let decoded = image::load_from_memory(bytes)?;
        let dimensions = decoded.dimensions();

        Ok(Self {
            bytes: decoded.to_rgba8().into_vec(),
            dimensions,
        })
    }

    /// Wraps already decoded RGBA pixels.
    pub fn from_rgba(bytes: Vec<u8>, width: u32, height: u32) -> Result<Self, BridgeError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| {
                BridgeError::Style(format!("{width}x{height} RGBA image is too large"))
            })?;
        if bytes.len() != expected {
            return Err(BridgeError::Style(format!(
                "{width}x{height} RGBA image needs {expected} bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self {
            bytes,
            dimensions: (width, height),
        })
    }

    /// Raw bytes of the image, in RGBA order.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width and height of the image.
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }
}

/// Image to be installed into a style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleImage {
    /// Pixels of the image.
    pub image: DecodedImage,
    /// Pixel ratio of the image.
    pub scale: f32,
    /// Whether the image is a signed distance field that can be recolored by the style.
    pub sdf: bool,
}

impl StyleImage {
    /// Creates a non-SDF image with pixel ratio 1.
    pub fn new(image: DecodedImage) -> Self {
        Self {
            image,
            scale: 1.0,
            sdf: false,
        }
    }
}
