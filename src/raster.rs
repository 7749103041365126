use std::path::{Path, PathBuf};

use thiserror::Error;

const RGBA: usize = 4;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("could not load {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded image, always stored as interleaved RGBA bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Decodes the file at `path` into an RGBA raster, whatever the source
    /// channel count. A failed load leaves the caller's previous raster
    /// untouched since no `Raster` value is produced at all.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RasterError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| RasterError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let rgba = decoded.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            data: rgba.into_raw(),
        })
    }

    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), (width * height) as usize * RGBA);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Combined R*G*B intensity of one pixel, normalized to [0, 1].
    ///
    /// The viewer's grid convention addresses the buffer as
    /// `4 * (col * width + row)`; callers that exceed the raster bounds get
    /// `None` rather than a read past the buffer.
    pub fn intensity(&self, row: u32, col: u32) -> Option<f32> {
        if row >= self.width || col >= self.height {
            return None;
        }

        let index = RGBA * (col * self.width + row) as usize;
        let red = self.data[index] as f32;
        let green = self.data[index + 1] as f32;
        let blue = self.data[index + 2] as f32;

        Some((red * green * blue) / (255.0 * 255.0 * 255.0))
    }
}
