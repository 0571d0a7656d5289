use crate::error::{PixmeshError, PixmeshResult};

/// Linear RGBA, components in 0..=1.
pub type Rgba = [f32; 4];

/// Row-major per-pixel camera-space depth, larger = farther.
///
/// Row 0 corresponds to the bottom of the captured frame. Immutable once
/// constructed.
#[derive(Clone, Debug)]
pub struct DepthBuffer {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> PixmeshResult<Self> {
        check_dimensions("depth", width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[index(self.width, x, y)]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// RGBA image aligned pixel-for-pixel with a [`DepthBuffer`].
#[derive(Clone, Debug)]
pub struct ColorBuffer {
    width: u32,
    height: u32,
    data: Vec<Rgba>,
}

impl ColorBuffer {
    pub fn new(width: u32, height: u32, data: Vec<Rgba>) -> PixmeshResult<Self> {
        check_dimensions("color", width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.data[index(self.width, x, y)]
    }
}

fn index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

fn check_dimensions(kind: &str, width: u32, height: u32, len: usize) -> PixmeshResult<()> {
    if width == 0 || height == 0 {
        return Err(PixmeshError::buffer(format!(
            "{kind} buffer dimensions must be > 0, got {width}x{height}"
        )));
    }
    let expected = width as usize * height as usize;
    if len != expected {
        return Err(PixmeshError::buffer(format!(
            "{kind} buffer length {len} does not match {width}x{height} ({expected} pixels)"
        )));
    }
    Ok(())
}
