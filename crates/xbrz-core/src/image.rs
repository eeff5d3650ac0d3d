//! Image - the 32-bit raster container
//!
//! A minimal rectangular pixel buffer: one `u32` per pixel, row-major,
//! stride equal to the width. Source images are shared read-only between
//! threads during scaling, so the immutable form is cheaply clonable.
//!
//! # Ownership model
//!
//! [`Image`] uses `Arc` for efficient cloning (shared ownership). To modify
//! pixel data, convert to [`ImageMut`] via [`Image::try_into_mut`] or
//! [`Image::to_mut`], then convert back with `Into<Image>`.

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal image data
#[derive(Debug)]
struct ImageData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Packed 32-bit pixels, row-major, stride == width
    data: Vec<u32>,
}

/// Immutable 32-bit raster image.
///
/// Cloning is cheap (reference counted). The pixel buffer is never copied
/// unless [`Image::deep_clone`] or [`Image::to_mut`] is called.
///
/// # Examples
///
/// ```
/// use xbrz_core::Image;
///
/// let img = Image::new(640, 480).unwrap();
/// assert_eq!(img.width(), 640);
/// assert_eq!(img.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    inner: Arc<ImageData>,
}

impl Image {
    /// Create a new image with all pixels set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let data = vec![0u32; width as usize * height as usize];
        Ok(Image {
            inner: Arc::new(ImageData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create an image from an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::BufferSize`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Image {
            inner: Arc::new(ImageData {
                width,
                height,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get one row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// Check if two images have the same dimensions.
    pub fn sizes_equal(&self, other: &Image) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Get the number of strong references to this image.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a deep copy of this image.
    ///
    /// Unlike `clone()` which shares data via `Arc`, this creates a
    /// completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Image {
            inner: Arc::new(ImageData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            }),
        }
    }

    /// Try to get mutable access to the pixel data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<ImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(ImageMut { inner: data }),
            Err(arc) => Err(Image { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    ///
    /// Always copies the pixel buffer.
    pub fn to_mut(&self) -> ImageMut {
        ImageMut {
            inner: ImageData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Image) -> bool {
        self.sizes_equal(other) && self.inner.data == other.inner.data
    }
}

impl Eq for Image {}

/// Mutable 32-bit raster image.
///
/// Allows modification of pixel data with exclusive access enforced at
/// compile time. Convert back to an immutable [`Image`] using `Into<Image>`.
#[derive(Debug)]
pub struct ImageMut {
    inner: ImageData,
}

impl ImageMut {
    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable raw access to the pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to one row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinates are out of
    /// bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize * self.inner.width as usize + x as usize,
                len: self.inner.data.len(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        self.inner.data[y as usize * self.inner.width as usize + x as usize] = val;
    }

    /// Set every pixel to the given value.
    pub fn fill(&mut self, val: u32) {
        self.inner.data.fill(val);
    }

    /// Clear all pixels to zero.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }
}

impl From<ImageMut> for Image {
    fn from(img: ImageMut) -> Self {
        Image {
            inner: Arc::new(img.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_creation() {
        let img = Image::new(100, 200).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 200);
        assert_eq!(img.data().len(), 100 * 200);
        assert!(img.data().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_image_creation_invalid() {
        assert!(Image::new(0, 100).is_err());
        assert!(Image::new(100, 0).is_err());
    }

    #[test]
    fn test_from_vec() {
        let img = Image::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(img.get_pixel(0, 0), Some(1));
        assert_eq!(img.get_pixel(1, 1), Some(4));
        assert_eq!(img.get_pixel(2, 0), None);
        assert_eq!(img.get_pixel(0, 2), None);
    }

    #[test]
    fn test_from_vec_size_mismatch() {
        assert!(Image::from_vec(2, 2, vec![1, 2, 3]).is_err());
        assert!(Image::from_vec(0, 2, vec![]).is_err());
    }

    #[test]
    fn test_row_access() {
        let img = Image::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.row(0), &[1, 2, 3]);
        assert_eq!(img.row(1), &[4, 5, 6]);
    }

    #[test]
    fn test_clone_shares_data() {
        let img1 = Image::new(10, 10).unwrap();
        let img2 = img1.clone();
        assert_eq!(img1.ref_count(), 2);
        assert_eq!(img1.data().as_ptr(), img2.data().as_ptr());
    }

    #[test]
    fn test_deep_clone() {
        let img1 = Image::new(10, 10).unwrap();
        let img2 = img1.deep_clone();
        assert_eq!(img1.ref_count(), 1);
        assert_eq!(img2.ref_count(), 1);
        assert_ne!(img1.data().as_ptr(), img2.data().as_ptr());
    }

    #[test]
    fn test_mutation_roundtrip() {
        let img = Image::new(4, 4).unwrap();
        let mut m = img.try_into_mut().unwrap();
        m.set_pixel(2, 3, 0xDEADBEEF).unwrap();
        assert!(m.set_pixel(4, 0, 1).is_err());
        let img: Image = m.into();
        assert_eq!(img.get_pixel(2, 3), Some(0xDEADBEEF));
    }

    #[test]
    fn test_try_into_mut_shared_fails() {
        let img1 = Image::new(4, 4).unwrap();
        let img2 = img1.clone();
        assert!(img1.try_into_mut().is_err());
        drop(img2);
    }

    #[test]
    fn test_fill() {
        let img = Image::new(3, 3).unwrap();
        let mut m = img.try_into_mut().unwrap();
        m.fill(0x11223344);
        let img: Image = m.into();
        assert!(img.data().iter().all(|&p| p == 0x11223344));
    }

    #[test]
    fn test_equality() {
        let a = Image::from_vec(2, 1, vec![1, 2]).unwrap();
        let b = Image::from_vec(2, 1, vec![1, 2]).unwrap();
        let c = Image::from_vec(2, 1, vec![1, 3]).unwrap();
        let d = Image::from_vec(1, 2, vec![1, 2]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
