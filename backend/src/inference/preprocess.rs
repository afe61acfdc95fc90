use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;
use ndarray::Array4;
use tch::Tensor;

use crate::error::ApiError;

/// Decode the image at `path` into a normalized `1x3xNxN` float tensor.
pub fn tensor_from_path(path: &Path, size: u32) -> Result<Tensor, ApiError> {
    let image = image::open(path)?;
    let array = image_to_array(&image, size);
    let tensor = Tensor::try_from(array)?;
    Ok(tensor)
}

/// Normalize color mode to RGB, resize to the square network input and
/// scale pixel values to `[0,1]`, channels-first with a batch dimension.
pub fn image_to_array(image: &DynamicImage, size: u32) -> Array4<f32> {
    let rgb = image.to_rgb8();
    let resized = image::imageops::resize(&rgb, size, size, FilterType::Lanczos3);

    let side = size as usize;
    let mut array = Array4::<f32>::zeros((1, 3, side, side));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for channel in 0..3 {
            array[[0, channel, y as usize, x as usize]] = pixel[channel] as f32 / 255.0;
        }
    }
    array
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn array_has_batch_channel_height_width_layout() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 20, Rgb([255, 0, 128])));
        let array = image_to_array(&image, 224);
        assert_eq!(array.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn pixel_values_are_scaled_to_unit_range() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([255, 0, 128])));
        let array = image_to_array(&image, 32);
        assert!((array[[0, 0, 0, 0]] - 1.0).abs() < 1e-6);
        assert!(array[[0, 1, 0, 0]].abs() < 1e-6);
        assert!((array[[0, 2, 0, 0]] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn grayscale_input_is_expanded_to_three_channels() {
        let image = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(16, 16, image::Luma([100])));
        let array = image_to_array(&image, 16);
        assert_eq!(array.shape(), &[1, 3, 16, 16]);
        assert!((array[[0, 0, 0, 0]] - array[[0, 2, 0, 0]]).abs() < 1e-6);
    }
}
