//! Longest-side downscaling.

use image::DynamicImage;
use image::imageops::FilterType;

/// Shrinks `image` so neither side exceeds `max_dimension`.
///
/// Aspect ratio is preserved and images that already fit are returned
/// unchanged; this never enlarges.
pub fn fit_within(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    if max_dimension == 0 {
        return image;
    }

    let (width, height) = (image.width(), image.height());
    if width <= max_dimension && height <= max_dimension {
        return image;
    }

    image.resize(max_dimension, max_dimension, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_is_capped_on_width() {
        let image = DynamicImage::new_rgb8(400, 100);
        let resized = fit_within(image, 200);
        assert_eq!((resized.width(), resized.height()), (200, 50));
    }

    #[test]
    fn portrait_is_capped_on_height() {
        let image = DynamicImage::new_rgb8(100, 400);
        let resized = fit_within(image, 200);
        assert_eq!((resized.width(), resized.height()), (50, 200));
    }

    #[test]
    fn small_images_are_never_enlarged() {
        let image = DynamicImage::new_rgb8(30, 20);
        let resized = fit_within(image, 200);
        assert_eq!((resized.width(), resized.height()), (30, 20));
    }
}
