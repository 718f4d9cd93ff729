//! Filter selection and dispatch.
//!
//! The three filter kinds form a closed set; there is deliberately no
//! "unknown filter" branch anywhere in the pipeline.

use image::{DynamicImage, GrayImage, RgbaImage};
use imageproc::edges::canny;
use imageproc::filter::{gaussian_blur_f32, separable_filter_equal};

pub const SIGMA_MIN: f32 = 0.1;
pub const SIGMA_MAX: f32 = 10.0;
pub const SIGMA_STEP: f64 = 0.1;
pub const SIGMA_DEFAULT: f32 = 1.0;

/// Separable 5-tap uniform kernel; applied in both directions this is the
/// fixed 5x5 neighborhood mean.
const MEAN_KERNEL: [f32; 5] = [0.2; 5];

/// Hysteresis thresholds for Canny. Sensitivity is steered through the
/// pre-smoothing sigma, so these stay fixed.
const CANNY_LOW_THRESHOLD: f32 = 50.0;
const CANNY_HIGH_THRESHOLD: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Mean,
    Gaussian,
    Canny,
}

impl FilterKind {
    pub const ALL: [Self; 3] = [Self::Mean, Self::Gaussian, Self::Canny];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mean => "Mean",
            Self::Gaussian => "Gaussian",
            Self::Canny => "Canny",
        }
    }

    /// Mean uses a fixed window; only Gaussian and Canny read the sigma.
    pub const fn uses_sigma(self) -> bool {
        !matches!(self, Self::Mean)
    }
}

/// One filter invocation: which filter, and the smoothing sigma.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterRequest {
    pub kind: FilterKind,
    pub sigma: f32,
}

impl FilterRequest {
    pub fn sanitized(self) -> Self {
        let sigma = if self.sigma.is_finite() {
            self.sigma.clamp(SIGMA_MIN, SIGMA_MAX)
        } else {
            SIGMA_DEFAULT
        };
        Self {
            kind: self.kind,
            sigma,
        }
    }
}

/// Result of a filter run. Mean and Gaussian keep the source's channel
/// layout; Canny yields an edge mask where edge pixels are 255 and
/// background is 0.
pub enum FilterOutput {
    Color(RgbaImage),
    Gray(GrayImage),
    EdgeMask(GrayImage),
}

impl FilterOutput {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Color(buf) => buf.dimensions(),
            Self::Gray(buf) | Self::EdgeMask(buf) => buf.dimensions(),
        }
    }

    pub const fn is_edge_mask(&self) -> bool {
        matches!(self, Self::EdgeMask(_))
    }
}

/// Run the requested filter over a freshly allocated buffer; the source
/// image is never mutated.
pub fn apply_filter(image: &DynamicImage, request: FilterRequest) -> FilterOutput {
    let request = request.sanitized();
    match request.kind {
        FilterKind::Mean => mean_filter(image),
        FilterKind::Gaussian => gaussian_filter(image, request.sigma),
        FilterKind::Canny => canny_filter(image, request.sigma),
    }
}

/// Fixed 5x5 uniform mean over the image in its native color mode.
/// Grayscale sources stay single-channel.
fn mean_filter(image: &DynamicImage) -> FilterOutput {
    match image {
        DynamicImage::ImageLuma8(gray) => {
            FilterOutput::Gray(separable_filter_equal(gray, &MEAN_KERNEL))
        }
        other => FilterOutput::Color(separable_filter_equal(&other.to_rgba8(), &MEAN_KERNEL)),
    }
}

/// Isotropic Gaussian smoothing, channels preserved.
fn gaussian_filter(image: &DynamicImage, sigma: f32) -> FilterOutput {
    match image {
        DynamicImage::ImageLuma8(gray) => FilterOutput::Gray(gaussian_blur_f32(gray, sigma)),
        other => FilterOutput::Color(gaussian_blur_f32(&other.to_rgba8(), sigma)),
    }
}

/// Grayscale reduction, sigma-controlled smoothing, then Canny edge
/// detection with fixed hysteresis thresholds.
fn canny_filter(image: &DynamicImage, sigma: f32) -> FilterOutput {
    let gray = image.to_luma8();
    let smoothed = gaussian_blur_f32(&gray, sigma);
    FilterOutput::EdgeMask(canny(&smoothed, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgba};

    fn uniform_rgba(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    fn assert_uniform_within(buf: &RgbaImage, expected: [u8; 4], tolerance: u8) {
        for pixel in buf.pixels() {
            for (got, want) in pixel.0.iter().zip(expected.iter()) {
                assert!(
                    got.abs_diff(*want) <= tolerance,
                    "pixel {:?} deviates from {expected:?}",
                    pixel.0
                );
            }
        }
    }

    #[test]
    fn gaussian_on_uniform_field_is_a_noop() {
        let source = uniform_rgba(16, 16, [90, 120, 200, 255]);
        let request = FilterRequest {
            kind: FilterKind::Gaussian,
            sigma: 1.0,
        };
        match apply_filter(&source, request) {
            FilterOutput::Color(buf) => {
                assert_eq!(buf.dimensions(), (16, 16));
                assert_uniform_within(&buf, [90, 120, 200, 255], 1);
            }
            _ => panic!("expected color output"),
        }
    }

    #[test]
    fn mean_on_uniform_field_is_a_noop() {
        let source = uniform_rgba(16, 16, [40, 200, 10, 255]);
        let request = FilterRequest {
            kind: FilterKind::Mean,
            sigma: SIGMA_DEFAULT,
        };
        match apply_filter(&source, request) {
            FilterOutput::Color(buf) => {
                assert_eq!(buf.dimensions(), (16, 16));
                assert_uniform_within(&buf, [40, 200, 10, 255], 1);
            }
            _ => panic!("expected color output"),
        }
    }

    #[test]
    fn canny_on_flat_field_finds_no_edges() {
        let source = uniform_rgba(32, 32, [128, 128, 128, 255]);
        let request = FilterRequest {
            kind: FilterKind::Canny,
            sigma: 1.0,
        };
        let output = apply_filter(&source, request);
        assert!(output.is_edge_mask());
        match output {
            FilterOutput::EdgeMask(mask) => {
                assert_eq!(mask.dimensions(), (32, 32));
                assert!(mask.pixels().all(|p| p.0[0] == 0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn canny_detects_a_hard_step_edge() {
        let mut gray = GrayImage::new(32, 32);
        for (x, _, pixel) in gray.enumerate_pixels_mut() {
            *pixel = Luma([if x < 16 { 0 } else { 255 }]);
        }
        let source = DynamicImage::ImageLuma8(gray);
        let request = FilterRequest {
            kind: FilterKind::Canny,
            sigma: 1.0,
        };
        match apply_filter(&source, request) {
            FilterOutput::EdgeMask(mask) => {
                assert!(mask.pixels().any(|p| p.0[0] == 255));
            }
            _ => panic!("expected edge mask"),
        }
    }

    #[test]
    fn grayscale_source_stays_single_channel() {
        let source = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 12, Luma([77])));
        for kind in [FilterKind::Mean, FilterKind::Gaussian] {
            let output = apply_filter(
                &source,
                FilterRequest {
                    kind,
                    sigma: SIGMA_DEFAULT,
                },
            );
            match output {
                FilterOutput::Gray(buf) => assert_eq!(buf.dimensions(), (8, 12)),
                _ => panic!("{} on grayscale should stay gray", kind.label()),
            }
        }
    }

    #[test]
    fn output_shape_matches_input_for_all_kinds() {
        let source = uniform_rgba(21, 13, [10, 20, 30, 255]);
        for kind in FilterKind::ALL {
            let output = apply_filter(
                &source,
                FilterRequest {
                    kind,
                    sigma: SIGMA_DEFAULT,
                },
            );
            assert_eq!(output.dimensions(), (21, 13), "{}", kind.label());
        }
    }

    #[test]
    fn sanitized_clamps_sigma_into_range() {
        let request = FilterRequest {
            kind: FilterKind::Gaussian,
            sigma: 42.0,
        };
        assert!((request.sanitized().sigma - SIGMA_MAX).abs() < f32::EPSILON);

        let request = FilterRequest {
            kind: FilterKind::Canny,
            sigma: 0.0,
        };
        assert!((request.sanitized().sigma - SIGMA_MIN).abs() < f32::EPSILON);

        let request = FilterRequest {
            kind: FilterKind::Gaussian,
            sigma: f32::NAN,
        };
        assert!((request.sanitized().sigma - SIGMA_DEFAULT).abs() < f32::EPSILON);
    }
}
