//! Bicubic resampling of RGB images.
//!
//! Stateless and read-only: safe to call from any number of workers at once.

use contour_common::{Image, Rgb};

/// Sample `source` at normalized coordinates `(u, v)` in `[0, 1]`.
///
/// `u` runs along the width, `v` along the height. The coordinate is mapped
/// to pixel centres (`u * width - 0.5`), the surrounding 4×4 neighbourhood is
/// gathered with edge replication, and each channel is interpolated with a
/// Catmull-Rom kernel, first along x then along y. The result is rounded and
/// clamped to `0..=255`.
pub fn sample_bicubic(source: &Image, u: f32, v: f32) -> Rgb {
    let x = u * source.width() as f32 - 0.5;
    let y = v * source.height() as f32 - 0.5;

    let x_floor = x.floor();
    let y_floor = y.floor();
    let xi = x_floor as isize;
    let yi = y_floor as isize;
    let xf = x - x_floor;
    let yf = y - y_floor;

    // Sample 4x4 grid of points
    let mut values = [[[0.0f32; 3]; 4]; 4];
    for (j, row) in values.iter_mut().enumerate() {
        for (i, cell) in row.iter_mut().enumerate() {
            let px = source.pixel_clamped(xi + i as isize - 1, yi + j as isize - 1);
            *cell = px.channels().map(f32::from);
        }
    }

    let mut out = [0u8; 3];
    for (channel, slot) in out.iter_mut().enumerate() {
        let mut row_values = [0.0f32; 4];
        for (j, value) in row_values.iter_mut().enumerate() {
            *value = cubic_1d(
                values[j][0][channel],
                values[j][1][channel],
                values[j][2][channel],
                values[j][3][channel],
                xf,
            );
        }
        let value = cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf);
        *slot = value.round().clamp(0.0, 255.0) as u8;
    }

    Rgb::from_channels(out)
}

/// 1D cubic interpolation using Catmull-Rom spline.
#[inline]
pub(crate) fn cubic_1d(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_from_levels(width: usize, height: usize, levels: &[u8]) -> Image {
        Image::new(width, height, levels.iter().map(|&l| Rgb::gray(l)).collect()).unwrap()
    }

    #[test]
    fn test_cubic_1d_hits_control_points() {
        assert!((cubic_1d(1.0, 2.0, 3.0, 4.0, 0.0) - 2.0).abs() < 1e-6);
        assert!((cubic_1d(1.0, 2.0, 3.0, 4.0, 1.0) - 3.0).abs() < 1e-6);
        // Linear data stays linear
        assert!((cubic_1d(1.0, 2.0, 3.0, 4.0, 0.5) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_image_is_preserved() {
        let image = Image::filled(7, 5, Rgb::new(12, 100, 250)).unwrap();
        for &(u, v) in &[(0.0, 0.0), (0.3, 0.7), (1.0, 1.0), (0.5, 0.0)] {
            assert_eq!(sample_bicubic(&image, u, v), Rgb::new(12, 100, 250));
        }
    }

    #[test]
    fn test_pixel_centres_are_exact() {
        // u = (x + 0.5) / width lands exactly on pixel x
        let image = image_from_levels(4, 1, &[0, 80, 160, 240]);
        assert_eq!(sample_bicubic(&image, 1.5 / 4.0, 0.5), Rgb::gray(80));
        assert_eq!(sample_bicubic(&image, 2.5 / 4.0, 0.5), Rgb::gray(160));
    }

    #[test]
    fn test_overshoot_is_clamped() {
        // A hard edge makes Catmull-Rom ring past the input range
        let image = image_from_levels(4, 1, &[0, 0, 255, 255]);
        for step in 0..=20 {
            let u = step as f32 / 20.0;
            let px = sample_bicubic(&image, u, 0.5);
            assert_eq!(px.red, px.green);
            assert_eq!(px.green, px.blue);
        }
        let near_edge = sample_bicubic(&image, 2.6 / 4.0, 0.5);
        assert_eq!(near_edge, Rgb::gray(255));
    }

    #[test]
    fn test_corners_stay_near_corner_pixels() {
        // The outermost sample points sit half a pixel beyond the last centre
        let image = image_from_levels(2, 2, &[10, 20, 30, 40]);
        let top_left = sample_bicubic(&image, 0.0, 0.0).red as i32;
        let bottom_right = sample_bicubic(&image, 1.0, 1.0).red as i32;
        assert!((top_left - 10).abs() <= 3, "top-left {}", top_left);
        assert!((bottom_right - 40).abs() <= 3, "bottom-right {}", bottom_right);
    }
}
