//! Color-transform and chroma-resampling laws.

use zenvq::{rgb_to_yuv, subsample_chroma, upsample_chroma, yuv_to_rgb, Image, Plane};

fn image_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> [u8; 3]) -> Image {
    let mut data = Vec::with_capacity(width * height * 3);
    for row in 0..height {
        for col in 0..width {
            data.extend_from_slice(&f(row, col));
        }
    }
    Image::from_rgb8(&data, width, height).unwrap()
}

#[test]
fn luma_coefficients() {
    let white = image_from_fn(2, 2, |_, _| [255, 255, 255]);
    let yuv = rgb_to_yuv(&white);
    assert!((yuv.y.get(0, 0) - 255.0).abs() < 1e-9);
    assert!((yuv.u.get(0, 0) - 128.0).abs() < 1e-9);
    assert!((yuv.v.get(0, 0) - 128.0).abs() < 1e-9);

    let red = image_from_fn(2, 2, |_, _| [255, 0, 0]);
    let yuv = rgb_to_yuv(&red);
    assert!((yuv.y.get(0, 0) - 0.299 * 255.0).abs() < 1e-9);
    assert!((yuv.v.get(0, 0) - (0.615 * 255.0 + 128.0)).abs() < 1e-9);
}

#[test]
fn forward_inverse_round_trip_within_rounding() {
    let image = image_from_fn(8, 8, |row, col| {
        [
            (row * 30 % 256) as u8,
            (col * 40 % 256) as u8,
            ((row + col) * 25 % 256) as u8,
        ]
    });
    let yuv = rgb_to_yuv(&image);
    let back = yuv_to_rgb(&yuv.y, &yuv.u, &yuv.v).unwrap();
    for channel in 0..3 {
        for i in 0..64 {
            let orig = image.plane(channel).as_slice()[i];
            let got = back.plane(channel).as_slice()[i];
            assert!(
                (orig - got).abs() <= 1.0,
                "channel {channel} sample {i}: {orig} vs {got}"
            );
        }
    }
}

#[test]
fn subsample_dimension_law() {
    // Even dimensions halve exactly; odd dimensions floor.
    let even = subsample_chroma(&Plane::new(8, 6));
    assert_eq!((even.width(), even.height()), (4, 3));
    let odd = subsample_chroma(&Plane::new(9, 7));
    assert_eq!((odd.width(), odd.height()), (4, 3));
}

#[test]
fn upsample_restores_original_shape() {
    let plane = Plane::new(8, 6);
    let down = subsample_chroma(&plane);
    let up = upsample_chroma(&down, 6, 8);
    assert_eq!((up.width(), up.height()), (8, 6));
}

#[test]
fn subsample_box_filter_values() {
    let plane = Plane::from_raw(
        4,
        2,
        vec![
            0.0, 4.0, 100.0, 104.0, //
            8.0, 12.0, 108.0, 112.0,
        ],
    )
    .unwrap();
    let down = subsample_chroma(&plane);
    assert_eq!(down.get(0, 0), 6.0);
    assert_eq!(down.get(0, 1), 106.0);
}

#[test]
fn upsample_nearest_neighbor_mapping() {
    let plane = Plane::from_raw(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let up = upsample_chroma(&plane, 4, 6);
    // Output (i, j) reads input (min(i/2, h-1), min(j/2, w-1)).
    assert_eq!(up.get(0, 0), 1.0);
    assert_eq!(up.get(0, 5), 3.0);
    assert_eq!(up.get(3, 0), 4.0);
    assert_eq!(up.get(3, 5), 6.0);
}
