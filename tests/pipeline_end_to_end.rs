//! Full-pipeline scenarios for both color flavors.

use zenvq::{Codebook, ColorMode, Image, PipelineConfig, VqError, PSNR_IDENTICAL};

fn solid_image(rgb: [u8; 3], width: usize, height: usize) -> Image {
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        data.extend_from_slice(&rgb);
    }
    Image::from_rgb8(&data, width, height).unwrap()
}

fn gradient_image(width: usize, height: usize) -> Image {
    let mut data = Vec::with_capacity(width * height * 3);
    for row in 0..height {
        for col in 0..width {
            data.extend_from_slice(&[
                (row * 255 / height.max(1)) as u8,
                (col * 255 / width.max(1)) as u8,
                ((row + col) * 17 % 256) as u8,
            ]);
        }
    }
    Image::from_rgb8(&data, width, height).unwrap()
}

#[test]
fn solid_gray_compresses_losslessly_with_one_entry() {
    let image = solid_image([128, 128, 128], 4, 4);
    let codec = PipelineConfig::new()
        .with_codebook_size(1)
        .train(std::slice::from_ref(&image))
        .unwrap();

    // Each channel's single entry is the mean of identical blocks.
    for codebook in codec.codebooks() {
        assert_eq!(codebook.len(), 1);
        assert_eq!(codebook.entry(0), &[128.0, 128.0, 128.0, 128.0]);
    }

    let result = codec.evaluate(&image).unwrap();
    assert_eq!(result.reconstructed, image);
    assert_eq!(result.psnr, PSNR_IDENTICAL);
    assert!((result.ssim - 1.0).abs() < 1e-9);
}

#[test]
fn solid_gray_yuv_flavor_is_also_exact() {
    let image = solid_image([128, 128, 128], 4, 4);
    let codec = PipelineConfig::new()
        .with_mode(ColorMode::Yuv420)
        .with_codebook_size(1)
        .train(std::slice::from_ref(&image))
        .unwrap();

    let result = codec.evaluate(&image).unwrap();
    assert_eq!(result.reconstructed.to_rgb8(), image.to_rgb8());
    assert_eq!(result.psnr, PSNR_IDENTICAL);
}

#[test]
fn rgb_compression_ratio_is_block_area() {
    let image = gradient_image(16, 16);
    let codec = PipelineConfig::new()
        .with_codebook_size(8)
        .train(std::slice::from_ref(&image))
        .unwrap();
    let compressed = codec.compress(&image).unwrap();
    // (16*16*3*8) / ((8*8*3)*8): one index per 2x2 block per channel.
    assert_eq!(compressed.compression_ratio(), 4.0);
}

#[test]
fn yuv_compression_ratio_gains_from_subsampling() {
    let image = gradient_image(8, 8);
    let codec = PipelineConfig::new()
        .with_mode(ColorMode::Yuv420)
        .with_codebook_size(4)
        .train(std::slice::from_ref(&image))
        .unwrap();
    let compressed = codec.compress(&image).unwrap();
    // Y: 4x4 indices; U, V: 2x2 each after subsampling. 1536 / 192 bits.
    assert_eq!(compressed.compression_ratio(), 8.0);
}

#[test]
fn training_is_reproducible_end_to_end() {
    let train = vec![gradient_image(12, 12), gradient_image(10, 14)];
    let config = PipelineConfig::new().with_codebook_size(16);
    let a = config.train(&train).unwrap();
    let b = config.train(&train).unwrap();
    assert_eq!(a.codebooks(), b.codebooks());
}

#[test]
fn codebooks_survive_serialization() {
    let train = vec![gradient_image(12, 12)];
    let codec = PipelineConfig::new().with_codebook_size(8).train(&train).unwrap();
    for codebook in codec.codebooks() {
        let parsed = Codebook::from_bytes(&codebook.to_bytes()).unwrap();
        assert_eq!(&parsed, codebook);
    }
}

#[test]
fn evaluate_all_reports_per_image_and_mean_scores() {
    let train = vec![gradient_image(16, 16)];
    let tests = vec![gradient_image(16, 16), solid_image([40, 90, 200], 16, 16)];
    let codec = PipelineConfig::new().with_codebook_size(32).train(&train).unwrap();

    let evaluations = codec.evaluate_all(&tests).unwrap();
    assert_eq!(evaluations.len(), 2);
    for eval in &evaluations {
        assert!(eval.psnr > 0.0);
        assert!(eval.compression_ratio > 1.0);
        assert_eq!(eval.reconstructed.width(), 16);
        assert_eq!(eval.reconstructed.height(), 16);
    }

    let summary = zenvq::BatchSummary::from_evaluations(&evaluations);
    let expected_psnr = (evaluations[0].psnr + evaluations[1].psnr) / 2.0;
    assert!((summary.mean_psnr - expected_psnr).abs() < 1e-12);
}

#[test]
fn odd_dimensions_reconstruct_with_zeroed_remainder() {
    let image = solid_image([200, 200, 200], 5, 5);
    let codec = PipelineConfig::new()
        .with_codebook_size(1)
        .train(std::slice::from_ref(&image))
        .unwrap();
    let result = codec.evaluate(&image).unwrap();
    let restored = &result.reconstructed;
    assert_eq!(restored.width(), 5);
    assert_eq!(restored.height(), 5);
    // Covered region reproduces the source; the remainder row/column is the
    // documented zero default.
    assert_eq!(restored.plane(0).get(0, 0), 200.0);
    assert_eq!(restored.plane(0).get(4, 4), 0.0);
    assert_eq!(restored.plane(1).get(4, 0), 0.0);
    assert_eq!(restored.plane(2).get(0, 4), 0.0);
}

#[test]
fn empty_training_set_fails_the_run() {
    assert!(matches!(
        PipelineConfig::new().train(&[]),
        Err(VqError::EmptyTrainingSet)
    ));
}

#[test]
fn zero_dimension_images_cannot_be_constructed() {
    assert!(matches!(
        Image::from_rgb8(&[], 0, 4),
        Err(VqError::EmptyPlane { .. })
    ));
}

#[test]
fn tiny_chroma_planes_abort_the_yuv_run() {
    // A 1x1 image subsamples its chroma to 0x0, which the quantizer rejects
    // as a configuration error rather than producing a degenerate codebook.
    let image = solid_image([10, 20, 30], 1, 1);
    let result = PipelineConfig::new()
        .with_mode(ColorMode::Yuv420)
        .train(std::slice::from_ref(&image));
    assert!(result.is_err());
}
