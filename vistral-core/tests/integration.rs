use base64::{engine::general_purpose::STANDARD, Engine};
use image::{ColorType, DynamicImage, GenericImageView};
use vistral_core::{get_images, resize_image, ImageData, ImageReturn};

#[test]
fn landscape_is_bounded_to_800_by_400() {
    let image = DynamicImage::new(1600, 800, ColorType::Rgb8);
    let resized = resize_image(&image);
    assert_eq!(resized.dimensions(), (800, 400));
}

#[test]
fn portrait_keeps_long_edge_vertical() {
    let image = DynamicImage::new(800, 1600, ColorType::Rgb8);
    let resized = resize_image(&image);
    assert_eq!(resized.dimensions(), (400, 800));
}

#[test]
fn wide_aspect_ratio_shrinks_the_short_edge() {
    // ratio 10: shortest = min(800/10, 400, 100) = 80, longest = 800
    let image = DynamicImage::new(1000, 100, ColorType::Rgb8);
    let resized = resize_image(&image);
    let (w, h) = resized.dimensions();
    assert_eq!((w, h), (800, 80));
    assert!(w <= 800 && h <= 400);
    assert_eq!(w / h, 10);
}

#[test]
fn small_image_is_left_alone() {
    // shortest = min(400, 400, 50) = 50, longest = 100 = current max
    let image = DynamicImage::new(100, 50, ColorType::Rgb8);
    let resized = resize_image(&image);
    assert_eq!(resized.dimensions(), (100, 50));
}

#[test]
fn get_images_base64_decodes_to_valid_png() {
    let path = std::env::temp_dir().join(format!(
        "vistral-test-{}-chest_x_ray_coronal.png",
        std::process::id()
    ));
    DynamicImage::new(64, 48, ColorType::Rgb8)
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();

    let images = get_images(&[&path], ImageReturn::Base64Png).unwrap();
    assert_eq!(images.len(), 1);
    let encoded = images[0].as_base64().expect("base64 representation");
    let bytes = STANDARD.decode(encoded).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (64, 48));

    std::fs::remove_file(&path).ok();
}

#[test]
fn get_images_decoded_returns_bitmaps() {
    let path = std::env::temp_dir().join(format!("vistral-test-{}-raw.png", std::process::id()));
    DynamicImage::new(10, 10, ColorType::Rgb8)
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();

    let images = get_images(&[&path], ImageReturn::Decoded).unwrap();
    match &images[0] {
        ImageData::Decoded(image) => assert_eq!(image.dimensions(), (10, 10)),
        ImageData::Base64Png(_) => panic!("expected a decoded bitmap"),
    }

    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_image_path_is_an_error() {
    let result = get_images(&["definitely/not/a/real/image.png"], ImageReturn::Base64Png);
    assert!(result.is_err());
}
