use super::*;

#[test]
fn bright_and_dark_pixels_snap() {
    let mut px = vec![
        200, 190, 185, 255, // bright -> white
        10, 40, 60, 200, // dark -> black
        120, 120, 120, 255, // mid grey stays
        250, 250, 250, 0, // transparent untouched
    ];
    ToneClamp::default().apply_rgba8(&mut px);
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);
    assert_eq!(&px[4..8], &[0, 0, 0, 200]);
    assert_eq!(&px[8..12], &[120, 120, 120, 255]);
    assert_eq!(&px[12..16], &[250, 250, 250, 0]);
}

#[test]
fn thresholds_are_strict() {
    // Mean exactly 180 and exactly 75 are left alone.
    let mut px = vec![180, 180, 180, 255, 75, 75, 75, 255];
    ToneClamp::default().apply_rgba8(&mut px);
    assert_eq!(px, vec![180, 180, 180, 255, 75, 75, 75, 255]);
}

#[test]
fn apply_works_on_images() {
    let mut img = RgbaImage::from_pixel(2, 1, image::Rgba([190, 190, 190, 255]));
    ToneClamp::default().apply(&mut img);
    assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
}
