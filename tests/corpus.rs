//! Test corpus: transform properties over generated patterns and sizes.

use bmptile::*;

fn checkerboard(w: u32, h: u32) -> Image {
    let mut img = Image::new(w, h).unwrap();
    for y in 0..h {
        for x in 0..w {
            if (x + y) % 2 == 0 {
                img.set(x, y, 200, 220, 240).unwrap();
            } else {
                img.set(x, y, 10, 40, 70).unwrap();
            }
        }
    }
    img
}

fn noise_pattern(w: u32, h: u32) -> Image {
    let mut raw = vec![0u8; (w * h * 3) as usize];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in raw.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    Image::from_rgb(w, h, &raw).unwrap()
}

fn header_bytes(mutate: impl FnOnce(&mut Header)) -> Vec<u8> {
    let img = noise_pattern(3, 2);
    let (mut header, pixels) = img.into_parts();
    mutate(&mut header);
    let mut out = header.to_bytes().to_vec();
    out.extend_from_slice(&pixels.to_bytes().unwrap());
    out
}

// ── Codec ────────────────────────────────────────────────────────────

#[test]
fn noise_roundtrip_various_sizes() {
    for (w, h) in [(1, 1), (1, 9), (9, 1), (7, 5), (33, 17)] {
        let img = noise_pattern(w, h);
        let bytes = encode_bmp(&img, Unstoppable).unwrap();
        let back = decode_bmp(&bytes, Unstoppable).unwrap();
        assert_eq!(back, img, "{w}x{h}");
    }
}

#[test]
fn eight_bit_header_rejected() {
    let data = header_bytes(|h| h.bits_per_pixel = 8);
    match decode_bmp(&data, Unstoppable) {
        Err(BmpError::Format { field, .. }) => assert_eq!(field, HeaderField::BitsPerPixel),
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn zero_width_header_rejected() {
    let data = header_bytes(|h| {
        h.width = 0;
    });
    assert!(matches!(
        decode_bmp(&data, Unstoppable),
        Err(BmpError::Format {
            field: HeaderField::Width,
            ..
        })
    ));
}

#[test]
fn empty_and_garbage_inputs() {
    let inputs: [&[u8]; 4] = [b"", b"BM", b"BM\x00\x00", &[0xFF; 54]];
    for data in inputs {
        assert!(decode_bmp(data, Unstoppable).is_err());
    }
}

// ── Crop ─────────────────────────────────────────────────────────────

#[test]
fn crop_maps_every_pixel() {
    let img = noise_pattern(9, 7);
    for (x1, x2, y1, y2) in [(0, 9, 0, 7), (2, 5, 1, 6), (8, 9, 6, 7), (0, 1, 0, 7), (3, 9, 0, 2)] {
        let out = crop(&img, x1, x2, y1, y2).unwrap();
        assert_eq!((out.width(), out.height()), (x2 - x1, y2 - y1));
        assert!(out.header().is_valid());
        for j in 0..out.height() {
            for i in 0..out.width() {
                let got = out.get(i, j).unwrap();
                let want = img.get(x1 + i, y1 + j).unwrap();
                assert_eq!(got.rgb(), want.rgb());
                assert_eq!((got.x, got.y), (i, j));
            }
        }
    }
}

#[test]
fn crop_scenario_two_by_two() {
    let img = Image::from_rgb(2, 2, &[255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255]).unwrap();
    let out = crop(&img, 1, 2, 0, 1).unwrap();
    assert_eq!((out.width(), out.height()), (1, 1));
    assert_eq!(out.get(0, 0).unwrap().rgb(), (0, 255, 0));
}

#[test]
fn crop_inverted_rejected() {
    let img = checkerboard(8, 8);
    assert!(matches!(
        crop(&img, 5, 3, 0, 4),
        Err(BmpError::InvalidParameter(_))
    ));
}

#[test]
fn cropped_image_roundtrips() {
    let out = crop(&noise_pattern(10, 10), 3, 7, 2, 9).unwrap();
    let back = decode_bmp(&encode_bmp(&out, Unstoppable).unwrap(), Unstoppable).unwrap();
    assert_eq!(back, out);
    assert_eq!(back.header().size, 54 + 4 * 7 * 3);
}

// ── Grayscale ────────────────────────────────────────────────────────

#[test]
fn grayscale_channels_equal() {
    let img = noise_pattern(6, 6);
    for method in [GrayMethod::Average, GrayMethod::Luminosity] {
        let out = grayscale(&img, method).unwrap();
        for (src, dst) in img.pixels().pixels().iter().zip(out.pixels().pixels()) {
            assert_eq!(dst.r, dst.g);
            assert_eq!(dst.g, dst.b);
            assert_eq!(dst.r, method.apply(src));
        }
    }
}

#[test]
fn grayscale_reference_values() {
    let img = Image::from_rgb(1, 1, &[30, 60, 90]).unwrap();
    let avg = grayscale(&img, GrayMethod::Average).unwrap();
    let lum = grayscale(&img, GrayMethod::Luminosity).unwrap();
    assert_eq!(avg.get(0, 0).unwrap().rgb(), (60, 60, 60));
    assert_eq!(lum.get(0, 0).unwrap().rgb(), (53, 53, 53));
}

// ── Binarization ─────────────────────────────────────────────────────

#[test]
fn tiling_covers_grid() {
    for (w, h, r) in [(1, 1, 1), (100, 1, 4), (17, 33, 2), (640, 480, 7), (3, 3, 100)] {
        let area: u64 = tiles(w, h, r).unwrap().iter().map(Tile::area).sum();
        assert_eq!(area, u64::from(w) * u64::from(h), "{w}x{h} r={r}");
    }
}

#[test]
fn binarize_deterministic_across_thread_counts() {
    let img = noise_pattern(61, 47);
    let single = binarize(&img, 3, 1).unwrap();
    let quad = binarize(&img, 3, 4).unwrap();
    assert_eq!(single, quad);
    assert_eq!(single.header(), img.header());
}

#[test]
fn binarize_checkerboard_splits_evenly() {
    let out = binarize(&checkerboard(9, 9), 1, 4).unwrap();
    for y in 0..9 {
        for x in 0..9 {
            let expected = if (x + y) % 2 == 0 { 255 } else { 0 };
            assert_eq!(out.get(x, y).unwrap().rgb(), (expected, expected, expected));
        }
    }
}

#[test]
fn binarize_does_not_touch_input() {
    let img = noise_pattern(12, 12);
    let copy = img.clone();
    let _ = binarize(&img, 2, 3).unwrap();
    assert_eq!(img, copy);
}

#[test]
fn pipeline_output_writes_and_reads() {
    let img = noise_pattern(20, 15);
    let gray = grayscale(&crop(&img, 2, 18, 1, 14).unwrap(), GrayMethod::Average).unwrap();
    let bw = binarize(&gray, 2, 2).unwrap();
    let bytes = encode_bmp(&bw, Unstoppable).unwrap();
    assert_eq!(decode_bmp(&bytes, Unstoppable).unwrap(), bw);
}
