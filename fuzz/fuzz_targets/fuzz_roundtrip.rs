#![no_main]
use libfuzzer_sys::fuzz_target;
use bmptile::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    let reencoded = encode_bmp(&decoded, enough::Unstoppable).expect("valid image must encode");
    assert_eq!(&reencoded[..], &data[..reencoded.len()], "re-encode changed bytes");

    let Ok(decoded2) = decode_bmp(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded, decoded2, "roundtrip mismatch");

    // Transforms on any decodable image must not panic
    let _ = grayscale(&decoded, GrayMethod::Luminosity);
    if decoded.pixels().len() <= 1 << 16 {
        let _ = binarize(&decoded, 1 + (data.len() % 4) as u32, 1 + data.len() % 3);
    }
});
