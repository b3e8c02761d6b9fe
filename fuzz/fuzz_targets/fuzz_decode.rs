#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the header claims
    let _ = bmptile::decode_bmp(data, enough::Unstoppable);

    let limits = bmptile::Limits {
        max_pixels: Some(1 << 16),
        ..Default::default()
    };
    let _ = bmptile::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
