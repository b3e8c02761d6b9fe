#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let payload = width * height * 3;
    let mut out = vec![0u8; 54];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&(payload + 54).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&(width as i32).to_le_bytes());
    out[22..26].copy_from_slice(&(height as i32).to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    out[34..38].copy_from_slice(&payload.to_le_bytes()); // pixel data size
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, &[0xff, 0x00, 0x00])).unwrap();
    fs::write(
        format!("{dir}/bmp_2x2.bmp"),
        bmp(2, 2, &[255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255]),
    )
    .unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut eight_bit = bmp(1, 1, &[0, 0, 0]);
    eight_bit[28] = 8;
    fs::write(format!("{dir}/bmp_8bit.bmp"), eight_bit).unwrap();
    let short = bmp(2, 1, &[1, 2, 3]);
    fs::write(format!("{dir}/bmp_short_payload.bmp"), short).unwrap();

    println!("Generated seed corpus in {dir}/");
}
