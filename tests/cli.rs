use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crumb-steg"))
        .args(args)
        .output()
        .expect("binary runs")
}

fn write_cover(path: &Path, width: u32, height: u32) {
    let cover = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 13) as u8, (y * 7) as u8, 0x80, 0xFF])
    });
    DynamicImage::ImageRgba8(cover)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

#[test]
fn encode_then_decode_recovers_secret() {
    let dir = tempfile::tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    let stego = dir.path().join("stego.png");
    let secret = dir.path().join("secret.txt");
    let recovered = dir.path().join("recovered.bin");

    write_cover(&cover, 20, 20);
    fs::write(&secret, b"meet me at the usual place").unwrap();

    for order in &["row", "column"] {
        let encoded = run(&[
            "encode",
            "--input",
            cover.to_str().unwrap(),
            "--output",
            stego.to_str().unwrap(),
            "--secret",
            secret.to_str().unwrap(),
            "--order",
            order,
        ]);
        assert!(encoded.status.success(), "{:?}", encoded);

        let decoded = run(&[
            "decode",
            "--input",
            stego.to_str().unwrap(),
            "--output",
            recovered.to_str().unwrap(),
            "--order",
            order,
            "--buffer-size",
            "7",
        ]);
        assert!(decoded.status.success(), "{:?}", decoded);

        let data = fs::read(&recovered).unwrap();
        // 20 x 20 pixels hold 300 bytes
        assert_eq!(300, data.len());
        assert!(data.starts_with(b"meet me at the usual place"));
    }
}

#[test]
fn encode_warns_when_secret_does_not_fit() {
    let dir = tempfile::tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    let stego = dir.path().join("stego.png");
    let secret = dir.path().join("secret.txt");

    write_cover(&cover, 2, 2);
    fs::write(&secret, b"more than three bytes").unwrap();

    let encoded = run(&[
        "encode",
        "--input",
        cover.to_str().unwrap(),
        "--output",
        stego.to_str().unwrap(),
        "--secret",
        secret.to_str().unwrap(),
    ]);
    assert!(encoded.status.success());
    let stderr = String::from_utf8_lossy(&encoded.stderr);
    assert!(stderr.contains("too big"), "{}", stderr);
}

#[test]
fn directory_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.bin");

    let decoded = run(&[
        "decode",
        "--input",
        dir.path().to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(!decoded.status.success());
    let stderr = String::from_utf8_lossy(&decoded.stderr);
    assert!(stderr.contains("regular file"), "{}", stderr);
}

#[test]
fn missing_flags_are_rejected() {
    let result = run(&["encode", "--input", "cover.png"]);
    assert!(!result.status.success());
}
