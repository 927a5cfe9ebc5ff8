use super::*;
use crate::foundation::core::Fps;

const BG: Rgba8 = Rgba8::opaque(10, 20, 30);

#[test]
fn transparent_pixels_become_background() {
    let mut dst = vec![0u8; 4];
    flatten_to_opaque(&mut dst, &[0, 0, 0, 0], true, BG).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn opaque_pixels_pass_through() {
    let mut dst = vec![0u8; 4];
    flatten_to_opaque(&mut dst, &[1, 2, 3, 255], true, BG).unwrap();
    assert_eq!(dst, vec![1, 2, 3, 255]);
    flatten_to_opaque(&mut dst, &[1, 2, 3, 255], false, BG).unwrap();
    assert_eq!(dst, vec![1, 2, 3, 255]);
}

#[test]
fn straight_input_is_premultiplied_first() {
    let mut dst = vec![0u8; 4];
    flatten_to_opaque(&mut dst, &[255, 0, 0, 128], false, Rgba8::opaque(0, 0, 0)).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque(&mut dst, &[0u8; 4], true, BG).is_err());
}

#[test]
fn odd_sizes_are_rejected_before_spawning() {
    let dir = std::env::temp_dir().join("heartwave-ffmpeg-odd");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(dir.join("out.mp4")));
    let err = sink
        .begin(SinkConfig {
            width: 11,
            height: 10,
            fps: Fps::new(30, 1).unwrap(),
        })
        .unwrap_err();
    assert!(err.to_string().contains("even"), "{err}");
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let f = FrameRGBA::solid(2, 2, [0, 0, 0, 255]);
    assert!(sink.push_frame(FrameIndex(0), &f).is_err());
}

#[test]
fn parent_dir_is_created() {
    let dir = std::env::temp_dir().join(format!("heartwave-parent-{}", std::process::id()));
    let file = dir.join("nested").join("x.png");
    ensure_parent_dir(&file).unwrap();
    assert!(dir.join("nested").is_dir());
    let _ = std::fs::remove_dir_all(&dir);
}
