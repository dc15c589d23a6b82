use std::io::Cursor;

use image::AnimationDecoder;

use super::*;
use crate::Rgba8;

fn canvas(bg: Rgba8) -> Canvas {
    Canvas::new(8, 4, bg).unwrap()
}

fn decode_frames(bytes: &[u8]) -> Vec<image::Frame> {
    image::codecs::gif::GifDecoder::new(Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn single_canvas_is_a_one_frame_gif() {
    let gif = encode_gif(&[canvas(Rgba8::rgb(255, 0, 0))], &EncodeOpts::default()).unwrap();
    assert_eq!(&gif[..6], b"GIF89a");
    let frames = decode_frames(&gif);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].buffer().dimensions(), (8, 4));
    assert_eq!(frames[0].buffer().get_pixel(3, 2).0, [255, 0, 0, 255]);
}

#[test]
fn frames_keep_input_order() {
    let canvases = [
        canvas(Rgba8::rgb(255, 0, 0)),
        canvas(Rgba8::rgb(0, 255, 0)),
        canvas(Rgba8::rgb(0, 0, 255)),
    ];
    let frames = decode_frames(&encode_gif(&canvases, &EncodeOpts::default()).unwrap());
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].buffer().get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(frames[1].buffer().get_pixel(0, 0).0, [0, 255, 0, 255]);
    assert_eq!(frames[2].buffer().get_pixel(0, 0).0, [0, 0, 255, 255]);
}

#[test]
fn encoding_is_deterministic() {
    let canvases = [canvas(Rgba8::rgb(12, 34, 56)), canvas(Rgba8::rgb(0, 0, 0))];
    let a = encode_gif(&canvases, &EncodeOpts::default()).unwrap();
    let b = encode_gif(&canvases, &EncodeOpts::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_and_mismatched_inputs_are_rejected() {
    assert!(matches!(
        encode_gif(&[], &EncodeOpts::default()),
        Err(TrainboardError::InvalidArgument {
            name: "canvases",
            ..
        })
    ));

    let mixed = [
        canvas(Rgba8::rgb(0, 0, 0)),
        Canvas::new(4, 4, Rgba8::rgb(0, 0, 0)).unwrap(),
    ];
    assert!(matches!(
        encode_gif(&mixed, &EncodeOpts::default()),
        Err(TrainboardError::InvalidArgument {
            name: "canvas size",
            ..
        })
    ));
}
