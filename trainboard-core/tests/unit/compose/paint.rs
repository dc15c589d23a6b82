use super::*;
use crate::Rgba8;
use crate::test_fixture as fixture;

fn blank() -> Canvas {
    Canvas::new(fixture::WIDTH, fixture::HEIGHT, Rgba8::transparent()).unwrap()
}

fn alpha(c: &Canvas, x: u32, y: u32) -> u8 {
    c.pixel_premul(x, y).unwrap()[3]
}

#[test]
fn digit_glyph_covers_its_4x16_cell() {
    let atlas = fixture::atlas();
    let mut c = blank();
    let ops = [DrawOp::DigitGlyph {
        digit: 7,
        x: 4,
        y: 0,
    }];
    execute(&ops, &atlas, &mut c).unwrap();
    for y in 0..16 {
        assert_eq!(alpha(&c, 3, y), 0);
        for x in 4..8 {
            assert_eq!(alpha(&c, x, y), fixture::tall_alpha(7));
        }
        assert_eq!(alpha(&c, 8, y), 0);
    }
}

#[test]
fn text_glyph_draws_only_its_visible_slice() {
    let atlas = fixture::atlas();
    let mut c = blank();
    let op = DrawOp::TextGlyph {
        ch: 'M',
        x: 20,
        src_x: 4,
        width: 4,
    };
    execute(&[op], &atlas, &mut c).unwrap();
    for y in 0..16 {
        assert_eq!(alpha(&c, 19, y), 0);
        for x in 20..24 {
            assert_eq!(alpha(&c, x, y), fixture::font_alpha('M'));
        }
        assert_eq!(alpha(&c, 24, y), 0);
    }
}

#[test]
fn platform_badge_bleeds_one_row_off_the_top() {
    let atlas = fixture::atlas();
    let mut c = blank();
    let op = DrawOp::PlatformBadge {
        digits: vec![1, 2],
        x: 5,
        y: -1,
    };
    execute(&[op], &atlas, &mut c).unwrap();
    // 7-row glyphs starting at y = -1 cover rows 0..6 only.
    assert_eq!(alpha(&c, 5, 0), fixture::small_alpha(1));
    assert_eq!(alpha(&c, 5, 5), fixture::small_alpha(1));
    assert_eq!(alpha(&c, 5, 6), 0);
    assert_eq!(alpha(&c, 9, 0), fixture::small_alpha(2));
    assert_eq!(alpha(&c, 13, 0), 0);
}

#[test]
fn delay_badge_draws_plus_then_digits() {
    let atlas = fixture::atlas();
    let mut c = blank();
    let op = DrawOp::DelayBadge {
        x: 18,
        digits: vec![4, 2],
    };
    execute(&[op], &atlas, &mut c).unwrap();
    assert_eq!(alpha(&c, 18, 0), fixture::PLUS_ALPHA);
    assert_eq!(alpha(&c, 22, 0), fixture::small_alpha(4));
    assert_eq!(alpha(&c, 26, 6), fixture::small_alpha(2));
    assert_eq!(alpha(&c, 26, 7), 0);
}

#[test]
fn later_ops_blend_over_earlier_ones() {
    let atlas = fixture::atlas();
    let mut c = Canvas::new(fixture::WIDTH, fixture::HEIGHT, Rgba8::rgb(0, 0, 0)).unwrap();
    execute(
        &[
            DrawOp::DigitGlyph {
                digit: 0,
                x: 0,
                y: 0,
            },
            DrawOp::ColonGlyph { x: 0, y: 0 },
        ],
        &atlas,
        &mut c,
    )
    .unwrap();
    let tint = crate::AtlasTints::default().tall_digits;
    let digit = premultiply([tint.r, tint.g, tint.b, fixture::tall_alpha(0)]);
    let colon = premultiply([tint.r, tint.g, tint.b, fixture::COLON_ALPHA]);
    let expected = crate::compose::blend::over(
        crate::compose::blend::over([0, 0, 0, 255], digit),
        colon,
    );
    assert_eq!(c.pixel_premul(0, 0).unwrap(), expected);
    assert_eq!(expected[3], 255);
}

#[test]
fn overlay_paints_at_origin() {
    let atlas = fixture::atlas();
    let mut c = blank();
    execute(&[DrawOp::Overlay], &atlas, &mut c).unwrap();
    assert_eq!(c.pixel_premul(fixture::WIDTH - 1, 3).unwrap(), fixture::OVERLAY_EDGE);
    assert_eq!(alpha(&c, 0, 0), 0);
}

#[test]
fn platform_glyph_draws_the_circled_cell_in_the_slot() {
    let atlas = fixture::atlas_with_platform_glyphs();
    let mut c = blank();
    let ops = [DrawOp::PlatformGlyph { index: 5, x: 48 }];
    execute(&ops, &atlas, &mut c).unwrap();
    for y in 0..16 {
        assert_eq!(alpha(&c, 47, y), 0);
        for x in 48..64 {
            assert_eq!(alpha(&c, x, y), fixture::platform_alpha(5));
        }
    }
}

#[test]
fn min_label_paints_at_origin() {
    let atlas = fixture::atlas();
    let mut c = blank();
    execute(&[DrawOp::MinLabel], &atlas, &mut c).unwrap();
    let tint = crate::AtlasTints::default().min_label;
    assert_eq!(
        c.pixel_premul(10, 15).unwrap(),
        premultiply([tint.r, tint.g, tint.b, 90])
    );
    assert_eq!(alpha(&c, 11, 0), 0);
}
