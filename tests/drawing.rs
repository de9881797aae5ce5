use rand::{Rng, SeedableRng, rngs::SmallRng};

use piconsole::*;
use piconsole::pixel::{PixelBufA24, FormatRGB24};

#[test]
fn line_and_rect_fill_scenario() {
    let mut ctx = RenderContext::new(4, 1);
    ctx.line(0, 0, 3, 0, 7);
    assert_eq!(ctx.target().data(), &[7, 7, 7, 7]);
    ctx.cls(0);
    ctx.rect_fill(0, 0, 1, 1, 7);
    assert_eq!(ctx.target().data(), &[7, 7, 0, 0]);
}

#[test]
fn draw_target_can_be_swapped() {
    let mut ctx = RenderContext::new(8, 8);
    let sheet = ctx.set_draw_target(Canvas::new(4, 4));
    ctx.circ_fill(1, 1, 1, 9);
    ctx.pset(3, 3, 10);
    let sheet = ctx.set_draw_target(sheet);
    assert_eq!(sheet.get(1, 1), 9);
    assert_eq!(sheet.get(3, 3), 10);
    assert!(ctx.target().data().iter().all(|&c| c == 0));

    ctx.camera(-2, -2);
    ctx.spr(Sprite::new(&sheet, Area::new(0, 0, 4, 4)), 0, 0);
    ctx.camera_reset();
    assert_eq!(ctx.pget(3, 3), 9);
    assert_eq!(ctx.pget(5, 5), 10);
    assert_eq!(ctx.pget(1, 1), 0);
}

#[test]
fn transparent_sprite_pixels_keep_background() {
    let mut ctx = RenderContext::new(4, 4);
    ctx.cls(5);
    let mut sprite = Canvas::new(2, 2);
    sprite.set_all(&[0, 1, 1, 0]);
    ctx.palt(0, true);
    ctx.pal(1, 12);
    ctx.stretch(Sprite::whole(&sprite), 0, 0, 4, 4);
    assert_eq!(ctx.target().data(), &[5, 5, 12, 12,
                                      5, 5, 12, 12,
                                      12, 12, 5, 5,
                                      12, 12, 5, 5]);
    ctx.pal_reset();
    ctx.spr(Sprite::whole(&sprite).flipped(true, false), 1, 1);
    assert_eq!(ctx.pget(1, 1), 1);
    assert_eq!(ctx.pget(2, 1), 0);
}

#[test]
fn random_drawing_stays_in_bounds() {
    let mut rng = SmallRng::seed_from_u64(0xc0ffee);
    let mut ctx = RenderContext::new(32, 24);
    let source = ctx.target().clone();
    for _ in 0..500 {
        let mut coord = || rng.gen_range(-100..100);
        let (x0, y0, x1, y1) = (coord(), coord(), coord(), coord());
        let color = rng.gen_range(0..16);
        match rng.gen_range(0..7) {
            0 => ctx.line(x0, y0, x1, y1, color),
            1 => ctx.rect(x0, y0, x1, y1, color),
            2 => ctx.rect_fill(x0, y0, x1, y1, color),
            3 => ctx.circ(x0, y0, x1.abs() / 4, color),
            4 => ctx.circ_fill(x0, y0, x1.abs() / 4, color),
            5 => ctx.stretch(Sprite::new(&source, Area::new(x0, y0, x1.abs(), y1.abs())),
                             x1, y1, x0.abs(), y0.abs()),
            _ => {
                ctx.clip(Area::new(x0 / 4, y0 / 4, x1.abs() / 2, y1.abs() / 2));
                ctx.camera(x1 / 8, y1 / 8);
            }
        }
    }
    assert_eq!(ctx.target().data().len(), 32 * 24);
    assert!(ctx.target().data().iter().all(|&c| c < 16));
}

#[test]
fn frame_renders_to_rgb() {
    let mut ctx = RenderContext::new(2, 2);
    ctx.pset(1, 0, 8);
    ctx.pset(0, 1, 7);
    ctx.palette_mapping[7] = 12;
    let mut buffer = [0u8; 2 * 2 * 3];
    render_frame::<PixelBufA24, FormatRGB24>(ctx.target(), &ctx.palette, &ctx.palette_mapping,
                                             &mut buffer, 2 * 3);
    assert_eq!(buffer, [0x00, 0x00, 0x00,  0xFF, 0x00, 0x4D,
                        0x29, 0xAD, 0xFF,  0x00, 0x00, 0x00]);
}

#[cfg(feature = "png")]
#[test]
fn png_round_trip_through_palette() {
    let palette = Palette::default();
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, 2, 1);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0xFF, 0xEC, 0x27,  0x00, 0xE4, 0x36]).unwrap();
    }
    let canvas = decode_png(&bytes, &palette).unwrap();
    assert_eq!(canvas.data(), &[10, 11]);
    let decoded = must_decode_palette(&bytes);
    assert_eq!(decoded[0], palette[10]);
    assert_eq!(decoded[1], palette[11]);
}
