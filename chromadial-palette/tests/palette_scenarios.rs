use chromadial_core::{
    rgb_to_hsv, Color, ColorSource, Mode, PickerConfig, PickerController, PixelBuffer, Rect, TextureSource,
    Vec2,
};
use chromadial_palette::{
    grid_size, rotate, FilterMode, Palette, PaletteRasterizer, PaletteSettings, PaletteType,
    Rotation, TextureLayout,
};

const RED: Color = Color::rgb(1.0, 0.0, 0.0);
const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_grid_size_covers_and_minimizes_waste() {
    for n in 1..=64usize {
        let (cols, rows) = grid_size(n);
        assert!(cols * rows >= n, "n={n}: {cols}x{rows}");
        if n == 1 {
            continue;
        }
        assert!(cols.max(rows) <= 2 * cols.min(rows), "n={n}: {cols}x{rows}");

        let best_waste = (1..=n)
            .map(|c| (c, n.div_ceil(c)))
            .filter(|&(c, r)| c.max(r) <= 2 * c.min(r))
            .map(|(c, r)| c * r - n)
            .min()
            .unwrap();
        assert_eq!(cols * rows - n, best_waste, "n={n}: {cols}x{rows}");
    }
}

#[test]
fn test_rotate_two_by_one() {
    let strip = PixelBuffer::new(2, 1, vec![RED, BLUE]).unwrap();

    let quarter = rotate(&strip, Rotation::R90);
    assert_eq!((quarter.width(), quarter.height()), (1, 2));
    assert_eq!(quarter.get_pixel(0, 0), RED);
    assert_eq!(quarter.get_pixel(0, 1), BLUE);

    let half = rotate(&strip, Rotation::R180);
    assert_eq!(half.pixels(), &[BLUE, RED]);

    let three_quarters = rotate(&strip, Rotation::R270);
    assert_eq!((three_quarters.width(), three_quarters.height()), (1, 2));
    assert_eq!(three_quarters.get_pixel(0, 0), BLUE);
    assert_eq!(three_quarters.get_pixel(0, 1), RED);

    assert_eq!(rotate(&strip, Rotation::R0), strip);
}

#[test]
fn test_grid_puts_first_color_top_left() {
    let rasterizer = PaletteRasterizer::default();
    let yellow = Color::rgb(1.0, 1.0, 0.0);
    let settings = PaletteSettings {
        layout: TextureLayout::Grid,
        ..PaletteSettings::default()
    };
    let texture = rasterizer.rasterize(&[RED, GREEN, BLUE, yellow], &settings);

    assert_eq!((texture.width(), texture.height()), (2, 2));
    assert_eq!(texture.filter_mode(), FilterMode::Point);
    // Row 0 is the bottom of the image.
    assert_eq!(texture.get_pixel(0, 1), RED);
    assert_eq!(texture.get_pixel(1, 1), GREEN);
    assert_eq!(texture.get_pixel(0, 0), BLUE);
    assert_eq!(texture.get_pixel(1, 0), yellow);
}

#[test]
fn test_grid_leaves_trailing_cells_transparent() {
    let rasterizer = PaletteRasterizer::default();
    let settings = PaletteSettings {
        layout: TextureLayout::Grid,
        ..PaletteSettings::default()
    };
    let texture = rasterizer.rasterize(&[RED, GREEN, BLUE], &settings);

    assert_eq!((texture.width(), texture.height()), (2, 2));
    assert_eq!(texture.get_pixel(0, 0), BLUE);
    assert_eq!(texture.get_pixel(1, 0), Color::TRANSPARENT);
    assert_eq!(texture.available_colors().len(), 3);
}

#[test]
fn test_empty_colors_rasterize_to_white() {
    init_logging();
    let texture = PaletteRasterizer::default().rasterize(&[], &PaletteSettings::default());
    assert_eq!((texture.width(), texture.height()), (256, 256));
    assert!(texture.pixels().iter().all(|&c| c == Color::WHITE));
    assert_eq!(texture.filter_mode(), FilterMode::Point);
}

#[test]
fn test_type_change_clears_overrides() {
    let mut palette = Palette::new("p", PaletteType::Tetradic, vec![RED]);
    assert!(palette.set_handle_override(2, Some(0.3), Some(0.6)));
    let hsv = rgb_to_hsv(palette.generated_colors()[2]);
    assert!((hsv.s - 0.3).abs() < 1e-5 && (hsv.v - 0.6).abs() < 1e-5);

    palette.set_palette_type(PaletteType::Triadic);
    assert_eq!(palette.generated_colors().len(), 3);
    assert!(palette.overrides().iter().all(|slot| !slot.is_active()));
    let hsv = rgb_to_hsv(palette.generated_colors()[2]);
    assert!((hsv.s - 1.0).abs() < 1e-5 && (hsv.v - 1.0).abs() < 1e-5);
}

#[test]
fn test_override_survives_base_change() {
    let mut palette = Palette::new("p", PaletteType::Complementary, vec![RED]);
    palette.set_handle_override(1, Some(0.5), None);
    palette.set_base_colors(vec![BLUE]);

    let hsv = rgb_to_hsv(palette.generated_colors()[1]);
    assert!((hsv.h - 1.0 / 6.0).abs() < 1e-4, "complement of blue is yellow");
    assert!((hsv.s - 0.5).abs() < 1e-5);
}

#[test]
fn test_clear_all_overrides_restores_palette() {
    let mut palette = Palette::new("p", PaletteType::Triadic, vec![RED]);
    let fresh = palette.generated_colors().to_vec();
    palette.set_handle_override(0, Some(0.1), Some(0.1));
    palette.set_handle_override(2, None, Some(0.4));
    assert_ne!(palette.generated_colors(), fresh.as_slice());

    assert!(palette.clear_all_overrides(true, true));
    assert_eq!(palette.generated_colors(), fresh.as_slice());
    assert!(!palette.clear_all_overrides(true, true));
}

#[test]
fn test_picker_selects_palette_entries() {
    init_logging();
    let rasterizer = PaletteRasterizer::default();
    let mut palette = Palette::new("rgb", PaletteType::Custom, vec![RED, GREEN, BLUE]);
    palette.set_settings(PaletteSettings {
        smooth_transitions: false,
        ..PaletteSettings::default()
    });
    let texture = palette.texture(&rasterizer).cloned().unwrap();
    assert_eq!((texture.width(), texture.height()), (3, 1));

    let mut config = PickerConfig::default();
    config.palette_sampling.use_bicubic_sampling = false;
    let mut picker = PickerController::with_config(Rect::new(0.0, 0.0, 90.0, 30.0), config);
    picker.set_palette(texture, palette.available_colors());
    picker.set_mode(Mode::Palette);

    assert!(picker.pointer_down(Vec2::new(75.0, 15.0)));
    picker.pointer_up();
    assert_eq!(picker.state().color(), BLUE);

    assert!(picker.pointer_down(Vec2::new(40.0, 10.0)));
    picker.pointer_up();
    assert_eq!(picker.state().color(), GREEN);
}
