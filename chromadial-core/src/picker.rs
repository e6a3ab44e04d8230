//! Interaction shell tying pointer gestures, the active mode and the color state together.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::color_space::find_nearest;
use crate::color_state::ColorState;
use crate::cursor::{cursor_display_color, CursorContrastMode};
use crate::mapping::{mapping_for, DragState, MapContext, MapOutcome, Mode, RingGeometry};
use crate::points::{Rect, Vec2};
use crate::sampling::{ReverseSearchConfig, SamplingSettings};
use crate::texture::{unique_colors, TextureSource};

/// Tunables for a [`PickerController`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Sampling used in Texture mode.
    pub texture_sampling: SamplingSettings,
    /// Sampling used in Palette mode.
    pub palette_sampling: SamplingSettings,
    pub ring: RingGeometry,
    pub reverse_search: ReverseSearchConfig,
    pub cursor_contrast: CursorContrastMode,
    /// Cursor color before contrast is applied. Its alpha is always kept.
    pub cursor_color: Color,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            texture_sampling: SamplingSettings::default(),
            palette_sampling: SamplingSettings::default(),
            ring: RingGeometry::default(),
            reverse_search: ReverseSearchConfig::default(),
            cursor_contrast: CursorContrastMode::default(),
            cursor_color: Color::WHITE,
        }
    }
}

/// Bitmap plus the discrete colors it was rasterized from.
struct PaletteSurface {
    texture: Box<dyn TextureSource>,
    colors: Vec<Color>,
}

/// Owns the picked color and routes pointer input through the active mode.
///
/// Drags emit "changing" on the color state for every move and a single
/// "changed" on pointer-up.
pub struct PickerController {
    state: ColorState,
    config: PickerConfig,
    mode: Mode,
    rect: Rect,
    drag: DragState,
    texture: Option<Box<dyn TextureSource>>,
    palette: Option<PaletteSurface>,
    cursor: Vec2,
    ring_cursor: Option<Vec2>,
}

impl PickerController {
    pub fn new(rect: Rect) -> Self {
        Self::with_config(rect, PickerConfig::default())
    }

    pub fn with_config(rect: Rect, config: PickerConfig) -> Self {
        let mut picker = Self {
            state: ColorState::new(),
            config,
            mode: Mode::default(),
            rect,
            drag: DragState::Idle,
            texture: None,
            palette: None,
            cursor: rect.center(),
            ring_cursor: None,
        };
        picker.sync_cursor_from_color();
        picker
    }

    pub fn state(&self) -> &ColorState {
        &self.state
    }

    /// Direct access for subscriptions and channel edits. Call
    /// [`PickerController::sync_cursor_from_color`] after editing the color.
    pub fn state_mut(&mut self) -> &mut ColorState {
        &mut self.state
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PickerConfig) {
        self.config = config;
        self.sync_cursor_from_color();
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Hue-ring cursor, present only in compound modes.
    pub fn ring_cursor(&self) -> Option<Vec2> {
        self.ring_cursor
    }

    pub fn needs_secondary_cursor(&self) -> bool {
        mapping_for(self.mode).has_secondary_cursor()
    }

    /// Tint for the primary cursor given the current color.
    pub fn cursor_color(&self) -> Color {
        cursor_display_color(
            self.state.color(),
            self.config.cursor_color,
            self.config.cursor_contrast,
        )
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.sync_cursor_from_color();
    }

    /// Switch modes. Entering a bitmap mode snaps the color to the nearest
    /// color the bitmap offers. Returns whether a ring cursor is needed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if mode != self.mode {
            log::debug!("Picker mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.drag = DragState::Idle;

            if mode.is_texture_based() {
                let previous = self.state.color();
                let colors = self.available_colors();
                if !colors.is_empty() {
                    let nearest = find_nearest(previous, &colors);
                    if nearest != previous {
                        self.state.set_from_rgb(nearest, false);
                    }
                }
            }
            self.sync_cursor_from_color();
        }
        self.needs_secondary_cursor()
    }

    /// Bitmap used by Texture mode.
    pub fn set_texture(&mut self, texture: impl TextureSource + 'static) {
        self.texture = Some(Box::new(texture));
        if self.mode == Mode::Texture {
            self.sync_cursor_from_color();
        }
    }

    pub fn clear_texture(&mut self) {
        self.texture = None;
    }

    /// Bitmap and color list used by Palette mode.
    pub fn set_palette(&mut self, texture: impl TextureSource + 'static, colors: Vec<Color>) {
        self.palette = Some(PaletteSurface {
            texture: Box::new(texture),
            colors,
        });
        if self.mode == Mode::Palette {
            self.sync_cursor_from_color();
        }
    }

    /// Colors selectable in the current mode. Empty for the analytic modes.
    pub fn available_colors(&self) -> Vec<Color> {
        match self.mode {
            Mode::Texture => self
                .texture
                .as_deref()
                .map(unique_colors)
                .unwrap_or_default(),
            Mode::Palette => self
                .palette
                .as_ref()
                .map(|p| p.colors.clone())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Start a gesture. Returns false if `point` is outside the widget.
    pub fn pointer_down(&mut self, point: Vec2) -> bool {
        if self.rect.is_degenerate() || !self.rect.contains(point) {
            log::debug!("Pointer {point:?} outside picker bounds");
            return false;
        }
        let mapping = mapping_for(self.mode);
        let (region, outcome) = {
            let ctx = self.context();
            let region = mapping.classify(&ctx, point);
            (region, mapping.forward(&ctx, point, Some(region)))
        };
        self.drag = DragState::begin(region);
        self.apply(outcome);
        true
    }

    /// Continue a gesture in the region it started in. Returns false when
    /// no gesture is active.
    pub fn drag(&mut self, point: Vec2) -> bool {
        let Some(region) = self.drag.locked_region() else {
            return false;
        };
        let outcome = mapping_for(self.mode).forward(&self.context(), point, Some(region));
        self.apply(outcome);
        true
    }

    /// End the gesture and commit the color with a "changed" notification.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
        self.state.notify_changed();
    }

    /// Move the cursors to represent the current color without changing it.
    /// Returns false when the mode has no position for the color.
    pub fn sync_cursor_from_color(&mut self) -> bool {
        let placement = {
            let ctx = self.context();
            mapping_for(self.mode).inverse(&ctx, self.state.hsv())
        };
        match placement {
            Some(placement) => {
                self.cursor = placement.primary;
                self.ring_cursor = placement.secondary;
                true
            }
            None => false,
        }
    }

    /// External color edit, followed by a cursor sync.
    pub fn set_color(&mut self, color: Color, notify: bool) {
        self.state.set_from_rgb(color, notify);
        self.sync_cursor_from_color();
    }

    fn context(&self) -> MapContext<'_> {
        let (texture, sampling) = match self.mode {
            Mode::Palette => (
                self.palette.as_ref().map(|p| &*p.texture),
                &self.config.palette_sampling,
            ),
            _ => (self.texture.as_deref(), &self.config.texture_sampling),
        };
        MapContext {
            rect: self.rect,
            current: self.state.hsv(),
            ring: self.config.ring,
            texture,
            sampling,
            search: &self.config.reverse_search,
        }
    }

    fn apply(&mut self, outcome: MapOutcome) {
        match outcome {
            MapOutcome::Hsv { hsv, cursor } => {
                self.cursor = cursor;
                self.state.set_from_hsv(hsv, true);
            }
            MapOutcome::Hue { hue, ring_cursor } => {
                self.state.set_hue(hue, true);
                // The triangle turns with the hue, so the inner cursor moves too.
                self.sync_cursor_from_color();
                self.ring_cursor = Some(ring_cursor);
            }
            MapOutcome::Rgb { color, cursor } => {
                self.cursor = cursor;
                self.state.set_from_rgb(color, false);
            }
            MapOutcome::Ignored { cursor } => {
                self.cursor = cursor;
            }
            MapOutcome::NoChange => {}
        }
    }
}

impl std::fmt::Debug for PickerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerController")
            .field("mode", &self.mode)
            .field("rect", &self.rect)
            .field("drag", &self.drag)
            .field("color", &self.state.color())
            .field("cursor", &self.cursor)
            .field("ring_cursor", &self.ring_cursor)
            .field("has_texture", &self.texture.is_some())
            .field("has_palette", &self.palette.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HsvColor;
    use crate::texture::PixelBuffer;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn square() -> Rect {
        Rect::centered(200.0, 200.0)
    }

    #[test]
    fn pointer_outside_is_rejected() {
        let mut picker = PickerController::new(square());
        assert!(!picker.pointer_down(Vec2::new(150.0, 0.0)));
        assert!(!picker.is_dragging());
        assert!(!picker.drag(Vec2::ZERO));
    }

    #[test]
    fn rectangle_drag_previews_then_commits_once() {
        let mut picker = PickerController::new(square());
        let changing = Rc::new(RefCell::new(0));
        let changed = Rc::new(RefCell::new(0));
        {
            let changing = changing.clone();
            picker
                .state_mut()
                .subscribe_changing(move |_, _| *changing.borrow_mut() += 1);
            let changed = changed.clone();
            picker
                .state_mut()
                .subscribe_changed(move |_, _| *changed.borrow_mut() += 1);
        }

        assert!(picker.pointer_down(Vec2::new(0.0, 0.0)));
        assert!(picker.drag(Vec2::new(100.0, 100.0)));
        assert_eq!(*changed.borrow(), 0);
        picker.pointer_up();

        assert_eq!(*changing.borrow(), 2);
        assert_eq!(*changed.borrow(), 1);
        assert_eq!(picker.state().saturation(), 1.0);
        assert_eq!(picker.state().value(), 1.0);
        assert_eq!(picker.cursor(), Vec2::new(100.0, 100.0));
        assert!(!picker.drag(Vec2::ZERO));
    }

    #[test]
    fn ring_gesture_stays_on_ring() {
        let mut picker = PickerController::new(square());
        assert!(picker.set_mode(Mode::CircleTriangle));
        picker.set_color(Color::rgb(1.0, 0.0, 0.0), false);

        // Start on the ring at angle 0 (hue 0.5).
        assert!(picker.pointer_down(Vec2::new(95.0, 0.0)));
        assert_eq!(picker.drag_state(), DragState::DraggingOuter);
        assert!((picker.state().hue() - 0.5).abs() < 1e-4);

        // Moving through the middle still edits hue only.
        let sv = (picker.state().saturation(), picker.state().value());
        assert!(picker.drag(Vec2::new(0.0, 10.0)));
        assert!((picker.state().hue() - 0.75).abs() < 1e-4);
        assert_eq!((picker.state().saturation(), picker.state().value()), sv);
        picker.pointer_up();
        assert_eq!(picker.drag_state(), DragState::Idle);
    }

    #[test]
    fn sync_places_ring_cursor_for_compound_modes() {
        let mut picker = PickerController::new(square());
        assert!(picker.ring_cursor().is_none());
        picker.set_mode(Mode::CircleCircle);
        picker.set_color(Color::rgb(0.0, 1.0, 1.0), false);
        let ring = picker.ring_cursor().unwrap();
        // Cyan is hue 0.5, angle 0.
        assert!((ring.x - 91.5).abs() < 1e-3 && ring.y.abs() < 1e-3);
        assert!(!picker.set_mode(Mode::Circle));
        assert!(picker.ring_cursor().is_none());
    }

    #[test]
    fn texture_mode_snaps_to_available_color() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let mut picker = PickerController::new(square());
        picker.set_texture(PixelBuffer::new(2, 1, vec![red, blue]).unwrap());
        picker.set_color(Color::rgb(0.9, 0.1, 0.2), false);

        picker.set_mode(Mode::Texture);
        assert_eq!(picker.state().color(), red);
        assert_eq!(picker.cursor(), Vec2::new(-50.0, 0.0));
    }

    #[test]
    fn texture_drag_rejects_ignored_texels() {
        let mut config = PickerConfig::default();
        config.texture_sampling.transparent_alpha_threshold = 0.05;
        let mut picker = PickerController::with_config(square(), config);
        picker.set_texture(PixelBuffer::new(
            2,
            1,
            vec![Color::new(0.0, 1.0, 0.0, 0.02), Color::rgb(0.0, 0.0, 1.0)],
        )
        .unwrap());
        picker.set_mode(Mode::Texture);
        let before = picker.state().color();

        assert!(picker.pointer_down(Vec2::new(-60.0, 0.0)));
        assert_eq!(picker.state().color(), before);
        assert_eq!(picker.cursor(), Vec2::new(-50.0, 0.0));
    }

    #[test]
    fn palette_mode_uses_palette_colors() {
        let colors = vec![Color::rgb(0.0, 1.0, 0.0), Color::rgb(1.0, 1.0, 0.0)];
        let mut picker = PickerController::new(square());
        picker.set_palette(PixelBuffer::new(2, 1, colors.clone()).unwrap(), colors.clone());
        picker.set_mode(Mode::Palette);
        assert_eq!(picker.available_colors(), colors);

        // Entering the mode snapped white to yellow; picking the left texel gives green.
        assert_eq!(picker.state().color(), colors[1]);
        assert!(picker.pointer_down(Vec2::new(-60.0, 0.0)));
        assert_eq!(picker.state().color(), colors[0]);
    }

    #[test]
    fn hue_of_black_survives_drag_to_value_zero() {
        let mut picker = PickerController::new(square());
        picker
            .state_mut()
            .set_from_hsv(HsvColor::new(0.3, 1.0, 1.0, 1.0), false);
        assert!(picker.pointer_down(Vec2::new(100.0, -100.0)));
        picker.pointer_up();
        assert_eq!(picker.state().value(), 0.0);
        assert!((picker.state().hue() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn config_roundtrip() {
        let config = PickerConfig {
            cursor_contrast: CursorContrastMode::InvertLightness,
            ..PickerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: PickerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);

        let partial: PickerConfig = serde_json::from_str(r#"{"cursor_contrast":"None"}"#).unwrap();
        assert_eq!(partial.cursor_contrast, CursorContrastMode::None);
        assert_eq!(partial.ring, RingGeometry::default());
    }
}
