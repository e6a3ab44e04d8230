//! Per-entry saturation/value overrides layered on generated colors.

use chromadial_core::{clamp01, hsv_to_rgb, rgb_to_hsv, Color};
use serde::{Deserialize, Serialize};

/// Values closer than this count as unchanged.
const OVERRIDE_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleOverride {
    pub saturation: f32,
    pub value: f32,
    pub override_saturation: bool,
    pub override_value: bool,
}

impl Default for HandleOverride {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            value: 1.0,
            override_saturation: false,
            override_value: false,
        }
    }
}

impl HandleOverride {
    pub fn is_active(&self) -> bool {
        self.override_saturation || self.override_value
    }

    /// `color` with the overridden channels replaced. Hue and alpha are kept.
    pub fn apply(&self, color: Color) -> Color {
        if !self.is_active() {
            return color;
        }
        let mut hsv = rgb_to_hsv(color);
        if self.override_saturation {
            hsv.s = clamp01(self.saturation);
        }
        if self.override_value {
            hsv.v = clamp01(self.value);
        }
        hsv_to_rgb(hsv).with_alpha(color.a)
    }
}

fn differs(a: f32, b: f32) -> bool {
    (a - b).abs() > OVERRIDE_EPSILON
}

/// Positional overrides, one slot per generated entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandleOverrides(Vec<HandleOverride>);

impl HandleOverrides {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HandleOverride> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandleOverride> {
        self.0.iter()
    }

    /// Grow or shrink to `len` slots. New slots are inactive.
    pub fn resize(&mut self, len: usize) {
        self.0.resize(len, HandleOverride::default());
    }

    /// Drop every slot.
    pub fn reset(&mut self) {
        self.0.clear();
    }

    /// Set the given channels on slot `index`. Returns whether anything changed.
    pub fn set(&mut self, index: usize, saturation: Option<f32>, value: Option<f32>) -> bool {
        let Some(slot) = self.0.get_mut(index) else {
            log::debug!("Ignoring override for missing palette entry {index}");
            return false;
        };

        let mut changed = false;
        if let Some(s) = saturation {
            if !slot.override_saturation || differs(slot.saturation, s) {
                slot.saturation = s;
                slot.override_saturation = true;
                changed = true;
            }
        }
        if let Some(v) = value {
            if !slot.override_value || differs(slot.value, v) {
                slot.value = v;
                slot.override_value = true;
                changed = true;
            }
        }
        changed
    }

    /// Switch off the selected channels on slot `index`. Returns whether anything changed.
    pub fn clear(&mut self, index: usize, saturation: bool, value: bool) -> bool {
        let Some(slot) = self.0.get_mut(index) else {
            return false;
        };
        clear_slot(slot, saturation, value)
    }

    /// Switch off the selected channels on every slot. Returns whether anything changed.
    pub fn clear_all(&mut self, saturation: bool, value: bool) -> bool {
        self.0
            .iter_mut()
            .fold(false, |changed, slot| clear_slot(slot, saturation, value) | changed)
    }

    /// Apply every active slot to the matching entry of `colors`.
    pub fn apply(&self, colors: &mut [Color]) {
        for (color, slot) in colors.iter_mut().zip(&self.0) {
            *color = slot.apply(*color);
        }
    }
}

fn clear_slot(slot: &mut HandleOverride, saturation: bool, value: bool) -> bool {
    let mut changed = false;
    if saturation && slot.override_saturation {
        slot.override_saturation = false;
        changed = true;
    }
    if value && slot.override_value {
        slot.override_value = false;
        changed = true;
    }
    changed
}
