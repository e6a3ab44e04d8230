//! Single source of truth for the picker color.
//!
//! `ColorState` keeps one color mirrored into RGB, HSV and CMYK. Alpha is
//! stored once and stamped onto the RGB and HSV views on every write.
//!
//! Two listener lists exist: "changing" fires continuously during a drag,
//! "changed" fires once per committed gesture. Dispatch is synchronous and
//! single-threaded. Listeners receive `&mut ColorState` and may mutate it;
//! while a dispatch is running, nested notifications are suppressed, so a
//! listener's own edits never re-enter the listener lists.

use std::fmt;

use crate::color::{clamp01, wrap_hue, CmykColor, Color, HsvColor};
use crate::color_space::{cmyk_to_rgb, hsv_to_rgb, parse_hex, rgb_to_cmyk, rgb_to_hsv, to_hex};
use crate::error::ColorError;

/// Channel edits closer than this to the current value are ignored.
pub const CHANNEL_EPSILON: f32 = 1e-4;

/// Below this saturation or value the hue is undefined and the previous hue is kept.
const DEGENERATE_EPSILON: f32 = 1e-5;

pub type Listener = Box<dyn FnMut(&mut ColorState, Color)>;

/// Handle returned by the subscribe methods, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Channel {
    Changing,
    Changed,
}

pub struct ColorState {
    color: Color,
    hsv: HsvColor,
    cmyk: CmykColor,
    alpha: f32,
    changing: Vec<(SubscriptionId, Listener)>,
    changed: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    dispatching: bool,
    /// Ids of the list taken out for the running dispatch.
    dispatched: Vec<SubscriptionId>,
    pending_removals: Vec<SubscriptionId>,
}

impl fmt::Debug for ColorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorState")
            .field("color", &self.color)
            .field("hsv", &self.hsv)
            .field("cmyk", &self.cmyk)
            .field("changing_listeners", &self.changing.len())
            .field("changed_listeners", &self.changed.len())
            .finish_non_exhaustive()
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self::new()
    }
}

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < CHANNEL_EPSILON
}

impl ColorState {
    /// New state holding opaque white.
    pub fn new() -> Self {
        let mut state = Self {
            color: Color::WHITE,
            hsv: HsvColor::default(),
            cmyk: CmykColor::default(),
            alpha: 1.0,
            changing: Vec::new(),
            changed: Vec::new(),
            next_id: 0,
            dispatching: false,
            dispatched: Vec::new(),
            pending_removals: Vec::new(),
        };
        state.set_from_rgb(Color::WHITE, false);
        state
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn hsv(&self) -> HsvColor {
        self.hsv
    }

    pub fn cmyk(&self) -> CmykColor {
        self.cmyk
    }

    pub fn hue(&self) -> f32 {
        self.hsv.h
    }

    pub fn saturation(&self) -> f32 {
        self.hsv.s
    }

    pub fn value(&self) -> f32 {
        self.hsv.v
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Replace the color from RGB. Fires "changed" when `notify` is set.
    pub fn set_from_rgb(&mut self, color: Color, notify: bool) {
        let color = color.clamped();
        self.alpha = color.a;
        let hsv = self.reconcile_hsv(rgb_to_hsv(color));
        self.commit(color, hsv);
        if notify {
            self.emit(Channel::Changed);
        }
    }

    /// Replace the color from HSV. Fires "changing" when `notify_changing` is set.
    pub fn set_from_hsv(&mut self, hsv: HsvColor, notify_changing: bool) {
        let hsv = HsvColor::new(wrap_hue(hsv.h), clamp01(hsv.s), clamp01(hsv.v), clamp01(hsv.a));
        self.alpha = hsv.a;
        let color = hsv_to_rgb(hsv);
        self.commit(color, hsv);
        if notify_changing {
            self.emit(Channel::Changing);
        }
    }

    /// Replace the color from CMYK, keeping the current alpha and, where the
    /// result is achromatic, the current hue. Does not notify.
    pub fn set_from_cmyk(&mut self, cmyk: CmykColor) {
        let cmyk = cmyk.clamped();
        let color = cmyk_to_rgb(cmyk).with_alpha(self.alpha);
        let hsv = self.reconcile_hsv(rgb_to_hsv(color));
        self.color = color;
        self.hsv = HsvColor { a: self.alpha, ..hsv };
        self.cmyk = cmyk;
    }

    /// Parse a hex string and apply it. The state is untouched on failure.
    pub fn set_from_hex(&mut self, hex: &str, notify: bool) -> Result<(), ColorError> {
        let color = parse_hex(hex)?;
        self.set_from_rgb(color, notify);
        Ok(())
    }

    /// Returns false when `hue` matches the current hue and nothing changed.
    pub fn set_hue(&mut self, hue: f32, notify_changing: bool) -> bool {
        let hue = wrap_hue(hue);
        if approx_eq(self.hsv.h, hue) {
            return false;
        }
        self.set_from_hsv(self.hsv.with_hue(hue), notify_changing);
        true
    }

    pub fn set_saturation(&mut self, saturation: f32, notify_changing: bool) -> bool {
        let saturation = clamp01(saturation);
        if approx_eq(self.hsv.s, saturation) {
            return false;
        }
        self.set_from_hsv(self.hsv.with_saturation(saturation), notify_changing);
        true
    }

    pub fn set_value(&mut self, value: f32, notify_changing: bool) -> bool {
        let value = clamp01(value);
        if approx_eq(self.hsv.v, value) {
            return false;
        }
        self.set_from_hsv(self.hsv.with_value(value), notify_changing);
        true
    }

    pub fn set_alpha(&mut self, alpha: f32, notify_changing: bool) -> bool {
        let alpha = clamp01(alpha);
        if approx_eq(self.alpha, alpha) {
            return false;
        }
        self.alpha = alpha;
        self.color.a = alpha;
        self.hsv.a = alpha;
        if notify_changing {
            self.emit(Channel::Changing);
        }
        true
    }

    /// Raw channel setters never notify; the caller commits with
    /// [`ColorState::notify_changed`] once the gesture ends.
    pub fn set_red(&mut self, r: f32) -> bool {
        self.set_rgb_channel(r, |c| &mut c.r)
    }

    pub fn set_green(&mut self, g: f32) -> bool {
        self.set_rgb_channel(g, |c| &mut c.g)
    }

    pub fn set_blue(&mut self, b: f32) -> bool {
        self.set_rgb_channel(b, |c| &mut c.b)
    }

    fn set_rgb_channel(&mut self, value: f32, channel: fn(&mut Color) -> &mut f32) -> bool {
        let value = clamp01(value);
        let mut color = self.color;
        let slot = channel(&mut color);
        if approx_eq(*slot, value) {
            return false;
        }
        *slot = value;
        self.set_from_rgb(color, false);
        true
    }

    /// Explicit commit signal, fired once per interaction gesture.
    pub fn notify_changed(&mut self) {
        self.emit(Channel::Changed);
    }

    /// Hex form of the current color. Alpha is always included when translucent.
    pub fn hex_string(&self, include_alpha: bool) -> String {
        to_hex(self.color, include_alpha || self.alpha < 0.999)
    }

    pub fn subscribe_changing(
        &mut self,
        listener: impl FnMut(&mut ColorState, Color) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_id();
        self.changing.push((id, Box::new(listener)));
        id
    }

    pub fn subscribe_changed(
        &mut self,
        listener: impl FnMut(&mut ColorState, Color) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_id();
        self.changed.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener from whichever list holds it. Returns false if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.changing.len() + self.changed.len();
        self.changing.retain(|(entry, _)| *entry != id);
        self.changed.retain(|(entry, _)| *entry != id);
        let removed = before != self.changing.len() + self.changed.len();
        if removed {
            return true;
        }
        if self.dispatched.contains(&id) && !self.pending_removals.contains(&id) {
            self.pending_removals.push(id);
            return true;
        }
        false
    }

    pub fn is_dispatching(&self) -> bool {
        self.dispatching
    }

    fn allocate_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    fn commit(&mut self, color: Color, hsv: HsvColor) {
        self.color = color.with_alpha(self.alpha);
        self.hsv = HsvColor { a: self.alpha, ..hsv };
        self.cmyk = rgb_to_cmyk(self.color);
    }

    /// Keep hue when the new color has none, and saturation when it is black.
    fn reconcile_hsv(&self, hsv: HsvColor) -> HsvColor {
        let mut out = hsv;
        if hsv.s <= DEGENERATE_EPSILON || hsv.v <= DEGENERATE_EPSILON {
            out.h = self.hsv.h;
        }
        if hsv.v <= DEGENERATE_EPSILON {
            out.s = self.hsv.s;
        }
        out
    }

    fn listeners_mut(&mut self, channel: Channel) -> &mut Vec<(SubscriptionId, Listener)> {
        match channel {
            Channel::Changing => &mut self.changing,
            Channel::Changed => &mut self.changed,
        }
    }

    fn emit(&mut self, channel: Channel) {
        if self.dispatching {
            log::debug!("Suppressed nested {channel:?} notification");
            return;
        }
        self.dispatching = true;

        let mut listeners = std::mem::take(self.listeners_mut(channel));
        self.dispatched = listeners.iter().map(|(id, _)| *id).collect();
        for (id, listener) in listeners.iter_mut() {
            if self.pending_removals.contains(id) {
                continue;
            }
            let color = self.color;
            listener(self, color);
        }

        // Listeners subscribed during dispatch landed in the emptied list.
        let added = std::mem::take(self.listeners_mut(channel));
        listeners.extend(added);
        let removals = std::mem::take(&mut self.pending_removals);
        listeners.retain(|(id, _)| !removals.contains(id));
        *self.listeners_mut(channel) = listeners;

        self.dispatched.clear();
        self.dispatching = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counter() -> (Rc<RefCell<u32>>, impl FnMut(&mut ColorState, Color) + 'static) {
        let count = Rc::new(RefCell::new(0));
        let handle = count.clone();
        (count, move |_: &mut ColorState, _: Color| *handle.borrow_mut() += 1)
    }

    #[test]
    fn starts_white() {
        let state = ColorState::new();
        assert_eq!(state.color(), Color::WHITE);
        assert_eq!(state.hsv(), HsvColor::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(state.cmyk(), CmykColor::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn views_stay_consistent() {
        let mut state = ColorState::new();
        state.set_from_hsv(HsvColor::new(0.5, 1.0, 0.5, 0.8), false);
        let c = state.color();
        assert!(c.r.abs() < 1e-6 && (c.g - 0.5).abs() < 1e-6 && (c.b - 0.5).abs() < 1e-6);
        assert!((c.a - 0.8).abs() < 1e-6);
        assert!((state.cmyk().k - 0.5).abs() < 1e-6);
        assert!((state.cmyk().c - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rgb_notifies_changed_only_when_asked() {
        let mut state = ColorState::new();
        let (changed, listener) = counter();
        state.subscribe_changed(listener);
        state.set_from_rgb(Color::rgb(1.0, 0.0, 0.0), false);
        assert_eq!(*changed.borrow(), 0);
        state.set_from_rgb(Color::rgb(0.0, 1.0, 0.0), true);
        assert_eq!(*changed.borrow(), 1);
    }

    #[test]
    fn hsv_notifies_changing_not_changed() {
        let mut state = ColorState::new();
        let (changing, on_changing) = counter();
        let (changed, on_changed) = counter();
        state.subscribe_changing(on_changing);
        state.subscribe_changed(on_changed);
        state.set_from_hsv(HsvColor::new(0.2, 1.0, 1.0, 1.0), true);
        assert_eq!(*changing.borrow(), 1);
        assert_eq!(*changed.borrow(), 0);
        state.notify_changed();
        assert_eq!(*changed.borrow(), 1);
    }

    #[test]
    fn redundant_channel_edits_are_ignored() {
        let mut state = ColorState::new();
        let (changing, listener) = counter();
        state.subscribe_changing(listener);
        assert!(state.set_hue(0.3, true));
        assert!(!state.set_hue(0.30001, true));
        assert!(!state.set_value(1.0, true));
        assert!(!state.set_alpha(1.0, true));
        assert_eq!(*changing.borrow(), 1);
    }

    #[test]
    fn raw_rgb_setters_do_not_notify() {
        let mut state = ColorState::new();
        let (changed, on_changed) = counter();
        let (changing, on_changing) = counter();
        state.subscribe_changed(on_changed);
        state.subscribe_changing(on_changing);
        assert!(state.set_red(0.2));
        assert!(state.set_green(0.4));
        assert!(!state.set_blue(1.0));
        assert_eq!(*changed.borrow(), 0);
        assert_eq!(*changing.borrow(), 0);
        assert!((state.color().r - 0.2).abs() < 1e-6);
    }

    #[test]
    fn achromatic_rgb_keeps_previous_hue() {
        let mut state = ColorState::new();
        state.set_from_rgb(Color::rgb(0.0, 1.0, 0.0), false);
        let hue = state.hue();
        state.set_from_rgb(Color::rgb(0.4, 0.4, 0.4), false);
        assert!((state.hue() - hue).abs() < 1e-6);
        assert_eq!(state.saturation(), 0.0);
    }

    #[test]
    fn cmyk_keeps_alpha_and_hue() {
        let mut state = ColorState::new();
        state.set_from_hsv(HsvColor::new(0.6, 1.0, 1.0, 0.5), false);
        state.set_from_cmyk(CmykColor::new(0.0, 0.0, 0.0, 1.0));
        assert!((state.alpha() - 0.5).abs() < 1e-6);
        assert!((state.hue() - 0.6).abs() < 1e-6);
        assert!((state.saturation() - 1.0).abs() < 1e-6);
        assert_eq!(state.value(), 0.0);
        assert_eq!(state.color(), Color::new(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn set_alpha_updates_every_view() {
        let mut state = ColorState::new();
        assert!(state.set_alpha(0.25, false));
        assert_eq!(state.color().a, 0.25);
        assert_eq!(state.hsv().a, 0.25);
        assert_eq!(state.alpha(), 0.25);
    }

    #[test]
    fn hex_failure_leaves_state_alone() {
        let mut state = ColorState::new();
        state.set_from_rgb(Color::rgb(0.1, 0.2, 0.3), false);
        let before = state.color();
        assert!(state.set_from_hex("#nothex", true).is_err());
        assert_eq!(state.color(), before);
        assert!(state.set_from_hex("#FF0000", false).is_ok());
        assert_eq!(state.color(), Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn hex_string_forces_alpha_when_translucent() {
        let mut state = ColorState::new();
        assert_eq!(state.hex_string(false), "#FFFFFF");
        state.set_alpha(0.5, false);
        assert_eq!(state.hex_string(false), "#FFFFFF80");
    }

    #[test]
    fn unsubscribe_removes_listener() {
        let mut state = ColorState::new();
        let (changed, listener) = counter();
        let id = state.subscribe_changed(listener);
        assert!(state.unsubscribe(id));
        state.notify_changed();
        assert_eq!(*changed.borrow(), 0);
        assert!(!state.unsubscribe(id));
    }

    #[test]
    fn reentrant_mutation_does_not_recurse() {
        let mut state = ColorState::new();
        let calls = Rc::new(RefCell::new(0));
        let handle = calls.clone();
        state.subscribe_changing(move |state, _| {
            *handle.borrow_mut() += 1;
            // Feedback loop: a listener pushing the value back into the state.
            state.set_value(0.1, true);
        });
        state.set_from_hsv(HsvColor::new(0.0, 1.0, 1.0, 1.0), true);
        assert_eq!(*calls.borrow(), 1);
        assert!((state.value() - 0.1).abs() < 1e-6);
        assert!(!state.is_dispatching());
    }

    #[test]
    fn listener_can_unsubscribe_itself_during_dispatch() {
        let mut state = ColorState::new();
        let calls = Rc::new(RefCell::new(0));
        let handle = calls.clone();
        let own_id = Rc::new(RefCell::new(None));
        let own_id_handle = own_id.clone();
        let id = state.subscribe_changed(move |state, _| {
            *handle.borrow_mut() += 1;
            if let Some(id) = *own_id_handle.borrow() {
                state.unsubscribe(id);
            }
        });
        *own_id.borrow_mut() = Some(id);
        state.notify_changed();
        state.notify_changed();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn unsubscribing_a_dead_id_during_dispatch_fails() {
        let mut state = ColorState::new();
        let stale = state.subscribe_changing(|_, _| {});
        assert!(state.unsubscribe(stale));

        let (count, other) = counter();
        let other_id = state.subscribe_changing(other);
        let results = Rc::new(RefCell::new(Vec::new()));
        let handle = results.clone();
        state.subscribe_changing(move |state, _| {
            let mut results = handle.borrow_mut();
            results.push(state.unsubscribe(stale));
            results.push(state.unsubscribe(other_id));
            results.push(state.unsubscribe(other_id));
        });

        state.set_from_hsv(HsvColor::new(0.1, 0.5, 0.5, 1.0), true);
        assert_eq!(*results.borrow(), vec![false, true, false]);
        // The counter ran before it was removed, and is gone afterwards.
        assert_eq!(*count.borrow(), 1);
        state.set_from_hsv(HsvColor::new(0.2, 0.5, 0.5, 1.0), true);
        assert_eq!(*count.borrow(), 1);
        assert!(state.pending_removals.is_empty());
    }

    #[test]
    fn listener_subscribed_during_dispatch_fires_next_time() {
        let mut state = ColorState::new();
        let late = Rc::new(RefCell::new(0));
        let late_handle = late.clone();
        let mut registered = false;
        state.subscribe_changed(move |state, _| {
            if !registered {
                registered = true;
                let handle = late_handle.clone();
                state.subscribe_changed(move |_, _| *handle.borrow_mut() += 1);
            }
        });
        state.notify_changed();
        assert_eq!(*late.borrow(), 0);
        state.notify_changed();
        assert_eq!(*late.borrow(), 1);
    }
}
