// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay state machine.
//!
//! ## Phases
//!
//! ```text
//! Closed --select--> Opening --frames--> (visible) --fade--> Open
//! Open/Opening --dismiss--> Closing --frames--> (hidden) --fade--> Closed
//! ```
//!
//! Every transition waits for a number of rendering frames before it changes
//! opacity, so the renderer observes a style edge, and then for the fade
//! duration before it is complete. Both waits are requested as effects
//! carrying a [`Wake`] token; the host hands the token back as
//! [`OverlayEvent::Wake`].
//!
//! Starting a transition bumps a generation counter. A wake from an earlier
//! generation belongs to a superseded transition and is dropped.
//!
//! Selecting a different region while one is shown queues it: the current
//! one is dismissed (keeping the fragment) and the queued selection opens
//! once the overlay is closed. At most one selection is queued; later ones
//! replace it.

use smallvec::SmallVec;
use waymark_event_state::press::PressLatch;
use waymark_regions::{RegionId, ResolvedContent};

use crate::surface::OverlaySurface;

/// Overlay lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Hidden and out of layout.
    #[default]
    Closed,
    /// Becoming visible.
    Opening,
    /// Fully visible.
    Open,
    /// Fading out.
    Closing,
}

/// What caused a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// A pointer click on the region. Subject to drag suppression.
    Pointer,
    /// Enter or Space on the focused region.
    Keyboard,
    /// Navigation to a fragment.
    Fragment,
}

/// A request to show content for a region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Region to mark active.
    pub region: RegionId,
    /// Content to show, already resolved.
    pub content: ResolvedContent,
    /// What caused the selection.
    pub trigger: Trigger,
}

impl Selection {
    fn shows_same(&self, other: &Self) -> bool {
        self.region == other.region && self.content.key == other.content.key
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Frames,
    Fade,
}

/// Token for a deferred continuation of an overlay transition.
///
/// Tokens are opaque; hand them back unchanged through
/// [`OverlayEvent::Wake`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wake {
    generation: u64,
    step: Step,
}

/// Input to [`OverlayMachine::handle`].
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayEvent {
    /// Show a region's content.
    Select(Selection),
    /// Hide the overlay. With `clear_fragment`, also clear the location
    /// fragment.
    Dismiss {
        /// Clear the fragment as part of dismissing.
        clear_fragment: bool,
    },
    /// A scheduled wait finished.
    Wake(Wake),
    /// Pointer went down on the map surface.
    PointerDown,
    /// Pointer went up.
    PointerUp,
    /// The viewport is about to pan.
    PanBegan,
}

/// Side effect requested by the machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayEffect {
    /// Add the active marker to a region.
    MarkActive(RegionId),
    /// Remove the active marker from a region.
    UnmarkActive(RegionId),
    /// Set the location fragment; empty clears it.
    WriteFragment(String),
    /// Move input focus into the overlay.
    FocusOverlay,
    /// Move input focus to the map surface.
    FocusMap,
    /// Deliver `wake` after `frames` rendering frames.
    AfterFrames {
        /// Frames to wait.
        frames: u32,
        /// Token to deliver.
        wake: Wake,
    },
    /// Deliver `wake` after `ms` milliseconds.
    AfterMs {
        /// Milliseconds to wait.
        ms: u64,
        /// Token to deliver.
        wake: Wake,
    },
}

/// Effects from one event, in the order they must be applied.
pub type Effects = SmallVec<[OverlayEffect; 4]>;

/// Timing and presentation settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlaySettings {
    /// Frames to wait before changing opacity.
    pub transition_frames: u32,
    /// Fade duration.
    pub fade_ms: u64,
    /// Base URL for the edit footer; no footer when `None`.
    pub edit_base_url: Option<String>,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            transition_frames: 2,
            fade_ms: 200,
            edit_base_url: None,
        }
    }
}

/// Region selection and overlay visibility for one map.
#[derive(Clone, Debug, Default)]
pub struct OverlayMachine {
    settings: OverlaySettings,
    phase: Phase,
    active: Option<Selection>,
    pending: Option<Selection>,
    generation: u64,
    awaiting: Option<Step>,
    press: PressLatch,
    surface: OverlaySurface,
}

impl OverlayMachine {
    /// Creates a closed overlay.
    #[must_use]
    pub fn new(settings: OverlaySettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The region marked active, if any.
    #[must_use]
    pub fn active_region(&self) -> Option<RegionId> {
        self.active.as_ref().map(|s| s.region)
    }

    /// Content key of the active selection, if any.
    #[must_use]
    pub fn active_key(&self) -> Option<&str> {
        self.active.as_ref().map(|s| s.content.key.as_str())
    }

    /// The selection waiting for the current dismissal to finish.
    #[must_use]
    pub fn pending(&self) -> Option<&Selection> {
        self.pending.as_ref()
    }

    /// Presentation state.
    #[must_use]
    pub fn surface(&self) -> &OverlaySurface {
        &self.surface
    }

    /// Drag-suppression state.
    #[must_use]
    pub fn press(&self) -> &PressLatch {
        &self.press
    }

    /// Applies one event and returns the effects to perform.
    pub fn handle(&mut self, event: OverlayEvent) -> Effects {
        let mut fx = Effects::new();
        match event {
            OverlayEvent::Select(selection) => self.select(selection, &mut fx),
            OverlayEvent::Dismiss { clear_fragment } => self.dismiss(clear_fragment, &mut fx),
            OverlayEvent::Wake(wake) => self.wake(wake, &mut fx),
            OverlayEvent::PointerDown => self.press.on_down(),
            OverlayEvent::PointerUp => self.press.on_up(),
            OverlayEvent::PanBegan => {
                if self.press.on_pan_begin() {
                    tracing::trace!("press latched by pan");
                }
            }
        }
        fx
    }

    fn select(&mut self, selection: Selection, fx: &mut Effects) {
        if selection.trigger == Trigger::Pointer && self.press.suppresses_click() {
            tracing::debug!(region = %selection.region, "click ended a drag, ignored");
            return;
        }
        match self.phase {
            Phase::Closed => self.open(selection, fx),
            Phase::Open | Phase::Opening
                if self.active.as_ref().is_some_and(|a| a.shows_same(&selection)) =>
            {
                self.surface
                    .set_content(&selection.content, self.settings.edit_base_url.as_deref());
                fx.push(OverlayEffect::WriteFragment(selection.content.key.clone()));
                self.active = Some(selection);
            }
            Phase::Open | Phase::Opening => {
                tracing::debug!(region = %selection.region, "switching selection");
                self.pending = Some(selection);
                self.close(false, fx);
            }
            Phase::Closing => {
                tracing::debug!(region = %selection.region, "queued until closed");
                self.pending = Some(selection);
            }
        }
    }

    fn dismiss(&mut self, clear_fragment: bool, fx: &mut Effects) {
        match self.phase {
            Phase::Open | Phase::Opening => self.close(clear_fragment, fx),
            Phase::Closing => {
                if self.pending.take().is_some() {
                    tracing::debug!("queued selection dropped");
                }
                if clear_fragment {
                    fx.push(OverlayEffect::WriteFragment(String::new()));
                }
            }
            Phase::Closed => {}
        }
    }

    fn open(&mut self, selection: Selection, fx: &mut Effects) {
        self.generation += 1;
        tracing::debug!(
            region = %selection.region,
            key = %selection.content.key,
            generation = self.generation,
            "overlay opening"
        );
        self.phase = Phase::Opening;
        fx.push(OverlayEffect::MarkActive(selection.region));
        fx.push(OverlayEffect::WriteFragment(selection.content.key.clone()));
        self.surface
            .set_content(&selection.content, self.settings.edit_base_url.as_deref());
        self.surface.set_displayed(true);
        self.surface.set_transitioning(true);
        self.active = Some(selection);
        self.await_frames(fx);
    }

    fn close(&mut self, clear_fragment: bool, fx: &mut Effects) {
        self.generation += 1;
        tracing::debug!(clear_fragment, generation = self.generation, "overlay closing");
        self.phase = Phase::Closing;
        if let Some(active) = self.active.take() {
            fx.push(OverlayEffect::UnmarkActive(active.region));
        }
        if clear_fragment {
            fx.push(OverlayEffect::WriteFragment(String::new()));
        }
        self.surface.set_transitioning(true);
        self.await_frames(fx);
    }

    fn await_frames(&mut self, fx: &mut Effects) {
        self.awaiting = Some(Step::Frames);
        fx.push(OverlayEffect::AfterFrames {
            frames: self.settings.transition_frames,
            wake: Wake {
                generation: self.generation,
                step: Step::Frames,
            },
        });
    }

    fn await_fade(&mut self, fx: &mut Effects) {
        self.awaiting = Some(Step::Fade);
        fx.push(OverlayEffect::AfterMs {
            ms: self.settings.fade_ms,
            wake: Wake {
                generation: self.generation,
                step: Step::Fade,
            },
        });
    }

    fn wake(&mut self, wake: Wake, fx: &mut Effects) {
        if wake.generation != self.generation {
            tracing::trace!(
                stale = wake.generation,
                current = self.generation,
                "dropping stale wake"
            );
            return;
        }
        if self.awaiting != Some(wake.step) {
            tracing::warn!(step = ?wake.step, phase = ?self.phase, "unexpected wake");
            return;
        }
        self.awaiting = None;
        match (self.phase, wake.step) {
            (Phase::Opening, Step::Frames) => {
                self.surface.set_visible(true);
                fx.push(OverlayEffect::FocusOverlay);
                self.await_fade(fx);
            }
            (Phase::Opening, Step::Fade) => {
                self.surface.set_transitioning(false);
                self.phase = Phase::Open;
                tracing::debug!("overlay open");
            }
            (Phase::Closing, Step::Frames) => {
                self.surface.set_visible(false);
                fx.push(OverlayEffect::FocusMap);
                self.await_fade(fx);
            }
            (Phase::Closing, Step::Fade) => {
                self.surface.set_displayed(false);
                self.surface.set_transitioning(false);
                self.phase = Phase::Closed;
                tracing::debug!("overlay closed");
                if let Some(next) = self.pending.take() {
                    self.open(next, fx);
                }
            }
            (Phase::Open | Phase::Closed, _) => {
                tracing::warn!(step = ?wake.step, phase = ?self.phase, "wake without transition");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use waymark_regions::{ContentCatalog, RegionRegistry};

    use super::{OverlayEffect, OverlayEvent, OverlayMachine, Phase, Selection, Trigger, Wake};

    fn select(regions: &RegionRegistry, key: &str, trigger: Trigger) -> OverlayEvent {
        let region = regions.first_with_key(key).unwrap();
        OverlayEvent::Select(Selection {
            region: region.id(),
            content: ContentCatalog::new().lookup(key, region.display_name()),
            trigger,
        })
    }

    fn wakes(fx: &[OverlayEffect]) -> Vec<Wake> {
        fx.iter()
            .filter_map(|e| match e {
                OverlayEffect::AfterFrames { wake, .. } | OverlayEffect::AfterMs { wake, .. } => {
                    Some(*wake)
                }
                _ => None,
            })
            .collect()
    }

    /// Delivers wakes until the machine stops scheduling, returning all effects.
    fn settle(m: &mut OverlayMachine, mut fx: Vec<OverlayEffect>) -> Vec<OverlayEffect> {
        let mut all = fx.clone();
        while let Some(wake) = wakes(&fx).pop() {
            fx = m.handle(OverlayEvent::Wake(wake)).into_vec();
            all.extend(fx.iter().cloned());
        }
        all
    }

    fn regions() -> RegionRegistry {
        RegionRegistry::from_labels(["Pond [outline]", "Barn [outline]"])
    }

    #[test]
    fn open_runs_frames_then_fade() {
        let r = regions();
        let pond = r.first_with_key("pond").unwrap().id();
        let mut m = OverlayMachine::default();

        let fx = m.handle(select(&r, "pond", Trigger::Keyboard));
        assert_eq!(m.phase(), Phase::Opening);
        assert_eq!(fx[0], OverlayEffect::MarkActive(pond));
        assert_eq!(fx[1], OverlayEffect::WriteFragment("pond".into()));
        assert!(matches!(fx[2], OverlayEffect::AfterFrames { frames: 2, .. }));
        assert!(m.surface().is_displayed());
        assert!(m.surface().aria_hidden());

        let fx = m.handle(OverlayEvent::Wake(wakes(&fx)[0]));
        assert!(!m.surface().aria_hidden());
        assert_eq!(m.surface().opacity(), 1.0);
        assert_eq!(fx[0], OverlayEffect::FocusOverlay);
        assert!(matches!(fx[1], OverlayEffect::AfterMs { ms: 200, .. }));

        let fx = m.handle(OverlayEvent::Wake(wakes(&fx)[0]));
        assert!(fx.is_empty());
        assert_eq!(m.phase(), Phase::Open);
        assert_eq!(m.surface().title(), "Pond");
        assert!(!m.surface().is_transitioning());
    }

    #[test]
    fn stale_wakes_are_dropped() {
        let r = regions();
        let mut m = OverlayMachine::default();
        let open = m.handle(select(&r, "pond", Trigger::Keyboard));
        let stale = wakes(&open)[0];
        m.handle(OverlayEvent::Dismiss { clear_fragment: true });
        assert_eq!(m.phase(), Phase::Closing);

        // The opening transition's wake must not make the overlay visible.
        assert!(m.handle(OverlayEvent::Wake(stale)).is_empty());
        assert_eq!(m.phase(), Phase::Closing);
        assert!(m.surface().aria_hidden());
    }

    #[test]
    fn reselecting_active_region_refreshes_only() {
        let r = regions();
        let mut m = OverlayMachine::default();
        let fx = m.handle(select(&r, "pond", Trigger::Keyboard)).into_vec();
        settle(&mut m, fx);
        let fx = m.handle(select(&r, "pond", Trigger::Keyboard));
        assert_eq!(fx.into_vec(), vec![OverlayEffect::WriteFragment("pond".into())]);
        assert_eq!(m.phase(), Phase::Open);
    }

    #[test]
    fn switching_closes_before_opening() {
        let r = regions();
        let pond = r.first_with_key("pond").unwrap().id();
        let barn = r.first_with_key("barn").unwrap().id();
        let mut m = OverlayMachine::default();
        let fx = m.handle(select(&r, "pond", Trigger::Keyboard)).into_vec();
        settle(&mut m, fx);

        let fx = m.handle(select(&r, "barn", Trigger::Pointer)).into_vec();
        assert_eq!(m.phase(), Phase::Closing);
        assert_eq!(fx[0], OverlayEffect::UnmarkActive(pond));
        // The fragment is kept while switching.
        assert!(!fx.iter().any(|e| matches!(e, OverlayEffect::WriteFragment(_))));
        assert!(m.pending().is_some());

        let all = settle(&mut m, fx);
        let focus_map = all.iter().position(|e| *e == OverlayEffect::FocusMap).unwrap();
        let mark_barn = all
            .iter()
            .position(|e| *e == OverlayEffect::MarkActive(barn))
            .unwrap();
        assert!(focus_map < mark_barn);
        assert_eq!(m.phase(), Phase::Open);
        assert_eq!(m.active_region(), Some(barn));
    }

    #[test]
    fn select_select_dismiss_ends_closed_and_cleared() {
        let r = regions();
        let mut m = OverlayMachine::default();
        let mut fx = m.handle(select(&r, "pond", Trigger::Keyboard)).into_vec();
        fx.extend(m.handle(select(&r, "barn", Trigger::Keyboard)));
        let dismissed = m.handle(OverlayEvent::Dismiss { clear_fragment: true }).into_vec();
        assert_eq!(dismissed, vec![OverlayEffect::WriteFragment(String::new())]);
        settle(&mut m, fx);

        assert_eq!(m.phase(), Phase::Closed);
        assert_eq!(m.active_region(), None);
        assert!(m.pending().is_none());
        assert!(!m.surface().is_displayed());
    }

    #[test]
    fn dragged_click_is_ignored() {
        let r = regions();
        let mut m = OverlayMachine::default();
        m.handle(OverlayEvent::PointerDown);
        m.handle(OverlayEvent::PanBegan);
        m.handle(OverlayEvent::PointerUp);
        assert!(m.handle(select(&r, "pond", Trigger::Pointer)).is_empty());
        assert_eq!(m.phase(), Phase::Closed);
        assert_eq!(m.active_region(), None);

        // Keyboard activation is never suppressed.
        assert!(!m.handle(select(&r, "pond", Trigger::Keyboard)).is_empty());
        assert_eq!(m.phase(), Phase::Opening);
    }

    #[test]
    fn plain_click_selects() {
        let r = regions();
        let mut m = OverlayMachine::default();
        m.handle(OverlayEvent::PanBegan);
        m.handle(OverlayEvent::PointerDown);
        m.handle(OverlayEvent::PointerUp);
        m.handle(select(&r, "pond", Trigger::Pointer));
        assert_eq!(m.phase(), Phase::Opening);
    }

    #[test]
    fn dismiss_when_closed_is_a_no_op() {
        let mut m = OverlayMachine::default();
        assert!(m.handle(OverlayEvent::Dismiss { clear_fragment: true }).is_empty());
        assert_eq!(m.phase(), Phase::Closed);
    }
}
