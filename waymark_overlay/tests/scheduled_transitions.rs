// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay transitions driven by the deterministic scheduler.

use waymark_overlay::fragment::{LocationFragment, MemoryLocation, sync_fragment};
use waymark_overlay::{OverlayEffect, OverlayEvent, OverlayMachine, Phase, Selection, Trigger, Wake};
use waymark_regions::{ContentCatalog, RegionId, RegionRegistry};
use waymark_timing::{ManualScheduler, Scheduler};

struct Harness {
    regions: RegionRegistry,
    overlay: OverlayMachine,
    sched: ManualScheduler<Wake>,
    location: MemoryLocation,
    marked: Vec<RegionId>,
}

impl Harness {
    fn new() -> Self {
        Self {
            regions: RegionRegistry::from_labels(["Pond [outline]", "Barn [outline]"]),
            overlay: OverlayMachine::default(),
            sched: ManualScheduler::new(),
            location: MemoryLocation::default(),
            marked: Vec::new(),
        }
    }

    fn apply(&mut self, event: OverlayEvent) {
        for effect in self.overlay.handle(event) {
            match effect {
                OverlayEffect::MarkActive(r) => self.marked.push(r),
                OverlayEffect::UnmarkActive(r) => self.marked.retain(|&m| m != r),
                OverlayEffect::WriteFragment(f) => {
                    sync_fragment(&mut self.location, &f);
                }
                OverlayEffect::FocusOverlay | OverlayEffect::FocusMap => {}
                OverlayEffect::AfterFrames { frames, wake } => self.sched.after_frames(frames, wake),
                OverlayEffect::AfterMs { ms, wake } => self.sched.after_ms(ms, wake),
            }
        }
    }

    fn select(&mut self, key: &str) {
        let region = self.regions.first_with_key(key).unwrap();
        let selection = Selection {
            region: region.id(),
            content: ContentCatalog::new().lookup(key, region.display_name()),
            trigger: Trigger::Keyboard,
        };
        self.apply(OverlayEvent::Select(selection));
    }

    fn advance_ms(&mut self, ms: u64) {
        for wake in self.sched.advance_ms(ms) {
            self.apply(OverlayEvent::Wake(wake));
        }
    }

    fn run_until_idle(&mut self) {
        while let Some(wake) = self.sched.pop_next() {
            self.apply(OverlayEvent::Wake(wake));
        }
    }
}

#[test]
fn open_completes_after_two_frames_and_fade() {
    let mut h = Harness::new();
    h.select("pond");
    h.advance_ms(16);
    assert!(h.overlay.surface().aria_hidden());
    h.advance_ms(16);
    assert!(!h.overlay.surface().aria_hidden());
    assert_eq!(h.overlay.phase(), Phase::Opening);
    h.advance_ms(199);
    assert_eq!(h.overlay.phase(), Phase::Opening);
    h.advance_ms(1);
    assert_eq!(h.overlay.phase(), Phase::Open);
    assert_eq!(h.location.fragment(), "pond");
}

#[test]
fn rapid_select_dismiss_select_leaves_one_selection() {
    let mut h = Harness::new();
    h.select("pond");
    h.advance_ms(40);
    h.apply(OverlayEvent::Dismiss { clear_fragment: true });
    h.select("barn");
    h.run_until_idle();

    let barn = h.regions.first_with_key("barn").unwrap().id();
    assert_eq!(h.overlay.phase(), Phase::Open);
    assert_eq!(h.marked, vec![barn]);
    assert_eq!(h.overlay.surface().title(), "Barn");
    assert_eq!(h.overlay.surface().opacity(), 1.0);
    assert_eq!(h.location.fragment(), "barn");
}

#[test]
fn select_select_dismiss_clears_everything() {
    let mut h = Harness::new();
    h.select("pond");
    h.run_until_idle();
    h.select("barn");
    h.run_until_idle();
    h.apply(OverlayEvent::Dismiss { clear_fragment: true });
    h.run_until_idle();

    assert_eq!(h.overlay.phase(), Phase::Closed);
    assert!(h.marked.is_empty());
    assert_eq!(h.location.fragment(), "");
    assert!(!h.overlay.surface().is_displayed());
}

#[test]
fn switching_keeps_fragment_until_next_opens() {
    let mut h = Harness::new();
    h.select("pond");
    h.run_until_idle();
    h.select("barn");
    // Closing the previous selection does not clear the fragment.
    assert_eq!(h.location.fragment(), "pond");
    h.run_until_idle();
    assert_eq!(h.location.history_entries(), ["pond", "barn"]);
}
