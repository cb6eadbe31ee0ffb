// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use waymark_event_state::gesture::{GestureAdapter, GestureCommand, InputCapabilities};
use waymark_event_state::keyboard::{ArrowKey, Key, Modifiers};
use waymark_overlay::fragment::{FragmentTarget, LocationFragment, resolve_fragment, sync_fragment};
use waymark_overlay::{
    OverlayEffect, OverlayEvent, OverlayMachine, Phase, Selection, Trigger, recenter_delta,
};
use waymark_regions::{CatalogError, ContentCatalog, RegionId, RegionRegistry};
use waymark_timing::Scheduler;
use waymark_view2d::{PanBegin, PanDirection, PanZoomHost, ViewportController};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::event::{Commands, ViewerCommand, ViewerEvent, ViewerWake};

/// Frames between mount and following the initial fragment.
const SETTLE_FRAMES: u32 = 2;

/// The static content of a map: its regions and their descriptions.
#[derive(Clone, Debug, Default)]
pub struct MapContent {
    /// Selectable regions.
    pub regions: RegionRegistry,
    /// Descriptions keyed by content key.
    pub catalog: ContentCatalog,
}

impl MapContent {
    /// Builds content from the map's element labels and a catalog document.
    pub fn from_labels<I, S>(labels: I, catalog_json: &str) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            regions: RegionRegistry::from_labels(labels),
            catalog: ContentCatalog::from_json(catalog_json)?,
        })
    }
}

/// One interactive map.
///
/// Owns everything that changes while the map is on the page: the viewport
/// controller, the overlay state machine, and the gesture adapter. The host
/// surface, location, and scheduler are injected so the same viewer runs
/// against a browser binding or a headless test harness.
///
/// All input arrives through [`MapViewer::dispatch`]. Each call runs to
/// completion, so a resize (including its re-clamp) always finishes before
/// the next pan is processed.
#[derive(Debug)]
pub struct MapViewer<H, L, S> {
    host: H,
    location: L,
    scheduler: S,
    content: MapContent,
    recenter_threshold: f64,
    viewport: ViewportController,
    overlay: OverlayMachine,
    gestures: GestureAdapter,
    following_fragment: bool,
}

impl<H, L, S> MapViewer<H, L, S>
where
    H: PanZoomHost,
    L: LocationFragment,
    S: Scheduler<ViewerWake>,
{
    /// Creates a viewer. Nothing on the host changes until
    /// [`MapViewer::mount`].
    pub fn new(
        host: H,
        location: L,
        scheduler: S,
        content: MapContent,
        config: &ViewerConfig,
        capabilities: InputCapabilities,
    ) -> Result<Self, ViewerError> {
        config.validate()?;
        Ok(Self {
            host,
            location,
            scheduler,
            content,
            recenter_threshold: config.recenter_threshold,
            viewport: ViewportController::new(config.viewport_settings()),
            overlay: OverlayMachine::new(config.overlay_settings()),
            gestures: GestureAdapter::detect(capabilities),
            following_fragment: false,
        })
    }

    /// Fits the map to the surface and focuses it.
    ///
    /// Fails if the host has no measurable content or viewport. The initial
    /// fragment is honored once the viewport has had two frames to settle.
    pub fn mount(&mut self) -> Result<Commands, ViewerError> {
        let overlay = &mut self.overlay;
        let envelope = self.viewport.mount(&mut self.host, |_| {
            overlay.handle(OverlayEvent::PanBegan);
        })?;
        tracing::debug!(
            base = envelope.base_zoom,
            min = envelope.min_zoom,
            max = envelope.max_zoom,
            regions = self.content.regions.len(),
            gestures = ?self.gestures.source(),
            "viewer mounted"
        );
        self.scheduler.after_frames(SETTLE_FRAMES, ViewerWake::InitialFragment);
        let mut cmds = Commands::new();
        cmds.push(ViewerCommand::FocusMap);
        Ok(cmds)
    }

    /// Handles one input event and returns what the page must do.
    pub fn dispatch(&mut self, event: ViewerEvent) -> Commands {
        let mut cmds = Commands::new();
        match event {
            ViewerEvent::Resize => self.resize(),
            ViewerEvent::MapKey { key, modifiers } => self.map_key(key, modifiers, &mut cmds),
            ViewerEvent::MapPointerDown => self.overlay_event(OverlayEvent::PointerDown, &mut cmds),
            ViewerEvent::MapPointerUp => self.overlay_event(OverlayEvent::PointerUp, &mut cmds),
            ViewerEvent::MapClick => cmds.push(ViewerCommand::FocusMap),
            ViewerEvent::PanBy(delta) => {
                self.pan_by(delta);
            }
            ViewerEvent::Gesture(input) => {
                if let Some(command) = self.gestures.handle(input, self.host.zoom()) {
                    self.gesture(command);
                }
            }
            ViewerEvent::RegionClick(region) => self.select(region, Trigger::Pointer, &mut cmds),
            ViewerEvent::RegionKey { region, key } => {
                if key.is_activation() {
                    cmds.push(ViewerCommand::PreventDefault);
                    self.select(region, Trigger::Keyboard, &mut cmds);
                }
            }
            ViewerEvent::RegionFocused {
                region,
                bounds,
                viewport,
            } => {
                if let Some(delta) = recenter_delta(bounds, viewport, self.recenter_threshold) {
                    tracing::debug!(%region, ?delta, "recentering focused region");
                    self.pan_by(delta);
                }
            }
            ViewerEvent::CloseClick | ViewerEvent::BackdropClick => {
                cmds.push(ViewerCommand::PreventDefault);
                self.dismiss(&mut cmds);
            }
            ViewerEvent::CloseKey(key) => {
                if key.is_activation() {
                    cmds.push(ViewerCommand::PreventDefault);
                    self.dismiss(&mut cmds);
                }
            }
            ViewerEvent::OverlayKey(key) => {
                if key == Key::Escape {
                    cmds.push(ViewerCommand::PreventDefault);
                    self.dismiss(&mut cmds);
                }
            }
            ViewerEvent::FragmentChanged => {
                if self.following_fragment {
                    self.follow_fragment(&mut cmds);
                }
            }
            ViewerEvent::Wake(ViewerWake::Overlay(wake)) => {
                self.overlay_event(OverlayEvent::Wake(wake), &mut cmds);
            }
            ViewerEvent::Wake(ViewerWake::InitialFragment) => {
                self.following_fragment = true;
                self.follow_fragment(&mut cmds);
            }
            ViewerEvent::Teardown => {
                self.following_fragment = false;
                if let Some(source) = self.gestures.teardown() {
                    cmds.push(ViewerCommand::ReleaseGestures(source));
                }
            }
        }
        cmds
    }

    /// The host surface.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host surface, for simulating layout changes.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The location.
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Mutable access to the location, for simulating navigation.
    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    /// The scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Regions and descriptions.
    pub fn content(&self) -> &MapContent {
        &self.content
    }

    /// Overlay state.
    pub fn overlay(&self) -> &OverlayMachine {
        &self.overlay
    }

    /// Viewport controller state.
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// The gesture adapter in use.
    pub fn gestures(&self) -> &GestureAdapter {
        &self.gestures
    }

    fn resize(&mut self) {
        let overlay = &mut self.overlay;
        let resized = self.viewport.resize(&mut self.host, |_| {
            overlay.handle(OverlayEvent::PanBegan);
        });
        match resized {
            Ok(envelope) => tracing::debug!(
                min = envelope.min_zoom,
                max = envelope.max_zoom,
                "zoom envelope recomputed"
            ),
            Err(err) => tracing::warn!(%err, "resize skipped"),
        }
    }

    fn map_key(&mut self, key: Key, modifiers: Modifiers, cmds: &mut Commands) {
        let Key::Arrow(arrow) = key else {
            return;
        };
        let direction = match arrow {
            ArrowKey::Up => PanDirection::Up,
            ArrowKey::Down => PanDirection::Down,
            ArrowKey::Left => PanDirection::Left,
            ArrowKey::Right => PanDirection::Right,
        };
        cmds.push(ViewerCommand::PreventDefault);
        let overlay = &mut self.overlay;
        self.viewport.key_pan(
            &mut self.host,
            direction,
            modifiers.contains(Modifiers::SHIFT),
            |_| {
                overlay.handle(OverlayEvent::PanBegan);
            },
        );
    }

    fn pan_by(&mut self, delta: Vec2) -> Vec2 {
        let overlay = &mut self.overlay;
        let applied = self.viewport.pan_by(&mut self.host, delta, |_| {
            overlay.handle(OverlayEvent::PanBegan);
        });
        tracing::trace!(?delta, ?applied, "pan");
        applied
    }

    fn gesture(&mut self, command: GestureCommand) {
        let overlay = &mut self.overlay;
        let on_begin = |_: PanBegin| {
            overlay.handle(OverlayEvent::PanBegan);
        };
        match command {
            GestureCommand::PanBy(delta) => {
                self.viewport.pan_by(&mut self.host, delta, on_begin);
            }
            GestureCommand::ZoomAtPoint { zoom, point } => {
                self.viewport
                    .zoom_at_point(&mut self.host, zoom, point, on_begin);
            }
            GestureCommand::ZoomIn => self.viewport.zoom_in(&mut self.host, on_begin),
        }
    }

    fn select(&mut self, region: RegionId, trigger: Trigger, cmds: &mut Commands) {
        let Some(r) = self.content.regions.get(region) else {
            tracing::warn!(%region, "selection of unknown region");
            return;
        };
        let content = self.content.catalog.lookup(r.content_key(), r.display_name());
        self.overlay_event(
            OverlayEvent::Select(Selection {
                region,
                content,
                trigger,
            }),
            cmds,
        );
    }

    fn dismiss(&mut self, cmds: &mut Commands) {
        self.overlay_event(OverlayEvent::Dismiss { clear_fragment: true }, cmds);
    }

    fn follow_fragment(&mut self, cmds: &mut Commands) {
        let fragment = self.location.fragment();
        match resolve_fragment(&fragment, &self.content.regions, &self.content.catalog) {
            FragmentTarget::Empty => {
                // A queued switch is dropped too, so the bare page stays bare.
                if self.overlay.phase() != Phase::Closed {
                    tracing::debug!("fragment cleared, closing overlay");
                    self.overlay_event(OverlayEvent::Dismiss { clear_fragment: false }, cmds);
                }
            }
            FragmentTarget::Unknown => {
                tracing::debug!(%fragment, "ignoring unknown fragment");
            }
            FragmentTarget::Region {
                region,
                content_key,
            } => {
                let display_name = self
                    .content
                    .regions
                    .get(region)
                    .map(|r| r.display_name().to_owned())
                    .unwrap_or_else(|| content_key.clone());
                let content = self.content.catalog.lookup(&content_key, &display_name);
                tracing::debug!(%region, key = %content_key, "following fragment");
                cmds.push(ViewerCommand::FocusRegion(region));
                self.overlay_event(
                    OverlayEvent::Select(Selection {
                        region,
                        content,
                        trigger: Trigger::Fragment,
                    }),
                    cmds,
                );
            }
        }
    }

    fn overlay_event(&mut self, event: OverlayEvent, cmds: &mut Commands) {
        for effect in self.overlay.handle(event) {
            match effect {
                OverlayEffect::MarkActive(r) => cmds.push(ViewerCommand::MarkActive(r)),
                OverlayEffect::UnmarkActive(r) => cmds.push(ViewerCommand::UnmarkActive(r)),
                OverlayEffect::FocusOverlay => cmds.push(ViewerCommand::FocusOverlay),
                OverlayEffect::FocusMap => cmds.push(ViewerCommand::FocusMap),
                OverlayEffect::WriteFragment(fragment) => {
                    let write = sync_fragment(&mut self.location, &fragment);
                    tracing::trace!(%fragment, ?write, "fragment sync");
                }
                OverlayEffect::AfterFrames { frames, wake } => {
                    self.scheduler.after_frames(frames, ViewerWake::Overlay(wake));
                }
                OverlayEffect::AfterMs { ms, wake } => {
                    self.scheduler.after_ms(ms, ViewerWake::Overlay(wake));
                }
            }
        }
    }
}
