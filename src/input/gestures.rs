use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::{DragSource, DropAction, HitTester, PointerSample};
use crate::swatch::ColorSwatch;

/// Configuration for gesture recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Sideways distance a carousel gesture must cover to page the carousel
    pub swipe_threshold: f32,
    /// Distance after which a gesture commits to dragging
    pub confirm_threshold: f32,
    /// Largest angle from horizontal still counted as sideways (degrees)
    pub max_swipe_angle_deg: f32,
    /// Movement after which the host's default scroll handling is suppressed
    pub scroll_lock_distance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
            confirm_threshold: 20.0,
            max_swipe_angle_deg: 30.0,
            scroll_lock_distance: 5.0,
        }
    }
}

impl GestureConfig {
    /// Whether `delta` is horizontal enough to count as sideways motion
    fn is_sideways(&self, delta: Vec2) -> bool {
        let (dx, dy) = (delta.x.abs(), delta.y.abs());
        if dx == 0.0 || dy >= dx {
            return false;
        }
        dy.atan2(dx).to_degrees() <= self.max_swipe_angle_deg
    }

    /// Sideways motion that also covers at least `threshold`
    fn is_primarily_sideways(&self, delta: Vec2, threshold: f32) -> bool {
        delta.x.abs() >= threshold && self.is_sideways(delta)
    }
}

/// Phase of the active gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    /// Pointer is down but the gesture hasn't been classified yet
    Undecided,
    Dragging,
}

/// Tracking state for one pointer interaction, from down to up
#[derive(Debug, Clone)]
pub struct GestureSession {
    origin: PointerSample,
    last_sample: PointerSample,
    payload: ColorSwatch,
    source: DragSource,
    state: GestureState,
    /// Set once the pointer has moved past any threshold; rules out a tap
    confirmed: bool,
    hovered_cell: Option<usize>,
}

impl GestureSession {
    fn new(origin: PointerSample, payload: ColorSwatch, source: DragSource, state: GestureState) -> Self {
        Self {
            origin,
            last_sample: origin,
            payload,
            source,
            state,
            confirmed: state == GestureState::Dragging,
            hovered_cell: None,
        }
    }

    pub fn origin(&self) -> PointerSample {
        self.origin
    }

    pub fn last_sample(&self) -> PointerSample {
        self.last_sample
    }

    pub fn payload(&self) -> &ColorSwatch {
        &self.payload
    }

    pub fn source(&self) -> DragSource {
        self.source
    }

    pub fn source_is_grid_cell(&self) -> bool {
        self.source.is_grid_cell()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn hovered_cell(&self) -> Option<usize> {
        self.hovered_cell
    }

    /// Displacement of the latest sample from the origin
    pub fn delta(&self) -> Vec2 {
        self.last_sample.pos - self.origin.pos
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.last_sample.timestamp_ms.saturating_sub(self.origin.timestamp_ms)
    }
}

/// Floating copy of the dragged swatch that follows the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    pub position: Pos2,
    pub payload: ColorSwatch,
}

/// Drag-over indicator transition caused by one pointer move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragOverChange {
    pub left: Option<usize>,
    pub entered: Option<usize>,
}

impl DragOverChange {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// What the host should do after a pointer move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResponse {
    /// Stop the host from scrolling or refreshing for this move
    pub suppress_default: bool,
    /// This move committed the gesture to a drag
    pub drag_started: bool,
    pub drag_over: DragOverChange,
}

/// Terminal result of a gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureAction {
    Tap { payload: ColorSwatch },
    SwipeLeft,
    SwipeRight,
    Drop(DropAction),
}

/// Classifies a single pointer stream as a tap, a horizontal swipe, or a
/// drag-and-drop onto the palette grid.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    config: GestureConfig,
    session: Option<GestureSession>,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self { config, session: None }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn state(&self) -> GestureState {
        self.session.as_ref().map_or(GestureState::Idle, |s| s.state)
    }

    pub fn is_dragging(&self) -> bool {
        self.state() == GestureState::Dragging
    }

    /// The floating preview to draw, present only while dragging
    pub fn preview(&self) -> Option<DragPreview> {
        self.session
            .as_ref()
            .filter(|s| s.state == GestureState::Dragging)
            .map(|s| DragPreview {
                position: s.last_sample.pos,
                payload: s.payload.clone(),
            })
    }

    pub fn hovered_cell(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.hovered_cell)
    }

    /// Start tracking a touch or press on a swatch.
    ///
    /// A session still active from an earlier pointer is discarded.
    pub fn pointer_down(&mut self, sample: PointerSample, payload: ColorSwatch, source: DragSource) {
        if let Some(stale) = self.session.take() {
            log::debug!(
                "Discarding stale gesture session ({:?} from {:?})",
                stale.state,
                stale.source
            );
        }
        self.session = Some(GestureSession::new(sample, payload, source, GestureState::Undecided));
    }

    /// Feed a pointer move. Moves without an active session are ignored.
    pub fn pointer_move(&mut self, sample: PointerSample, hit: &dyn HitTester) -> MoveResponse {
        let config = &self.config;
        let Some(session) = self.session.as_mut() else {
            return MoveResponse::default();
        };
        session.last_sample = sample;
        let delta = session.delta();

        let mut response = MoveResponse::default();

        if session.state == GestureState::Undecided {
            let sideways = config.is_sideways(delta);

            if session.source == DragSource::Carousel && sideways {
                // Reserved for swipe; resolved at pointer-up
                if config.is_primarily_sideways(delta, config.swipe_threshold) {
                    session.confirmed = true;
                }
                response.suppress_default = true;
            } else if session.source.is_grid_cell()
                && config.is_primarily_sideways(delta, config.confirm_threshold)
            {
                session.state = GestureState::Dragging;
                session.confirmed = true;
                response.drag_started = true;
            } else if delta.length() >= config.confirm_threshold {
                session.state = GestureState::Dragging;
                session.confirmed = true;
                response.drag_started = true;
            }

            if delta.x.abs() > config.scroll_lock_distance || delta.y.abs() > config.scroll_lock_distance {
                response.suppress_default = true;
            }

            if response.drag_started {
                log::debug!("Drag started from {:?} after {:?}", session.source, delta);
            }
        }

        if session.state == GestureState::Dragging {
            response.suppress_default = true;
            response.drag_over = Self::track_hover(session, hit);
        }

        response
    }

    /// Finish the gesture and produce its terminal action.
    ///
    /// Returns `None` for a cancelled drag, an unresolved sideways carousel
    /// gesture, or a stray release with no session.
    pub fn pointer_up(&mut self, sample: PointerSample, hit: &dyn HitTester) -> Option<GestureAction> {
        let mut session = self.session.take()?;
        session.last_sample = sample;
        let delta = session.delta();

        match session.state {
            GestureState::Dragging => Self::resolve_drop(session, hit).map(GestureAction::Drop),
            GestureState::Undecided | GestureState::Idle => {
                // Grid cells never swipe
                if session.source == DragSource::Carousel
                    && self.config.is_primarily_sideways(delta, self.config.swipe_threshold)
                {
                    if delta.x < 0.0 {
                        Some(GestureAction::SwipeLeft)
                    } else {
                        Some(GestureAction::SwipeRight)
                    }
                } else if !session.confirmed && delta.length() < self.config.confirm_threshold {
                    Some(GestureAction::Tap { payload: session.payload })
                } else {
                    log::debug!("Gesture from {:?} ended unresolved at {:?}", session.source, delta);
                    None
                }
            }
        }
    }

    /// Abandon the current gesture without emitting anything
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Gesture cancelled");
        }
    }

    /// Desktop path: the host reported an explicit drag start, so no
    /// classification is needed.
    pub fn drag_start(&mut self, sample: PointerSample, payload: ColorSwatch, source: DragSource) {
        if self.session.is_some() {
            log::debug!("Drag start replaced an active gesture session");
        }
        self.session = Some(GestureSession::new(sample, payload, source, GestureState::Dragging));
    }

    /// Desktop path: pointer moved while dragging
    pub fn drag_over(&mut self, sample: PointerSample, hit: &dyn HitTester) -> DragOverChange {
        match self.session.as_mut() {
            Some(session) if session.state == GestureState::Dragging => {
                session.last_sample = sample;
                Self::track_hover(session, hit)
            }
            _ => DragOverChange::default(),
        }
    }

    /// Desktop path: the dragged swatch was released
    pub fn drop_at(&mut self, sample: PointerSample, hit: &dyn HitTester) -> Option<DropAction> {
        let mut session = self.session.take()?;
        if session.state != GestureState::Dragging {
            return None;
        }
        session.last_sample = sample;
        Self::resolve_drop(session, hit)
    }

    /// Desktop path: drop whose payload arrived as serialized transfer data.
    ///
    /// Malformed data is logged and produces no drop.
    pub fn drop_transfer(
        &mut self,
        data: &str,
        source: DragSource,
        sample: PointerSample,
        hit: &dyn HitTester,
    ) -> Option<DropAction> {
        self.session = None;
        let payload = match ColorSwatch::from_transfer(data) {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("Ignoring drop: {err}");
                return None;
            }
        };
        let target_cell = hit.cell_at(sample.pos)?;
        Some(DropAction {
            payload,
            target_cell,
            source,
        })
    }

    /// Desktop path: the drag ended without a drop
    pub fn drag_end(&mut self) {
        self.cancel();
    }

    fn track_hover(session: &mut GestureSession, hit: &dyn HitTester) -> DragOverChange {
        let current = hit.cell_at(session.last_sample.pos);
        if current == session.hovered_cell {
            return DragOverChange::default();
        }
        let change = DragOverChange {
            left: session.hovered_cell,
            entered: current,
        };
        session.hovered_cell = current;
        change
    }

    fn resolve_drop(session: GestureSession, hit: &dyn HitTester) -> Option<DropAction> {
        let target = hit.cell_at(session.last_sample.pos);
        match target {
            Some(target_cell) => Some(DropAction {
                payload: session.payload,
                target_cell,
                source: session.source,
            }),
            None => {
                log::debug!("Drag from {:?} released outside the grid", session.source);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swatch::Effect;

    fn swatch() -> ColorSwatch {
        ColorSwatch::new("Ruby", "#9B111E", Effect::Sparkly).unwrap()
    }

    fn no_cells(_: Pos2) -> Option<usize> {
        None
    }

    #[test]
    fn test_sideways_angle_bound() {
        let config = GestureConfig::default();
        assert!(config.is_sideways(Vec2::new(60.0, 0.0)));
        assert!(config.is_sideways(Vec2::new(-60.0, 30.0)));
        // ~33.7 degrees
        assert!(!config.is_sideways(Vec2::new(60.0, 40.0)));
        assert!(!config.is_sideways(Vec2::new(0.0, 0.0)));
        assert!(config.is_primarily_sideways(Vec2::new(20.0, 5.0), 20.0));
        assert!(!config.is_primarily_sideways(Vec2::new(19.0, 0.0), 20.0));
    }

    #[test]
    fn test_small_jitter_does_not_suppress_scroll() {
        let mut classifier = GestureClassifier::default();
        classifier.pointer_down(PointerSample::new(0.0, 0.0, 0), swatch(), DragSource::Carousel);
        let response = classifier.pointer_move(PointerSample::new(2.0, 4.0, 5), &no_cells);
        assert!(!response.suppress_default);

        let response = classifier.pointer_move(PointerSample::new(2.0, 8.0, 10), &no_cells);
        assert!(response.suppress_default);
        assert_eq!(classifier.state(), GestureState::Undecided);
    }

    #[test]
    fn test_stale_session_is_reset() {
        let mut classifier = GestureClassifier::default();
        classifier.pointer_down(PointerSample::new(0.0, 0.0, 0), swatch(), DragSource::Carousel);
        classifier.pointer_move(PointerSample::new(0.0, 40.0, 10), &no_cells);
        assert!(classifier.is_dragging());

        classifier.pointer_down(PointerSample::new(100.0, 100.0, 20), swatch(), DragSource::GridCell(3));
        let session = classifier.session().unwrap();
        assert_eq!(session.state(), GestureState::Undecided);
        assert_eq!(session.origin().pos, Pos2::new(100.0, 100.0));
        assert!(session.source_is_grid_cell());
    }

    #[test]
    fn test_preview_follows_pointer() {
        let mut classifier = GestureClassifier::default();
        classifier.pointer_down(PointerSample::new(0.0, 0.0, 0), swatch(), DragSource::Carousel);
        assert!(classifier.preview().is_none());

        classifier.pointer_move(PointerSample::new(5.0, 30.0, 16), &no_cells);
        classifier.pointer_move(PointerSample::new(8.0, 70.0, 32), &no_cells);
        let preview = classifier.preview().unwrap();
        assert_eq!(preview.position, Pos2::new(8.0, 70.0));
        assert_eq!(preview.payload, swatch());
        assert_eq!(classifier.session().unwrap().elapsed_ms(), 32);
    }

    #[test]
    fn test_stray_events_are_ignored() {
        let mut classifier = GestureClassifier::default();
        assert_eq!(
            classifier.pointer_move(PointerSample::new(50.0, 50.0, 0), &no_cells),
            MoveResponse::default()
        );
        assert!(classifier.pointer_up(PointerSample::new(50.0, 50.0, 0), &no_cells).is_none());
    }
}
