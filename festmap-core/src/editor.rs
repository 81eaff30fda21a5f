//! The admin workflow for drawing booth areas on the map.
//!
//! An [`Editor`] owns the working polygon of a single editing session.
//! Incoming booth snapshots never touch it, only the explicit gestures
//! below do.

use crate::{
    entities::*,
    gateways::map::MapEvent,
    geofence,
    throttle::{
        ClickDebounce, DragThrottle, VertexMove, DEFAULT_CLICK_DEBOUNCE, DEFAULT_DRAG_INTERVAL,
    },
    usecases::{BoothPatch, NewBooth},
    util::validate::{self, BoothInvalidation, Validate},
};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Collecting,
    EditingExisting(Id),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    Ignored,
    /// Index of the appended vertex.
    VertexAdded(usize),
    /// The tap hit an existing booth, no vertex was added.
    BoothHit(Id),
}

/// What [`Editor::handle_event`] did with a map gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Tapped(TapOutcome),
    Moved(Option<VertexMove>),
    Removed(Option<MapPoint>),
    /// Not an editing gesture, e.g. a zoom change.
    Unhandled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewBooth),
    Update(Id, BoothPatch),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("There is no active editing session")]
    NotEditing,
    #[error("There is no vertex at index {0}")]
    NoSuchVertex(usize),
    #[error(transparent)]
    Invalid(#[from] BoothInvalidation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    pub drag_interval: Duration,
    pub click_debounce: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drag_interval: DEFAULT_DRAG_INTERVAL,
            click_debounce: DEFAULT_CLICK_DEBOUNCE,
        }
    }
}

/// The form fields that accompany the polygon on submit.
#[rustfmt::skip]
#[derive(Default, Debug, Clone, PartialEq)]
pub struct BoothDraft {
    pub name            : String,
    pub category        : BoothCategory,
    pub description     : String,
    pub operating_hours : String,
    pub contact         : Option<String>,
    pub menu_items      : Vec<String>,
    pub price           : Option<String>,
    pub webcam_url      : Option<String>,
    pub max_capacity    : Option<u32>,
    pub tags            : Vec<String>,
}

impl From<&Booth> for BoothDraft {
    fn from(booth: &Booth) -> Self {
        Self {
            name: booth.name.clone(),
            category: booth.category,
            description: booth.description.clone(),
            operating_hours: booth.operating_hours.clone(),
            contact: booth.contact.clone(),
            menu_items: booth.menu_items.clone(),
            price: booth.price.clone(),
            webcam_url: booth.webcam_url.clone(),
            max_capacity: booth.liveness.max_capacity,
            tags: booth.tags.clone(),
        }
    }
}

impl BoothDraft {
    fn into_new_booth(self, area: MapPolygon) -> NewBooth {
        let Self {
            name,
            category,
            description,
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            max_capacity,
            tags,
        } = self;
        NewBooth {
            name,
            category,
            description,
            area,
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            max_capacity,
            tags,
        }
    }

    fn into_patch(self, area: MapPolygon) -> BoothPatch {
        let Self {
            name,
            category,
            description,
            operating_hours,
            contact,
            menu_items,
            price,
            webcam_url,
            max_capacity,
            tags,
        } = self;
        BoothPatch {
            name: Some(name),
            category: Some(category),
            description: Some(description),
            area: Some(area),
            operating_hours: Some(operating_hours),
            contact,
            menu_items: Some(menu_items),
            price,
            webcam_url,
            max_capacity,
            tags: Some(tags),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    state: EditorState,
    polygon: MapPolygon,
    throttle: DragThrottle,
    debounce: ClickDebounce,
    dragging: Option<usize>,
    // The click event that follows a drag release must not delete the vertex
    released: Option<usize>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            throttle: DragThrottle::new(config.drag_interval),
            debounce: ClickDebounce::new(config.click_debounce),
            ..Default::default()
        }
    }

    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    pub const fn polygon(&self) -> &MapPolygon {
        &self.polygon
    }

    pub fn is_editing(&self) -> bool {
        self.state != EditorState::Idle
    }

    /// The booth whose area is being modified, if any.
    pub fn target(&self) -> Option<&Id> {
        match &self.state {
            EditorState::EditingExisting(id) => Some(id),
            _ => None,
        }
    }

    pub const fn config(&self) -> EditorConfig {
        EditorConfig {
            drag_interval: self.throttle.interval(),
            click_debounce: self.debounce.window(),
        }
    }

    fn start(&mut self, state: EditorState, polygon: MapPolygon) {
        self.state = state;
        self.polygon = polygon;
        self.debounce.reset();
        self.forget_drag();
    }

    // Vertex indices shift whenever a vertex is removed
    fn forget_drag(&mut self) {
        self.throttle.reset();
        self.dragging = None;
        self.released = None;
    }

    /// Starts drawing a new booth, discarding any previous session.
    pub fn begin_new(&mut self) {
        self.start(EditorState::Collecting, MapPolygon::default());
    }

    pub fn begin_edit(&mut self, booth: &Booth) {
        log::debug!("Editing the area of booth {}", booth.id);
        self.start(
            EditorState::EditingExisting(booth.id.clone()),
            booth.area.clone(),
        );
    }

    /// Starts a new booth with a copy of an existing area.
    pub fn copy_as_template(&mut self, booth: &Booth) {
        self.start(EditorState::Collecting, booth.area.clone());
    }

    /// A tap on the map.
    ///
    /// Taps on an existing booth never add a vertex. The booth being
    /// edited is excluded so its own area can be refined.
    pub fn tap(&mut self, point: MapPoint, booths: &[Booth]) -> TapOutcome {
        let target = self.target();
        let hit = geofence::booth_at(
            booths.iter().filter(|b| Some(&b.id) != target),
            point,
        );
        if let Some(booth) = hit {
            return TapOutcome::BoothHit(booth.id.clone());
        }
        if !self.is_editing() || !point.is_valid() {
            return TapOutcome::Ignored;
        }
        self.polygon.push(point);
        TapOutcome::VertexAdded(self.polygon.len() - 1)
    }

    fn check_vertex(&self, index: usize) -> Result<(), EditError> {
        if !self.is_editing() {
            return Err(EditError::NotEditing);
        }
        if index >= self.polygon.len() {
            return Err(EditError::NoSuchVertex(index));
        }
        Ok(())
    }

    fn apply(&mut self, vertex_move: VertexMove) {
        self.polygon.replace(vertex_move.index, vertex_move.point);
    }

    /// Moves a vertex while dragging, at most once per drag interval.
    pub fn drag_move(
        &mut self,
        index: usize,
        point: MapPoint,
        now: Instant,
    ) -> Result<Option<VertexMove>, EditError> {
        self.check_vertex(index)?;
        self.dragging = Some(index);
        let applied = self.throttle.on_move(index, point, now);
        if let Some(m) = applied {
            self.apply(m);
        }
        Ok(applied)
    }

    /// Applies a coalesced drag update once it is due.
    pub fn drag_flush(&mut self, now: Instant) -> Option<VertexMove> {
        let applied = self.throttle.flush(now);
        if let Some(m) = applied {
            self.apply(m);
        }
        applied
    }

    /// Finishes a drag with the final position.
    pub fn drag_end(&mut self, index: usize, point: MapPoint) -> Result<VertexMove, EditError> {
        self.check_vertex(index)?;
        let last = self.throttle.on_release(index, point);
        self.apply(last);
        self.dragging = None;
        self.released = Some(index);
        Ok(last)
    }

    /// A click on a vertex marker removes that vertex.
    ///
    /// Returns `None` if the click was suppressed, either because it
    /// completes a drag of the same vertex or it follows the previous
    /// click within the debounce window.
    pub fn vertex_click(
        &mut self,
        index: usize,
        now: Instant,
    ) -> Result<Option<MapPoint>, EditError> {
        self.check_vertex(index)?;
        let released = self.released.take();
        if self.dragging == Some(index) || released == Some(index) {
            return Ok(None);
        }
        if !self.debounce.accept(now) {
            return Ok(None);
        }
        let removed = self.polygon.remove(index);
        if removed.is_some() {
            self.forget_drag();
        }
        Ok(removed)
    }

    /// Removes the most recently added vertex.
    pub fn undo(&mut self) -> Option<MapPoint> {
        if !self.is_editing() {
            return None;
        }
        let removed = self.polygon.pop();
        if removed.is_some() {
            self.forget_drag();
        }
        removed
    }

    /// Removes all vertices but keeps the session.
    pub fn reset(&mut self) {
        if !self.is_editing() {
            return;
        }
        let state = std::mem::take(&mut self.state);
        self.start(state, MapPolygon::default());
    }

    /// Dispatches a gesture reported by the map surface.
    pub fn handle_event(
        &mut self,
        event: MapEvent,
        booths: &[Booth],
    ) -> Result<EventOutcome, EditError> {
        let outcome = match event {
            MapEvent::Tap(point) => EventOutcome::Tapped(self.tap(point, booths)),
            MapEvent::MarkerDrag { index, point, at } => {
                EventOutcome::Moved(self.drag_move(index, point, at)?)
            }
            MapEvent::MarkerDragEnd { index, point } => {
                EventOutcome::Moved(Some(self.drag_end(index, point)?))
            }
            MapEvent::MarkerClick { index, at } => {
                EventOutcome::Removed(self.vertex_click(index, at)?)
            }
            MapEvent::LevelChanged(_) => EventOutcome::Unhandled,
        };
        Ok(outcome)
    }

    pub fn cancel(&mut self) {
        self.start(EditorState::Idle, MapPolygon::default());
    }

    /// Checks the draft and ends the session.
    ///
    /// On error the session is left untouched.
    pub fn submit(&mut self, draft: BoothDraft) -> Result<Submission, EditError> {
        if !self.is_editing() {
            return Err(EditError::NotEditing);
        }
        if !validate::is_valid_name(&draft.name) {
            return Err(BoothInvalidation::Name.into());
        }
        self.polygon
            .validate()
            .map_err(BoothInvalidation::Area)?;
        let state = std::mem::take(&mut self.state);
        let area = std::mem::take(&mut self.polygon);
        self.cancel();
        let submission = match state {
            EditorState::EditingExisting(id) => Submission::Update(id, draft.into_patch(area)),
            EditorState::Collecting | EditorState::Idle => {
                Submission::Create(draft.into_new_booth(area))
            }
        };
        Ok(submission)
    }
}
