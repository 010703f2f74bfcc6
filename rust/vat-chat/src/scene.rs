//! A simulated modelling host.
//!
//! The scene is a flat list of entities held in memory with a selection set
//! on top. Nothing is rendered and nothing persists; every command is
//! carried out against the list and its completion resolved on the spot.
//! The CLI drives this host, and tests use it to observe what the chat
//! asked for.

use url::form_urlencoded;

use crate::host::{Completion, Host, HostCommand, HostOutcome};
use crate::slot::{Length, Translation};

/// Where the extension search sends the user.
pub const PLUGIN_STORE_URL: &str = "https://sketchucation.com/pluginstore";

/// Tool actions the simulated host knows how to activate.
pub const KNOWN_ACTIONS: &[&str] = &[
    "selectSelectionTool:",
    "selectEraseTool:",
    "selectPaintTool:",
    "selectLineTool:",
    "selectArcTool:",
    "selectRectangleTool:",
    "selectCircleTool:",
    "selectPolygonTool:",
    "selectPushPullTool:",
    "selectMoveTool:",
    "selectRotateTool:",
    "selectScaleTool:",
    "selectOffsetTool:",
    "selectExtrudeTool:",
    "selectMeasureTool:",
    "selectProtractorTool:",
    "selectAxisTool:",
    "selectDimensionTool:",
    "selectTextTool:",
    "selectOrbitTool:",
    "selectZoomTool:",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Loose geometry: edges and faces.
    Geometry,
    Group,
    Component,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: usize,
    pub kind: EntityKind,
    pub name: String,
    /// Offset from the origin in meters.
    pub position: [f64; 3],
    /// Rotation about the vertical axis, in degrees.
    pub rotation: i64,
    pub scale: f64,
}

impl Entity {
    /// Groups and components can be moved, rotated, scaled, renamed and
    /// copied; loose geometry and text cannot.
    pub fn is_grouponent(&self) -> bool {
        matches!(self.kind, EntityKind::Group | EntityKind::Component)
    }
}

#[derive(Debug, Default)]
pub struct SimulatedHost {
    entities: Vec<Entity>,
    selection: Vec<usize>,
    next_id: usize,
    model_open: bool,
    active_action: Option<String>,
    last_search: Option<String>,
    closed: bool,
}

impl SimulatedHost {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// A small scene to talk about: loose geometry, a named group and two
    /// instances of a window component.
    pub fn demo() -> Self {
        let mut host = Self::new();
        host.add(EntityKind::Geometry, "Ground");
        host.add(EntityKind::Group, "Front Door");
        host.add(EntityKind::Component, "Window");
        host.add(EntityKind::Component, "Window");
        host
    }

    /// Add an entity at the origin and return its id.
    pub fn add(&mut self, kind: EntityKind, name: impl Into<String>) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            kind,
            name: name.into(),
            position: [0.0; 3],
            rotation: 0,
            scale: 1.0,
        });
        id
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: usize) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// The selected entities, in selection order.
    pub fn selected(&self) -> Vec<&Entity> {
        self.selection
            .iter()
            .filter_map(|id| self.entity(*id))
            .collect()
    }

    pub fn is_model_open(&self) -> bool {
        self.model_open
    }

    pub fn active_action(&self) -> Option<&str> {
        self.active_action.as_deref()
    }

    /// The plugin store address of the last extension search.
    pub fn last_search(&self) -> Option<&str> {
        self.last_search.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn select_where(&mut self, keep: impl Fn(&Entity) -> bool, first_only: bool) -> HostOutcome {
        let mut found = self.entities.iter().filter(|entity| keep(entity));
        let selection: Vec<usize> = if first_only {
            found.next().map(|entity| entity.id).into_iter().collect()
        } else {
            found.map(|entity| entity.id).collect()
        };
        if selection.is_empty() {
            return HostOutcome::NotFound;
        }
        self.selection = selection;
        HostOutcome::Done
    }

    /// Run `apply` on every selected group or component.
    fn transform(&mut self, apply: impl Fn(&mut Entity)) -> HostOutcome {
        if self.selection.is_empty() {
            return HostOutcome::NothingSelected;
        }
        let mut touched = false;
        for entity in &mut self.entities {
            if self.selection.contains(&entity.id) && entity.is_grouponent() {
                apply(entity);
                touched = true;
            }
        }
        if touched {
            HostOutcome::Done
        } else {
            HostOutcome::NotFound
        }
    }

    fn translate(&mut self, translation: &Translation) -> HostOutcome {
        let offset = [&translation.x, &translation.y, &translation.z].map(Length::meters);
        let [Some(dx), Some(dy), Some(dz)] = offset else {
            return HostOutcome::Failed;
        };
        self.transform(|entity| {
            entity.position[0] += dx;
            entity.position[1] += dy;
            entity.position[2] += dz;
        })
    }

    fn copy_selection(&mut self, name: &str) -> HostOutcome {
        if self.selection.is_empty() {
            return HostOutcome::NothingSelected;
        }
        let originals: Vec<Entity> = self
            .selected()
            .into_iter()
            .filter(|entity| entity.is_grouponent())
            .cloned()
            .collect();
        if originals.is_empty() {
            return HostOutcome::NotFound;
        }
        let mut copies = Vec::with_capacity(originals.len());
        for original in originals {
            let id = self.next_id;
            self.next_id += 1;
            self.entities.push(Entity {
                id,
                name: name.to_string(),
                ..original
            });
            copies.push(id);
        }
        self.selection = copies;
        HostOutcome::Done
    }

    fn erase_selected(&mut self) -> HostOutcome {
        if self.selection.is_empty() {
            return HostOutcome::NothingSelected;
        }
        let selection = std::mem::take(&mut self.selection);
        self.entities.retain(|entity| !selection.contains(&entity.id));
        HostOutcome::Done
    }

    /// Drawn shapes land in the scene as a group named after the shape.
    fn draw(&mut self, shape: &str, lengths: &[&Length]) -> HostOutcome {
        let valid = lengths
            .iter()
            .all(|length| length.meters().is_some_and(|meters| meters > 0.0));
        if !valid {
            return HostOutcome::Failed;
        }
        let id = self.add(EntityKind::Group, shape);
        self.selection = vec![id];
        HostOutcome::Done
    }

    fn search(&mut self, topic: &str) -> HostOutcome {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("search", topic)
            .finish();
        let url = format!("{PLUGIN_STORE_URL}?{query}");
        tracing::info!(%url, "opening plugin store");
        self.last_search = Some(url);
        HostOutcome::Done
    }

    fn perform(&mut self, command: &HostCommand) -> HostOutcome {
        match command {
            HostCommand::OpenModel => {
                self.model_open = true;
                HostOutcome::Done
            }
            HostCommand::CleanModel => {
                let before = self.entities.len();
                self.entities
                    .retain(|entity| entity.kind != EntityKind::Geometry || !entity.name.is_empty());
                tracing::debug!(purged = before - self.entities.len(), "cleaned model");
                HostOutcome::Done
            }
            HostCommand::SelectFirstEntity => self.select_where(|_| true, true),
            HostCommand::SelectFirstGroup => {
                self.select_where(|entity| entity.kind == EntityKind::Group, true)
            }
            HostCommand::SelectGroupsNamed(name) => self.select_where(
                |entity| entity.kind == EntityKind::Group && entity.name.eq_ignore_ascii_case(name),
                false,
            ),
            HostCommand::SelectFirstComponent => {
                self.select_where(|entity| entity.kind == EntityKind::Component, true)
            }
            HostCommand::SelectComponentsNamed(name) => self.select_where(
                |entity| {
                    entity.kind == EntityKind::Component && entity.name.eq_ignore_ascii_case(name)
                },
                false,
            ),
            HostCommand::MoveSelection(translation) => self.translate(translation),
            HostCommand::RotateSelection { degrees } => {
                let degrees = *degrees;
                self.transform(|entity| {
                    entity.rotation = (entity.rotation + degrees.rem_euclid(360)).rem_euclid(360)
                })
            }
            HostCommand::ScaleSelection { factor } => {
                if *factor <= 0.0 {
                    return HostOutcome::Failed;
                }
                let factor = *factor;
                self.transform(|entity| entity.scale *= factor)
            }
            HostCommand::RenameSelection(name) => {
                self.transform(|entity| entity.name = name.clone())
            }
            HostCommand::CopySelection(name) => self.copy_selection(name),
            HostCommand::ClearSelection => {
                self.selection.clear();
                HostOutcome::Done
            }
            HostCommand::EraseSelected => self.erase_selected(),
            HostCommand::SendAction(action) => {
                if KNOWN_ACTIONS.contains(&action.as_str()) {
                    self.active_action = Some(action.clone());
                    HostOutcome::Done
                } else {
                    HostOutcome::NotFound
                }
            }
            HostCommand::DrawBox {
                width,
                depth,
                height,
            } => self.draw("Box", &[width, depth, height]),
            HostCommand::DrawCone { radius, height } => self.draw("Cone", &[radius, height]),
            HostCommand::DrawCylinder { radius, height } => {
                self.draw("Cylinder", &[radius, height])
            }
            HostCommand::DrawPrism {
                radius,
                height,
                sides,
            } => {
                if *sides < 3 {
                    return HostOutcome::Failed;
                }
                self.draw("Prism", &[radius, height])
            }
            HostCommand::DrawPyramid {
                radius,
                height,
                sides,
            } => {
                if *sides < 3 {
                    return HostOutcome::Failed;
                }
                self.draw("Pyramid", &[radius, height])
            }
            HostCommand::DrawSphere { radius } => self.draw("Sphere", &[radius]),
            HostCommand::WriteText(text) => {
                self.add(EntityKind::Text, text.clone());
                HostOutcome::Done
            }
            HostCommand::SearchExtension(topic) => self.search(topic),
            HostCommand::CloseSession => {
                self.closed = true;
                HostOutcome::Done
            }
        }
    }
}

impl Host for SimulatedHost {
    fn invoke(&mut self, command: HostCommand, completion: Completion) {
        let outcome = self.perform(&command);
        tracing::debug!(%command, ?outcome, "host command finished");
        if command.reports_outcome() {
            completion.resolve(outcome);
        }
    }
}
