//! The modelling host the chat drives.
//!
//! Commands are fire-and-forget: the session acknowledges a command in the
//! transcript, then hands it to the [`Host`] together with a [`Completion`].
//! The host resolves the completion whenever the work is finished, possibly
//! long after the session has moved on to later utterances. Resolved
//! completions arrive on an unbounded channel the session drains in its
//! event loop.

use std::fmt;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::slot::{Length, Translation};

/// A structured command for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    OpenModel,
    CleanModel,
    SelectFirstEntity,
    SelectFirstGroup,
    SelectGroupsNamed(String),
    SelectFirstComponent,
    SelectComponentsNamed(String),
    MoveSelection(Translation),
    RotateSelection { degrees: i64 },
    ScaleSelection { factor: f64 },
    RenameSelection(String),
    CopySelection(String),
    ClearSelection,
    EraseSelected,
    /// A host action identifier such as `selectPaintTool:`.
    SendAction(String),
    DrawBox {
        width: Length,
        depth: Length,
        height: Length,
    },
    DrawCone {
        radius: Length,
        height: Length,
    },
    DrawCylinder {
        radius: Length,
        height: Length,
    },
    DrawPrism {
        radius: Length,
        height: Length,
        sides: u32,
    },
    DrawPyramid {
        radius: Length,
        height: Length,
        sides: u32,
    },
    DrawSphere {
        radius: Length,
    },
    WriteText(String),
    SearchExtension(String),
    CloseSession,
}

impl HostCommand {
    /// The host-side operation name.
    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::OpenModel => "openModel",
            HostCommand::CleanModel => "cleanModel",
            HostCommand::SelectFirstEntity => "selectFirstEntity",
            HostCommand::SelectFirstGroup => "selectFirstGroup",
            HostCommand::SelectGroupsNamed(_) => "selectGroupsNamed",
            HostCommand::SelectFirstComponent => "selectFirstComponent",
            HostCommand::SelectComponentsNamed(_) => "selectComponentsNamed",
            HostCommand::MoveSelection(_) => "moveSelection",
            HostCommand::RotateSelection { .. } => "rotateSelection",
            HostCommand::ScaleSelection { .. } => "scaleSelection",
            HostCommand::RenameSelection(_) => "renameSelection",
            HostCommand::CopySelection(_) => "copySelection",
            HostCommand::ClearSelection => "clearSelection",
            HostCommand::EraseSelected => "eraseSelectedEntities",
            HostCommand::SendAction(_) => "sendAction",
            HostCommand::DrawBox { .. } => "drawBox",
            HostCommand::DrawCone { .. } => "drawCone",
            HostCommand::DrawCylinder { .. } => "drawCylinder",
            HostCommand::DrawPrism { .. } => "drawPrism",
            HostCommand::DrawPyramid { .. } => "drawPyramid",
            HostCommand::DrawSphere { .. } => "drawSphere",
            HostCommand::WriteText(_) => "writeText",
            HostCommand::SearchExtension(_) => "searchPlugin",
            HostCommand::CloseSession => "closeChatRoom",
        }
    }

    /// Whether the outcome of this command is reported back to the user.
    pub fn reports_outcome(&self) -> bool {
        !matches!(self, HostCommand::ClearSelection | HostCommand::CloseSession)
    }

    /// What to tell the user when the host found nothing to act on.
    pub fn not_found_phrase(&self) -> &'static str {
        match self {
            HostCommand::SelectFirstEntity => "No entity found!",
            HostCommand::SelectFirstGroup => "No group found!",
            HostCommand::SelectGroupsNamed(_) => "No matching group!",
            HostCommand::SelectFirstComponent => "No component found!",
            HostCommand::SelectComponentsNamed(_) => "No matching component!",
            HostCommand::MoveSelection(_)
            | HostCommand::RotateSelection { .. }
            | HostCommand::ScaleSelection { .. }
            | HostCommand::RenameSelection(_)
            | HostCommand::CopySelection(_) => "No grouponent found!",
            HostCommand::SendAction(_) => "No matching action!",
            _ => FAILED_PHRASE,
        }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        match self {
            HostCommand::SelectGroupsNamed(text)
            | HostCommand::SelectComponentsNamed(text)
            | HostCommand::RenameSelection(text)
            | HostCommand::CopySelection(text)
            | HostCommand::SendAction(text)
            | HostCommand::WriteText(text)
            | HostCommand::SearchExtension(text) => write!(f, "({text:?})"),
            HostCommand::MoveSelection(Translation { x, y, z }) => write!(f, "({x}, {y}, {z})"),
            HostCommand::RotateSelection { degrees } => write!(f, "({degrees})"),
            HostCommand::ScaleSelection { factor } => write!(f, "({factor})"),
            HostCommand::DrawBox {
                width,
                depth,
                height,
            } => write!(f, "({width}, {depth}, {height})"),
            HostCommand::DrawCone { radius, height }
            | HostCommand::DrawCylinder { radius, height } => write!(f, "({radius}, {height})"),
            HostCommand::DrawPrism {
                radius,
                height,
                sides,
            }
            | HostCommand::DrawPyramid {
                radius,
                height,
                sides,
            } => write!(f, "({radius}, {height}, {sides})"),
            HostCommand::DrawSphere { radius } => write!(f, "({radius})"),
            _ => Ok(()),
        }
    }
}

/// Phrase for a host failure that has no more specific wording.
pub const FAILED_PHRASE: &str = "Something goes wrong!";

/// How a host command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOutcome {
    Done,
    /// The host found nothing to act on.
    NotFound,
    /// The command needs a selection and there is none.
    NothingSelected,
    Failed,
}

/// A resolved completion, delivered to the session's event loop.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionEvent {
    pub command: HostCommand,
    pub outcome: HostOutcome,
}

/// The handle a host resolves once a command has finished.
#[derive(Debug)]
pub struct Completion {
    command: HostCommand,
    sender: UnboundedSender<CompletionEvent>,
}

impl Completion {
    pub fn new(command: HostCommand, sender: UnboundedSender<CompletionEvent>) -> Self {
        Completion { command, sender }
    }

    pub fn command(&self) -> &HostCommand {
        &self.command
    }

    /// Report the outcome. A session that has already gone away simply
    /// never hears about it.
    pub fn resolve(self, outcome: HostOutcome) {
        let event = CompletionEvent {
            command: self.command,
            outcome,
        };
        if self.sender.send(event).is_err() {
            tracing::debug!("completion dropped, session receiver is closed");
        }
    }
}

pub fn completion_channel() -> (
    UnboundedSender<CompletionEvent>,
    UnboundedReceiver<CompletionEvent>,
) {
    unbounded_channel()
}

/// The application that executes commands.
pub trait Host {
    fn invoke(&mut self, command: HostCommand, completion: Completion);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_delivers_event() {
        let (sender, mut receiver) = completion_channel();
        let completion = Completion::new(HostCommand::SelectFirstGroup, sender);
        assert_eq!(completion.command(), &HostCommand::SelectFirstGroup);
        completion.resolve(HostOutcome::NotFound);

        assert_eq!(
            receiver.try_recv().unwrap(),
            CompletionEvent {
                command: HostCommand::SelectFirstGroup,
                outcome: HostOutcome::NotFound,
            }
        );
    }

    #[test]
    fn resolving_after_session_is_gone_is_harmless() {
        let (sender, receiver) = completion_channel();
        drop(receiver);
        Completion::new(HostCommand::OpenModel, sender).resolve(HostOutcome::Done);
    }

    #[test]
    fn not_found_wording_depends_on_command() {
        assert_eq!(HostCommand::SelectFirstEntity.not_found_phrase(), "No entity found!");
        assert_eq!(
            HostCommand::RotateSelection { degrees: 90 }.not_found_phrase(),
            "No grouponent found!"
        );
        assert_eq!(
            HostCommand::SendAction("selectFooTool:".into()).not_found_phrase(),
            "No matching action!"
        );
        assert!(!HostCommand::ClearSelection.reports_outcome());
        assert!(!HostCommand::CloseSession.reports_outcome());
    }

    #[test]
    fn display_includes_arguments() {
        let command = HostCommand::MoveSelection(Translation {
            x: Length::new("-2m"),
            y: Length::zero(),
            z: Length::zero(),
        });
        assert_eq!(command.to_string(), "moveSelection(-2m, 0, 0)");
        assert_eq!(
            HostCommand::SelectGroupsNamed("Door".into()).to_string(),
            "selectGroupsNamed(\"Door\")"
        );
        assert_eq!(HostCommand::OpenModel.to_string(), "openModel");
    }
}
