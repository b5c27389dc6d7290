//! Scripted and typed drivers for a [`WorkflowController`].
//!
//! An [`Action`] is one user action. Scripts are lists of actions stored as
//! JSON or TOML and are replayed with [`replay`]; the interactive front-end
//! turns typed lines into actions with [`Action::parse_command`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TranscriberError, WorkflowError};
use crate::workflow::{Snapshot, WorkflowController};

/// A single user action against the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    BeginSelection {
        x: f64,
        y: f64,
    },
    UpdateSelection {
        start_x: f64,
        start_y: f64,
        x: f64,
        y: f64,
    },
    /// Full drag in one go: begin, update and confirm.
    Select {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    ConfirmSelection,
    CancelSelection,
    Submit {
        value: String,
    },
    SkipStep,
    PreviousStep,
    /// Zero-based step index.
    GotoStep {
        step: usize,
    },
    FinishRecord,
    SkipRecord,
    PreviousRecord,
}

impl Action {
    pub fn apply(&self, wf: &mut WorkflowController) -> Result<Snapshot, WorkflowError> {
        match self {
            Action::BeginSelection { x, y } => Ok(wf.begin_selection(*x, *y)),
            Action::UpdateSelection {
                start_x,
                start_y,
                x,
                y,
            } => Ok(wf.update_selection(*start_x, *start_y, *x, *y)),
            Action::Select { x1, y1, x2, y2 } => {
                wf.begin_selection(*x1, *y1);
                wf.update_selection(*x1, *y1, *x2, *y2);
                Ok(wf.confirm_selection())
            }
            Action::ConfirmSelection => Ok(wf.confirm_selection()),
            Action::CancelSelection => Ok(wf.cancel_selection()),
            Action::Submit { value } => wf.submit_step(value),
            Action::SkipStep => wf.skip_step(),
            Action::PreviousStep => wf.previous_step(),
            Action::GotoStep { step } => wf.goto_step(*step),
            Action::FinishRecord => Ok(wf.finish_record()),
            Action::SkipRecord => Ok(wf.skip_record()),
            Action::PreviousRecord => Ok(wf.previous_record()),
        }
    }

    /// Parses one line typed by the user.
    ///
    /// Lines starting with `:` are commands (`:select x1 y1 x2 y2`, `:cancel`,
    /// `:skip`, `:back`, `:goto N` with a one-based `N`, `:finish`,
    /// `:skip-record`, `:prev-record`). Anything else is submitted as the
    /// value of the current field.
    pub fn parse_command(line: &str) -> Result<Self, TranscriberError> {
        let Some(command) = line.trim().strip_prefix(':') else {
            return Ok(Action::Submit {
                value: line.trim_end_matches(['\r', '\n']).to_string(),
            });
        };

        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let action = match (name, args.as_slice()) {
            ("select", [x1, y1, x2, y2]) => Action::Select {
                x1: parse_coord(x1)?,
                y1: parse_coord(y1)?,
                x2: parse_coord(x2)?,
                y2: parse_coord(y2)?,
            },
            ("cancel", []) => Action::CancelSelection,
            ("skip", []) => Action::SkipStep,
            ("back", []) => Action::PreviousStep,
            ("goto", [n]) => {
                let n: usize = n
                    .parse()
                    .map_err(|_| TranscriberError::Script(format!("not a step number: {n}")))?;
                if n == 0 {
                    return Err(TranscriberError::Script("steps are numbered from 1".into()));
                }
                Action::GotoStep { step: n - 1 }
            }
            ("finish", []) => Action::FinishRecord,
            ("skip-record", []) => Action::SkipRecord,
            ("prev-record", []) => Action::PreviousRecord,
            _ => {
                return Err(TranscriberError::Script(format!(
                    "unknown command: :{command}"
                )));
            }
        };
        Ok(action)
    }
}

fn parse_coord(raw: &str) -> Result<f64, TranscriberError> {
    raw.parse()
        .map_err(|_| TranscriberError::Script(format!("not a coordinate: {raw}")))
}

/// An ordered list of actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Script {
    /// Reads a script, choosing TOML for `.toml` files and JSON otherwise.
    pub fn from_path(path: &Path) -> Result<Self, TranscriberError> {
        let contents = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(serde_json::from_str(&contents)?)
        }
    }
}

/// Result of replaying one action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub action: Action,
    pub result: Result<Snapshot, WorkflowError>,
}

/// Applies every action in order. Rejected actions are recorded and the
/// replay carries on, since they leave the workflow unchanged.
pub fn replay(wf: &mut WorkflowController, script: &Script) -> Vec<ActionOutcome> {
    script
        .actions
        .iter()
        .map(|action| {
            let result = action.apply(wf);
            if let Err(err) = &result {
                tracing::warn!(?action, %err, "action rejected");
            }
            ActionOutcome {
                action: action.clone(),
                result,
            }
        })
        .collect()
}
