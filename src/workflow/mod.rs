mod answers;
mod controller;
mod events;
mod guide;
mod records;
mod steps;

pub use answers::{Answer, AnswerStore};
pub use controller::WorkflowController;
pub use events::{Change, FieldView, FinishedRecord, Snapshot, SubscriptionId, WorkflowEvent};
pub use guide::{Guide, GuideStep, InputKind, Placeholder};
pub use records::RecordSequencer;
pub use steps::StepSequencer;
