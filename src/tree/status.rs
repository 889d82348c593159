//! Task status values and the authored-status state machine.

use std::fmt;

/// Status of a task node.
///
/// The first four values are authored by the operation that owns the node.
/// `RunningChild`, `FailedChild` and `RunningWithFailedChild` only ever appear
/// in the derived view computed for composite nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    Running,
    Success,
    Failed,
    RunningChild,
    FailedChild,
    RunningWithFailedChild,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Success => "success",
            TaskStatus::Failed => "failed",
            TaskStatus::RunningChild => "running-child",
            TaskStatus::FailedChild => "failed-child",
            TaskStatus::RunningWithFailedChild => "running-with-failed-child",
        }
    }

    /// Derived values are never stored as a node's own status.
    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            TaskStatus::RunningChild | TaskStatus::FailedChild | TaskStatus::RunningWithFailedChild
        )
    }

    pub fn is_failed_class(&self) -> bool {
        matches!(
            self,
            TaskStatus::Failed | TaskStatus::FailedChild | TaskStatus::RunningWithFailedChild
        )
    }

    pub fn is_running_class(&self) -> bool {
        matches!(
            self,
            TaskStatus::Running | TaskStatus::RunningChild | TaskStatus::RunningWithFailedChild
        )
    }

    /// Counts towards the `finished/total` figure and towards `is_done`.
    ///
    /// `RunningWithFailedChild` is not finished even though a branch failed.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            TaskStatus::Success | TaskStatus::Failed | TaskStatus::FailedChild
        )
    }

    /// Terminal authored values; once reached the owner cannot leave them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failed)
    }

    /// Whether the owner of a node may move its authored status to `next`.
    ///
    /// Re-asserting the current value is allowed and changes nothing.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        if *self == next {
            return !next.is_derived();
        }
        matches!(
            (self, next),
            (TaskStatus::Pending, TaskStatus::Running)
                | (TaskStatus::Running, TaskStatus::Success)
                | (TaskStatus::Running, TaskStatus::Failed)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status values a worker is allowed to submit for its own node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Progress {
    Running,
    Success,
    Failed,
}

impl From<Progress> for TaskStatus {
    fn from(progress: Progress) -> Self {
        match progress {
            Progress::Running => TaskStatus::Running,
            Progress::Success => TaskStatus::Success,
            Progress::Failed => TaskStatus::Failed,
        }
    }
}
