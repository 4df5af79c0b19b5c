//! Pipeline steps and the controller that moves between them.

use serde::{Deserialize, Serialize};

// =============================================================================
// STEP ENUM
// =============================================================================

/// Stage of the import pipeline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// File selection and parsing
    #[default]
    Upload,

    /// Header row selection; absent in skip-header mode
    RowSelection,

    /// Column mapping onto the template
    MapColumns,

    /// Payload delivered
    Complete,
}

impl Step {
    /// Get display name for the step.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Upload => "Upload",
            Self::RowSelection => "Select Header",
            Self::MapColumns => "Map Columns",
            Self::Complete => "Complete",
        }
    }

    /// Get all steps in order, regardless of mode.
    pub fn all() -> &'static [Step] {
        &[
            Self::Upload,
            Self::RowSelection,
            Self::MapColumns,
            Self::Complete,
        ]
    }

    /// Steps shown to the user for the given header mode.
    pub fn sequence(skip_header: bool) -> &'static [Step] {
        if skip_header {
            &[Self::Upload, Self::MapColumns, Self::Complete]
        } else {
            Self::all()
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// STEP CONTROLLER
// =============================================================================

/// Tracks the current step and applies next/back transitions.
///
/// Transitions never skip or repeat a step of the active sequence. `next` at
/// [`Step::Complete`] and `back` at [`Step::Upload`] leave the step unchanged,
/// and nothing leads back out of `Complete` except [`StepController::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepController {
    skip_header: bool,
    current: Step,
}

impl StepController {
    pub fn new(skip_header: bool) -> Self {
        Self {
            skip_header,
            current: Step::Upload,
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    pub fn skip_header(&self) -> bool {
        self.skip_header
    }

    /// Ordered steps for this controller's mode.
    pub fn steps(&self) -> &'static [Step] {
        Step::sequence(self.skip_header)
    }

    /// Position of the current step within [`steps`](Self::steps).
    pub fn index(&self) -> usize {
        self.steps()
            .iter()
            .position(|step| *step == self.current)
            .unwrap_or(0)
    }

    /// Advances one step and returns the new current step.
    pub fn next(&mut self) -> Step {
        self.current = match self.current {
            Step::Upload if self.skip_header => Step::MapColumns,
            Step::Upload => Step::RowSelection,
            Step::RowSelection => Step::MapColumns,
            Step::MapColumns | Step::Complete => Step::Complete,
        };
        self.current
    }

    /// Goes back one step and returns the new current step.
    pub fn back(&mut self) -> Step {
        self.current = match self.current {
            Step::Upload | Step::RowSelection => Step::Upload,
            Step::MapColumns if self.skip_header => Step::Upload,
            Step::MapColumns => Step::RowSelection,
            Step::Complete => Step::Complete,
        };
        self.current
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.current, Step::RowSelection | Step::MapColumns)
    }

    /// Returns to [`Step::Upload`].
    pub fn reset(&mut self) {
        self.current = Step::Upload;
    }

    /// Jumps to `step` if it belongs to this mode's sequence.
    pub fn restore(&mut self, step: Step) -> bool {
        if self.steps().contains(&step) {
            self.current = step;
            true
        } else {
            false
        }
    }
}
