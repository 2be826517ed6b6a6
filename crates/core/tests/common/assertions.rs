//! Custom assertion helpers over recorded render instructions.

use mdc_protocol::ipc::RenderInstruction;

/// Compact view of the stage lifecycle instructions, in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageEvent {
    Activated(usize),
    Progress(usize, f64),
    Completed(usize),
}

pub fn stage_events(instructions: &[RenderInstruction]) -> Vec<StageEvent> {
    instructions
        .iter()
        .filter_map(|instruction| match instruction {
            RenderInstruction::StageActivated { stage_index, .. } => {
                Some(StageEvent::Activated(*stage_index))
            }
            RenderInstruction::StageProgress {
                stage_index,
                percent,
                ..
            } => Some(StageEvent::Progress(*stage_index, *percent)),
            RenderInstruction::StageCompleted { stage_index, .. } => {
                Some(StageEvent::Completed(*stage_index))
            }
            _ => None,
        })
        .collect()
}

/// Assert that stages ran strictly one after another.
///
/// Every stage is activated exactly once, only after the previous stage
/// completed, and all of its progress updates fall between its own
/// activation and completion.
pub fn assert_strict_stage_order(instructions: &[RenderInstruction], stage_count: usize) {
    let events = stage_events(instructions);
    let mut active: Option<usize> = None;
    let mut next = 0;

    for event in &events {
        match *event {
            StageEvent::Activated(index) => {
                assert_eq!(active, None, "stage {index} activated while another is active");
                assert_eq!(index, next, "stage {index} activated out of order");
                active = Some(index);
            }
            StageEvent::Progress(index, _) => {
                assert_eq!(active, Some(index), "progress for inactive stage {index}");
            }
            StageEvent::Completed(index) => {
                assert_eq!(active, Some(index), "stage {index} completed while not active");
                active = None;
                next += 1;
            }
        }
    }

    assert_eq!(next, stage_count, "not every stage completed");
}

/// Assert that a progress series never decreases.
pub fn assert_monotonic(values: &[f64]) {
    for pair in values.windows(2) {
        assert!(pair[0] <= pair[1], "progress went backwards: {pair:?}");
    }
}

/// Position of the first instruction matching `predicate`.
pub fn position_of(
    instructions: &[RenderInstruction],
    predicate: impl Fn(&RenderInstruction) -> bool,
) -> Option<usize> {
    instructions.iter().position(predicate)
}

pub fn count_matching(
    instructions: &[RenderInstruction],
    predicate: impl Fn(&RenderInstruction) -> bool,
) -> usize {
    instructions.iter().filter(|i| predicate(i)).count()
}
