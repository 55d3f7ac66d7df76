//! Stepper projection.
//!
//! Turns `{steps, current_index}` into per-step render state. The projection
//! has no state of its own and can be recomputed at any time.

use rf_protocol::flow_models::{StepDefinition, StepView};

/// Project `steps` with `current` as the active index.
///
/// A `current` past the end marks every step completed and none active.
pub fn project(steps: &[StepDefinition], current: usize) -> Vec<StepView> {
    let last = steps.len().saturating_sub(1);
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| StepView {
            label: step.label.clone(),
            is_completed: index < current,
            is_active: index == current,
            is_last: index == last,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_protocol::flow_models::FlowDefinition;

    #[test]
    fn test_project_marks_completed_active_and_last() {
        let flow = FlowDefinition::solo();
        let views = project(&flow.steps, 2);

        let flags: Vec<(bool, bool, bool)> = views
            .iter()
            .map(|v| (v.is_completed, v.is_active, v.is_last))
            .collect();
        assert_eq!(
            flags,
            vec![
                (true, false, false),
                (true, false, false),
                (false, true, false),
                (false, false, true),
            ]
        );
        assert_eq!(views[2].label, "Upload Documents");
    }

    #[test]
    fn test_project_is_pure() {
        let flow = FlowDefinition::team();
        for current in 0..flow.len() {
            assert_eq!(project(&flow.steps, current), project(&flow.steps, current));
        }
    }

    #[test]
    fn test_exactly_one_active_step() {
        let flow = FlowDefinition::team();
        for current in 0..flow.len() {
            let active = project(&flow.steps, current)
                .iter()
                .filter(|v| v.is_active)
                .count();
            assert_eq!(active, 1, "index {current}");
        }
    }

    #[test]
    fn test_single_step_is_active_and_last() {
        let steps = vec![StepDefinition::of(rf_protocol::flow_models::StepKind::Confirmation)];
        let views = project(&steps, 0);
        assert!(views[0].is_active && views[0].is_last && !views[0].is_completed);
    }

    #[test]
    fn test_empty_steps_project_to_nothing() {
        assert!(project(&[], 0).is_empty());
    }
}
