use std::collections::BTreeMap;

use crate::model::{QuestionId, TestType, UserId};

use super::state::ProgressState;

/// Everything that can happen to the progress of a quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressAction {
    StartTest {
        test_type: TestType,
        user_id: UserId,
        total_questions: u32,
    },
    AnswerQuestion {
        question_id: QuestionId,
        answer: String,
    },
    NextQuestion,
    PrevQuestion,
    CompleteTest,
    ResetTest,
    /// Adopt a snapshot previously written by the store.
    LoadProgress(ProgressState),
}

impl ProgressAction {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ProgressAction::StartTest { .. } => "start_test",
            ProgressAction::AnswerQuestion { .. } => "answer_question",
            ProgressAction::NextQuestion => "next_question",
            ProgressAction::PrevQuestion => "prev_question",
            ProgressAction::CompleteTest => "complete_test",
            ProgressAction::ResetTest => "reset_test",
            ProgressAction::LoadProgress(_) => "load_progress",
        }
    }
}

/// What the durable mirror has to do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistEffect {
    /// Overwrite the stored snapshot with the new state.
    Write,
    /// Remove the stored snapshot.
    Delete,
    /// Leave durable storage untouched.
    Skip,
}

/// Applies `action` to `state`.
///
/// Pure apart from `now_millis`, which stamps `start_time` on a new quiz.
/// Answers arriving while no quiz is active are dropped.
#[must_use]
pub fn reduce(
    state: ProgressState,
    action: ProgressAction,
    now_millis: i64,
) -> (ProgressState, PersistEffect) {
    let next = match action {
        ProgressAction::StartTest {
            test_type,
            user_id,
            total_questions,
        } => ProgressState {
            current_test: Some(test_type),
            current_question_index: 0,
            answers: BTreeMap::new(),
            is_completed: false,
            user_id,
            total_questions,
            start_time: Some(now_millis),
        },
        ProgressAction::AnswerQuestion {
            question_id,
            answer,
        } => {
            if state.current_test.is_none() {
                return (state, PersistEffect::Skip);
            }
            let mut next = state;
            next.answers.insert(question_id, answer);
            next
        }
        ProgressAction::NextQuestion => ProgressState {
            current_question_index: state.current_question_index.saturating_add(1),
            ..state
        },
        ProgressAction::PrevQuestion => ProgressState {
            current_question_index: state.current_question_index.saturating_sub(1),
            ..state
        },
        ProgressAction::CompleteTest => {
            let next = ProgressState {
                is_completed: true,
                ..state
            };
            return (next, PersistEffect::Delete);
        }
        ProgressAction::ResetTest => return (ProgressState::default(), PersistEffect::Delete),
        ProgressAction::LoadProgress(snapshot) => snapshot,
    };

    let effect = if next.is_active() {
        PersistEffect::Write
    } else {
        PersistEffect::Skip
    };
    (next, effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressDenominator;

    const NOW: i64 = 1_700_000_000_000;

    fn run(state: ProgressState, actions: Vec<ProgressAction>) -> (ProgressState, PersistEffect) {
        actions
            .into_iter()
            .fold((state, PersistEffect::Skip), |(state, _), action| {
                reduce(state, action, NOW)
            })
    }

    fn start(total: u32) -> ProgressAction {
        ProgressAction::StartTest {
            test_type: TestType::Mbti,
            user_id: UserId::new("user_1"),
            total_questions: total,
        }
    }

    fn answer(id: u32, value: &str) -> ProgressAction {
        ProgressAction::AnswerQuestion {
            question_id: QuestionId::new(id),
            answer: value.to_string(),
        }
    }

    #[test]
    fn start_resets_progress_and_stamps_time() {
        let (state, _) = run(
            ProgressState::default(),
            vec![start(10), answer(1, "A"), ProgressAction::NextQuestion],
        );
        let (state, effect) = reduce(state, start(20), NOW + 5);
        assert_eq!(effect, PersistEffect::Write);
        assert_eq!(state.current_test(), Some(TestType::Mbti));
        assert_eq!(state.current_question_index(), 0);
        assert!(state.answers().is_empty());
        assert_eq!(state.total_questions(), 20);
        assert_eq!(state.start_time(), Some(NOW + 5));
    }

    #[test]
    fn distinct_answers_count_once_each_in_any_order() {
        let (forward, _) = run(
            ProgressState::default(),
            vec![start(30), answer(1, "A"), answer(2, "B"), answer(3, "A")],
        );
        let (backward, _) = run(
            ProgressState::default(),
            vec![start(30), answer(3, "A"), answer(2, "B"), answer(1, "A")],
        );
        assert_eq!(forward.answered_count(), 3);
        assert_eq!(forward.answers(), backward.answers());
    }

    #[test]
    fn re_answering_overwrites_without_growing() {
        let (state, effect) = run(
            ProgressState::default(),
            vec![start(30), answer(5, "A"), answer(5, "B")],
        );
        assert_eq!(effect, PersistEffect::Write);
        assert_eq!(state.answered_count(), 1);
        assert_eq!(state.answer_for(QuestionId::new(5)), Some("B"));
    }

    #[test]
    fn answer_without_active_test_is_ignored() {
        let (state, effect) = reduce(ProgressState::default(), answer(1, "A"), NOW);
        assert_eq!(effect, PersistEffect::Skip);
        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn prev_question_stops_at_zero() {
        let (state, _) = run(
            ProgressState::default(),
            vec![start(3), ProgressAction::PrevQuestion, ProgressAction::PrevQuestion],
        );
        assert_eq!(state.current_question_index(), 0);

        let (state, _) = run(
            state,
            vec![
                ProgressAction::NextQuestion,
                ProgressAction::NextQuestion,
                ProgressAction::PrevQuestion,
            ],
        );
        assert_eq!(state.current_question_index(), 1);
    }

    #[test]
    fn next_question_is_not_bounded_by_total() {
        let (state, _) = run(
            ProgressState::default(),
            vec![
                start(1),
                ProgressAction::NextQuestion,
                ProgressAction::NextQuestion,
            ],
        );
        assert_eq!(state.current_question_index(), 2);
    }

    #[test]
    fn navigation_without_test_is_not_persisted() {
        let (state, effect) = reduce(ProgressState::default(), ProgressAction::NextQuestion, NOW);
        assert_eq!(state.current_question_index(), 1);
        assert_eq!(effect, PersistEffect::Skip);
    }

    #[test]
    fn mbti_walkthrough_matches_expected_progress() {
        let (state, effect) = run(
            ProgressState::default(),
            vec![
                start(30),
                answer(1, "A"),
                answer(2, "B"),
                ProgressAction::NextQuestion,
                ProgressAction::NextQuestion,
            ],
        );
        assert_eq!(effect, PersistEffect::Write);
        assert_eq!(state.answered_count(), 2);
        assert_eq!(state.current_question_index(), 2);
        assert_eq!(state.progress_percentage(ProgressDenominator::Dynamic), 7);

        let (completed, effect) = reduce(state, ProgressAction::CompleteTest, NOW);
        assert_eq!(effect, PersistEffect::Delete);
        assert!(completed.is_completed());
        assert_eq!(completed.answered_count(), 2);
    }

    #[test]
    fn reset_always_returns_defaults() {
        let (state, _) = run(
            ProgressState::default(),
            vec![start(9), answer(1, "A"), ProgressAction::CompleteTest],
        );
        let (reset, effect) = reduce(state, ProgressAction::ResetTest, NOW);
        assert_eq!(effect, PersistEffect::Delete);
        assert_eq!(reset, ProgressState::default());

        let (reset_again, _) = reduce(ProgressState::default(), ProgressAction::ResetTest, NOW);
        assert_eq!(reset_again, ProgressState::default());
    }

    #[test]
    fn load_replaces_state_wholesale() {
        let (snapshot, _) = run(
            ProgressState::default(),
            vec![start(4), answer(2, "B"), ProgressAction::NextQuestion],
        );
        let (other, _) = run(ProgressState::default(), vec![start(10), answer(7, "A")]);
        let (loaded, effect) = reduce(other, ProgressAction::LoadProgress(snapshot.clone()), NOW);
        assert_eq!(loaded, snapshot);
        assert_eq!(effect, PersistEffect::Write);
    }
}
