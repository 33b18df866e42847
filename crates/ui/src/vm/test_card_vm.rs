use persona_core::model::TestType;
use persona_core::progress::{ProgressDenominator, ProgressState};

use crate::vm::time_fmt::format_started_at;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestCardStatus {
    Available,
    Ongoing,
    Completed,
}

impl TestCardStatus {
    #[must_use]
    pub fn badge(self) -> Option<&'static str> {
        match self {
            TestCardStatus::Available => None,
            TestCardStatus::Ongoing => Some("In progress"),
            TestCardStatus::Completed => Some("Completed"),
        }
    }

    #[must_use]
    pub fn action_label(self) -> &'static str {
        match self {
            TestCardStatus::Available => "Start test",
            TestCardStatus::Ongoing => "Continue test",
            TestCardStatus::Completed => "View report",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCardVm {
    pub test_type: TestType,
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub estimated_time: &'static str,
    pub theme_class: &'static str,
    pub status: TestCardStatus,
    /// Only set while the quiz is ongoing.
    pub progress_percent: Option<u32>,
    pub progress_bar_width: u32,
    pub started_at: Option<String>,
}

/// One card per framework, in display order.
///
/// Progress on the home screen is measured against the fixed question count.
#[must_use]
pub fn map_test_cards(state: &ProgressState) -> Vec<TestCardVm> {
    TestType::ALL
        .iter()
        .map(|&test_type| {
            let profile = test_type.profile();
            let status = match state.current_test() {
                Some(current) if current == test_type && state.is_completed() => {
                    TestCardStatus::Completed
                }
                Some(current) if current == test_type => TestCardStatus::Ongoing,
                _ => TestCardStatus::Available,
            };
            let progress_percent = (status == TestCardStatus::Ongoing)
                .then(|| state.progress_percentage(ProgressDenominator::home_screen()));
            let started_at = (status == TestCardStatus::Ongoing)
                .then(|| state.start_time().and_then(format_started_at))
                .flatten();

            TestCardVm {
                test_type,
                title: profile.title,
                description: profile.description,
                features: profile.features,
                estimated_time: profile.estimated_time,
                theme_class: profile.theme.css_class(),
                status,
                progress_percent,
                progress_bar_width: progress_percent.unwrap_or(0).min(100),
                started_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use persona_core::model::{QuestionId, UserId};
    use persona_core::progress::{ProgressAction, reduce};

    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn apply(actions: Vec<ProgressAction>) -> ProgressState {
        actions
            .into_iter()
            .fold(ProgressState::default(), |state, action| {
                reduce(state, action, NOW).0
            })
    }

    fn start(test_type: TestType, total: u32) -> ProgressAction {
        ProgressAction::StartTest {
            test_type,
            user_id: UserId::new("user_vm"),
            total_questions: total,
        }
    }

    fn answer(id: u32) -> ProgressAction {
        ProgressAction::AnswerQuestion {
            question_id: QuestionId::new(id),
            answer: "A".into(),
        }
    }

    #[test]
    fn idle_state_shows_every_test_available() {
        let cards = map_test_cards(&ProgressState::default());
        assert_eq!(cards.len(), 4);
        assert!(cards.iter().all(|card| card.status == TestCardStatus::Available));
        assert!(cards.iter().all(|card| card.progress_percent.is_none()));
        assert_eq!(cards[0].test_type, TestType::Mbti);
    }

    #[test]
    fn ongoing_quiz_uses_fixed_denominator() {
        let mut actions = vec![start(TestType::Disc, 12)];
        actions.extend((1..=6).map(answer));
        let cards = map_test_cards(&apply(actions));

        let disc = cards
            .iter()
            .find(|card| card.test_type == TestType::Disc)
            .unwrap();
        assert_eq!(disc.status, TestCardStatus::Ongoing);
        assert_eq!(disc.progress_percent, Some(20));
        assert_eq!(disc.started_at.as_deref(), Some("2023-11-14 22:13 UTC"));
        assert_eq!(disc.status.action_label(), "Continue test");

        let mbti = cards
            .iter()
            .find(|card| card.test_type == TestType::Mbti)
            .unwrap();
        assert_eq!(mbti.status, TestCardStatus::Available);
    }

    #[test]
    fn completed_quiz_offers_report() {
        let state = apply(vec![
            start(TestType::Big5, 3),
            answer(1),
            ProgressAction::CompleteTest,
        ]);
        let big5 = map_test_cards(&state)
            .into_iter()
            .find(|card| card.test_type == TestType::Big5)
            .unwrap();
        assert_eq!(big5.status, TestCardStatus::Completed);
        assert_eq!(big5.progress_percent, None);
        assert_eq!(big5.status.action_label(), "View report");
    }

    #[test]
    fn bar_width_is_clamped() {
        let mut actions = vec![start(TestType::Mbti, 40)];
        actions.extend((1..=36).map(answer));
        let mbti = map_test_cards(&apply(actions)).remove(0);
        assert_eq!(mbti.progress_percent, Some(120));
        assert_eq!(mbti.progress_bar_width, 100);
    }
}
