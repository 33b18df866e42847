use persona_core::model::QuestionId;
use persona_core::progress::{ProgressDenominator, ProgressState};
use services::{QuizSession, can_submit, required_answers};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub question_id: QuestionId,
    pub position_label: String,
    pub category: String,
    pub text: String,
    pub choices: Vec<ChoiceVm>,
    pub progress_percent: u32,
    pub progress_bar_width: u32,
    pub answered_label: String,
    pub can_prev: bool,
    /// Next is offered once the current question has an answer.
    pub can_next: bool,
    pub is_last: bool,
    pub can_submit: bool,
    pub submit_hint: Option<String>,
}

/// Screen state for the question the store points at.
///
/// Returns `None` when the quiz has no questions.
#[must_use]
pub fn map_quiz(
    quiz: &QuizSession,
    state: &ProgressState,
    denominator: ProgressDenominator,
) -> Option<QuizVm> {
    let index = state.current_question_index().min(quiz.last_index());
    let question = quiz.question_at(index)?;
    let total = quiz.questions.len();
    let selected = state.answer_for(question.id);

    let choices = question
        .options
        .choices()
        .into_iter()
        .map(|choice| ChoiceVm {
            selected: selected == Some(choice.value.as_str()),
            value: choice.value,
            label: choice.label,
        })
        .collect();

    let is_last = index == quiz.last_index();
    let submittable = can_submit(state);
    let submit_hint = (!submittable).then(|| {
        format!(
            "Answer at least {} questions to submit.",
            required_answers(state.total_questions())
        )
    });
    let progress_percent = state.progress_percentage(denominator);

    Some(QuizVm {
        question_id: question.id,
        position_label: format!("Question {} of {total}", index + 1),
        category: question.category.clone(),
        text: question.text.clone(),
        choices,
        progress_percent,
        progress_bar_width: progress_percent.min(100),
        answered_label: format!("Answered {} / {total}", state.answered_count()),
        can_prev: index > 0,
        can_next: selected.is_some() && !is_last,
        is_last,
        can_submit: submittable,
        submit_hint,
    })
}
