mod quiz_vm;
mod report_vm;
mod test_card_vm;
mod time_fmt;

pub use quiz_vm::{ChoiceVm, QuizVm, map_quiz};
pub use report_vm::{ReportVm, ScoreCardVm, map_report};
pub use test_card_vm::{TestCardStatus, TestCardVm, map_test_cards};
pub use time_fmt::{format_elapsed, format_started_at};
