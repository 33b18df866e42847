mod answer;
mod api_settings;
mod ids;
mod question;
mod report;
mod session;
mod test_type;

pub use answer::{AnswerRecord, SubmissionReceipt, SubmittedAnswer};
pub use api_settings::{
    ApiSettings, ApiSettingsDraft, ApiSettingsError, DEFAULT_API_BASE_URL,
    DEFAULT_API_TIMEOUT_SECS,
};
pub use ids::{ParseIdError, QuestionId, SessionId, UserId};
pub use question::{Question, QuestionChoice, QuestionOptions};
pub use report::{ComprehensiveReport, ScoreLevel, TraitReport};
pub use session::{AnsweredEntry, LatestSession, SessionInfo, SessionStatus};
pub use test_type::{
    ColorTheme, ParseTestTypeError, TRAIT_PALETTE, TestType, TestTypeProfile, TraitInfo,
};
