mod home;
mod quiz;
mod report;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use quiz::QuizView;
pub use report::ReportView;
pub use state::{ViewError, ViewState, view_state_from_resource};
