use thiserror::Error;

use crate::model::{ApiSettingsError, ParseIdError, ParseTestTypeError};
use crate::progress::ProgressError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TestType(#[from] ParseTestTypeError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
    #[error(transparent)]
    ApiSettings(#[from] ApiSettingsError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
