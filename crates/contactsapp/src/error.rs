use crate::model::ContactId;
use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactsError {
    #[error("Contact not found: {0}")]
    ContactNotFound(ContactId),

    #[error("A contact with id {0} already exists")]
    DuplicateId(ContactId),

    #[error("Invalid {mode} bound: {value:?}")]
    InvalidBound { mode: &'static str, value: String },

    #[error("Unknown field: {0}")]
    InvalidField(String),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ContactsError>;
