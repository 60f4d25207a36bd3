use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid field path: {0:?}")]
    InvalidField(String),

    #[error("Operator '{operator}' on field '{field}' requires an array value")]
    ExpectedList { field: String, operator: &'static str },
}
