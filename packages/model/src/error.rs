use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Unknown size tier: {0}")]
    UnknownSizeTier(String),

    #[error("Unknown heading level: {0}")]
    UnknownHeadingLevel(String),

    #[error("Unknown scripting mode: {0}")]
    UnknownScriptingMode(String),
}

/// Returned when an edit targets a field the block's type does not have
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Field '{field}' does not apply to {block_type} blocks")]
    NotApplicable {
        field: &'static str,
        block_type: String,
    },
}

impl FieldError {
    pub fn not_applicable(field: &'static str, block_type: impl Into<String>) -> Self {
        Self::NotApplicable {
            field,
            block_type: block_type.into(),
        }
    }
}
