use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("input did not contain a header row")]
    EmptyInput,

    #[error("input is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("required column '{column}' appears more than once in the header")]
    DuplicateColumn { column: String },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("failed to assemble movie frame: {message}")]
    Frame { message: String },
}
