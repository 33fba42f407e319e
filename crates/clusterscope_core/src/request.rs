use std::fmt;

use crate::{ClusteringMethod, SelectedFile};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisPayload {
    Text(String),
    Files(Vec<SelectedFile>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub method: ClusteringMethod,
    pub payload: AnalysisPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingMethod,
    ConflictingInputs,
    EmptyInput,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingMethod => write!(f, "Please select a clustering method."),
            ValidationError::ConflictingInputs => {
                write!(f, "Please provide either text or files, not both.")
            }
            ValidationError::EmptyInput => {
                write!(f, "Please enter text or select files to analyze.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks that a method is chosen and exactly one input mode is populated.
/// Whitespace-only text counts as empty.
pub fn build_request(
    method: Option<ClusteringMethod>,
    text: &str,
    files: &[SelectedFile],
) -> Result<AnalysisRequest, ValidationError> {
    let method = method.ok_or(ValidationError::MissingMethod)?;
    let has_text = !text.trim().is_empty();
    let payload = match (has_text, files.is_empty()) {
        (true, false) => return Err(ValidationError::ConflictingInputs),
        (false, true) => return Err(ValidationError::EmptyInput),
        (true, true) => AnalysisPayload::Text(text.to_string()),
        (false, false) => AnalysisPayload::Files(files.to_vec()),
    };
    Ok(AnalysisRequest { method, payload })
}

#[cfg(test)]
mod tests {
    use super::{build_request, AnalysisPayload, ValidationError};
    use crate::{ClusteringMethod, SelectedFile};

    #[test]
    fn missing_method_is_reported_first() {
        let files = vec![SelectedFile::new("a.txt", 1)];
        assert_eq!(
            build_request(None, "text", &files),
            Err(ValidationError::MissingMethod)
        );
    }

    #[test]
    fn whitespace_text_counts_as_empty() {
        let method = Some(ClusteringMethod::Neural);
        assert_eq!(
            build_request(method, " \n\t", &[]),
            Err(ValidationError::EmptyInput)
        );
        let files = vec![SelectedFile::new("a.txt", 1)];
        let request = build_request(method, "   ", &files).unwrap();
        assert_eq!(request.payload, AnalysisPayload::Files(files));
    }

    #[test]
    fn text_is_sent_verbatim() {
        let request = build_request(Some(ClusteringMethod::Ontology), "  one\ntwo\n", &[]).unwrap();
        assert_eq!(request.payload, AnalysisPayload::Text("  one\ntwo\n".to_string()));
    }
}
