//! The upload/configure stage: one candidate document plus constraints.

use super::constraints::{Level, StudyConstraints};
use super::document::Document;

/// Collects the submission and decides whether it may be sent.
///
/// The stage only checks the file type. Content validation is left to the
/// analysis service. It never touches the current result either; clearing that
/// is the orchestrator's job.
#[derive(Debug, Clone, Default)]
pub struct UploadStage {
    document: Option<Document>,
    constraints: StudyConstraints,
}

impl UploadStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a candidate document. The last accepted document wins.
    ///
    /// Unsupported types are dropped without surfacing an error; the previous
    /// candidate stays in place and `false` is returned.
    pub fn select_document(&mut self, document: Document) -> bool {
        match document.validate() {
            Ok(kind) => {
                tracing::debug!(
                    file_name = document.file_name(),
                    ?kind,
                    "Accepted candidate document"
                );
                self.document = Some(document);
                true
            }
            Err(err) => {
                tracing::debug!("Ignoring candidate document: {}", err);
                false
            }
        }
    }

    pub fn clear_document(&mut self) {
        self.document = None;
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn constraints(&self) -> StudyConstraints {
        self.constraints
    }

    /// Sets the number of weeks. Zero is ignored.
    pub fn set_weeks(&mut self, weeks: u32) -> bool {
        self.apply(self.constraints.with_weeks(weeks))
    }

    /// Sets the daily study hours. Non-positive or non-finite values are ignored.
    pub fn set_hours_per_day(&mut self, hours: f64) -> bool {
        self.apply(self.constraints.with_hours_per_day(hours))
    }

    pub fn set_level(&mut self, level: Level) {
        self.constraints = self.constraints.with_level(level);
    }

    /// A document is present and no analysis is in flight.
    pub fn submit_enabled(&self, in_flight: bool) -> bool {
        self.document.is_some() && !in_flight
    }

    fn apply(
        &mut self,
        candidate: Result<StudyConstraints, crate::error::ValidationError>,
    ) -> bool {
        match candidate {
            Ok(constraints) => {
                self.constraints = constraints;
                true
            }
            Err(err) => {
                tracing::debug!("Ignoring constraint update: {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> Document {
        Document::new(name, "application/pdf", b"%PDF-1.4".to_vec())
    }

    #[test]
    fn test_new_stage_is_empty_with_defaults() {
        let stage = UploadStage::new();
        assert!(stage.document().is_none());
        assert_eq!(stage.constraints(), StudyConstraints::default());
        assert!(!stage.submit_enabled(false));
    }

    #[test]
    fn test_last_write_wins() {
        let mut stage = UploadStage::new();
        assert!(stage.select_document(pdf("first.pdf")));
        assert!(stage.select_document(pdf("second.pdf")));
        assert_eq!(stage.document().unwrap().file_name(), "second.pdf");
    }

    #[test]
    fn test_unsupported_type_keeps_previous_candidate() {
        let mut stage = UploadStage::new();
        stage.select_document(pdf("syllabus.pdf"));

        let rejected = stage.select_document(Document::new("cat.png", "image/png", vec![0]));
        assert!(!rejected);
        assert_eq!(stage.document().unwrap().file_name(), "syllabus.pdf");
    }

    #[test]
    fn test_submit_enabled_requires_idle_controller() {
        let mut stage = UploadStage::new();
        stage.select_document(pdf("syllabus.pdf"));
        assert!(stage.submit_enabled(false));
        assert!(!stage.submit_enabled(true));
    }

    #[test]
    fn test_invalid_constraints_are_ignored() {
        let mut stage = UploadStage::new();
        assert!(stage.set_weeks(6));
        assert!(!stage.set_weeks(0));
        assert!(!stage.set_hours_per_day(-2.0));
        assert_eq!(stage.constraints().weeks(), 6);
        assert_eq!(stage.constraints().hours_per_day(), 10.0);
    }
}
