//! Helpers to assemble [ApplicantRecord] values in code.
//!
//! The builder exists for tests and for embedders that produce records from
//! some other source than the JSON export. Records coming from a file go
//! through the loader of the command-line tool instead.

use crate::model::{ApplicantRecord, CategoryScore};

/// Builder pattern for [ApplicantRecord].
///
/// ```rust
/// use applicant_review::builder::RecordBuilder;
///
/// let record = RecordBuilder::new("홍길동", "남", "1999-03-02")
///     .summary("지원 동기", "사람들에게 도움이 되는 일을 하고 싶습니다.")
///     .score("지원 동기 및 진정성", "A")
///     .build();
/// assert_eq!(record.name, "홍길동");
/// assert_eq!(record.summaries.len(), 1);
/// ```
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RecordBuilder {
    name: String,
    sex: String,
    birth_date: String,
    summaries: Vec<(String, String)>,
    evaluation: Vec<(String, CategoryScore)>,
}

impl RecordBuilder {
    pub fn new(name: &str, sex: &str, birth_date: &str) -> RecordBuilder {
        RecordBuilder {
            name: name.to_string(),
            sex: sex.to_string(),
            birth_date: birth_date.to_string(),
            summaries: Vec::new(),
            evaluation: Vec::new(),
        }
    }

    /// Appends a summarized answer section. Sections keep insertion order.
    pub fn summary(mut self, label: &str, text: &str) -> RecordBuilder {
        self.summaries.push((label.to_string(), text.to_string()));
        self
    }

    /// Appends an evaluation entry. The letter is stored as given, the
    /// builder does not restrict it to a category's declared set.
    pub fn score(mut self, category: &str, score: &str) -> RecordBuilder {
        self.evaluation.push((
            category.to_string(),
            CategoryScore {
                score: score.to_string(),
            },
        ));
        self
    }

    /// Finalizes the record. A builder without any scores produces a record
    /// with no evaluation at all, matching an applicant not yet reviewed.
    pub fn build(self) -> ApplicantRecord {
        let evaluation = if self.evaluation.is_empty() {
            None
        } else {
            Some(self.evaluation)
        };
        ApplicantRecord {
            name: self.name,
            sex: self.sex,
            birth_date: self.birth_date,
            summaries: self.summaries,
            evaluation,
        }
    }
}
