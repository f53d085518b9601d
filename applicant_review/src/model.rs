// ********* Input data structures ***********

use std::collections::{HashMap, HashSet};

/// The result recorded for one evaluation category of one applicant.
///
/// The on-disk objects may carry more fields; only the score letter is
/// structurally relied upon.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CategoryScore {
    /// The categorical score letter, usually one of [CANONICAL_SCORES] but
    /// never restricted to it.
    pub score: String,
}

/// One applicant evaluation unit.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ApplicantRecord {
    pub name: String,
    /// Open categorical value. The observed domain is 남/여 but any string
    /// must be carried through unchanged.
    pub sex: String,
    /// `YYYY-MM-DD`-prefixed string. Only the leading year is ever parsed;
    /// sorting compares the raw string.
    pub birth_date: String,
    /// (question label, summary text) pairs in file order. The order drives
    /// the display tabs and must survive a load round-trip.
    pub summaries: Vec<(String, String)>,
    /// Per-category results, present once the applicant has been evaluated.
    /// Absence is a valid state, not an error.
    pub evaluation: Option<Vec<(String, CategoryScore)>>,
}

impl ApplicantRecord {
    /// The leading year of `birth_date`, when it parses as an integer.
    pub fn birth_year(&self) -> Option<i32> {
        self.birth_date.split('-').next()?.parse::<i32>().ok()
    }
}

// ********* Reference data ***********

/// Static reference data for one evaluation dimension.
///
/// This is declared data, not something derived from the records.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EvaluationCategory {
    pub name: String,
    pub description: String,
    /// (score letter, meaning) pairs in display order. The letters double as
    /// the declared valid score set for this category.
    pub criteria: Vec<(String, String)>,
    /// Display color (hex) used by the dashboard widgets.
    pub color: String,
}

impl EvaluationCategory {
    fn new(name: &str, description: &str, criteria: &[(&str, &str)], color: &str) -> Self {
        EvaluationCategory {
            name: name.to_string(),
            description: description.to_string(),
            criteria: criteria
                .iter()
                .map(|(letter, meaning)| (letter.to_string(), meaning.to_string()))
                .collect(),
            color: color.to_string(),
        }
    }

    /// The score letters this category declares as valid.
    pub fn valid_scores(&self) -> impl Iterator<Item = &str> {
        self.criteria.iter().map(|(letter, _)| letter.as_str())
    }
}

/// The printing order for score letters. The tally itself is open: letters
/// outside this list are still counted, they just never appear in the
/// fixed-order report.
pub const CANONICAL_SCORES: [&str; 6] = ["A", "B", "C", "G", "P", "NP"];

/// Labels of the age buckets used by the demographic statistics, in display
/// order.
pub const AGE_GROUP_LABELS: [&str; 4] = ["20대 초반", "20대 중반", "20대 후반", "30대 이상"];

/// The four evaluation categories of the application review, in the order
/// they are reported.
pub fn default_categories() -> Vec<EvaluationCategory> {
    vec![
        EvaluationCategory::new(
            "지원 동기 및 진정성",
            "지원 동기란에서 확인할 수 있는 goal-alignment에 대한 평가",
            &[
                ("A", "높은 목표의식, BIT와 본인의 목표가 명확하게 연계됨 (상위 7%)"),
                ("B", "적절한 목표의식, 일반적인 연계성 (약 53%)"),
                ("C", "불명확한 목표의식 또는 연계성 부족 (약 40%)"),
            ],
            "#047857",
        ),
        EvaluationCategory::new(
            "논리적 표현력",
            "글이 논리적인 흐름으로 작성되어 읽기 편한지에 대한 평가",
            &[
                ("A", "명확하고 논리적인 표현, 우수한 구성력 (상위 7%)"),
                ("B", "적절한 논리성과 표현력 (약 53%)"),
                ("C", "논리적 흐름 부족 또는 이해가 어려운 표현 (약 40%)"),
            ],
            "#CA8A04",
        ),
        EvaluationCategory::new(
            "활동경험",
            "높은 목표의식과 발전적 태도를 짐작할 수 있는 활동 이력 평가",
            &[
                ("G", "특출나고 특별한 경험을 보유 (상위 3%)"),
                ("NP", "일반적인 활동 경험 (약 97%)"),
            ],
            "#0369A1",
        ),
        EvaluationCategory::new(
            "성실성(성의)",
            "제출 기한 및 기본 양식 준수, GPT 사용 여부, 오탈자 등 평가",
            &[("P", "성실하게 작성됨"), ("NP", "성실성 부족")],
            "#7C3AED",
        ),
    ]
}

/// The built-in stopword list for the word frequency analysis.
pub fn default_stopwords() -> HashSet<String> {
    ["있는", "하는", "그리고", "그런", "이런", "저는", "이것", "정도"]
        .iter()
        .map(|w| w.to_string())
        .collect()
}

// ******** Output data structures *********

/// Derived score counts per category and overall.
///
/// A tally is recomputed fresh on every aggregation pass; it is never cached,
/// persisted or updated incrementally. Both maps are open counters over the
/// letters that were actually observed.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ScoreTally {
    /// category name -> (score letter -> count)
    pub per_category: HashMap<String, HashMap<String, u64>>,
    /// score letter -> count across all categories
    pub overall: HashMap<String, u64>,
    /// Number of records in the aggregated collection, evaluated or not.
    pub total_records: u64,
}

impl ScoreTally {
    pub fn category_count(&self, category: &str, score: &str) -> u64 {
        self.per_category
            .get(category)
            .and_then(|scores| scores.get(score))
            .copied()
            .unwrap_or(0)
    }

    pub fn overall_count(&self, score: &str) -> u64 {
        self.overall.get(score).copied().unwrap_or(0)
    }

    /// Every letter observed across all categories, sorted, including the
    /// letters that the fixed-order report would not show.
    pub fn observed_scores(&self) -> Vec<String> {
        let mut scores: Vec<String> = self.overall.keys().cloned().collect();
        scores.sort();
        scores
    }
}

/// Sort key for ordering records in the browse view.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SortKey {
    Name,
    BirthDate,
}
