mod model;
pub mod builder;
pub mod manual;
pub mod quick_start;

use log::{debug, info};

use regex::Regex;
use std::collections::{HashMap, HashSet};

pub use crate::model::*;

/// Read-only store of every loaded applicant record.
///
/// The store is populated once at startup and never mutated afterwards.
/// Every derived structure (tally, filtered list, frequency table) is
/// recomputed from it on demand.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RecordStore {
    records: Vec<ApplicantRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<ApplicantRecord>) -> RecordStore {
        RecordStore { records }
    }

    pub fn records(&self) -> &[ApplicantRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApplicantRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by the (name, birth date) pair the dashboard uses
    /// to disambiguate duplicate names. The first match wins.
    pub fn find_by_name_birth(&self, name: &str, birth_date: &str) -> Option<&ApplicantRecord> {
        self.records
            .iter()
            .find(|r| r.name == name && r.birth_date == birth_date)
    }
}

/// Tallies score letters per evaluation category and overall.
///
/// Records without an evaluation and entries naming a category outside
/// `categories` are skipped: an applicant that has not been evaluated yet is
/// a valid state, not an error. Score letters outside a category's declared
/// set are still counted. The tally is an open counter over observed
/// letters, not a validator.
///
/// The per-category and the overall counter are incremented in the same
/// branch, so every (record, category) pair is visited exactly once and the
/// overall counts always equal the per-category sums.
pub fn tally_scores(records: &[ApplicantRecord], categories: &[EvaluationCategory]) -> ScoreTally {
    info!(
        "Tallying scores for {:?} records over {:?} categories",
        records.len(),
        categories.len()
    );
    let known: HashSet<&str> = categories.iter().map(|c| c.name.as_str()).collect();

    let mut tally = ScoreTally {
        total_records: records.len() as u64,
        ..ScoreTally::default()
    };
    for record in records.iter() {
        let evaluation = match &record.evaluation {
            Some(entries) => entries,
            None => {
                debug!("tally_scores: {} has no evaluation yet", record.name);
                continue;
            }
        };
        for (category, result) in evaluation.iter() {
            if !known.contains(category.as_str()) {
                debug!(
                    "tally_scores: skipping unknown category {:?} of {}",
                    category, record.name
                );
                continue;
            }
            let per = tally.per_category.entry(category.clone()).or_default();
            *per.entry(result.score.clone()).or_insert(0) += 1;
            *tally.overall.entry(result.score.clone()).or_insert(0) += 1;
        }
    }
    tally
}

/// Applies the browse-view filters to the records.
///
/// `sex_exact` must equal the record's sex exactly (case-sensitive, no
/// normalization). `name_substring` matches when its locale-naive lowercase
/// form is a substring of the lowercased name. The two criteria are
/// AND-combined and a missing criterion passes every record. The input order
/// is preserved.
pub fn filter_records<'a>(
    records: &'a [ApplicantRecord],
    name_substring: Option<&str>,
    sex_exact: Option<&str>,
) -> Vec<&'a ApplicantRecord> {
    let needle = name_substring.map(|s| s.to_lowercase());
    let kept: Vec<&ApplicantRecord> = records
        .iter()
        .filter(|r| match sex_exact {
            Some(sex) => r.sex == sex,
            None => true,
        })
        .filter(|r| match &needle {
            Some(n) => r.name.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .collect();
    debug!("filter_records: kept {} of {} records", kept.len(), records.len());
    kept
}

/// Case-SENSITIVE substring search over record names.
///
/// This is deliberately a different predicate from the case-insensitive name
/// matching of [filter_records]: the dashboard exposes both behaviors at
/// different call sites and the two must not be unified.
pub fn search_by_name<'a>(records: &'a [ApplicantRecord], query: &str) -> Vec<&'a ApplicantRecord> {
    records.iter().filter(|r| r.name.contains(query)).collect()
}

/// Orders records for display.
///
/// The sort is stable and compares the raw string field: birth dates order
/// lexicographically, not chronologically. Descending reverses the
/// comparator, so records with equal keys keep their input order either way.
pub fn sort_records<'a>(
    records: &[&'a ApplicantRecord],
    key: SortKey,
    ascending: bool,
) -> Vec<&'a ApplicantRecord> {
    let mut sorted: Vec<&ApplicantRecord> = records.to_vec();
    sorted.sort_by(|a, b| {
        let (ka, kb) = match key {
            SortKey::Name => (&a.name, &b.name),
            SortKey::BirthDate => (&a.birth_date, &b.birth_date),
        };
        if ascending {
            ka.cmp(kb)
        } else {
            kb.cmp(ka)
        }
    });
    sorted
}

/// Returns the `n` most frequent words of `text` with their counts.
///
/// Tokens are maximal runs of word characters (letters, digits, connector
/// punctuation). Tokens of a single character and tokens present in
/// `stopwords` (exact match, case-sensitive) are dropped. Ties are broken by
/// first-encountered order. An empty result is a valid outcome.
pub fn top_words(text: &str, stopwords: &HashSet<String>, n: usize) -> Vec<(String, u64)> {
    let word_re = Regex::new(r"\w+").expect("valid regex");

    let mut counts: HashMap<String, u64> = HashMap::new();
    // Words in first-encountered order, so that the stable sort below keeps
    // the most-common tie semantics.
    let mut order: Vec<String> = Vec::new();
    for token in word_re.find_iter(text) {
        let word = token.as_str();
        if word.chars().count() <= 1 || stopwords.contains(word) {
            continue;
        }
        match counts.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                counts.insert(word.to_string(), 1);
                order.push(word.to_string());
            }
        }
    }

    let mut ranked: Vec<(String, u64)> = order
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            (word, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Counts records per observed `sex` value.
///
/// The 남 and 여 rows are always present, in that order, even when empty;
/// any further observed value is appended in first-observed order.
pub fn sex_distribution(records: &[ApplicantRecord]) -> Vec<(String, u64)> {
    let mut rows: Vec<(String, u64)> = vec![("남".to_string(), 0), ("여".to_string(), 0)];
    for record in records.iter() {
        match rows.iter_mut().find(|(sex, _)| *sex == record.sex) {
            Some(row) => row.1 += 1,
            None => rows.push((record.sex.clone(), 1)),
        }
    }
    rows
}

/// Buckets applicants by the age derived from the leading birth year.
///
/// Records whose birth year does not parse are skipped. All buckets are
/// present in the result, in the order of [AGE_GROUP_LABELS].
pub fn age_groups(records: &[ApplicantRecord], current_year: i32) -> Vec<(String, u64)> {
    let mut rows: Vec<(String, u64)> = AGE_GROUP_LABELS
        .iter()
        .map(|label| (label.to_string(), 0))
        .collect();
    for record in records.iter() {
        let year = match record.birth_year() {
            Some(y) => y,
            None => {
                debug!(
                    "age_groups: skipping unparseable birth date {:?} of {}",
                    record.birth_date, record.name
                );
                continue;
            }
        };
        let idx = match current_year - year {
            age if age < 23 => 0,
            age if age < 27 => 1,
            age if age < 30 => 2,
            _ => 3,
        };
        rows[idx].1 += 1;
    }
    rows
}
