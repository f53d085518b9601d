use log::{debug, info, warn};

use applicant_review::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use std::collections::{HashMap, HashSet};
use text_diff::print_diff;

use crate::args::Args;
use crate::review::io_json::*;

/// How many words the analysis prints per summary section.
const TOP_WORDS: usize = 10;

/// How many queries the recent-search list remembers.
pub const MAX_RECENT_SEARCHES: usize = 5;

#[derive(Debug, Snafu)]
pub enum ReviewError {
    #[snafu(display("Error opening file {path}"))]
    OpeningSource {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Input is not a valid record export"))]
    MalformedSource { source: serde_json::Error },
    #[snafu(display("Record {index} is missing the required field {field}"))]
    MissingField { field: &'static str, index: usize },
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type ReviewResult<T> = Result<T, ReviewError>;

pub mod io_json {
    use crate::review::*;

    /// A record as present in the export, before validation.
    ///
    /// The identity fields are optional here so that a missing one can be
    /// reported with the index of the offending record instead of a generic
    /// deserialization failure.
    #[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
    pub struct RawApplicant {
        pub user_name: Option<String>,
        pub user_sex: Option<String>,
        pub user_birth: Option<String>,
        #[serde(default)]
        pub summarization: JSMap<String, JSValue>,
        pub evaluation_result: Option<JSMap<String, JSValue>>,
    }

    /// Reads and validates a record export. The summary sections and the
    /// evaluation entries keep the order they have in the file.
    pub fn load_records(path: &str) -> ReviewResult<Vec<ApplicantRecord>> {
        info!("Reading records from {}", path);
        let contents = fs::read_to_string(path).context(OpeningSourceSnafu { path })?;
        let raw: Vec<RawApplicant> =
            serde_json::from_str(contents.as_str()).context(MalformedSourceSnafu {})?;
        let mut records: Vec<ApplicantRecord> = Vec::new();
        for (index, r) in raw.iter().enumerate() {
            records.push(validate_record(index, r)?);
        }
        Ok(records)
    }

    pub fn validate_record(index: usize, raw: &RawApplicant) -> ReviewResult<ApplicantRecord> {
        let name = raw.user_name.clone().context(MissingFieldSnafu {
            field: "user_name",
            index,
        })?;
        let sex = raw.user_sex.clone().context(MissingFieldSnafu {
            field: "user_sex",
            index,
        })?;
        let birth_date = raw.user_birth.clone().context(MissingFieldSnafu {
            field: "user_birth",
            index,
        })?;

        let mut summaries: Vec<(String, String)> = Vec::new();
        for (label, value) in raw.summarization.iter() {
            match value {
                JSValue::String(text) => summaries.push((label.clone(), text.clone())),
                x => {
                    whatever!(
                        "Summary section {:?} of record {} is not text: {:?}",
                        label,
                        index,
                        x
                    )
                }
            }
        }

        // An evaluation entry without a score is skipped, an evaluation
        // missing entirely stays None. Both are valid states for an
        // applicant that has not been fully reviewed.
        let evaluation = match &raw.evaluation_result {
            None => None,
            Some(entries) => {
                let mut scores: Vec<(String, CategoryScore)> = Vec::new();
                for (category, data) in entries.iter() {
                    match data.get("score").and_then(|s| s.as_str()) {
                        Some(score) => scores.push((
                            category.clone(),
                            CategoryScore {
                                score: score.to_string(),
                            },
                        )),
                        None => {
                            debug!(
                                "Record {}: no score in category {:?}, skipping",
                                index, category
                            );
                        }
                    }
                }
                Some(scores)
            }
        };

        Ok(ApplicantRecord {
            name,
            sex,
            birth_date,
            summaries,
            evaluation,
        })
    }

    pub fn read_summary(path: String) -> ReviewResult<JSValue> {
        let contents =
            fs::read_to_string(path.clone()).context(OpeningSourceSnafu { path })?;
        debug!("read content: {:?}", contents);
        let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        Ok(js)
    }
}

/// The queries of a search run, newest last.
///
/// A query already present is not recorded again and the oldest entry is
/// dropped once the list exceeds [MAX_RECENT_SEARCHES]. Empty queries are
/// ignored.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SearchSession {
    recent: Vec<String>,
}

impl SearchSession {
    pub fn new() -> SearchSession {
        SearchSession { recent: Vec::new() }
    }

    pub fn record_query(&mut self, query: &str) {
        if query.is_empty() || self.recent.iter().any(|q| q == query) {
            return;
        }
        self.recent.push(query.to_string());
        if self.recent.len() > MAX_RECENT_SEARCHES {
            self.recent.remove(0);
        }
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct SummaryConfig {
    source: String,
    #[serde(rename = "totalApplicants")]
    total_applicants: u64,
}

/// The letters of a score map in print order: the canonical letters first,
/// then any other observed letter in sorted order.
fn score_letters(observed: &HashMap<String, u64>) -> Vec<String> {
    let mut letters: Vec<String> = CANONICAL_SCORES.iter().map(|s| s.to_string()).collect();
    let mut extras: Vec<String> = observed
        .keys()
        .filter(|k| !CANONICAL_SCORES.contains(&k.as_str()))
        .cloned()
        .collect();
    extras.sort();
    letters.extend(extras);
    letters
}

fn tally_to_json(tally: &ScoreTally, categories: &[EvaluationCategory]) -> Vec<JSValue> {
    let empty: HashMap<String, u64> = HashMap::new();
    let mut l: Vec<JSValue> = Vec::new();
    for category in categories.iter() {
        let observed = tally.per_category.get(&category.name).unwrap_or(&empty);
        let mut scores: JSMap<String, JSValue> = JSMap::new();
        for letter in score_letters(observed) {
            let count = observed.get(&letter).copied().unwrap_or(0);
            scores.insert(letter, json!(count));
        }
        let js = json!({"category": category.name, "scores": scores});
        l.push(js);
    }
    l
}

fn build_summary_js(
    input_path: &str,
    tally: &ScoreTally,
    categories: &[EvaluationCategory],
) -> JSValue {
    let c = SummaryConfig {
        source: simplify_file_name(input_path),
        total_applicants: tally.total_records,
    };
    let mut overall: JSMap<String, JSValue> = JSMap::new();
    for letter in score_letters(&tally.overall) {
        let count = tally.overall_count(letter.as_str());
        overall.insert(letter, json!(count));
    }
    json!({
        "config": c,
        "categories": tally_to_json(tally, categories),
        "overall": overall })
}

fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

fn read_sort_key(sort_by: &Option<String>) -> ReviewResult<SortKey> {
    match sort_by.as_deref() {
        None | Some("name") => Ok(SortKey::Name),
        Some("birth") => Ok(SortKey::BirthDate),
        Some(x) => {
            whatever!("Cannot use sort key {:?}: expected name or birth", x)
        }
    }
}

fn write_summary(out_path: &str, pretty_js_summary: &str) -> ReviewResult<()> {
    match out_path {
        "" | "stdout" => {
            println!("{}", pretty_js_summary);
        }
        path => {
            info!("Writing summary to {}", path);
            fs::write(path, pretty_js_summary).context(WritingSummarySnafu { path })?;
        }
    }
    Ok(())
}

fn check_reference(path: String, pretty_js_summary: &str) -> ReviewResult<()> {
    let summary_ref = read_summary(path)?;
    info!("summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_summary {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_summary, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    Ok(())
}

fn print_score_report(tally: &ScoreTally, categories: &[EvaluationCategory]) {
    println!("=== 평가 항목별 점수 분포 ===");
    for category in categories.iter() {
        println!();
        println!("{}:", category.name);
        for letter in CANONICAL_SCORES.iter() {
            let count = tally.category_count(category.name.as_str(), letter);
            println!("  {}: {}명", letter, count);
        }
    }
    println!();
    println!("=== 전체 점수 분포 ===");
    for letter in CANONICAL_SCORES.iter() {
        println!("{}: {}개", letter, tally.overall_count(letter));
    }
    println!();
    println!("총 지원자 수: {}명", tally.total_records);
}

fn print_category_legend(categories: &[EvaluationCategory]) {
    println!("=== 평가 항목 안내 ===");
    for category in categories.iter() {
        println!();
        println!("{}: {}", category.name, category.description);
        for (letter, criterion) in category.criteria.iter() {
            println!("  {}: {}", letter, criterion);
        }
    }
}

fn print_applicant_table(records: &[&ApplicantRecord]) {
    println!("이름\t성별\t생년월일\t문항 수");
    for record in records.iter() {
        println!(
            "{}\t{}\t{}\t{}",
            record.name,
            record.sex,
            record.birth_date,
            record.summaries.len()
        );
    }
}

fn print_word_analysis(records: &[&ApplicantRecord], stopwords: &HashSet<String>) {
    for record in records.iter() {
        println!();
        println!("{} ({}, {})", record.name, record.sex, record.birth_date);
        if record.summaries.is_empty() {
            println!("요약된 지원서 정보가 없습니다.");
            continue;
        }
        for (label, text) in record.summaries.iter() {
            println!("[{}]", label);
            let words = top_words(text.as_str(), stopwords, TOP_WORDS);
            if words.is_empty() {
                println!("  분석할 단어가 충분하지 않습니다.");
            } else {
                for (word, count) in words {
                    println!("  {}: {}", word, count);
                }
            }
        }
    }
}

fn print_demographics(records: &[ApplicantRecord], current_year: i32) {
    println!("=== 성별 분포 ===");
    for (sex, count) in sex_distribution(records) {
        println!("{}: {}명", sex, count);
    }
    println!();
    println!("=== 연령대별 지원자 분포 ===");
    for (group, count) in age_groups(records, current_year) {
        println!("{}: {}명", group, count);
    }
    println!();
    println!("총 지원자 수: {}명", records.len());
}

fn browse_requested(args: &Args) -> bool {
    let other_action = args.report
        || args.stats
        || args.categories
        || args.search.is_some()
        || args.out.is_some()
        || args.reference.is_some();
    args.name.is_some()
        || args.sex.is_some()
        || args.sort_by.is_some()
        || args.descending
        || args.analyze
        || !other_action
}

fn needs_records(args: &Args) -> bool {
    args.report
        || args.stats
        || args.search.is_some()
        || args.out.is_some()
        || args.reference.is_some()
        || browse_requested(args)
}

pub fn run_review(args: &Args) -> ReviewResult<()> {
    let categories = default_categories();
    if args.categories {
        print_category_legend(&categories);
    }

    let input_path = match &args.input {
        Some(p) => p.clone(),
        // The legend needs no records.
        None if args.categories && !needs_records(args) => return Ok(()),
        None => {
            whatever!("No input file given. Pass the record export with --input.")
        }
    };
    let sort_key = read_sort_key(&args.sort_by)?;
    let records = load_records(input_path.as_str())?;
    let store = RecordStore::new(records);
    info!("Loaded {} records from {}", store.len(), input_path);

    let stopwords = default_stopwords();
    let tally = tally_scores(store.records(), &categories);

    if args.report {
        print_score_report(&tally, &categories);
    }

    if args.stats {
        print_demographics(store.records(), chrono::Utc::now().year());
    }

    if let Some(queries) = &args.search {
        let mut session = SearchSession::new();
        for query in queries.iter() {
            let found = search_by_name(store.records(), query.as_str());
            session.record_query(query.as_str());
            if found.is_empty() {
                println!("'{}' 이름의 지원자를 찾을 수 없습니다.", query);
                continue;
            }
            println!(
                "'{}' 검색 결과: {}명의 지원자를 찾았습니다!",
                query,
                found.len()
            );
            print_applicant_table(&found);
            if args.analyze {
                print_word_analysis(&found, &stopwords);
            }
        }
        if session.recent().len() > 1 {
            println!();
            println!("최근 검색: {}", session.recent().join(", "));
        }
    } else if browse_requested(args) {
        let kept = filter_records(store.records(), args.name.as_deref(), args.sex.as_deref());
        let sorted = sort_records(&kept, sort_key, !args.descending);
        if args.name.is_some() || args.sex.is_some() {
            println!("검색 결과: {}명의 지원자를 찾았습니다.", sorted.len());
        }
        print_applicant_table(&sorted);
        if args.analyze {
            print_word_analysis(&sorted, &stopwords);
        }
    }

    if args.out.is_some() || args.reference.is_some() {
        let summary_js = build_summary_js(input_path.as_str(), &tally, &categories);
        let pretty_js_summary =
            serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
        if let Some(out_path) = &args.out {
            write_summary(out_path.as_str(), pretty_js_summary.as_str())?;
        }
        if let Some(reference_path) = &args.reference {
            check_reference(reference_path.clone(), pretty_js_summary.as_str())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use applicant_review::builder::RecordBuilder;
    use snafu::ErrorCompat;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn test_dir() -> &'static str {
        option_env!("APPREV_TEST_DIR")
            .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data"))
    }

    fn test_args(input_lpath: &str) -> Args {
        Args {
            input: Some(format!("{}/{}", test_dir(), input_lpath)),
            reference: None,
            out: None,
            report: false,
            stats: false,
            categories: false,
            name: None,
            sex: None,
            sort_by: None,
            descending: false,
            search: None,
            analyze: false,
            verbose: false,
        }
    }

    fn run_review_test(args: &Args) {
        let res = run_review(args);
        if let Err(e) = &res {
            warn!("Error occured {:?}", e);
            eprintln!("An error occured {}", e);
            if let Some(bt) = ErrorCompat::backtrace(e) {
                eprintln!("trace: {}", bt);
            } else {
                eprintln!("No trace found");
            }
        }
        assert!(res.is_ok());
    }

    #[test]
    fn sample_export_matches_reference_summary() {
        init_logs();
        let mut args = test_args("sample.json");
        args.report = true;
        args.reference = Some(format!("{}/sample_expected_summary.json", test_dir()));
        run_review_test(&args);
    }

    #[test]
    fn browse_and_search_flags_run_on_the_sample_export() {
        init_logs();
        let mut args = test_args("sample.json");
        args.name = Some("홍길".to_string());
        args.sex = Some("여".to_string());
        args.sort_by = Some("birth".to_string());
        args.descending = true;
        args.analyze = true;
        run_review_test(&args);

        let mut args = test_args("sample.json");
        args.search = Some(vec!["홍길동".to_string(), "없는이름".to_string()]);
        args.analyze = true;
        args.stats = true;
        args.categories = true;
        run_review_test(&args);
    }

    #[test]
    fn category_legend_prints_without_an_input_file() {
        init_logs();
        let mut args = test_args("sample.json");
        args.input = None;
        args.categories = true;
        run_review_test(&args);

        // The report still requires the records.
        args.report = true;
        assert!(run_review(&args).is_err());
    }

    #[test]
    fn loading_keeps_sections_and_scores_in_file_order() {
        init_logs();
        let records = load_records(format!("{}/sample.json", test_dir()).as_str()).unwrap();
        assert_eq!(records.len(), 6);

        let first = &records[0];
        assert_eq!(first.name, "홍길동");
        assert_eq!(first.sex, "남");
        assert_eq!(first.birth_date, "1999-03-02");
        let labels: Vec<&str> = first.summaries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["지원 동기", "활동 계획"]);
        let scored: Vec<&str> = first
            .evaluation
            .as_ref()
            .unwrap()
            .iter()
            .map(|(c, _)| c.as_str())
            .collect();
        assert_eq!(
            scored,
            vec!["지원 동기 및 진정성", "논리적 표현력", "활동경험", "성실성(성의)"]
        );

        // 박지훈 has not been evaluated yet.
        assert!(records[4].evaluation.is_none());

        // The 활동경험 entry of 최유진 has no score and is dropped.
        let last = records[5].evaluation.as_ref().unwrap();
        assert!(last.iter().all(|(category, _)| category != "활동경험"));
        assert_eq!(last.len(), 3);
    }

    #[test]
    fn missing_name_is_reported_with_the_record_index() {
        init_logs();
        let res = load_records(format!("{}/missing_name.json", test_dir()).as_str());
        match res {
            Err(ReviewError::MissingField { field, index }) => {
                assert_eq!(field, "user_name");
                assert_eq!(index, 1);
            }
            x => panic!("expected a missing field error, got {:?}", x),
        }
    }

    #[test]
    fn malformed_export_is_rejected() {
        init_logs();
        let res = load_records(format!("{}/malformed.json", test_dir()).as_str());
        assert!(matches!(res, Err(ReviewError::MalformedSource { .. })));
    }

    #[test]
    fn missing_input_file_is_reported_with_its_path() {
        init_logs();
        let res = load_records("no_such_file.json");
        match res {
            Err(ReviewError::OpeningSource { path, .. }) => {
                assert_eq!(path, "no_such_file.json");
            }
            x => panic!("expected an opening error, got {:?}", x),
        }
    }

    #[test]
    fn search_session_keeps_the_five_most_recent_unique_queries() {
        let mut session = SearchSession::new();
        for query in ["가", "나", "가", "", "다", "라", "마", "바"] {
            session.record_query(query);
        }
        let got: Vec<&str> = session.recent().iter().map(|q| q.as_str()).collect();
        assert_eq!(got, vec!["나", "다", "라", "마", "바"]);
    }

    #[test]
    fn sort_keys_are_validated() {
        init_logs();
        assert!(matches!(read_sort_key(&None), Ok(SortKey::Name)));
        assert!(matches!(
            read_sort_key(&Some("name".to_string())),
            Ok(SortKey::Name)
        ));
        assert!(matches!(
            read_sort_key(&Some("birth".to_string())),
            Ok(SortKey::BirthDate)
        ));
        assert!(read_sort_key(&Some("age".to_string())).is_err());

        // A bad key is rejected in browse and search mode alike.
        let mut args = test_args("sample.json");
        args.sort_by = Some("age".to_string());
        assert!(run_review(&args).is_err());
        args.search = Some(vec!["홍길동".to_string()]);
        assert!(run_review(&args).is_err());
    }

    #[test]
    fn summary_includes_letters_outside_the_canonical_set() {
        let records = vec![RecordBuilder::new("최유진", "여", "1999-12-01")
            .score("활동경험", "Z")
            .build()];
        let categories = default_categories();
        let tally = tally_scores(&records, &categories);
        let js = build_summary_js("/some/dir/records.json", &tally, &categories);

        assert_eq!(js["config"]["source"], json!("records.json"));
        assert_eq!(js["config"]["totalApplicants"], json!(1));
        assert_eq!(js["overall"]["Z"], json!(1));
        assert_eq!(js["overall"]["A"], json!(0));
    }

    #[test]
    fn writing_to_an_impossible_path_fails() {
        let res = write_summary("/no-such-directory/summary.json", "{}");
        assert!(matches!(res, Err(ReviewError::WritingSummary { .. })));
    }
}
