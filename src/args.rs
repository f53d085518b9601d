use clap::Parser;

/// This is a tabulation and browsing program for applicant evaluations.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON file containing the summarized applicant records with their
    /// evaluation results. For more information about the file format, read the documentation.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path) A reference file containing the summary of a previous run in JSON format.
    /// If provided, apprev will check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the tally will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// If passed as an argument, prints the score distribution per evaluation category
    /// and overall.
    #[clap(long, takes_value = false)]
    pub report: bool,

    /// If passed as an argument, prints the sex distribution and the age groups of the
    /// applicants.
    #[clap(long, takes_value = false)]
    pub stats: bool,

    /// If passed as an argument, prints the evaluation categories with their descriptions
    /// and grading criteria.
    #[clap(long, takes_value = false)]
    pub categories: bool,

    /// (text or not specified) Keeps only the records whose name contains the given text.
    /// The match is case-insensitive.
    #[clap(long, value_parser)]
    pub name: Option<String>,

    /// (text or not specified) Keeps only the records whose sex equals the given value
    /// exactly.
    #[clap(long, value_parser)]
    pub sex: Option<String>,

    /// (name or birth, default name) The field used to order the displayed records.
    #[clap(long, value_parser)]
    pub sort_by: Option<String>,

    /// If passed as an argument, reverses the display order.
    #[clap(long, takes_value = false)]
    pub descending: bool,

    /// (list of names or not specified) Case-sensitive name searches. Each query is looked
    /// up in turn and remembered in the recent-search list.
    #[clap(long, value_parser)]
    pub search: Option<Vec<String>>,

    /// If passed as an argument, prints the most common words of each summary section of
    /// the displayed records.
    #[clap(long, takes_value = false)]
    pub analyze: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
