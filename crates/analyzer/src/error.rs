use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("Cannot pick a best asset from an empty set of ratios")]
    EmptyInput,

    #[error("Every ratio is undefined; there is no best asset among {0} candidates")]
    AllUndefined(usize),
}
