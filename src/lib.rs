pub mod cli;
pub mod config;
pub mod corrector;
pub mod error;
pub mod mask;
pub mod region;
pub mod rule;

pub use config::Config;
pub use corrector::{correct, correct_with_report, Dictionary, IgnoreSet};
pub use error::{DictionaryError, MaskError};
pub use mask::{mask, process, Masked, Region};
pub use region::RegionKind;
pub use rule::AutoCorrect;

#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub misspellings: Vec<Misspelling>,
    pub fixed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misspelling {
    pub word: String,
    pub correction: String,
    pub line: usize,
    pub column: usize,
    pub context: String,
}
