use contracts::contests::{ContestOptions, Mode};

/// The local test configuration a contest temporarily overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct TestConfig {
    pub mode: Mode,
    /// Duration in seconds for `time` mode, word count for `words` mode.
    pub mode2: String,
    pub punctuation: bool,
    pub numbers: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Time,
            mode2: "60".to_string(),
            punctuation: false,
            numbers: false,
        }
    }
}

/// Overlay a contest's fixed options onto the current configuration.
/// Returns the applied values; the caller's saved preferences are never
/// written.
pub fn apply_contest_options(current: &TestConfig, options: &ContestOptions) -> TestConfig {
    let mut applied = current.clone();
    applied.mode = options.mode;
    applied.mode2 = options.mode2.clone();
    applied.punctuation = options.punctuation;
    applied.numbers = options.numbers;
    applied
}
