//! Text analyzer tool definition.
//!
//! Computes simple statistics over a piece of text. Sentence counting is an
//! approximation: it counts `.`, `!` and `?` characters, so abbreviations and
//! ellipses inflate it.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::tools::{BoundArguments, ParamKind, ParamSpec, ToolError, ToolHandler, ToolSpec};

/// Statistics returned by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStats {
    pub text_length: usize,
    pub characters_no_spaces: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub average_word_length: f64,
    pub longest_word: String,
    pub shortest_word: String,
}

/// Text analyzer tool - word, character and sentence statistics.
pub struct TextAnalyzerTool;

impl TextAnalyzerTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "analyze_text";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Analyze text and return statistics: word count, character counts, approximate sentence count, average word length and the longest and shortest words.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn execute(text: &str) -> TextStats {
        info!("Text analyzer tool called");

        let words: Vec<&str> = text.split_whitespace().collect();
        let characters_no_spaces = text.chars().filter(|c| *c != ' ').count();
        let sentence_count = text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count();

        TextStats {
            text_length: text.chars().count(),
            characters_no_spaces,
            word_count: words.len(),
            sentence_count,
            average_word_length: round2(characters_no_spaces as f64 / words.len().max(1) as f64),
            longest_word: pick_word(&words, |candidate, best| candidate > best),
            shortest_word: pick_word(&words, |candidate, best| candidate < best),
        }
    }

    /// Build the registry entry for this tool.
    pub fn spec() -> ToolSpec {
        ToolSpec::new(Self::NAME, Self::DESCRIPTION, Self)
            .with_param(ParamSpec::required("text", ParamKind::String).describe("The text to analyze"))
    }
}

#[async_trait]
impl ToolHandler for TextAnalyzerTool {
    async fn call(&self, args: BoundArguments) -> Result<Value, ToolError> {
        let stats = Self::execute(args.str("text")?);
        serde_json::to_value(stats).map_err(|e| ToolError::internal(e.to_string()))
    }
}

/// Pick a word by character length. Only a strictly better length replaces
/// the current pick, so the first occurrence wins ties.
fn pick_word(words: &[&str], better: impl Fn(usize, usize) -> bool) -> String {
    let mut iter = words.iter();
    let Some(first) = iter.next() else {
        return String::new();
    };

    let mut best = *first;
    let mut best_len = first.chars().count();
    for word in iter {
        let len = word.chars().count();
        if better(len, best_len) {
            best = *word;
            best_len = len;
        }
    }
    best.to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
