//! Algorithm runners.
//!
//! A runner executes its algorithm eagerly and returns every frame up front.
//! Input is validated first; a rejected input yields an error and no frames,
//! so the player is never handed a partial sequence.

pub mod greedy;
pub mod searching;
pub mod sorting;
pub mod structures;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::RunnerConfig;
use crate::snapshot::ArraySnapshot;
use crate::{Frame, Result, VisualiserError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    LinearSearch,
    BinarySearch,
    CoinChange,
    Stack,
    Queue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Sorting,
    DivideAndConquer,
    Searching,
    Greedy,
    DataStructure,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Sorting => "sorting",
            Category::DivideAndConquer => "divide and conquer",
            Category::Searching => "searching",
            Category::Greedy => "greedy",
            Category::DataStructure => "data structure",
        };
        f.write_str(label)
    }
}

/// Values plus the optional target used by searches and coin change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmInput {
    pub values: Vec<i64>,
    #[serde(default)]
    pub target: Option<i64>,
}

impl AlgorithmInput {
    pub fn new(values: Vec<i64>) -> Self {
        Self {
            values,
            target: None,
        }
    }

    pub fn with_target(mut self, target: i64) -> Self {
        self.target = Some(target);
        self
    }
}

impl Algorithm {
    pub const ALL: [Algorithm; 10] = [
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::InsertionSort,
        Algorithm::MergeSort,
        Algorithm::QuickSort,
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::CoinChange,
        Algorithm::Stack,
        Algorithm::Queue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "bubble-sort",
            Algorithm::SelectionSort => "selection-sort",
            Algorithm::InsertionSort => "insertion-sort",
            Algorithm::MergeSort => "merge-sort",
            Algorithm::QuickSort => "quick-sort",
            Algorithm::LinearSearch => "linear-search",
            Algorithm::BinarySearch => "binary-search",
            Algorithm::CoinChange => "coin-change",
            Algorithm::Stack => "stack",
            Algorithm::Queue => "queue",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Algorithm::BubbleSort | Algorithm::SelectionSort | Algorithm::InsertionSort => {
                Category::Sorting
            }
            Algorithm::MergeSort | Algorithm::QuickSort => Category::DivideAndConquer,
            Algorithm::LinearSearch | Algorithm::BinarySearch => Category::Searching,
            Algorithm::CoinChange => Category::Greedy,
            Algorithm::Stack | Algorithm::Queue => Category::DataStructure,
        }
    }

    pub fn pseudocode(self) -> &'static [&'static str] {
        match self {
            Algorithm::BubbleSort => sorting::BUBBLE_SORT,
            Algorithm::SelectionSort => sorting::SELECTION_SORT,
            Algorithm::InsertionSort => sorting::INSERTION_SORT,
            Algorithm::MergeSort => sorting::MERGE_SORT,
            Algorithm::QuickSort => sorting::QUICK_SORT,
            Algorithm::LinearSearch => searching::LINEAR_SEARCH,
            Algorithm::BinarySearch => searching::BINARY_SEARCH,
            Algorithm::CoinChange => greedy::COIN_CHANGE,
            Algorithm::Stack => structures::STACK,
            Algorithm::Queue => structures::QUEUE,
        }
    }

    pub fn requires_target(self) -> bool {
        matches!(
            self,
            Algorithm::LinearSearch | Algorithm::BinarySearch | Algorithm::CoinChange
        )
    }

    /// Validates `input` and records every frame of the run.
    pub fn run(
        self,
        input: &AlgorithmInput,
        config: &RunnerConfig,
    ) -> Result<Vec<Frame<ArraySnapshot>>> {
        let name = self.name();
        let values = input.values.as_slice();
        validate_values(name, values, config)?;

        let target = match (self.requires_target(), input.target) {
            (true, None) => {
                return Err(VisualiserError::invalid_input(name, "a target value is required"))
            }
            (_, target) => target.unwrap_or_default(),
        };

        let frames = match self {
            Algorithm::BubbleSort => sorting::bubble_sort(values),
            Algorithm::SelectionSort => sorting::selection_sort(values),
            Algorithm::InsertionSort => sorting::insertion_sort(values),
            Algorithm::MergeSort => sorting::merge_sort(values),
            Algorithm::QuickSort => sorting::quick_sort(values),
            Algorithm::LinearSearch => searching::linear_search(values, target),
            Algorithm::BinarySearch => {
                if values.windows(2).any(|pair| pair[0] > pair[1]) {
                    return Err(VisualiserError::invalid_input(
                        name,
                        "values must be sorted in ascending order",
                    ));
                }
                searching::binary_search(values, target)
            }
            Algorithm::CoinChange => {
                if values.iter().any(|coin| *coin <= 0) {
                    return Err(VisualiserError::invalid_input(
                        name,
                        "coin denominations must be positive",
                    ));
                }
                let lowest = config.min_value.max(1);
                if !(lowest..=config.max_value).contains(&target) {
                    return Err(VisualiserError::invalid_input(
                        name,
                        format!(
                            "amount must be between {lowest} and {}, got {target}",
                            config.max_value
                        ),
                    ));
                }
                greedy::coin_change(values, target)
            }
            Algorithm::Stack => structures::stack(values),
            Algorithm::Queue => structures::queue(values),
        };

        tracing::debug!(algorithm = name, frames = frames.len(), "recorded frames");
        Ok(frames)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = VisualiserError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == wanted)
            .ok_or_else(|| VisualiserError::msg(format!("unknown algorithm `{s}`")))
    }
}

/// Parses integers separated by commas and/or whitespace.
pub fn parse_values(raw: &str) -> Result<Vec<i64>> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| VisualiserError::msg(format!("`{token}` is not an integer")))
        })
        .collect()
}

fn validate_values(name: &'static str, values: &[i64], config: &RunnerConfig) -> Result<()> {
    if values.is_empty() {
        return Err(VisualiserError::invalid_input(name, "no values given"));
    }
    if values.len() > config.max_input_len {
        return Err(VisualiserError::invalid_input(
            name,
            format!(
                "{} values given, at most {} are supported",
                values.len(),
                config.max_input_len
            ),
        ));
    }
    let range = config.value_range();
    if let Some(value) = values.iter().find(|value| !range.contains(*value)) {
        return Err(VisualiserError::invalid_input(
            name,
            format!(
                "{value} is outside {}..={}",
                config.min_value, config.max_value
            ),
        ));
    }
    Ok(())
}
