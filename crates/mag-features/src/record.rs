use core::fmt;

use crate::pipeline::FeatureVector;

/// Flare label of one example. `Unlabeled` marks images missing from the
/// label table and serializes as the `NaN` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// The region flared within the labeling window.
    Flare,
    /// The region did not flare.
    Quiet,
    /// No entry in the label table.
    Unlabeled,
}

impl Label {
    /// Maps a label-table class token: `"0"` means quiet, anything else
    /// means the region flared.
    pub fn from_class_token(token: &str) -> Self {
        if token == "0" { Self::Quiet } else { Self::Flare }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Flare => "1",
            Self::Quiet => "0",
            Self::Unlabeled => "NaN",
        }
    }
}

/// One dataset row: a feature vector paired with its label and the base
/// filename it was extracted from. Association is always by this explicit
/// pairing, never by row position.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub features: FeatureVector,
    pub label: Label,
    pub file_name: String,
}

impl fmt::Display for FeatureRecord {
    /// Formats the CSV row: 29 round-trippable decimal values, the label
    /// token, then the filename.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.features.as_slice() {
            write!(f, "{v},")?;
        }
        write!(f, "{},{}", self.label.token(), self.file_name)
    }
}
