//! Recommendation fetch settings

use crate::api::RecommendationMethod;
use serde::Deserialize;

/// How many recommendations to ask for, and with which strategy
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub count: usize,
    pub method: RecommendationMethod,
}

impl Default for Recommendations {
    fn default() -> Self {
        Self {
            count: 8,
            method: RecommendationMethod::Collaborative,
        }
    }
}

/// [recommendations] section as loaded from file
#[derive(Debug, Deserialize, Default)]
pub struct FileRecommendations {
    pub count: Option<usize>,
    pub method: Option<String>,
}

impl Recommendations {
    /// Create from file config with defaults. A zero count is ignored.
    pub fn from_file(file: Option<FileRecommendations>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            count: file.count.filter(|&n| n > 0).unwrap_or(defaults.count),
            method: file
                .method
                .map(|m| RecommendationMethod::from_str(&m))
                .unwrap_or(defaults.method),
        }
    }
}
