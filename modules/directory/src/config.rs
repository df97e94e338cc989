use serde::{Deserialize, Serialize};

/// Configuration for the directory module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfig {
    #[serde(default = "default_max_display_name_length")]
    pub max_display_name_length: usize,
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            max_display_name_length: default_max_display_name_length(),
            min_password_length: default_min_password_length(),
        }
    }
}

fn default_max_display_name_length() -> usize {
    100
}

fn default_min_password_length() -> usize {
    6
}
