use serde::{Deserialize, Serialize};

/// How two date-indexed tables are lined up before an element-wise operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinPolicy {
    /// Union of both date indexes; a date missing on one side yields NaN.
    #[default]
    Outer,
    /// Only the dates present in both tables.
    Inner,
    /// The left-hand table's dates, NaN where the right-hand side is missing.
    Left,
}

impl JoinPolicy {
    /// Returns the lowercase name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinPolicy::Outer => "outer",
            JoinPolicy::Inner => "inner",
            JoinPolicy::Left => "left",
        }
    }
}

impl std::fmt::Display for JoinPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JoinPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "outer" => Ok(JoinPolicy::Outer),
            "inner" => Ok(JoinPolicy::Inner),
            "left" => Ok(JoinPolicy::Left),
            other => Err(format!(
                "unknown join policy '{other}' (expected outer, inner or left)"
            )),
        }
    }
}
