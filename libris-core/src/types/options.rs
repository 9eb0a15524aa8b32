//! Filter and sort options chosen by the user

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive publication year bounds
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i32>,
}

impl YearRange {
    /// Whether neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Reading status filter dimension
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReadStatus {
    #[default]
    All,
    Read,
    Unread,
    ToRead,
}

impl ReadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Read => "read",
            Self::Unread => "unread",
            Self::ToRead => "to-read",
        }
    }
}

impl fmt::Display for ReadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "read" => Ok(Self::Read),
            "unread" => Ok(Self::Unread),
            "to-read" | "to_read" | "toread" => Ok(Self::ToRead),
            other => Err(format!("unknown read status: {}", other)),
        }
    }
}

/// Set of filter constraints; every absent field leaves its dimension open
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterOptions {
    /// Exact genre match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Minimum rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<YearRange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_status: Option<ReadStatus>,
}

/// Quick filter that sets a single dimension
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPreset {
    /// Rated 4 and above
    HighlyRated,

    /// Published in 2020 or later
    Recent,

    /// Published in 1950 or earlier
    Classic,
}

impl FilterPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighlyRated => "highly-rated",
            Self::Recent => "recent",
            Self::Classic => "classic",
        }
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highly-rated" | "highly_rated" => Ok(Self::HighlyRated),
            "recent" => Ok(Self::Recent),
            "classic" => Ok(Self::Classic),
            other => Err(format!("unknown filter preset: {}", other)),
        }
    }
}

impl FilterOptions {
    /// Set the dimension `preset` covers, leaving the others alone
    pub fn apply_preset(&mut self, preset: FilterPreset) {
        match preset {
            FilterPreset::HighlyRated => self.rating = Some(4.0),
            FilterPreset::Recent => {
                self.publication_year = Some(YearRange {
                    start: Some(2020),
                    end: None,
                })
            }
            FilterPreset::Classic => {
                self.publication_year = Some(YearRange {
                    start: None,
                    end: Some(1950),
                })
            }
        }
    }

    pub fn with_preset(mut self, preset: FilterPreset) -> Self {
        self.apply_preset(preset);
        self
    }

    /// Number of dimensions that carry a value
    pub fn active_count(&self) -> usize {
        [
            self.genre.is_some(),
            self.rating.is_some(),
            self.publication_year.is_some(),
            self.read_status.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// Field a book list can be ordered by
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Title,
    Author,
    Rating,
    Year,
    Pages,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Title,
        SortField::Author,
        SortField::Rating,
        SortField::Year,
        SortField::Pages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Rating => "rating",
            Self::Year => "year",
            Self::Pages => "pages",
        }
    }

    /// Label shown in sort controls
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Rating => "Rating",
            Self::Year => "Publication Year",
            Self::Pages => "Pages",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown sort field: {}", s))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// Sort field and direction
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SortSpec {
    #[serde(default)]
    pub field: SortField,

    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Selecting the active field while ascending switches to descending;
    /// any other selection starts ascending.
    pub fn toggle(self, field: SortField) -> Self {
        let direction = if self.field == field && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self { field, direction }
    }

    /// Same field, opposite direction
    pub fn reversed(self) -> Self {
        Self {
            field: self.field,
            direction: self.direction.flipped(),
        }
    }
}
