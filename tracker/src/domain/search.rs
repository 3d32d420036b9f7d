//! Typed search queries over asset records.
//!
//! The searchable column set is a closed enum mapped to typed accessors in
//! the persistence adapter. Field labels arriving from the presentation
//! layer are resolved here, at the boundary, so an unmapped label is
//! rejected instead of silently ignored.

use std::fmt;

use chrono::NaiveDate;

/// Which lifecycle state a listing or search is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleScope {
    /// Assets still held at headquarters.
    Active,
    /// Assets already dispatched to a branch.
    Dispatched,
}

impl fmt::Display for LifecycleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Dispatched => f.write_str("dispatched"),
        }
    }
}

/// Searchable asset attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// The unique tracking code.
    TrackingCode,
    /// The asset description.
    AssetName,
    /// The inventory code.
    AssetCode,
    /// The destination branch.
    BranchName,
    /// The headquarters receipt date.
    DateReceived,
    /// The dispatch date; only meaningful in the dispatched scope.
    DateDispatched,
}

impl SearchField {
    /// The label the presentation layer shows for this field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TrackingCode => "Tracking ID",
            Self::AssetName => "Asset Name",
            Self::AssetCode => "Asset Code",
            Self::BranchName => "Branch Name",
            Self::DateReceived => "Date Received",
            Self::DateDispatched => "Date Dispatched",
        }
    }

    /// Resolve a presentation label into a field, if it is in the allow-list.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Tracking ID" => Some(Self::TrackingCode),
            "Asset Name" => Some(Self::AssetName),
            "Asset Code" => Some(Self::AssetCode),
            "Branch Name" => Some(Self::BranchName),
            "Date Received" => Some(Self::DateReceived),
            "Date Dispatched" => Some(Self::DateDispatched),
            _ => None,
        }
    }

    fn searchable_in(self, scope: LifecycleScope) -> bool {
        match self {
            Self::DateDispatched => scope == LifecycleScope::Dispatched,
            _ => true,
        }
    }

    fn is_date(self) -> bool {
        matches!(self, Self::DateReceived | Self::DateDispatched)
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The match value of a validated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// Case-sensitive substring match against a text column.
    Text(String),
    /// Exact calendar-date match against a date column.
    Date(NaiveDate),
}

/// Validation errors raised when building an [`AssetSearch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchValidationError {
    /// The label does not name any searchable field.
    UnknownField {
        /// The rejected label.
        label: String,
    },
    /// The field exists but is not searchable in the requested scope.
    FieldNotInScope {
        /// The rejected field.
        field: SearchField,
        /// The scope it was requested in.
        scope: LifecycleScope,
    },
    /// The search term was empty once trimmed.
    EmptyTerm,
    /// A date-field term did not parse as `YYYY-MM-DD`.
    InvalidDate {
        /// The rejected term.
        term: String,
    },
}

impl fmt::Display for SearchValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField { label } => {
                write!(f, "{label} is not a searchable field")
            }
            Self::FieldNotInScope { field, scope } => {
                write!(f, "{field} cannot be searched among {scope} assets")
            }
            Self::EmptyTerm => write!(f, "search term must not be empty"),
            Self::InvalidDate { term } => {
                write!(f, "{term} is not a date in YYYY-MM-DD form")
            }
        }
    }
}

impl std::error::Error for SearchValidationError {}

/// Validated search request: scope, field, and a term typed to the field.
///
/// # Examples
/// ```
/// use tracker::domain::{AssetSearch, LifecycleScope, SearchValidationError};
///
/// let search = AssetSearch::new(LifecycleScope::Active, "Branch Name", "Nairobi").unwrap();
/// assert_eq!(search.scope(), LifecycleScope::Active);
///
/// let err = AssetSearch::new(LifecycleScope::Active, "Not A Real Field", "x").unwrap_err();
/// assert!(matches!(err, SearchValidationError::UnknownField { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSearch {
    scope: LifecycleScope,
    field: SearchField,
    term: SearchTerm,
}

impl AssetSearch {
    /// Validate a field label and term for the given scope.
    pub fn new(
        scope: LifecycleScope,
        field_label: &str,
        term: &str,
    ) -> Result<Self, SearchValidationError> {
        let field = SearchField::from_label(field_label).ok_or_else(|| {
            SearchValidationError::UnknownField {
                label: field_label.to_owned(),
            }
        })?;
        if !field.searchable_in(scope) {
            return Err(SearchValidationError::FieldNotInScope { field, scope });
        }

        let trimmed = term.trim();
        if trimmed.is_empty() {
            return Err(SearchValidationError::EmptyTerm);
        }

        let term = if field.is_date() {
            let date = trimmed.parse::<NaiveDate>().map_err(|_| {
                SearchValidationError::InvalidDate {
                    term: trimmed.to_owned(),
                }
            })?;
            SearchTerm::Date(date)
        } else {
            SearchTerm::Text(trimmed.to_owned())
        };

        Ok(Self { scope, field, term })
    }

    /// The lifecycle scope the results are restricted to.
    pub fn scope(&self) -> LifecycleScope {
        self.scope
    }

    /// The column being matched.
    pub fn field(&self) -> SearchField {
        self.field
    }

    /// The validated match value.
    pub fn term(&self) -> &SearchTerm {
        &self.term
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for search validation at the boundary.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(LifecycleScope::Active, "Tracking ID", SearchField::TrackingCode)]
    #[case(LifecycleScope::Active, "Asset Name", SearchField::AssetName)]
    #[case(LifecycleScope::Active, "Asset Code", SearchField::AssetCode)]
    #[case(LifecycleScope::Active, "Branch Name", SearchField::BranchName)]
    #[case(LifecycleScope::Dispatched, "Date Dispatched", SearchField::DateDispatched)]
    fn known_labels_resolve_in_scope(
        #[case] scope: LifecycleScope,
        #[case] label: &str,
        #[case] expected: SearchField,
    ) {
        let term = if expected.is_date() { "2026-08-01" } else { "x" };
        let search = AssetSearch::new(scope, label, term).expect("valid search");
        assert_eq!(search.field(), expected);
    }

    #[rstest]
    fn unknown_labels_are_rejected() {
        let err = AssetSearch::new(LifecycleScope::Active, "Not A Real Field", "x");
        assert_eq!(
            err,
            Err(SearchValidationError::UnknownField {
                label: "Not A Real Field".to_owned(),
            })
        );
    }

    #[rstest]
    fn dispatch_date_is_not_searchable_among_active_assets() {
        let err = AssetSearch::new(LifecycleScope::Active, "Date Dispatched", "2026-08-01");
        assert_eq!(
            err,
            Err(SearchValidationError::FieldNotInScope {
                field: SearchField::DateDispatched,
                scope: LifecycleScope::Active,
            })
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_terms_are_rejected(#[case] term: &str) {
        let err = AssetSearch::new(LifecycleScope::Active, "Asset Name", term);
        assert_eq!(err, Err(SearchValidationError::EmptyTerm));
    }

    #[rstest]
    fn date_fields_require_a_parseable_date() {
        let err = AssetSearch::new(LifecycleScope::Active, "Date Received", "last Tuesday");
        assert_eq!(
            err,
            Err(SearchValidationError::InvalidDate {
                term: "last Tuesday".to_owned(),
            })
        );

        let search = AssetSearch::new(LifecycleScope::Active, "Date Received", "2026-08-01")
            .expect("valid search");
        assert!(matches!(search.term(), SearchTerm::Date(_)));
    }

    #[rstest]
    fn text_terms_are_trimmed() {
        let search = AssetSearch::new(LifecycleScope::Active, "Asset Name", "  Laptop  ")
            .expect("valid search");
        assert_eq!(search.term(), &SearchTerm::Text("Laptop".to_owned()));
    }
}
