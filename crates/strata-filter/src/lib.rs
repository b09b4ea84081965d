//! Strata Filter Inference
//!
//! Best-effort extraction of schema type names from content-list filter
//! fragments (a restricted subset of the studio query language).
//!
//! # Core Concepts
//!
//! - [`tokenize`]: lossless split of a filter fragment into [`Token`]s
//! - [`match_type_constraint`]: recognizes `_type == <ref>` and
//!   `_type in [<refs>]` as tagged [`TypeConstraint`] variants
//! - [`type_names_from_filter`]: resolved, deduplicated candidate names
//! - [`single_type_from_filter`]: the name, when exactly one is found
//!
//! # Example
//!
//! ```rust
//! use strata_filter::{single_type_from_filter, FilterParams};
//!
//! let params = FilterParams::new();
//! let name = single_type_from_filter(r#"_type == "movie""#, &params);
//! assert_eq!(name.as_deref(), Some("movie"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod constraint;
mod token;

pub use constraint::{match_type_constraint, TypeConstraint, TypeRef};
pub use token::{tokenize, Token};

/// Parameter bindings for `$name` references, insertion-ordered
pub type FilterParams = indexmap::IndexMap<String, serde_json::Value>;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract candidate schema type names from a filter fragment
///
/// Resolves every reference named by the filter's type constraint against
/// `params`, discarding unresolvable entries and collapsing duplicates
/// while preserving first-seen order. Empty when the filter binds `_type`
/// in no form this crate understands.
#[must_use]
pub fn type_names_from_filter(filter: &str, params: &FilterParams) -> Vec<String> {
    let tokens = tokenize(filter);
    let Some(found) = match_type_constraint(&tokens) else {
        return Vec::new();
    };

    let mut names: Vec<String> = Vec::new();
    for type_ref in found.refs() {
        if let Some(name) = type_ref.resolve(params) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    tracing::debug!(filter, candidates = names.len(), "inferred type names");
    names
}

/// The single schema type name a filter selects, if unambiguous
///
/// `None` when the filter names zero or several distinct types.
#[must_use]
pub fn single_type_from_filter(filter: &str, params: &FilterParams) -> Option<String> {
    let mut names = type_names_from_filter(filter, params);
    if names.len() == 1 {
        names.pop()
    } else {
        None
    }
}
