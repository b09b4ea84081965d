//! Type-constraint matching over token streams
//!
//! Recognizes the two supported grammatical forms for binding `_type`:
//! equality (`_type == <ref>`, either operand order) and set membership
//! (`_type in [<refs>]`). Everything else is deliberately ignored; this is
//! a best-effort static heuristic, not a query-language parser.

use crate::token::Token;
use crate::FilterParams;

/// Reference to a schema type name inside a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Inline string literal or bare identifier
    Literal(String),
    /// `$name` parameter reference, resolved through the params map
    Param(String),
}

impl TypeRef {
    /// Resolve this reference to a concrete type name
    ///
    /// Literals are trimmed; parameters are looked up by name and accepted
    /// only when the bound value is a non-empty string. Anything else
    /// resolves to `None` and is discarded by the caller.
    #[must_use]
    pub fn resolve(&self, params: &FilterParams) -> Option<String> {
        let name = match self {
            Self::Literal(value) => value.trim().to_string(),
            Self::Param(name) => params.get(name)?.as_str()?.trim().to_string(),
        };
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// The way a filter constrains `_type`
///
/// Tagged result of matching, so downstream code branches on structure
/// instead of re-scanning text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeConstraint {
    /// One or more `_type == <ref>` comparisons
    Equality(Vec<TypeRef>),
    /// A single `_type in [<refs>]` membership test
    InList(Vec<TypeRef>),
}

impl TypeConstraint {
    /// All type references named by the constraint, in source order
    #[must_use]
    pub fn refs(&self) -> &[TypeRef] {
        match self {
            Self::Equality(refs) | Self::InList(refs) => refs,
        }
    }
}

fn as_operand(token: &Token) -> Option<TypeRef> {
    match token {
        Token::Str(value) => Some(TypeRef::Literal(value.clone())),
        Token::Param(name) => Some(TypeRef::Param(name.clone())),
        _ => None,
    }
}

fn is_type_ident(token: &Token) -> bool {
    matches!(token, Token::Ident(name) if name == "_type")
}

fn match_equalities(tokens: &[Token]) -> Vec<TypeRef> {
    let mut refs = Vec::new();
    for window in tokens.windows(3) {
        if window[1] != Token::EqEq {
            continue;
        }
        if is_type_ident(&window[0]) {
            if let Some(operand) = as_operand(&window[2]) {
                refs.push(operand);
            }
        } else if is_type_ident(&window[2]) {
            if let Some(operand) = as_operand(&window[0]) {
                refs.push(operand);
            }
        }
    }
    refs
}

fn match_membership(tokens: &[Token]) -> Vec<TypeRef> {
    let mut position = 0;
    while position + 2 < tokens.len() {
        let header = is_type_ident(&tokens[position])
            && tokens[position + 1] == Token::Ident("in".to_string())
            && tokens[position + 2] == Token::LBracket;
        if !header {
            position += 1;
            continue;
        }

        let mut refs = Vec::new();
        for token in &tokens[position + 3..] {
            match token {
                Token::RBracket => return refs,
                Token::Comma => {}
                // Bare identifiers are valid list items: `_type in [dog, cat]`
                Token::Ident(name) => refs.push(TypeRef::Literal(name.clone())),
                other => {
                    if let Some(operand) = as_operand(other) {
                        refs.push(operand);
                    }
                }
            }
        }
        // Unclosed bracket: take what was collected
        return refs;
    }
    Vec::new()
}

/// Match a token stream against the supported type-constraint forms
///
/// Equality wins when it yields at least one reference; membership is the
/// fallback. `None` means the filter binds `_type` in no recognizable way.
#[must_use]
pub fn match_type_constraint(tokens: &[Token]) -> Option<TypeConstraint> {
    let equalities = match_equalities(tokens);
    if !equalities.is_empty() {
        return Some(TypeConstraint::Equality(equalities));
    }

    let members = match_membership(tokens);
    if !members.is_empty() {
        return Some(TypeConstraint::InList(members));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;
    use pretty_assertions::assert_eq;

    fn constraint(filter: &str) -> Option<TypeConstraint> {
        match_type_constraint(&tokenize(filter))
    }

    #[test]
    fn equality_literal() {
        assert_eq!(
            constraint(r#"_type == "movie""#),
            Some(TypeConstraint::Equality(vec![TypeRef::Literal(
                "movie".to_string()
            )]))
        );
    }

    #[test]
    fn equality_reversed_operands() {
        assert_eq!(
            constraint(r#""movie" == _type"#),
            Some(TypeConstraint::Equality(vec![TypeRef::Literal(
                "movie".to_string()
            )]))
        );
    }

    #[test]
    fn equality_param() {
        assert_eq!(
            constraint("_type == $type"),
            Some(TypeConstraint::Equality(vec![TypeRef::Param(
                "type".to_string()
            )]))
        );
    }

    #[test]
    fn equality_multiple_disjuncts() {
        assert_eq!(
            constraint(r#"_type == "a" || _type == "b""#),
            Some(TypeConstraint::Equality(vec![
                TypeRef::Literal("a".to_string()),
                TypeRef::Literal("b".to_string()),
            ]))
        );
    }

    #[test]
    fn equality_wins_over_membership() {
        let found = constraint(r#"_type == "a" && _type in ["b"]"#);
        assert_eq!(
            found,
            Some(TypeConstraint::Equality(vec![TypeRef::Literal(
                "a".to_string()
            )]))
        );
    }

    #[test]
    fn membership_mixed_items() {
        assert_eq!(
            constraint(r#"_type in ["dog", 'cat', $other, bare]"#),
            Some(TypeConstraint::InList(vec![
                TypeRef::Literal("dog".to_string()),
                TypeRef::Literal("cat".to_string()),
                TypeRef::Param("other".to_string()),
                TypeRef::Literal("bare".to_string()),
            ]))
        );
    }

    #[test]
    fn membership_unclosed_bracket_keeps_collected() {
        assert_eq!(
            constraint(r#"_type in ["dog", "cat""#),
            Some(TypeConstraint::InList(vec![
                TypeRef::Literal("dog".to_string()),
                TypeRef::Literal("cat".to_string()),
            ]))
        );
    }

    #[test]
    fn no_constraint_in_unrelated_filter() {
        assert_eq!(constraint("released == true"), None);
        assert_eq!(constraint(""), None);
    }

    #[test]
    fn bare_ident_not_an_equality_operand() {
        // `_type == movie` without quotes is outside the supported grammar
        assert_eq!(constraint("_type == movie"), None);
    }

    #[test]
    fn resolve_param_requires_string_value() {
        let mut params = FilterParams::new();
        params.insert("n".to_string(), serde_json::json!(7));
        assert_eq!(TypeRef::Param("n".to_string()).resolve(&params), None);

        params.insert("t".to_string(), serde_json::json!(" book "));
        assert_eq!(
            TypeRef::Param("t".to_string()).resolve(&params),
            Some("book".to_string())
        );
    }

    #[test]
    fn resolve_discards_empty() {
        let params = FilterParams::new();
        assert_eq!(TypeRef::Literal("  ".to_string()).resolve(&params), None);
        assert_eq!(TypeRef::Param("missing".to_string()).resolve(&params), None);
    }
}
