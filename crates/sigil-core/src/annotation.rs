//! Declared parameter type annotations.
//!
//! Annotations use the `typing` notation an exporter emits for constructor
//! parameters: `int`, `Optional[str]`, `Union[int, float]`, `int | None`,
//! `List[int]`. Only `Any`, `None`, `Optional` and `Union` are interpreted;
//! every other expression (including parameterized generics) is an opaque
//! named type. Separators inside quoted literals (`Literal['a|b']`) are not
//! split on.
//!
//! Unions are kept normalized: nested unions are flattened, duplicate members
//! collapse, and a union of one member is that member. `Optional[T]` is the
//! union `Union[T, None]`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A parameter's declared type.
///
/// Serialized as its `typing` string form, e.g. `"Optional[int]"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Annotation {
    /// The unconstrained `Any` type.
    Any,
    /// Absence of a value (`None` / `NoneType`).
    None,
    /// Any concrete type, referenced by name.
    Named(String),
    /// A union of two or more distinct members.
    Union(Vec<Annotation>),
}

impl Annotation {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// `Optional[inner]`, i.e. `Union[inner, None]`.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::union([inner, Self::None])
    }

    /// Build a normalized union.
    ///
    /// An empty member list has no `typing` counterpart and degrades to `Any`.
    #[must_use]
    pub fn union(members: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for member in members {
            member.flatten_into(&mut flat);
        }

        match flat.len() {
            0 => Self::Any,
            1 => flat.remove(0),
            _ => Self::Union(flat),
        }
    }

    /// Members of this annotation if it is a union.
    #[must_use]
    pub fn union_members(&self) -> Option<&[Self]> {
        match self {
            Self::Union(members) => Some(members),
            _ => None,
        }
    }

    /// Parse a `typing` expression.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidAnnotation` for empty expressions, unbalanced
    /// brackets, or an `Optional[...]` with other than one argument.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        if !brackets_balanced(input) {
            return Err(invalid(input, "unbalanced brackets"));
        }
        parse_expr(input, input)
    }

    fn flatten_into(self, flat: &mut Vec<Self>) {
        match self {
            Self::Union(members) => {
                for member in members {
                    member.flatten_into(flat);
                }
            }
            other => {
                if !flat.contains(&other) {
                    flat.push(other);
                }
            }
        }
    }
}

fn parse_expr(text: &str, input: &str) -> Result<Annotation, CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(invalid(input, "empty type expression"));
    }

    let alternatives = split_top_level(text, '|');
    if alternatives.len() > 1 {
        let members = alternatives
            .into_iter()
            .map(|part| parse_expr(part, input))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Annotation::union(members));
    }

    let text = text.strip_prefix("typing.").unwrap_or(text);
    match text {
        "Any" => return Ok(Annotation::Any),
        "None" | "NoneType" => return Ok(Annotation::None),
        _ => {}
    }

    if let Some(args) = generic_args(text, "Optional") {
        let parts = split_top_level(args, ',');
        if parts.len() != 1 {
            return Err(invalid(input, "Optional takes exactly one argument"));
        }
        return Ok(Annotation::optional(parse_expr(parts[0], input)?));
    }

    if let Some(args) = generic_args(text, "Union") {
        let members = split_top_level(args, ',')
            .into_iter()
            .map(|part| parse_expr(part, input))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Annotation::union(members));
    }

    Ok(Annotation::Named(text.to_string()))
}

/// Arguments of `head[...]` when the bracket opened after `head` closes at the
/// very end of `text`.
fn generic_args<'a>(text: &'a str, head: &str) -> Option<&'a str> {
    let inner = text
        .strip_prefix(head)?
        .strip_prefix('[')?
        .strip_suffix(']')?;
    brackets_balanced(inner).then_some(inner)
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, ch) in unquoted(text) {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..index]);
                start = index + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn brackets_balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for (_, ch) in unquoted(text) {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Characters outside `'...'` and `"..."` literals, with their byte offsets.
fn unquoted(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut quote = None;
    text.char_indices().filter(move |&(_, ch)| match quote {
        Some(open) => {
            if ch == open {
                quote = None;
            }
            false
        }
        None if ch == '\'' || ch == '"' => {
            quote = Some(ch);
            false
        }
        None => true,
    })
}

fn invalid(input: &str, reason: &str) -> CoreError {
    CoreError::InvalidAnnotation {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::None => f.write_str("None"),
            Self::Named(name) => f.write_str(name),
            Self::Union(members) => {
                if let [inner, Self::None] | [Self::None, inner] = members.as_slice() {
                    return write!(f, "Optional[{inner}]");
                }
                f.write_str("Union[")?;
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl FromStr for Annotation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Annotation {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Annotation> for String {
    fn from(value: Annotation) -> Self {
        value.to_string()
    }
}

impl JsonSchema for Annotation {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("Annotation")
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        String::json_schema(generator)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn int() -> Annotation {
        Annotation::named("int")
    }

    fn str_() -> Annotation {
        Annotation::named("str")
    }

    #[rstest]
    #[case("Any", Annotation::Any)]
    #[case("typing.Any", Annotation::Any)]
    #[case("None", Annotation::None)]
    #[case("NoneType", Annotation::None)]
    #[case("int", Annotation::named("int"))]
    #[case("  float ", Annotation::named("float"))]
    #[case("List[int]", Annotation::named("List[int]"))]
    #[case("typing.Dict[str, Any]", Annotation::named("Dict[str, Any]"))]
    #[case("torch.Tensor", Annotation::named("torch.Tensor"))]
    fn parses_plain_types(#[case] input: &str, #[case] expected: Annotation) {
        assert_eq!(Annotation::parse(input).unwrap(), expected);
    }

    #[test]
    fn parses_optional() {
        assert_eq!(
            Annotation::parse("Optional[int]").unwrap(),
            Annotation::Union(vec![int(), Annotation::None])
        );
    }

    #[test]
    fn parses_union_with_generic_members() {
        assert_eq!(
            Annotation::parse("Union[List[int], Dict[str, int]]").unwrap(),
            Annotation::Union(vec![
                Annotation::named("List[int]"),
                Annotation::named("Dict[str, int]"),
            ])
        );
    }

    #[test]
    fn parses_pipe_syntax() {
        assert_eq!(
            Annotation::parse("int | str | None").unwrap(),
            Annotation::Union(vec![int(), str_(), Annotation::None])
        );
    }

    #[rstest]
    #[case("Literal['a|b']", Annotation::named("Literal['a|b']"))]
    #[case("Literal[\"x, y\"]", Annotation::named("Literal[\"x, y\"]"))]
    #[case("Literal[']'] | None", Annotation::optional(Annotation::named("Literal[']']")))]
    #[case(
        "Union[Literal['a, b'], int]",
        Annotation::Union(vec![Annotation::named("Literal['a, b']"), int()])
    )]
    fn separators_inside_string_literals_are_opaque(
        #[case] input: &str,
        #[case] expected: Annotation,
    ) {
        assert_eq!(Annotation::parse(input).unwrap(), expected);
    }

    #[test]
    fn optional_of_union_flattens() {
        assert_eq!(
            Annotation::parse("Optional[Union[int, str]]").unwrap(),
            Annotation::Union(vec![int(), str_(), Annotation::None])
        );
    }

    #[test]
    fn duplicate_members_collapse() {
        assert_eq!(Annotation::parse("Union[int, int]").unwrap(), int());
        assert_eq!(
            Annotation::union([int(), str_(), int()]),
            Annotation::Union(vec![int(), str_()])
        );
    }

    #[test]
    fn empty_union_degrades_to_any() {
        assert_eq!(Annotation::union(Vec::new()), Annotation::Any);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("Union[]")]
    #[case("int |")]
    #[case("List[int")]
    #[case("int]")]
    #[case("Optional[int, str]")]
    fn rejects_malformed_expressions(#[case] input: &str) {
        assert!(matches!(
            Annotation::parse(input),
            Err(CoreError::InvalidAnnotation { .. })
        ));
    }

    #[rstest]
    #[case("int")]
    #[case("Optional[int]")]
    #[case("Union[int, str]")]
    #[case("Union[int, str, None]")]
    #[case("List[Optional[int]]")]
    fn display_is_parseable(#[case] input: &str) {
        let parsed = Annotation::parse(input).unwrap();
        assert_eq!(parsed.to_string(), input);
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&Annotation::optional(int())).unwrap();
        assert_eq!(json, r#""Optional[int]""#);

        let parsed: Annotation = serde_json::from_str(r#""int | None""#).unwrap();
        assert_eq!(parsed, Annotation::optional(int()));

        assert!(serde_json::from_str::<Annotation>(r#""Union[""#).is_err());
    }
}
