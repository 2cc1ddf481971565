//! Match patterns for element merging.

/// How a pattern selects sequence elements, decided once at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternKind {
    /// No anchors: compared for equality against an element's match key.
    Literal,
    /// Leading `^`: the element string must start with the literal.
    Prefix,
    /// Trailing `$`: the element string must end with the literal.
    Suffix,
    /// Both anchors: the element string must equal the literal exactly.
    Exact,
}

/// A merge pattern, classified by its `^` / `$` anchors when parsed.
///
/// Unanchored patterns match a sequence element's *match key*: for string
/// elements, the text before the first `=` separator (the whole string when
/// no separator is present). Anchored patterns are tested against the full
/// element string, so `^fruit=` matches `fruit=banana` while `^fruit$`
/// matches only an element that is exactly `fruit`. Mapping merges ignore
/// anchors and use the raw pattern text as a literal key.
///
/// # Examples
///
/// ```rust
/// use overlay_config::MatchPattern;
///
/// let prefix = MatchPattern::parse("^fruit=");
/// let exact = MatchPattern::parse("^fruit$");
/// assert_eq!(prefix.raw(), "^fruit=");
/// assert_eq!(exact.raw(), "^fruit$");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPattern {
    raw: String,
    literal: String,
    kind: PatternKind,
}

impl MatchPattern {
    /// Classify `pattern` by its anchors.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let after_start = pattern.strip_prefix('^');
        let trimmed = after_start.unwrap_or(pattern);
        let after_end = trimmed.strip_suffix('$');
        let literal = after_end.unwrap_or(trimmed);
        let kind = match (after_start.is_some(), after_end.is_some()) {
            (true, true) => PatternKind::Exact,
            (true, false) => PatternKind::Prefix,
            (false, true) => PatternKind::Suffix,
            (false, false) => PatternKind::Literal,
        };
        Self {
            raw: pattern.to_owned(),
            literal: literal.to_owned(),
            kind,
        }
    }

    /// Raw pattern text exactly as supplied by the caller.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether `element`, taken as a full element string, satisfies the
    /// pattern.
    pub(crate) fn matches_element(&self, element: &str) -> bool {
        match self.kind {
            PatternKind::Literal => match_key(element) == self.literal,
            PatternKind::Prefix => element.starts_with(&self.literal),
            PatternKind::Suffix => element.ends_with(&self.literal),
            PatternKind::Exact => element == self.literal,
        }
    }
}

/// Portion of an element string compared against unanchored patterns.
pub(crate) fn match_key(element: &str) -> &str {
    element.split_once('=').map_or(element, |(key, _)| key)
}
