//! OAuth2 scopes as requested by a client

use std::{convert::Infallible, iter::FromIterator, slice, str::FromStr, vec};

use aliri_braid::braid;
use serde::{Deserialize, Serialize};

/// An OAuth2 scope token as defined in [RFC 6749, Section 3.3][RFC6749 3.3]
///
///   [RFC6749 3.3]: (https://datatracker.ietf.org/doc/html/rfc6749#section-3.3)
#[braid(serde, ref_doc = "A borrowed reference to an OAuth2 [`ScopeToken`]")]
pub struct ScopeToken;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum ScopeDto {
    String(String),
    Array(Vec<ScopeToken>),
}

impl From<Option<ScopeDto>> for Scope {
    fn from(dto: Option<ScopeDto>) -> Self {
        match dto {
            Some(ScopeDto::String(s)) => Self::from_space_delimited(&s),
            Some(ScopeDto::Array(arr)) => Self(arr),
            None => Self::empty(),
        }
    }
}

impl From<Scope> for ScopeDto {
    fn from(s: Scope) -> Self {
        let x: Vec<_> = s.0.into_iter().map(ScopeToken::take).collect();
        ScopeDto::String(x.join(" "))
    }
}

/// An ordered sequence of scope tokens
///
/// Unlike a scope used for access decisions, the order and multiplicity of
/// the requested tokens is preserved so that a scope can be carried from a
/// request onto an issued token verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "Option<ScopeDto>", into = "ScopeDto")]
pub struct Scope(Vec<ScopeToken>);

impl Scope {
    /// Produces an empty scope
    #[inline]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Constructs a scope from an iterator of scope tokens
    #[inline]
    pub fn from_scope_tokens<I>(scope_tokens: I) -> Self
    where
        I: IntoIterator<Item = ScopeToken>,
    {
        Self::from_iter(scope_tokens)
    }

    /// Parses a space-delimited scope string
    pub fn from_space_delimited(s: &str) -> Self {
        s.split_whitespace().map(ScopeToken::from).collect()
    }

    /// Appends a scope token
    #[inline]
    pub fn push(&mut self, scope_token: ScopeToken) {
        self.0.push(scope_token);
    }

    /// Whether the scope has no tokens
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of tokens in the scope
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Produces an iterator of the scope tokens in request order
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// The scope tokens in request order
    #[inline]
    pub fn as_slice(&self) -> &[ScopeToken] {
        &self.0
    }
}

impl IntoIterator for Scope {
    type Item = ScopeToken;
    type IntoIter = vec::IntoIter<ScopeToken>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// An iterator over borrowed scope tokens
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    iter: slice::Iter<'a, ScopeToken>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ScopeTokenRef;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|x| x.as_ref())
    }
}

impl<'a> IntoIterator for &'a Scope {
    type Item = &'a ScopeTokenRef;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Iter {
            iter: self.0.iter(),
        }
    }
}

impl<S> Extend<S> for Scope
where
    S: Into<ScopeToken>,
{
    #[inline]
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = S>,
    {
        self.0.extend(iter.into_iter().map(Into::into))
    }
}

impl<S> FromIterator<S> for Scope
where
    S: Into<ScopeToken>,
{
    #[inline]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut scope = Self::empty();
        scope.extend(iter);
        scope
    }
}

impl FromStr for Scope {
    type Err = Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_space_delimited(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_request_order_and_duplicates() {
        let scope = Scope::from_space_delimited("openid  profile openid internal_org_view");
        let tokens: Vec<_> = scope.iter().map(ScopeTokenRef::as_str).collect();
        assert_eq!(tokens, ["openid", "profile", "openid", "internal_org_view"]);
    }

    #[test]
    fn serializes_as_space_delimited_string() -> color_eyre::Result<()> {
        let scope = Scope::from_space_delimited("openid profile");
        assert_eq!(serde_json::to_string(&scope)?, r#""openid profile""#);
        Ok(())
    }

    #[test]
    fn deserializes_from_array() -> color_eyre::Result<()> {
        let scope: Scope = serde_json::from_str(r#"["b", "a"]"#)?;
        assert_eq!(scope, Scope::from_space_delimited("b a"));
        Ok(())
    }

    #[test]
    fn deserializes_null_as_empty() -> color_eyre::Result<()> {
        let scope: Scope = serde_json::from_str("null")?;
        assert!(scope.is_empty());
        Ok(())
    }
}
