//! Anchor rewriting for merged documents.
//!
//! Every fragment is generated as a standalone page, so its anchors point at
//! sibling pages (`other.module.html#Symbol`), at highlighted source views
//! (`htmlsrc/...`) or at local names. Once all fragments live in one file,
//! local names must be namespaced by module and cross-page links must become
//! in-document references.
//!
//! Rewriting only touches `<a ...>` start tags. Everything else, including the
//! original text of tags that need no change, is passed through as-is.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches an anchor start tag and captures its attribute text.
static ANCHOR_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<a\s+([^>]+)>").unwrap());

/// Matches one attribute: name, optionally followed by a quoted or bare value.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w:.-]*)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s"'=<>`]+))?"#).unwrap()
});

/// Whole-word `symbol` inside a class list.
static SYMBOL_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bsymbol\b").unwrap());

/// Optional `<path>.html` prefix and optional `#<fragment>` part of an href.
static SYMBOL_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(.+?)\.html)?(?:#(.+))?").unwrap());

/// Class marking permalinks of standalone pages.
const PERMALINK_CLASS: &str = "plink";

/// Href prefix of highlighted source views.
const SOURCE_PREFIX: &str = "htmlsrc/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
    /// Bare value such as `data-x=1`.
    None,
}

/// One anchor attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Raw value without quotes. `None` for bare attributes like `download`.
    pub value: Option<String>,
    quote: Quote,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(value) = &self.value else {
            return f.write_str(&self.name);
        };
        let value = value.replace('"', "&quot;");
        match self.quote {
            Quote::Double => write!(f, "{}=\"{value}\"", self.name),
            Quote::Single => write!(f, "{}='{value}'", self.name),
            Quote::None => write!(f, "{}={value}", self.name),
        }
    }
}

/// Ordered attributes of one anchor tag.
///
/// Attributes keep their source order and quoting. Values set through
/// [`LinkAttributes::set`] are emitted double-quoted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkAttributes {
    entries: Vec<Attribute>,
}

impl LinkAttributes {
    /// Parse the attribute text of a start tag (everything after `<a `).
    ///
    /// Text that does not look like an attribute is skipped, so malformed
    /// input yields fewer (possibly zero) attributes rather than an error.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let entries = ATTRIBUTE_RE
            .captures_iter(text)
            .map(|caps| {
                let name = caps[1].to_owned();
                let (value, quote) = match caps.get(2).map(|m| m.as_str()) {
                    Some(raw) if raw.starts_with('"') => {
                        (Some(raw[1..raw.len() - 1].to_owned()), Quote::Double)
                    }
                    Some(raw) if raw.starts_with('\'') => {
                        (Some(raw[1..raw.len() - 1].to_owned()), Quote::Single)
                    }
                    Some(raw) => (Some(raw.to_owned()), Quote::None),
                    None => (None, Quote::Double),
                };
                Attribute { name, value, quote }
            })
            .collect();
        Self { entries }
    }

    /// Value of an attribute. Bare attributes read as `""`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// Whether an attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|a| a.name == name)
    }

    /// Set an attribute value, keeping its position if it already exists.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        if let Some(attr) = self.entries.iter_mut().find(|a| a.name == name) {
            attr.value = value;
            attr.quote = Quote::Double;
        } else {
            self.entries.push(Attribute {
                name: name.to_owned(),
                value,
                quote: Quote::Double,
            });
        }
    }

    /// Remove all attributes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate attributes in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter()
    }
}

impl fmt::Display for LinkAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{attr}")?;
        }
        Ok(())
    }
}

/// How an anchor is treated in the merged document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    /// `class="plink"`: left untouched.
    Permalink,
    /// `href="#L<digit>..."`: all attributes dropped.
    SourceLine,
    /// `htmlsrc/` link on a symbol declaration: points at the module page online.
    SourceSymbol,
    /// Other `htmlsrc/` link: prefixed with the base URL.
    SourceFile,
    /// Link to a module page and/or symbol: becomes `#m-<fqn>[:<symbol>]`.
    CrossReference,
    /// Relative link to something else: prefixed with the base URL.
    UserLink,
    /// Absolute URL: left untouched.
    External,
    /// Named anchor without href: namespaced by module.
    NamedAnchor,
    /// Nothing to rewrite.
    Plain,
}

/// Classify an anchor by its attributes.
#[must_use]
pub fn classify(attrs: &LinkAttributes) -> LinkKind {
    let class = attrs.get("class");
    if class == Some(PERMALINK_CLASS) {
        return LinkKind::Permalink;
    }

    if let Some(href) = attrs.get("href").filter(|h| !h.is_empty()) {
        if is_source_line(href) {
            return LinkKind::SourceLine;
        }
        if href.contains("://") {
            return LinkKind::External;
        }
        if href.starts_with(SOURCE_PREFIX) {
            return if class.is_some_and(|c| SYMBOL_CLASS_RE.is_match(c)) {
                LinkKind::SourceSymbol
            } else {
                LinkKind::SourceFile
            };
        }
        let (path, fragment) = split_symbol_href(href);
        return if path.is_some() || fragment.is_some() {
            LinkKind::CrossReference
        } else {
            LinkKind::UserLink
        };
    }

    if attrs.contains("name") {
        LinkKind::NamedAnchor
    } else {
        LinkKind::Plain
    }
}

/// `#L` followed by a digit.
fn is_source_line(href: &str) -> bool {
    href.strip_prefix("#L")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

/// Split an href into its `<path>.html` and `#<fragment>` parts.
fn split_symbol_href(href: &str) -> (Option<&str>, Option<&str>) {
    let Some(caps) = SYMBOL_HREF_RE.captures(href) else {
        return (None, None);
    };
    let part = |i| caps.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty());
    (part(1), part(2))
}

/// Rewrites anchor tags of one fragment at a time.
///
/// The rewriter holds only the base URL; the fqn of the module a fragment
/// belongs to is passed with every call.
#[derive(Clone, Debug, Default)]
pub struct LinkRewriter {
    base_url: String,
}

impl LinkRewriter {
    /// Create a rewriter emitting external links below `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Base URL prefixed to links that leave the merged document.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Rewrite every anchor tag in `html` belonging to `module_fqn`.
    #[must_use]
    pub fn rewrite(&self, html: &str, module_fqn: &str) -> String {
        ANCHOR_TAG_RE
            .replace_all(html, |caps: &Captures| self.rewrite_tag(caps, module_fqn))
            .into_owned()
    }

    fn rewrite_tag(&self, caps: &Captures, module_fqn: &str) -> String {
        let text = caps[1].trim_end();
        let (text, self_closing) = match text.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (text, false),
        };

        let mut attrs = LinkAttributes::parse(text);
        if !self.rewrite_attributes(&mut attrs, module_fqn) {
            return caps[0].to_owned();
        }

        let close = if self_closing { "/>" } else { ">" };
        if attrs.is_empty() {
            format!("<a{close}")
        } else {
            format!("<a {attrs}{close}")
        }
    }

    /// Apply the rewriting rules to parsed attributes.
    ///
    /// Returns `false` when the anchor is left as it was.
    pub fn rewrite_attributes(&self, attrs: &mut LinkAttributes, module_fqn: &str) -> bool {
        let base = &self.base_url;
        match classify(attrs) {
            LinkKind::Permalink | LinkKind::External | LinkKind::Plain => false,
            LinkKind::SourceLine => {
                attrs.clear();
                true
            }
            LinkKind::SourceSymbol => {
                let mut href = format!("{base}/{module_fqn}.html");
                if let Some(name) = attrs.get("name").map(str::to_owned) {
                    href.push('#');
                    href.push_str(&name);
                    attrs.set("name", format!("m-{module_fqn}:{name}"));
                }
                attrs.set("href", href);
                true
            }
            LinkKind::SourceFile | LinkKind::UserLink => {
                let href = format!("{base}/{}", attrs.get("href").unwrap_or_default());
                attrs.set("href", href);
                true
            }
            LinkKind::CrossReference => {
                let href = attrs.get("href").unwrap_or_default();
                let (path, fragment) = split_symbol_href(href);
                let target = path.unwrap_or(module_fqn);
                let href = match fragment {
                    Some(symbol) => format!("#m-{target}:{symbol}"),
                    None => format!("#m-{target}"),
                };
                attrs.set("href", href);
                true
            }
            LinkKind::NamedAnchor => {
                let name = attrs.get("name").unwrap_or_default();
                let name = format!("m-{module_fqn}:{name}");
                attrs.set("name", name);
                true
            }
        }
    }
}
