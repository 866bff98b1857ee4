//! Plain-text templates with `${name}` placeholders.
//!
//! Templates are ordinary files in the templates directory. Their stem is the
//! lookup key (`main.html` → `main`). Rendering substitutes bound placeholders
//! and leaves everything else untouched:
//!
//! ```text
//! "Hi ${name}! ${other}"  +  {name: "Bob"}  →  "Hi Bob! ${other}"
//! ```
//!
//! Substitution is a single left-to-right scan over the template text, so a
//! value that itself contains `${...}` is emitted literally and never expanded.

use std::collections::BTreeMap;

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Substitute every bound `${key}` in `template`.
pub fn render<'a, I>(template: &str, bindings: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let bindings: Vec<(&str, &str)> = bindings.into_iter().collect();
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let bound = after.find(CLOSE).and_then(|end| {
            let key = &after[..end];
            bindings
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end))
        });
        match bound {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                // Unbound: keep the opener and resume scanning right after it.
                out.push_str(OPEN);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Values for the fixed placeholder set used by page templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bindings<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub date: Option<&'a str>,
    pub article_url: Option<&'a str>,
}

impl<'a> Bindings<'a> {
    /// Bindings for a page shell: `title` and `content` only.
    pub fn page(title: &'a str, content: &'a str) -> Self {
        Self {
            title,
            content,
            ..Self::default()
        }
    }

    /// Bindings for an article body or summary.
    pub fn article(title: &'a str, content: &'a str, date: &'a str, article_url: &'a str) -> Self {
        Self {
            title,
            content,
            date: Some(date),
            article_url: Some(article_url),
        }
    }

    /// Placeholder name / value pairs, omitting unset optional fields.
    pub fn pairs(&self) -> Vec<(&'a str, &'a str)> {
        let mut pairs = vec![("title", self.title), ("content", self.content)];
        if let Some(date) = self.date {
            pairs.push(("date", date));
        }
        if let Some(url) = self.article_url {
            pairs.push(("articleUrl", url));
        }
        pairs
    }

    pub fn apply(&self, template: &str) -> String {
        render(template, self.pairs())
    }
}

/// Loaded templates keyed by name. Read-only once the catalog is built.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    entries: BTreeMap<String, String>,
}

impl Templates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(name.into(), text.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Template names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Templates {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut templates = Self::new();
        for (name, text) in iter {
            templates.insert(name, text);
        }
        templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_bound_key() {
        assert_eq!(render("Hi ${name}!", [("name", "Bob")]), "Hi Bob!");
    }

    #[test]
    fn leaves_unbound_placeholder_verbatim() {
        assert_eq!(
            render("Hi ${name}, ${other}", [("name", "Bob")]),
            "Hi Bob, ${other}"
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        assert_eq!(
            render("${x}-${x}-${x}", [("x", "a")]),
            "a-a-a"
        );
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let out = render(
            "<h1>${title}</h1>${content}",
            [("title", "${content}"), ("content", "body")],
        );
        assert_eq!(out, "<h1>${content}</h1>body");
    }

    #[test]
    fn unterminated_placeholder_is_kept() {
        assert_eq!(render("cost: ${name", [("name", "x")]), "cost: ${name");
    }

    #[test]
    fn nested_opener_still_substitutes_inner_key() {
        assert_eq!(render("${a ${b}", [("b", "B")]), "${a B");
    }

    #[test]
    fn empty_bindings_return_template() {
        let empty: [(&str, &str); 0] = [];
        assert_eq!(render("plain ${x} text", empty), "plain ${x} text");
    }

    #[test]
    fn bindings_page_only_binds_title_and_content() {
        let out = Bindings::page("T", "C").apply("${title}|${content}|${date}|${articleUrl}");
        assert_eq!(out, "T|C|${date}|${articleUrl}");
    }

    #[test]
    fn bindings_article_binds_all_keys() {
        let out = Bindings::article("T", "C", "2012.040", "/hello")
            .apply("${title}|${content}|${date}|${articleUrl}");
        assert_eq!(out, "T|C|2012.040|/hello");
    }

    #[test]
    fn templates_lookup_by_name() {
        let templates: Templates = [("main", "<html>${content}</html>")].into_iter().collect();
        assert_eq!(templates.get("main"), Some("<html>${content}</html>"));
        assert_eq!(templates.get("article"), None);
        assert!(templates.contains("main"));
        assert_eq!(templates.len(), 1);
    }
}
