//! The `tag` module contains the model of field tags, the `key:"value"` annotations attached to
//! struct fields.
//!
//! A [`Tag`] maps each key to the ordered list of raw values seen for it.  Keys keep the order
//! in which they were first seen, so a tag always prints the same way.  Parsing never fails:
//! malformed pieces of a tag are dropped.

use crate::ast::BasicLit;
use crate::error::HoisterError;
use std::collections::HashMap;
use std::fmt;

/// The tag key conventionally used for JSON encoding names.
pub static JSON_KEY: &str = "json";

/// The option suffix stripped by [`Tag::json_name`].
static OMITEMPTY_SUFFIX: &str = ",omitempty";

#[derive(Clone, Debug, PartialEq, Eq)]
struct TagEntry {
    key: String,
    values: Vec<String>,
}

/// Parsed field tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tag {
    entries: Vec<TagEntry>,
}

impl Tag {
    pub fn new() -> Tag {
        Tag {
            entries: Vec::new(),
        }
    }

    /// Parse tag text.  Surrounding backticks are optional.  Values are double quoted and may
    /// contain `\"` and `\\` escapes; an unquoted value runs to the next space.
    ///
    /// # Arguments
    ///
    /// * `text` - The tag text, e.g. `` `json:"name,omitempty" xml:"name"` ``.
    pub fn parse(text: &str) -> Tag {
        let text = text.trim();
        let text = text.strip_prefix('`').unwrap_or(text);
        let text = text.strip_suffix('`').unwrap_or(text);

        let chars: Vec<char> = text.chars().collect();
        let mut tag = Tag::new();
        let mut i = 0;

        while i < chars.len() {
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }

            let key_start = i;
            while i < chars.len() && !chars[i].is_whitespace() && chars[i] != ':' && chars[i] != '"'
            {
                i += 1;
            }
            let key: String = chars[key_start..i].iter().collect();

            if i >= chars.len() || chars[i] != ':' || key.is_empty() {
                // Not a key/value pair, drop the rest of the token.
                while i < chars.len() && !chars[i].is_whitespace() {
                    i += 1;
                }
                continue;
            }
            i += 1;

            let mut value = String::new();
            if i < chars.len() && chars[i] == '"' {
                i += 1;
                while i < chars.len() && chars[i] != '"' {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        i += 1;
                        match chars[i] {
                            '"' | '\\' => value.push(chars[i]),
                            other => {
                                value.push('\\');
                                value.push(other);
                            }
                        }
                    } else {
                        value.push(chars[i]);
                    }
                    i += 1;
                }
                // Skip the closing quote, if any.
                i += 1;
            } else {
                while i < chars.len() && !chars[i].is_whitespace() {
                    value.push(chars[i]);
                    i += 1;
                }
            }

            tag.push(&key, &value);
        }

        tag
    }

    /// Parse the tag stored in a tag literal.
    pub fn from_literal(literal: &BasicLit) -> Tag {
        Tag::parse(&literal.value)
    }

    /// Return the tag as a raw string literal ready to attach to a field, or `None` if the tag
    /// has no entries.
    pub fn to_literal(&self) -> Option<BasicLit> {
        if self.is_empty() {
            return None;
        }
        Some(BasicLit::string(&format!("`{self}`")))
    }

    /// Append `value` to the values of `key`, adding the key at the end if it is new.
    pub fn push(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.values.push(String::from(value)),
            None => self.entries.push(TagEntry {
                key: String::from(key),
                values: vec![String::from(value)],
            }),
        }
    }

    /// Return all values of `key` in the order they were seen.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.values.as_slice())
    }

    /// Return the first value of `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(|v| v.as_str())
    }

    /// Iterate the keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Append the values of `other` to this tag, key by key.  Values of a key keep their order,
    /// with the values of this tag first.
    pub fn extend_from(&mut self, other: &Tag) {
        for entry in &other.entries {
            for value in &entry.values {
                self.push(&entry.key, value);
            }
        }
    }

    /// Delete `key` and return its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let position = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(position).values)
    }

    /// Return true if every value of every key of `other` is also a value of the same key in
    /// this tag.
    pub fn covers(&self, other: &Tag) -> bool {
        other.entries.iter().all(|entry| match self.get(&entry.key) {
            Some(values) => entry.values.iter().all(|v| values.contains(v)),
            None => false,
        })
    }

    /// Return the JSON name of the field: the first `json` value without its `,omitempty`
    /// option.
    pub fn json_name(&self) -> Option<String> {
        self.value(JSON_KEY)
            .map(|v| v.replace(OMITEMPTY_SUFFIX, ""))
    }
}

fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl fmt::Display for Tag {
    /// Print each key with its first value as `key:"value"`, separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .entries
            .iter()
            .map(|e| {
                let value = e.values.first().map(|v| v.as_str()).unwrap_or("");
                format!("{}:\"{}\"", e.key, escape_value(value))
            })
            .collect();
        write!(f, "{}", pairs.join(" "))
    }
}

/// Trait for objects that merge the values collected for one tag key into a single value.
pub trait TagCombiner {
    /// Combine `values`, given in left-then-right order, into one value for `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - The tag key being merged.
    /// * `values` - All values seen for the key.
    fn combine(&self, key: &str, values: &[String]) -> Result<String, HoisterError>;
}

/// Combines values by joining the distinct ones with a separator.
pub struct JoinCombiner {
    separator: String,
}

impl JoinCombiner {
    pub fn new(separator: &str) -> JoinCombiner {
        JoinCombiner {
            separator: String::from(separator),
        }
    }
}

impl TagCombiner for JoinCombiner {
    fn combine(&self, key: &str, values: &[String]) -> Result<String, HoisterError> {
        if values.is_empty() {
            return Err(HoisterError::TagCombine {
                key: String::from(key),
                reason: String::from("no values to join"),
            });
        }

        let mut distinct: Vec<&str> = Vec::new();
        for value in values {
            if !distinct.contains(&value.as_str()) {
                distinct.push(value);
            }
        }
        Ok(distinct.join(&self.separator))
    }
}

/// The combiners registered for each tag key.
pub type Combiners = HashMap<String, Box<dyn TagCombiner>>;

/// Merge two tags into a tag holding one value per key.  For each key, in first-seen order, a
/// registered combiner receives all values of the key; without a combiner the first value wins.
///
/// # Arguments
///
/// * `left` - The tag whose values come first.
/// * `right` - The tag whose values come second.
/// * `combiners` - The combiners registered for particular keys.
pub fn combine_tags(left: &Tag, right: &Tag, combiners: &Combiners) -> Result<Tag, HoisterError> {
    let mut all = left.clone();
    all.extend_from(right);

    let mut combined = Tag::new();
    for entry in &all.entries {
        let value = match combiners.get(&entry.key) {
            Some(combiner) => combiner.combine(&entry.key, &entry.values)?,
            None => entry.values[0].clone(),
        };
        combined.push(&entry.key, &value);
    }
    Ok(combined)
}

/// Merge two optional tag literals with [`combine_tags`] and return the merged literal, or
/// `None` if neither literal holds any entries.
pub fn combine_tag_literals(
    left: Option<&BasicLit>,
    right: Option<&BasicLit>,
    combiners: &Combiners,
) -> Result<Option<BasicLit>, HoisterError> {
    let left = left.map(Tag::from_literal).unwrap_or_default();
    let right = right.map(Tag::from_literal).unwrap_or_default();
    Ok(combine_tags(&left, &right, combiners)?.to_literal())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tag: &Tag, key: &str) -> Vec<String> {
        tag.get(key).map(|v| v.to_vec()).unwrap_or_default()
    }

    #[test]
    fn test_parse() {
        let tag = Tag::parse("`json:\"name,omitempty\" xml:\"name\" json:\"alias\"`");
        assert_eq!(tag.keys().collect::<Vec<&str>>(), vec!["json", "xml"]);
        assert_eq!(values(&tag, "json"), vec!["name,omitempty", "alias"]);
        assert_eq!(tag.value("xml"), Some("name"));
        assert_eq!(tag.json_name(), Some(String::from("name")));
    }

    #[test]
    fn test_parse_is_lenient() {
        let tag = Tag::parse("  bogus db:primary  json:\"a b\" yaml:\"unterminated");
        assert_eq!(tag.value("db"), Some("primary"));
        assert_eq!(tag.value("json"), Some("a b"));
        assert_eq!(tag.value("yaml"), Some("unterminated"));
        assert!(!tag.contains_key("bogus"));
        assert!(Tag::parse("").is_empty());
        assert!(Tag::parse("``").is_empty());
    }

    #[test]
    fn test_escapes_survive_printing() {
        let tag = Tag::parse(r#"note:"say \"hi\" \\ bye""#);
        assert_eq!(tag.value("note"), Some(r#"say "hi" \ bye"#));
        assert_eq!(Tag::parse(&tag.to_string()), tag);
    }

    #[test]
    fn test_display_prints_first_value_per_key() {
        let tag = Tag::parse("json:\"a\" xml:\"b\" json:\"c\"");
        assert_eq!(tag.to_string(), "json:\"a\" xml:\"b\"");
        assert_eq!(
            tag.to_literal().map(|l| l.value),
            Some(String::from("`json:\"a\" xml:\"b\"`"))
        );
        assert_eq!(Tag::new().to_literal(), None);
    }

    #[test]
    fn test_merge_without_combiners_keeps_first_value() {
        let left = Tag::parse("json:\"a\" xml:\"b\"");
        let right = Tag::parse("json:\"c\"");
        let merged = combine_tags(&left, &right, &Combiners::new()).unwrap();
        assert_eq!(values(&merged, "json"), vec!["a"]);
        assert_eq!(values(&merged, "xml"), vec!["b"]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_with_join_combiner() {
        let left = Tag::parse("json:\"a\" xml:\"b\"");
        let right = Tag::parse("json:\"c\"");
        let mut combiners = Combiners::new();
        combiners.insert(String::from("json"), Box::new(JoinCombiner::new(",")));
        let merged = combine_tags(&left, &right, &combiners).unwrap();
        assert_eq!(values(&merged, "json"), vec!["a,c"]);
        assert_eq!(values(&merged, "xml"), vec!["b"]);
    }

    struct RefuseCombiner {}

    impl TagCombiner for RefuseCombiner {
        fn combine(&self, key: &str, _values: &[String]) -> Result<String, HoisterError> {
            Err(HoisterError::TagCombine {
                key: String::from(key),
                reason: String::from("refused"),
            })
        }
    }

    #[test]
    fn test_merge_reports_combiner_failure() {
        let mut combiners = Combiners::new();
        combiners.insert(String::from("xml"), Box::new(RefuseCombiner {}));
        let result = combine_tags(
            &Tag::parse("xml:\"b\""),
            &Tag::parse("json:\"c\""),
            &combiners,
        );
        assert!(matches!(result, Err(HoisterError::TagCombine { .. })));
    }

    #[test]
    fn test_combine_literals() {
        let left = BasicLit::string("`json:\"id\"`");
        let merged = combine_tag_literals(Some(&left), None, &Combiners::new())
            .unwrap()
            .unwrap();
        assert_eq!(merged.value, "`json:\"id\"`");
        assert_eq!(
            combine_tag_literals(None, None, &Combiners::new()).unwrap(),
            None
        );
    }

    #[test]
    fn test_remove_and_covers() {
        let mut tag = Tag::parse("json:\"a\" xml:\"b\" yaml:\"c\"");
        let narrow = Tag::parse("xml:\"b\" json:\"a\"");
        assert!(tag.covers(&narrow));
        assert!(!narrow.covers(&tag));
        assert!(!tag.covers(&Tag::parse("json:\"z\"")));

        assert_eq!(tag.remove("xml"), Some(vec![String::from("b")]));
        assert_eq!(tag.remove("xml"), None);
        assert!(!tag.covers(&narrow));
        assert_eq!(tag.to_string(), "json:\"a\" yaml:\"c\"");
    }
}
