//! Object-key and profile-key derivation.
//!
//! All keys are derived from caller input; nothing here touches AWS.

use percent_encoding::percent_decode_str;
use serde_json::Value;

use super::models::ProfileItem;

/// Namespace every uploaded object lands under.
pub const UPLOAD_PREFIX: &str = "uploads/";

/// Fixed sort-key value of the single profile record each user owns.
pub const PROFILE_SORT_KEY: &str = "PROFILE";

/// Percent-decodes `raw` the way a URL unquote does: `%XX` sequences are
/// decoded, `+` is left alone, and invalid UTF-8 is replaced lossily.
#[must_use]
pub fn decode_component(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Raw path component of an object URL, split the way `urlsplit` does it.
///
/// An optional `scheme:` and `//authority` are skipped and the path ends at the
/// first `?` or `#`. Dot segments, percent escapes and backslashes are left as
/// written, so the key names exactly the object the caller addressed.
#[must_use]
pub fn url_path(raw: &str) -> String {
    let cleaned: String = raw
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let mut rest = cleaned.as_str();
    if let Some((scheme, after)) = rest.split_once(':')
        && is_scheme(scheme)
    {
        rest = after;
    }
    if let Some(after) = rest.strip_prefix("//") {
        rest = after.find(['/', '?', '#']).map_or("", |end| &after[end..]);
    }

    rest.split(['?', '#']).next().unwrap_or("").to_string()
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolves the object key for a download link.
///
/// `key` wins over `object_url`. The result is percent-decoded and stripped of
/// leading slashes; `None` when nothing usable remains.
#[must_use]
pub fn resolve_download_key(key: Option<&str>, object_url: Option<&str>) -> Option<String> {
    let raw = match key {
        Some(k) => k.to_string(),
        None => url_path(object_url?).trim_start_matches('/').to_string(),
    };

    let decoded = decode_component(&raw);
    let key = decoded.trim_start_matches('/');
    (!key.is_empty()).then(|| key.to_string())
}

/// Sanitizes an upload filename: percent-decode, drop every `..` substring,
/// strip leading slashes.
///
/// This is substring removal, not path normalization: `.../x` comes out as
/// `./x`.
#[must_use]
pub fn sanitize_filename(raw: &str) -> String {
    decode_component(raw)
        .replace("..", "")
        .trim_start_matches('/')
        .to_string()
}

#[must_use]
pub fn upload_key(filename: &str) -> String {
    format!("{UPLOAD_PREFIX}{}", sanitize_filename(filename))
}

/// Permanent, unsigned address of an object. The key is used verbatim.
#[must_use]
pub fn object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}

/// Canonical partition-key value for a user: `USER#<subject>`.
#[must_use]
pub fn user_pk(subject: &str) -> String {
    format!("USER#{subject}")
}

/// Loose truthiness used when deciding whether a body already carries a key.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Attribute names of the profile table's composite key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileKeySchema {
    pub primary_key: String,
    pub sort_key: String,
}

impl ProfileKeySchema {
    #[must_use]
    pub fn new(primary_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            sort_key: sort_key.into(),
        }
    }

    /// Key of the profile record owned by `subject`.
    #[must_use]
    pub fn lookup_key(&self, subject: &str) -> ProfileItem {
        let mut key = ProfileItem::new();
        key.insert(self.primary_key.clone(), Value::String(user_pk(subject)));
        key.insert(
            self.sort_key.clone(),
            Value::String(PROFILE_SORT_KEY.to_string()),
        );
        key
    }

    /// Fills in the key attributes of an item about to be written.
    ///
    /// An existing truthy primary key is kept, otherwise it is derived from
    /// `subject`. The sort key defaults to `PROFILE`. Returns `false`, leaving
    /// the item untouched, when no primary key can be determined.
    pub fn stamp_keys(&self, item: &mut ProfileItem, subject: Option<&str>) -> bool {
        if !item.get(&self.primary_key).is_some_and(is_truthy) {
            let Some(subject) = subject else {
                return false;
            };
            item.insert(self.primary_key.clone(), Value::String(user_pk(subject)));
        }

        if !item.get(&self.sort_key).is_some_and(is_truthy) {
            item.insert(
                self.sort_key.clone(),
                Value::String(PROFILE_SORT_KEY.to_string()),
            );
        }

        true
    }
}

impl Default for ProfileKeySchema {
    fn default() -> Self {
        Self::new("PK", "SK")
    }
}
