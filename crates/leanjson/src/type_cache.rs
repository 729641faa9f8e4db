//! Process-wide cache of per-struct field metadata.
//!
//! Field names, alias tags and the two lower-case name forms are computed once
//! per struct type and shared through an [`Arc`] afterwards.
//! Readers take the shared lock; a miss computes outside any lock and then
//! inserts, keeping whichever entry landed first so that every caller ends up
//! holding the same metadata.

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, LazyLock},
};

use parking_lot::RwLock;
use tracing::trace;

use crate::{descriptor::StructValue, options::DEFAULT_SEPARATOR};

static CACHE: LazyLock<RwLock<HashMap<TypeId, Arc<StructTypeInfo>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Metadata of one struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Declared name, with any raw identifier prefix removed. Used verbatim as
    /// the key when encoding.
    pub name: &'static str,
    /// Alias taken from the field tag, if any.
    pub alias: Option<&'static str>,
    /// `name` in lower case with words joined by `_`.
    pub snake_name: String,
    /// `name` in lower case with `_` before every capital after the first
    /// character, so `UserID` gives `user_i_d`.
    pub capital_name: String,
}

/// Metadata of a struct type, fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructTypeInfo {
    /// Type name for diagnostics.
    pub type_name: &'static str,
    /// One entry per declared field.
    pub fields: Vec<FieldInfo>,
}

impl StructTypeInfo {
    fn introspect(value: &dyn StructValue) -> Self {
        let fields = value
            .declared_fields()
            .iter()
            .map(|decl| {
                let name = decl.name.strip_prefix("r#").unwrap_or(decl.name);
                let mut snake_name = String::with_capacity(name.len() + 4);
                write_separated(name, DEFAULT_SEPARATOR, &mut snake_name);
                let mut capital_name = String::with_capacity(name.len() + 4);
                write_split_capitals(name, DEFAULT_SEPARATOR, &mut capital_name);
                FieldInfo {
                    name,
                    alias: alias(decl.tag),
                    snake_name,
                    capital_name,
                }
            })
            .collect();
        Self {
            type_name: value.type_name(),
            fields,
        }
    }

    /// Finds the field an incoming JSON key refers to.
    ///
    /// A key matches, in order of priority, a field's alias, its declared name,
    /// its lower-case form joined with `separator`, or its lower-case form
    /// split before every capital. The first field in declaration order wins
    /// within each rule. For a non-default separator the lower-case forms are
    /// rendered into `scratch`.
    pub fn resolve(&self, key: &str, separator: char, scratch: &mut String) -> Option<usize> {
        if let Some(index) = self.fields.iter().position(|f| f.alias == Some(key)) {
            return Some(index);
        }
        if let Some(index) = self.fields.iter().position(|f| f.name == key) {
            return Some(index);
        }
        if separator == DEFAULT_SEPARATOR {
            return self
                .fields
                .iter()
                .position(|f| f.snake_name == key)
                .or_else(|| self.fields.iter().position(|f| f.capital_name == key));
        }
        self.position_rendered(key, separator, scratch, write_separated)
            .or_else(|| self.position_rendered(key, separator, scratch, write_split_capitals))
    }

    fn position_rendered(
        &self,
        key: &str,
        separator: char,
        scratch: &mut String,
        write: fn(&str, char, &mut String),
    ) -> Option<usize> {
        self.fields.iter().position(|f| {
            scratch.clear();
            write(f.name, separator, scratch);
            scratch.as_str() == key
        })
    }
}

/// Returns the cached metadata for the type of `value`, computing it on first
/// use.
pub fn struct_info(value: &dyn StructValue) -> Arc<StructTypeInfo> {
    let key = value.type_key();
    if let Some(info) = CACHE.read().get(&key) {
        return Arc::clone(info);
    }

    let computed = Arc::new(StructTypeInfo::introspect(value));
    trace!(
        type_name = computed.type_name,
        fields = computed.fields.len(),
        "cached struct metadata"
    );
    Arc::clone(CACHE.write().entry(key).or_insert(computed))
}

/// Empties the cache.
#[cfg(any(test, feature = "testing"))]
pub fn clear_type_cache() {
    CACHE.write().clear();
}

/// Number of struct types currently cached.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn cached_type_count() -> usize {
    CACHE.read().len()
}

fn alias(tag: &'static str) -> Option<&'static str> {
    let alias = tag.split(',').next().unwrap_or_default().trim();
    match alias {
        "" | "-" => None,
        alias => Some(alias),
    }
}

/// Appends `name` lower-cased, with `separator` inserted at word boundaries.
///
/// A boundary sits before an upper-case letter that follows a lower-case
/// letter or digit, and before the last capital of an acronym that is
/// followed by a lower-case letter: `UserID` becomes `user_id`, `HTTPServer`
/// becomes `http_server`. Existing underscores are kept as they are.
fn write_separated(name: &str, separator: char, out: &mut String) {
    let mut prev = None;
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if let (true, Some(prev)) = (c.is_ascii_uppercase(), prev) {
            let next_is_lower = chars.peek().is_some_and(char::is_ascii_lowercase);
            let boundary = char::is_ascii_lowercase(&prev)
                || char::is_ascii_digit(&prev)
                || (char::is_ascii_uppercase(&prev) && next_is_lower);
            if boundary {
                out.push(separator);
            }
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
}

/// Appends `name` lower-cased, with `separator` before every upper-case
/// letter except a leading one: `UserID` becomes `user_i_d`.
fn write_split_capitals(name: &str, separator: char, out: &mut String) {
    for (i, c) in name.char_indices() {
        if c.is_ascii_uppercase() && i > 0 {
            out.push(separator);
        }
        out.push(c.to_ascii_lowercase());
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{FieldDecl, reflect_struct};

    #[rstest]
    #[case("Id", "id")]
    #[case("ID", "id")]
    #[case("UserID", "user_id")]
    #[case("CreatedAt", "created_at")]
    #[case("HTTPServer", "http_server")]
    #[case("avatar_url", "avatar_url")]
    #[case("Address2", "address2")]
    #[case("lastLogin", "last_login")]
    fn separated_names(#[case] name: &str, #[case] expected: &str) {
        let mut out = String::new();
        write_separated(name, '_', &mut out);
        assert_eq!(out, expected);
    }

    #[test]
    fn custom_separator() {
        let mut out = String::new();
        write_separated("CreatedAt", '-', &mut out);
        assert_eq!(out, "created-at");
    }

    #[rstest]
    #[case("Id", "id")]
    #[case("ID", "i_d")]
    #[case("UserID", "user_i_d")]
    #[case("HTTPServer", "h_t_t_p_server")]
    #[case("lastLogin", "last_login")]
    #[case("avatar_url", "avatar_url")]
    fn split_capital_names(#[case] name: &str, #[case] expected: &str) {
        let mut out = String::new();
        write_split_capitals(name, '_', &mut out);
        assert_eq!(out, expected);
    }

    #[rstest]
    #[case("", None)]
    #[case("-", None)]
    #[case("user_id", Some("user_id"))]
    #[case("user_id,omitempty", Some("user_id"))]
    #[case(",omitempty", None)]
    fn alias_from_tag(#[case] tag: &'static str, #[case] expected: Option<&str>) {
        assert_eq!(alias(tag), expected);
    }

    #[allow(non_snake_case)]
    #[derive(Default)]
    struct Account {
        Id: String,
        DisplayName: String,
        r#type: String,
        owner: String,
    }

    reflect_struct!(Account {
        Id,
        DisplayName,
        r#type,
        owner => "owner_ref,omitempty",
    });

    #[test]
    fn introspection_follows_declaration_order() {
        let info = struct_info(&Account::default());
        let names: Vec<_> = info.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["Id", "DisplayName", "type", "owner"]);
        assert_eq!(info.fields[3].alias, Some("owner_ref"));
        assert_eq!(info.fields[1].snake_name, "display_name");
        assert!(info.type_name.ends_with("Account"));
    }

    #[rstest]
    #[case("owner_ref", Some(3))]
    #[case("Id", Some(0))]
    #[case("id", Some(0))]
    #[case("display_name", Some(1))]
    #[case("DisplayName", Some(1))]
    #[case("type", Some(2))]
    #[case("owner", Some(3))]
    #[case("displayname", None)]
    #[case("missing", None)]
    fn resolves_keys(#[case] key: &str, #[case] expected: Option<usize>) {
        let info = struct_info(&Account::default());
        let mut scratch = String::new();
        assert_eq!(info.resolve(key, '_', &mut scratch), expected);
    }

    #[test]
    fn resolves_with_custom_separator() {
        let info = struct_info(&Account::default());
        let mut scratch = String::new();
        assert_eq!(info.resolve("display-name", '-', &mut scratch), Some(1));
        assert_eq!(info.resolve("display_name", '-', &mut scratch), None);
    }

    #[test]
    fn alias_takes_priority_over_names() {
        #[derive(Default)]
        struct Swapped {
            first: String,
            second: String,
        }
        reflect_struct!(Swapped {
            first,
            second => "first",
        });

        let info = struct_info(&Swapped::default());
        let mut scratch = String::new();
        assert_eq!(info.resolve("first", '_', &mut scratch), Some(1));
        assert_eq!(info.resolve("second", '_', &mut scratch), Some(1));
    }

    #[allow(non_snake_case)]
    #[derive(Default)]
    struct Session {
        UserID: String,
        HTTPHost: String,
    }
    reflect_struct!(Session { UserID, HTTPHost });

    #[rstest]
    #[case('_', "user_id", Some(0))]
    #[case('_', "user_i_d", Some(0))]
    #[case('_', "http_host", Some(1))]
    #[case('_', "h_t_t_p_host", Some(1))]
    #[case('-', "user-id", Some(0))]
    #[case('-', "user-i-d", Some(0))]
    #[case('-', "user_i_d", None)]
    #[case('_', "useri_d", None)]
    fn split_capitals_are_a_last_resort(
        #[case] separator: char,
        #[case] key: &str,
        #[case] expected: Option<usize>,
    ) {
        let info = struct_info(&Session::default());
        let mut scratch = String::new();
        assert_eq!(info.resolve(key, separator, &mut scratch), expected);
    }

    #[test]
    fn acronym_form_beats_split_capitals() {
        // `a_b` splits `AB` at every capital but is the acronym-aware form
        // of `A_b`, which comes later in declaration order.
        #[allow(non_snake_case)]
        #[derive(Default)]
        struct Pair {
            AB: String,
            A_b: String,
        }
        reflect_struct!(Pair { AB, A_b });

        let info = struct_info(&Pair::default());
        let mut scratch = String::new();
        assert_eq!(info.resolve("a_b", '_', &mut scratch), Some(1));
        assert_eq!(info.resolve("ab", '_', &mut scratch), Some(0));
    }

    /// Serializes tests that clear the cache or compare cached entries.
    static CACHE_GUARD: parking_lot::Mutex<()> = parking_lot::const_mutex(());

    #[test]
    fn clearing_drops_cached_metadata() {
        #[derive(Default)]
        struct Cleared {
            value: u8,
        }
        reflect_struct!(Cleared { value });

        let _guard = CACHE_GUARD.lock();
        let before = struct_info(&Cleared::default());
        assert!(cached_type_count() >= 1);
        // One reference held here, one by the cache.
        assert_eq!(Arc::strong_count(&before), 2);

        clear_type_cache();
        assert_eq!(Arc::strong_count(&before), 1);

        let after = struct_info(&Cleared::default());
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
        assert_eq!(Arc::strong_count(&after), 2);
    }

    #[test]
    fn concurrent_first_lookups_share_one_entry() {
        #[derive(Default)]
        struct Contended {
            a: u8,
            b: u8,
        }
        reflect_struct!(Contended { a, b });

        const THREADS: usize = 16;
        let _guard = CACHE_GUARD.lock();
        let barrier = std::sync::Barrier::new(THREADS);
        let infos: Vec<Arc<StructTypeInfo>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        struct_info(&Contended::default())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let first = &infos[0];
        assert!(infos.iter().all(|info| Arc::ptr_eq(first, info)));
        assert!(Arc::ptr_eq(first, &struct_info(&Contended::default())));
    }

    #[test]
    fn declared_fields_match_macro_input() {
        let account = Account::default();
        let fields = crate::StructValue::declared_fields(&account);
        assert_eq!(fields[3], FieldDecl::new("owner", "owner_ref,omitempty"));
    }
}
