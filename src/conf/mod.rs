//! Shell-style configuration file backed by an in-memory mapping
//!
//! ```text
//! # comments are ignored
//! NAME=alon
//! AGE=29
//! ```
//!
//! Keys are stored trimmed and lower-cased, values trimmed. Writing emits the
//! entries sorted by key with the key upper-cased, one `KEY=value` per line.
//!
//! A `ConfFile` holds no file handle between calls: `read` and `write` open,
//! drain and close the file within the call. Sharing one instance across
//! threads needs external synchronization; mutators take `&mut self`.

pub mod parser;
pub mod store;

pub use parser::{normalize_key, normalize_value, parse_line, parse_str, ParsedLine};
pub use store::{Entries, KeyValueStore};

use crate::error::{AppError, Result};
use indexmap::IndexMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Configuration file: a flat key/value mapping bound to a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfFile {
    path: PathBuf,
    entries: IndexMap<String, String>,
    required: Vec<String>,
}

impl ConfFile {
    /// Create an empty instance bound to `path` without touching the disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: IndexMap::new(),
            required: Vec::new(),
        }
    }

    /// Open and parse `path`, then check that every `required` key is set.
    ///
    /// `strict` governs both checks: a missing file fails with `NotFound` and
    /// a missing key with `MissingRequiredKey`. When lenient, a missing file
    /// gives an empty mapping and missing keys are only reported by a later
    /// call to [`ConfFile::validate_required`].
    pub fn open<P, I, S>(path: P, required: I, strict: bool) -> Result<Self>
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut conf = Self::new(path);
        conf.required = required.into_iter().map(Into::into).collect();
        conf.read(strict)?;
        conf.validate_required(&conf.required, strict)?;
        Ok(conf)
    }

    /// Open `path` with no required keys
    pub fn load(path: impl Into<PathBuf>, strict: bool) -> Result<Self> {
        Self::open(path, Vec::<String>::new(), strict)
    }

    /// Parse `text` as if it were the contents of `path`
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let mut conf = Self::new(path);
        conf.entries = collect_entries(parse_str(text));
        conf
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keys declared as required at open time
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Re-read the backing file, replacing the current entries.
    ///
    /// Entries are swapped in only once the whole file has been read, so an
    /// I/O failure part-way leaves the previous mapping untouched.
    pub fn read(&mut self, strict: bool) -> Result<()> {
        if !self.path.is_file() {
            if strict {
                return Err(AppError::not_found(&self.path));
            }
            tracing::warn!(path = %self.path.display(), "conf file not found, using empty mapping");
            self.entries.clear();
            return Ok(());
        }

        let file = File::open(&self.path).map_err(|e| AppError::io(&self.path, e))?;
        let mut lines = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| AppError::io(&self.path, e))?;
            lines.push(parse_line(index + 1, &line));
        }

        self.entries = collect_entries(lines);
        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "parsed conf file");
        Ok(())
    }

    /// Check that every name in `required` is present.
    ///
    /// Returns `Ok(true)` when all are set. Otherwise fails with
    /// `MissingRequiredKey` for the first absent name when `strict`, or
    /// returns `Ok(false)`.
    pub fn validate_required<S: AsRef<str>>(&self, required: &[S], strict: bool) -> Result<bool> {
        for name in required {
            let name = name.as_ref();
            if !self.contains_key(name) {
                if strict {
                    return Err(AppError::missing_required_key(name, &self.path));
                }
                tracing::debug!(key = name, path = %self.path.display(), "required key missing");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Every name in `required` that is not present, in the given order
    pub fn missing_required<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !self.contains_key(name))
            .map(str::to_string)
            .collect()
    }

    /// The exact text [`ConfFile::write`] puts on disk
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.sorted_entries() {
            out.push_str(&parser::format_entry(key, value));
            out.push('\n');
        }
        out
    }

    /// Overwrite the backing file with the sorted, upper-cased entries
    pub fn write(&self) -> Result<()> {
        fs::write(&self.path, self.render()).map_err(|e| AppError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "wrote conf file");
        Ok(())
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Result<&str> {
        self.entries
            .get(&normalize_key(key))
            .map(String::as_str)
            .ok_or_else(|| AppError::key_not_found(key))
    }

    /// Insert or overwrite `key`, returning the previous value.
    ///
    /// Content is not checked. A key containing `=` or a line break, or a
    /// value containing a line break, is stored as given, but [`write`]
    /// cannot round-trip it: `set("a=b", "c")` is written as `A=B=c` and reads
    /// back as `a` = `B=c`.
    ///
    /// [`write`]: ConfFile::write
    pub fn set(&mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Option<String> {
        self.entries
            .insert(normalize_key(key.as_ref()), normalize_value(value.as_ref()))
    }

    /// Remove `key`, returning its value
    pub fn delete(&mut self, key: &str) -> Result<String> {
        self.entries
            .shift_remove(&normalize_key(key))
            .ok_or_else(|| AppError::key_not_found(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.values().map(String::as_str)
    }
}

impl KeyValueStore for ConfFile {
    fn get(&self, key: &str) -> Result<&str> {
        ConfFile::get(self, key)
    }

    fn set(&mut self, key: &str, value: &str) -> Option<String> {
        ConfFile::set(self, key, value)
    }

    fn delete(&mut self, key: &str) -> Result<String> {
        ConfFile::delete(self, key)
    }

    fn contains_key(&self, key: &str) -> bool {
        ConfFile::contains_key(self, key)
    }

    fn len(&self) -> usize {
        ConfFile::len(self)
    }

    fn entries(&self) -> Entries<'_> {
        Box::new(self.iter())
    }
}

impl<'a> IntoIterator for &'a ConfFile {
    type Item = (&'a str, &'a str);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Fold parsed lines into a mapping; a later duplicate overwrites in place
fn collect_entries<I>(lines: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = ParsedLine>,
{
    let mut entries = IndexMap::new();
    for line in lines {
        if let ParsedLine::Entry { key, value, .. } = line {
            entries.insert(key, value);
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_conf(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("app.conf");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_open_parses_entries() {
        let dir = TempDir::new().unwrap();
        let path = write_conf(&dir, "# comments are ignored\nNAME=alon\nAGE=29\n");

        let conf = ConfFile::open(&path, ["name"], true).unwrap();
        assert_eq!(conf.get("name").unwrap(), "alon");
        assert_eq!(conf.get("age").unwrap(), "29");
        assert_eq!(conf.len(), 2);
        assert_eq!(conf.required(), ["name".to_string()]);
    }

    #[test]
    fn test_comment_blank_then_entry() {
        let dir = TempDir::new().unwrap();
        let path = write_conf(&dir, "  # comment\n\nX=1\n");

        let conf = ConfFile::load(&path, true).unwrap();
        assert_eq!(conf.iter().collect::<Vec<_>>(), vec![("x", "1")]);
    }

    #[test]
    fn test_missing_file_strict_and_lenient() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.conf");

        let err = ConfFile::load(&path, true).unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        let conf = ConfFile::load(&path, false).unwrap();
        assert!(conf.is_empty());
    }

    #[test]
    fn test_missing_required_key() {
        let dir = TempDir::new().unwrap();
        let path = write_conf(&dir, "AGE=29\n");

        let err = ConfFile::open(&path, ["name"], true).unwrap_err();
        match err {
            AppError::MissingRequiredKey { key, path: err_path } => {
                assert_eq!(key, "name");
                assert_eq!(err_path, path);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let conf = ConfFile::open(&path, ["name"], false).unwrap();
        assert!(!conf.validate_required(&["name"], false).unwrap());
        assert!(conf.validate_required(&["age"], false).unwrap());
    }

    #[test]
    fn test_required_names_are_normalized() {
        let conf = ConfFile::from_text("mem.conf", "NAME=alon\n");
        assert!(conf.validate_required(&["NAME", " name "], true).unwrap());
    }

    #[test]
    fn test_missing_required_lists_all() {
        let conf = ConfFile::from_text("mem.conf", "B=2\n");
        assert_eq!(conf.missing_required(&["a", "b", "c"]), vec!["a", "c"]);
    }

    #[test]
    fn test_last_duplicate_wins_keeping_first_position() {
        let conf = ConfFile::from_text("mem.conf", "A=1\nB=2\na=3\n");
        assert_eq!(conf.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_render_sorts_and_uppercases() {
        let mut conf = ConfFile::new("mem.conf");
        conf.set("zebra", "1");
        conf.set("alpha", "2");
        assert_eq!(conf.render(), "ALPHA=2\nZEBRA=1\n");
        // stored keys keep their lower-case form
        assert_eq!(conf.keys().collect::<Vec<_>>(), vec!["zebra", "alpha"]);
    }

    #[test]
    fn test_write_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.conf");

        let mut conf = ConfFile::new(&path);
        conf.set("name", "alon");
        conf.set("age", "29");
        conf.write().unwrap();

        let reread = ConfFile::load(&path, true).unwrap();
        assert_eq!(reread.get("name").unwrap(), "alon");
        assert_eq!(reread.get("age").unwrap(), "29");
        assert_eq!(reread.len(), 2);
    }

    #[test]
    fn test_write_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_conf(&dir, "b = 2\n# note\nA=1=x\n");

        let conf = ConfFile::load(&path, true).unwrap();
        conf.write().unwrap();
        let first = fs::read(&path).unwrap();
        conf.write().unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(String::from_utf8(first).unwrap(), "A=1=x\nB=2\n");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let conf = ConfFile::new(dir.path().join("no/such/dir/app.conf"));
        let err = conf.write().unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_set_normalizes_key_and_value() {
        let mut conf = ConfFile::new("mem.conf");
        assert_eq!(conf.set(" Name ", "  alon "), None);
        assert_eq!(conf.get("NAME").unwrap(), "alon");
        assert_eq!(conf.set("name", "bob"), Some("alon".to_string()));
        assert!(conf.contains_key("name"));
    }

    #[test]
    fn test_set_does_not_escape_separators() {
        let mut conf = ConfFile::new("mem.conf");
        conf.set("a=b", "c");
        conf.set("multi", "one\ntwo");
        assert_eq!(conf.get("a=b").unwrap(), "c");

        let reread = ConfFile::from_text("mem.conf", &conf.render());
        assert_eq!(reread.get("a").unwrap(), "B=c");
        assert!(!reread.contains_key("a=b"));
        assert_eq!(reread.get("multi").unwrap(), "one");
        assert!(reread.contains_key("two"));
    }

    #[test]
    fn test_get_and_delete_missing_key() {
        let mut conf = ConfFile::from_text("mem.conf", "A=1\n");
        assert!(matches!(conf.get("b"), Err(AppError::KeyNotFound { .. })));
        assert!(matches!(conf.delete("b"), Err(AppError::KeyNotFound { .. })));
        assert_eq!(conf.delete("A").unwrap(), "1");
        assert!(conf.is_empty());
    }

    #[test]
    fn test_delete_preserves_order_of_the_rest() {
        let mut conf = ConfFile::from_text("mem.conf", "A=1\nB=2\nC=3\n");
        conf.delete("b").unwrap();
        assert_eq!(conf.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(conf.values().collect::<Vec<_>>(), vec!["1", "3"]);
    }

    #[test]
    fn test_reread_replaces_entries() {
        let dir = TempDir::new().unwrap();
        let path = write_conf(&dir, "A=1\n");

        let mut conf = ConfFile::load(&path, true).unwrap();
        conf.set("extra", "x");
        fs::write(&path, "B=2\n").unwrap();
        conf.read(true).unwrap();

        assert_eq!(conf.iter().collect::<Vec<_>>(), vec![("b", "2")]);
    }

    #[test]
    fn test_invalid_utf8_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bin.conf");
        fs::write(&path, [0x41, 0x3d, 0xff, 0xfe, b'\n']).unwrap();

        let err = ConfFile::load(&path, false).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_directory_path_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            ConfFile::load(dir.path(), true),
            Err(AppError::NotFound { .. })
        ));
        assert!(ConfFile::load(dir.path(), false).unwrap().is_empty());
    }

    #[test]
    fn test_trait_surface() {
        let mut conf = ConfFile::new("mem.conf");
        let store: &mut dyn KeyValueStore = &mut conf;
        store.set("b", "2");
        store.set("a", "1");

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("A").unwrap(), "1");
        assert_eq!(store.entries().count(), 2);
        assert_eq!(store.sorted_entries(), vec![("a", "1"), ("b", "2")]);
        assert_eq!(store.delete("a").unwrap(), "1");
        assert!(!store.contains_key("a"));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let conf = ConfFile::from_text("mem.conf", "A=1\nB=2\n");
        let first: Vec<_> = (&conf).into_iter().collect();
        let second: Vec<_> = conf.iter().collect();
        assert_eq!(first, second);
    }
}
