use super::pattern::{Pattern, PatternAtom, PatternError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

static BUILTIN_LIBRARY: LazyLock<PatternLibrary> = LazyLock::new(|| {
    PatternLibrary::new(builtin_patterns()).expect("built-in patterns are valid")
});

fn builtin_patterns() -> Vec<Pattern> {
    [
        Pattern::new(
            "N-terminus",
            vec![
                PatternAtom::anchor("N", "N"),
                PatternAtom::anchor("HN", "H").renamed_to("HN1"),
                PatternAtom::ptm("HN2", "H"),
                PatternAtom::ptm("HN3", "H"),
            ],
            vec![(0, 1), (0, 2), (0, 3)],
        ),
        Pattern::new(
            "C-terminus",
            vec![
                PatternAtom::anchor("C", "C"),
                PatternAtom::anchor("O", "O").renamed_to("OC1"),
                PatternAtom::ptm("OC2", "O"),
            ],
            vec![(0, 1), (0, 2)],
        ),
    ]
    .into_iter()
    .collect::<Result<_, _>>()
    .expect("built-in pattern definitions are valid")
}

/// A read-only registry of named reference modification patterns.
///
/// Patterns keep the order in which they were registered; names are unique.
#[derive(Debug, Clone, Default)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
    by_name: HashMap<String, usize>,
}

impl PatternLibrary {
    /// Builds a library, rejecting duplicate pattern names.
    pub fn new(patterns: Vec<Pattern>) -> Result<Self, PatternError> {
        let mut by_name = HashMap::with_capacity(patterns.len());
        for (index, pattern) in patterns.iter().enumerate() {
            if by_name.insert(pattern.name().to_string(), index).is_some() {
                return Err(PatternError::DuplicateName(pattern.name().to_string()));
            }
        }
        Ok(Self { patterns, by_name })
    }

    /// The process-wide library of built-in patterns (N- and C-terminus).
    pub fn builtin() -> &'static PatternLibrary {
        &BUILTIN_LIBRARY
    }

    /// Loads a library from a TOML pattern-definition file.
    ///
    /// ```toml
    /// [[patterns]]
    /// name = "C-terminus"
    /// bonds = [[0, 1], [0, 2]]
    /// atoms = [
    ///     { name = "C", element = "C" },
    ///     { name = "O", element = "O", rename = "OC1" },
    ///     { name = "OC2", element = "O", ptm-atom = true },
    /// ]
    /// ```
    pub fn load(path: &Path) -> Result<Self, LibraryLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LibraryLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    /// Parses a library from TOML text in the format accepted by [`PatternLibrary::load`].
    pub fn from_toml_str(content: &str) -> Result<Self, LibraryLoadError> {
        Self::parse(content, "<string>")
    }

    /// Loads a pattern file and appends its patterns to the built-in ones.
    pub fn with_builtin_and(path: &Path) -> Result<Self, LibraryLoadError> {
        let extra = Self::load(path)?;
        Self::builtin()
            .merged(&extra)
            .map_err(|e| LibraryLoadError::Pattern {
                path: path.to_string_lossy().to_string(),
                source: e,
            })
    }

    /// Returns a new library holding this library's patterns followed by `other`'s.
    pub fn merged(&self, other: &PatternLibrary) -> Result<Self, PatternError> {
        let patterns = self
            .patterns
            .iter()
            .chain(other.patterns.iter())
            .cloned()
            .collect();
        Self::new(patterns)
    }

    fn parse(content: &str, origin: &str) -> Result<Self, LibraryLoadError> {
        let raw: RawLibrary = toml::from_str(content).map_err(|e| LibraryLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        let to_load_error = |e| LibraryLoadError::Pattern {
            path: origin.to_string(),
            source: e,
        };
        let patterns = raw
            .patterns
            .into_iter()
            .map(RawPattern::into_pattern)
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_load_error)?;
        Self::new(patterns).map_err(to_load_error)
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.by_name.get(name).map(|&index| &self.patterns[index])
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Pattern::name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLibrary {
    #[serde(default)]
    patterns: Vec<RawPattern>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPattern {
    name: String,
    atoms: Vec<RawPatternAtom>,
    #[serde(default)]
    bonds: Vec<[usize; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawPatternAtom {
    name: String,
    element: String,
    #[serde(default)]
    ptm_atom: bool,
    #[serde(default)]
    rename: Option<String>,
}

impl RawPattern {
    fn into_pattern(self) -> Result<Pattern, PatternError> {
        let atoms = self
            .atoms
            .into_iter()
            .map(|raw| PatternAtom {
                name: raw.name,
                element: raw.element,
                ptm_atom: raw.ptm_atom,
                rename: raw.rename,
            })
            .collect();
        let bonds = self.bonds.into_iter().map(|[a, b]| (a, b)).collect();
        Pattern::new(&self.name, atoms, bonds)
    }
}

#[derive(Debug, Error)]
pub enum LibraryLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid pattern in '{path}': {source}")]
    Pattern {
        path: String,
        source: PatternError,
    },
}
