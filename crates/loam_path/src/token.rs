//! Address tokens for deep paths.

/// Kind of container a token expects at its position when a write has to
/// create or replace one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// String-keyed map.
    Mapping,
    /// Ordered list.
    Sequence,
}

/// One addressing key: a map key or a list index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathKey {
    /// Map key.
    Name(String),
    /// List index. Negative indices count from the end on reads.
    Index(i64),
}

/// One step of a [`Path`]: the key plus a hint of the container kind
/// expected at this position.
///
/// The hint matters only on writes; reads dispatch on the key alone.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathToken {
    /// The addressing key.
    pub key: PathKey,
    /// Container kind expected at this position.
    pub kind: ContainerKind,
}

impl PathToken {
    /// A map-key token.
    pub fn name(key: impl Into<String>) -> Self {
        PathToken {
            key: PathKey::Name(key.into()),
            kind: ContainerKind::Mapping,
        }
    }

    /// A bracketed list-index token.
    pub fn index(index: i64) -> Self {
        PathToken {
            key: PathKey::Index(index),
            kind: ContainerKind::Sequence,
        }
    }

    fn from_key(key: PathKey) -> Self {
        match key {
            PathKey::Name(name) => PathToken::name(name),
            PathKey::Index(index) => PathToken::index(index),
        }
    }
}

/// An ordered token sequence describing a route through nested structures.
///
/// Order is significant: left is outermost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    tokens: Vec<PathToken>,
}

impl Path {
    /// Create a path from tokens.
    pub fn new(tokens: Vec<PathToken>) -> Self {
        Path { tokens }
    }

    /// The tokens, outermost first.
    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the path has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the keys, outermost first.
    pub fn keys(&self) -> impl Iterator<Item = &PathKey> {
        self.tokens.iter().map(|t| &t.key)
    }
}

impl From<Vec<PathToken>> for Path {
    fn from(tokens: Vec<PathToken>) -> Self {
        Path::new(tokens)
    }
}

/// Raw path input accepted by [`tokenize`](crate::tokenize) and every
/// resolver operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSpec {
    /// A raw string, parsed with the path grammar when it contains path
    /// syntax and treated as a single key otherwise.
    Raw(String),
    /// A bare numeric key. Addresses a list position, but carries a
    /// `Mapping` hint like any unbracketed key.
    Key(i64),
    /// Pre-split keys; integers become `Sequence` tokens, names `Mapping`.
    Keys(Vec<PathKey>),
    /// An already-tokenized path, passed through unchanged.
    Tokens(Path),
    /// No path at all; tokenizes to the empty path.
    Unset,
}

impl From<&str> for PathSpec {
    fn from(raw: &str) -> Self {
        PathSpec::Raw(raw.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(raw: String) -> Self {
        PathSpec::Raw(raw)
    }
}

impl From<i64> for PathSpec {
    fn from(key: i64) -> Self {
        PathSpec::Key(key)
    }
}

impl From<Vec<PathKey>> for PathSpec {
    fn from(keys: Vec<PathKey>) -> Self {
        PathSpec::Keys(keys)
    }
}

impl From<Path> for PathSpec {
    fn from(path: Path) -> Self {
        PathSpec::Tokens(path)
    }
}

impl From<&Path> for PathSpec {
    fn from(path: &Path) -> Self {
        PathSpec::Tokens(path.clone())
    }
}

/// Tokenize a path spec into a [`Path`].
///
/// A pure function of its input: the same spec always yields the same
/// token sequence.
pub fn tokenize(spec: impl Into<PathSpec>) -> Path {
    match spec.into() {
        PathSpec::Raw(raw) => {
            if raw.contains('.') || raw.contains('[') {
                Path::new(crate::scanner::parse_raw(&raw))
            } else {
                Path::new(vec![PathToken::name(raw)])
            }
        }
        PathSpec::Key(index) => Path::new(vec![PathToken {
            key: PathKey::Index(index),
            kind: ContainerKind::Mapping,
        }]),
        PathSpec::Keys(keys) => Path::new(keys.into_iter().map(PathToken::from_key).collect()),
        PathSpec::Tokens(path) => path,
        PathSpec::Unset => Path::default(),
    }
}
