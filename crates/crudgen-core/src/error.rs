use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

///
/// ResolveError
///
/// A single validation failure found while resolving a descriptor.
/// Resolution never stops at the first violation; errors are collected
/// into an [`ErrorSet`] so a configuration author can fix everything in
/// one pass.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, ThisError)]
pub enum ResolveError {
    /// Mutually exclusive explicit settings.
    #[error("conflicting overrides: {message}")]
    ConflictingOverride { message: String },

    /// Base schema version exceeds the declared schema version.
    #[error("state upgrade base version {base} exceeds schema version {schema}")]
    InvalidStateVersionRange { base: u32, schema: u32 },

    /// A template failed to parse or uses a token kind its context
    /// forbids.
    #[error("malformed template in {context}: {message}")]
    MalformedTemplate {
        context: TokenContext,
        message: String,
    },

    /// A token does not name a resolved identity field.
    #[error("unknown identity token '{token}' in {context}")]
    UnknownIdentityToken {
        token: String,
        context: TokenContext,
    },

    /// No explicit or defaultable value exists for a required URL.
    #[error("cannot resolve {url} url: {reason}")]
    UnresolvableUrl { url: UrlKind, reason: String },
}

///
/// TokenContext
/// Which descriptor field a template token came from.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum TokenContext {
    Identity,
    IdFormat,
    ImportFormat { index: usize },
    Mutex,
}

impl fmt::Display for TokenContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdFormat => write!(f, "id_format"),
            Self::Identity => write!(f, "identity"),
            Self::ImportFormat { index } => write!(f, "import_format[{index}]"),
            Self::Mutex => write!(f, "mutex"),
        }
    }
}

///
/// UrlKind
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum UrlKind {
    Create,
    Delete,
    SelfLink,
    Update,
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Create => "create",
            Self::Delete => "delete",
            Self::SelfLink => "self_link",
            Self::Update => "update",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Which sub-resolver produced a violation.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Identity,
    Mutex,
    Policy,
    State,
    Url,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Identity => "identity",
            Self::Mutex => "mutex",
            Self::Policy => "policy",
            Self::State => "state",
            Self::Url => "url",
        };
        write!(f, "{label}")
    }
}

///
/// Violation
///
/// A resolve error tagged with the sub-resolver that produced it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, ThisError)]
#[error("{origin}: {error}")]
pub struct Violation {
    pub origin: ErrorOrigin,
    pub error: ResolveError,
}

///
/// ErrorSet
///
/// Ordered aggregation of every violation found during a resolution
/// pass. Sub-resolvers append in a fixed order, so the same descriptor
/// always produces the same listing.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ErrorSet {
    violations: Vec<Violation>,
}

impl ErrorSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn push(&mut self, origin: ErrorOrigin, error: ResolveError) {
        self.violations.push(Violation { origin, error });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "resolution failed with {} violation(s):", self.len())?;
        for violation in &self.violations {
            writeln!(f, "  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorSet {}

///
/// ResolveWarning
///
/// Non-fatal findings surfaced on the resolved plan. A warning never
/// blocks emission.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, ThisError)]
pub enum ResolveWarning {
    /// State upgraders are enabled but the version range is empty, so
    /// only no-op scaffolding will be generated.
    #[error("state upgraders enabled but schema version {schema} leaves no upgrade window")]
    EmptyUpgradeWindow { schema: u32 },
}
