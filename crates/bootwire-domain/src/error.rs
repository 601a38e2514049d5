//! Error handling types

use std::fmt;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bootwire
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value names no known option
    #[error("Invalid configuration: unknown value '{value}' for '{key}'")]
    InvalidConfiguration {
        /// The configuration key that was read
        key: String,
        /// The offending value, verbatim
        value: String,
    },

    /// The composed wiring could not be turned into a graph
    #[error("Graph resolution failed: {diagnostics}")]
    GraphResolution {
        /// Every problem the resolver found
        diagnostics: Diagnostics,
    },

    /// A lookup was attempted after the component registry was cleared
    #[error("Component registry has been cleared; cannot resolve {key}")]
    RegistryCleared {
        /// The key that was requested
        key: String,
    },

    /// Configuration could not be loaded or extracted
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Process lifecycle violation (e.g. registering after shutdown began)
    #[error("Lifecycle error: {message}")]
    Lifecycle {
        /// Description of the lifecycle error
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid configuration error
    pub fn invalid_configuration<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self::InvalidConfiguration {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a graph resolution error from a list of diagnostics
    pub fn graph_resolution(diagnostics: impl Into<Diagnostics>) -> Self {
        Self::GraphResolution {
            diagnostics: diagnostics.into(),
        }
    }

    /// Create a graph resolution error carrying a single diagnostic
    pub fn diagnostic(diagnostic: Diagnostic) -> Self {
        Self::graph_resolution(vec![diagnostic])
    }

    /// Create a registry cleared error
    pub fn registry_cleared<S: Into<String>>(key: S) -> Self {
        Self::RegistryCleared { key: key.into() }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a lifecycle error
    pub fn lifecycle<S: Into<String>>(message: S) -> Self {
        Self::Lifecycle {
            message: message.into(),
        }
    }

    /// Diagnostics carried by a graph resolution error, if any
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::GraphResolution { diagnostics } => Some(diagnostics),
            _ => None,
        }
    }
}

/// A single problem reported by the graph resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No binding exists for a requested or required key
    Missing {
        /// Key that could not be satisfied
        key: String,
        /// Module that declared the requirement, when known
        required_by: Option<String>,
    },
    /// More than one binding claims the same key
    Ambiguous {
        /// Key bound more than once
        key: String,
        /// Sources of the conflicting bindings
        sources: Vec<String>,
    },
    /// Resolution re-entered a key that was already being resolved
    Cyclic {
        /// Keys on the resolution path, ending with the repeated key
        path: Vec<String>,
    },
    /// A provider or eager singleton failed while constructing its instance
    Provision {
        /// Key whose construction failed
        key: String,
        /// Failure detail
        message: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing {
                key,
                required_by: Some(module),
            } => write!(f, "no binding for {key} (required by {module})"),
            Self::Missing {
                key,
                required_by: None,
            } => write!(f, "no binding for {key}"),
            Self::Ambiguous { key, sources } => {
                write!(f, "ambiguous bindings for {key} from [{}]", sources.join(", "))
            }
            Self::Cyclic { path } => write!(f, "dependency cycle {}", path.join(" -> ")),
            Self::Provision { key, message } => write!(f, "failed to provide {key}: {message}"),
        }
    }
}

/// Ordered collection of resolver diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no problem was reported
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the diagnostics in report order
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self(diagnostics)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, diagnostic) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}
