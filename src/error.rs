use std::io;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::{
    upgrade::Results,
    version::{Direction, NameError},
};

/// Error returned by a [crate::Driver], boxed so that [Error] does not depend on the driver type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong while building a catalog or upgrading a store.
///
/// Errors that happen after the store was touched carry the [Results] of the
/// call up to the failure, see [Error::partial_results].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("no driver")]
    NoDriver,

    #[error("no versions")]
    NoVersions,

    #[error("could not list resources")]
    List(#[source] io::Error),

    #[error("could not read resource `{name}`")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("upgrade resource has invalid form: `{name}`")]
    InvalidName {
        name: String,
        #[source]
        source: NameError,
    },

    #[error("{direction} resource redefined for version {number}: `{name}`")]
    Redefined {
        number: u64,
        direction: Direction,
        name: String,
    },

    #[error("version {number} is missing an upgrade resource")]
    MissingUpgrade { number: u64 },

    #[error(transparent)]
    Version(BoxError),

    #[error("could not upgrade to version {number}")]
    Apply {
        number: u64,
        results: Results,
        #[source]
        source: BoxError,
    },

    #[error("store is at version {number}, which is not in the catalog")]
    UnknownVersion { number: u64 },

    #[error("version {number} has no rollback resource")]
    MissingRollback { number: u64, results: Results },

    #[error("could not roll back version {number}")]
    Rollback {
        number: u64,
        results: Results,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// What was accomplished by the failed call before the error.
    ///
    /// Returns [None] when the error happened before any version was considered.
    pub fn partial_results(&self) -> Option<&Results> {
        match self {
            Error::Apply { results, .. }
            | Error::MissingRollback { results, .. }
            | Error::Rollback { results, .. } => Some(results),
            _ => None,
        }
    }

    /// Render a diagnostic pointing at the malformed part of a resource name.
    ///
    /// Only [Error::InvalidName] has something to point at, other errors return [None].
    pub fn render(&self) -> Option<String> {
        let Error::InvalidName { name, source } = self else {
            return None;
        };
        let report = Level::ERROR
            .primary_title("upgrade resource has invalid form")
            .element(
                Snippet::source(name.as_str()).annotation(
                    AnnotationKind::Primary
                        .span(source.span.clone())
                        .label(source.reason.to_string()),
                ),
            );
        Some(Renderer::plain().render(&[report]))
    }
}
