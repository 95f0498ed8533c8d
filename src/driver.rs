//! The contract between the [crate::Upgrader] and a concrete store.
#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::version::Version;

/// Implemented by store specific drivers.
///
/// A driver must apply every version atomically: the upgrade content and the
/// new version record are either both visible in the store, or neither is.
/// The [crate::Upgrader] relies on this to resume after a failure.
///
/// Drivers do not need to protect against concurrent upgrades of the same store,
/// callers that run several upgraders at once have to serialize them.
pub trait Driver {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The current version of the store, `0` if no version was recorded yet.
    fn version(&mut self) -> Result<u64, Self::Error>;

    /// Execute the upgrade content of `version` and record `version` as the current version.
    fn upgrade(&mut self, version: &Version) -> Result<(), Self::Error>;

    /// Execute the rollback content of `version` and remove its record.
    ///
    /// The [crate::Upgrader] only calls this for versions that have rollback content.
    fn rollback(&mut self, version: &Version) -> Result<(), Self::Error>;
}

impl<D: Driver + ?Sized> Driver for &mut D {
    type Error = D::Error;

    fn version(&mut self) -> Result<u64, Self::Error> {
        (**self).version()
    }

    fn upgrade(&mut self, version: &Version) -> Result<(), Self::Error> {
        (**self).upgrade(version)
    }

    fn rollback(&mut self, version: &Version) -> Result<(), Self::Error> {
        (**self).rollback(version)
    }
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    type Error = D::Error;

    fn version(&mut self) -> Result<u64, Self::Error> {
        (**self).version()
    }

    fn upgrade(&mut self, version: &Version) -> Result<(), Self::Error> {
        (**self).upgrade(version)
    }

    fn rollback(&mut self, version: &Version) -> Result<(), Self::Error> {
        (**self).rollback(version)
    }
}
