use std::fmt;

use crate::{catalog::Catalog, driver::Driver, error::Error, resource::Resources};


/// [Config] is used to create an [Upgrader].
///
/// It combines the resources that define the versions with the driver of the store.
pub struct Config<R, D> {
    resources: R,
    driver: Option<D>,
}

impl<R: Resources, D: Driver> Config<R, D> {
    pub fn new(resources: R) -> Self {
        Self {
            resources,
            driver: None,
        }
    }

    /// Set the driver that is used to read and update the store.
    pub fn driver(mut self, driver: D) -> Self {
        self.driver = Some(driver);
        self
    }
}

/// Summary of one call to [Upgrader::upgrade] and friends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Results {
    /// Version of the store before the call.
    pub before: u64,
    /// Version of the store after the call.
    pub after: u64,
    /// The version that was requested, with "latest" resolved to a number.
    pub target: u64,
    /// Versions that were applied (or rolled back) by this call, in order.
    pub applied: Vec<u64>,
}

impl Results {
    fn unchanged(before: u64, target: u64) -> Self {
        Self {
            before,
            after: before,
            target,
            applied: vec![],
        }
    }
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Upgraded to {} ({} → {}) applied ",
            self.target, self.before, self.after
        )?;
        if self.applied.is_empty() {
            return f.write_str("none");
        }
        f.write_str("[")?;
        for (i, number) in self.applied.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{number}")?;
        }
        f.write_str("]")
    }
}

/// Applies the versions of a [Catalog] to a store.
///
/// Every call first asks the driver for the current version of the store and only
/// applies what is missing, so it is fine to call [Upgrader::upgrade] on every start.
pub struct Upgrader<D> {
    catalog: Catalog,
    driver: D,
}

impl<D: Driver> Upgrader<D> {
    /// Build the catalog from the configured resources.
    ///
    /// This fails when the resources are malformed or when no driver was configured.
    pub fn new<R: Resources>(config: Config<R, D>) -> Result<Self, Error> {
        let catalog = Catalog::build(&config.resources)?;
        let driver = config.driver.ok_or(Error::NoDriver)?;
        Ok(Self { catalog, driver })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Upgrade to the latest version.
    pub fn upgrade(&mut self) -> Result<Results, Error> {
        self.upgrade_to(None)
    }

    /// Upgrade to a specific version.
    ///
    /// If the version set is sparse and the requested version does not exist,
    /// upgrades are performed up to the last version before the requested one.
    /// Specifically, if versions `{1, 2, 5}` exist and version `4` is requested,
    /// versions `{1, 2}` are applied.
    pub fn upgrade_to_version(&mut self, target: u64) -> Result<Results, Error> {
        self.upgrade_to(Some(target))
    }

    fn upgrade_to(&mut self, target: Option<u64>) -> Result<Results, Error> {
        let latest = self.catalog.latest().ok_or(Error::NoVersions)?.number();
        let before = self.current_version()?;
        let target = target.unwrap_or(latest);

        if before >= target {
            log::info!("store is at version {before}, nothing to upgrade");
            return Ok(Results::unchanged(before, target));
        }

        let mut results = Results::unchanged(before, target);
        for version in self.catalog.pending(before, target) {
            let number = version.number();
            if let Err(e) = self.driver.upgrade(version) {
                log::warn!("upgrade to version {number} failed: {e}");
                return Err(Error::Apply {
                    number,
                    results,
                    source: Box::new(e),
                });
            }
            log::info!("upgraded to version {number}");
            results.after = number;
            results.applied.push(number);
        }

        Ok(results)
    }

    /// Roll back every version above `target`, highest first.
    ///
    /// All versions between `target` and the current version must have rollback content.
    /// The walk stops at the first version without it, after rolling back everything above.
    /// The current version of the store must be in the catalog, otherwise nothing is rolled back.
    pub fn rollback_to_version(&mut self, target: u64) -> Result<Results, Error> {
        if self.catalog.is_empty() {
            return Err(Error::NoVersions);
        }
        let before = self.current_version()?;

        if before <= target {
            log::info!("store is at version {before}, nothing to roll back");
            return Ok(Results::unchanged(before, target));
        }
        // rolling back starts at the current version, so the catalog must know it
        if self.catalog.get(before).is_none() {
            return Err(Error::UnknownVersion { number: before });
        }

        let mut results = Results::unchanged(before, target);
        for version in self.catalog.applied(before, target) {
            let number = version.number();
            if version.rollback().is_none() {
                return Err(Error::MissingRollback { number, results });
            }
            if let Err(e) = self.driver.rollback(version) {
                log::warn!("rollback of version {number} failed: {e}");
                return Err(Error::Rollback {
                    number,
                    results,
                    source: Box::new(e),
                });
            }
            log::info!("rolled back version {number}");
            results.after = self.catalog.previous(number);
            results.applied.push(number);
        }

        Ok(results)
    }

    fn current_version(&mut self) -> Result<u64, Error> {
        self.driver
            .version()
            .map_err(|e| Error::Version(Box::new(e)))
    }
}
