use std::collections::BTreeMap;

use crate::{
    error::Error,
    resource::{Resource, Resources},
    version::{Direction, Version, parse_name},
};


/// All versions found in a resource collection, sorted by number.
///
/// A [Catalog] is only created by [Catalog::build], which validates that
/// every version number is unique and has upgrade content.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    versions: Vec<Version>,
}

/// A version that is still being assembled from its resources.
#[derive(Default)]
struct Slots {
    upgrade: Option<Vec<u8>>,
    rollback: Option<Vec<u8>>,
}

impl Slots {
    fn slot(&mut self, direction: Direction) -> &mut Option<Vec<u8>> {
        match direction {
            Direction::Upgrade => &mut self.upgrade,
            Direction::Rollback => &mut self.rollback,
        }
    }
}

impl Catalog {
    /// Read and validate all upgrade resources in the collection.
    ///
    /// Items whose name does not look like an upgrade resource are skipped.
    /// Names of the form `<number>_<up|dn|down>[...]` are accepted, `-` can be used instead of `_`.
    pub fn build<R: Resources + ?Sized>(resources: &R) -> Result<Self, Error> {
        let mut slots = BTreeMap::<u64, Slots>::new();

        for item in resources.list().map_err(Error::List)? {
            let name = item.name();
            let (number, direction) = match parse_name(name) {
                Ok(Some(parsed)) => parsed,
                Ok(None) => {
                    log::debug!("skipping `{name}`, it is not an upgrade resource");
                    continue;
                }
                Err(source) => {
                    return Err(Error::InvalidName {
                        name: name.to_owned(),
                        source,
                    });
                }
            };

            let slot = slots.entry(number).or_default().slot(direction);
            if slot.is_some() {
                return Err(Error::Redefined {
                    number,
                    direction,
                    name: name.to_owned(),
                });
            }

            let content = item.read().map_err(|source| Error::Read {
                name: name.to_owned(),
                source,
            })?;
            *slot = Some(content);
        }

        // the map is ordered, so the result is sorted by number
        let versions = slots
            .into_iter()
            .map(|(number, slots)| {
                let upgrade = slots.upgrade.ok_or(Error::MissingUpgrade { number })?;
                Ok(Version {
                    number,
                    upgrade,
                    rollback: slots.rollback,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        log::debug!("found {} versions", versions.len());
        Ok(Self { versions })
    }

    /// All versions in ascending order.
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// The version with the highest number.
    pub fn latest(&self) -> Option<&Version> {
        self.versions.last()
    }

    pub fn get(&self, number: u64) -> Option<&Version> {
        self.versions
            .binary_search_by_key(&number, Version::number)
            .ok()
            .map(|idx| &self.versions[idx])
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Versions that come after `current`, up to and including `target`.
    pub(crate) fn pending(&self, current: u64, target: u64) -> impl Iterator<Item = &Version> {
        let start = self.versions.partition_point(|v| v.number <= current);
        self.versions[start..]
            .iter()
            .take_while(move |v| v.number <= target)
    }

    /// Versions at or below `current` and above `target`, highest first.
    pub(crate) fn applied(&self, current: u64, target: u64) -> impl Iterator<Item = &Version> {
        let end = self.versions.partition_point(|v| v.number <= current);
        self.versions[..end]
            .iter()
            .rev()
            .take_while(move |v| v.number > target)
    }

    /// The highest version number below `number`, or 0 if there is none.
    pub(crate) fn previous(&self, number: u64) -> u64 {
        let idx = self.versions.partition_point(|v| v.number < number);
        idx.checked_sub(1)
            .map_or(0, |idx| self.versions[idx].number)
    }
}
