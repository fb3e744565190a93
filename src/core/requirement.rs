//! Dependency pins and the ordered requirement list.

use std::fmt;
use std::str::FromStr;

use semver::{Version, VersionReq};
use serde::{Serialize, Serializer};

use crate::core::errors::ConfigurationFault;

/// How a pin's version string reads to the host's package index.
///
/// Classification never rejects a version on its shape: index-specific
/// versions like `cci.20230113` are opaque but valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinVersion {
    /// A semantic version, e.g. `3.3.8`
    Exact(Version),
    /// A bracketed requirement, e.g. `[>=1.2 <2]`
    Range(VersionReq),
    /// Anything the index understands but semver does not
    Opaque(String),
}

impl PinVersion {
    /// Classify a version string.
    pub fn classify(s: &str) -> Self {
        if let Ok(version) = Version::parse(s) {
            return PinVersion::Exact(version);
        }

        if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            // Index ranges separate comparators with spaces; semver wants commas.
            let normalized = inner.split_whitespace().collect::<Vec<_>>().join(", ");
            if let Ok(req) = VersionReq::parse(&normalized) {
                return PinVersion::Range(req);
            }
        }

        PinVersion::Opaque(s.to_string())
    }

    /// Whether this pin is not a range.
    ///
    /// Opaque versions count as exact: the index matches them literally
    /// against a single release.
    pub fn is_exact(&self) -> bool {
        !matches!(self, PinVersion::Range(_))
    }
}

/// A dependency name tied to a pinned version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyPin {
    name: String,
    version: String,
}

impl DependencyPin {
    /// Create a pin, validating the name and version.
    pub fn new(name: &str, version: &str) -> Result<Self, ConfigurationFault> {
        let reference = format!("{}/{}", name, version);
        validate_name(name, &reference)?;

        if version.trim().is_empty() {
            return Err(ConfigurationFault::EmptyVersion {
                name: name.to_string(),
            });
        }

        if version.chars().any(char::is_whitespace) && !version.starts_with('[') {
            return Err(ConfigurationFault::InvalidRequirement {
                reference,
                reason: "version contains whitespace".to_string(),
            });
        }

        Ok(DependencyPin {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    /// A pin whose name and version are fixed in source.
    ///
    /// Skips validation; callers must only pass literals that `new` accepts.
    pub(crate) fn pinned(name: &'static str, version: &'static str) -> Self {
        DependencyPin {
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// Parse a `name/version` reference.
    pub fn parse(reference: &str) -> Result<Self, ConfigurationFault> {
        let reference = reference.trim();
        let (name, version) =
            reference
                .split_once('/')
                .ok_or_else(|| ConfigurationFault::InvalidRequirement {
                    reference: reference.to_string(),
                    reason: "expected `name/version`".to_string(),
                })?;

        DependencyPin::new(name, version)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Classify the version string.
    pub fn pin_version(&self) -> PinVersion {
        PinVersion::classify(&self.version)
    }
}

fn validate_name(name: &str, reference: &str) -> Result<(), ConfigurationFault> {
    let invalid = |reason: &str| ConfigurationFault::InvalidRequirement {
        reference: reference.to_string(),
        reason: reason.to_string(),
    };

    let first = name.chars().next().ok_or_else(|| invalid("empty name"))?;
    if !first.is_ascii_lowercase() && !first.is_ascii_digit() {
        return Err(invalid("name must start with a lowercase letter or digit"));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || "_-.+".contains(*c)))
    {
        return Err(invalid(&format!("invalid character `{}` in name", c)));
    }

    Ok(())
}

impl FromStr for DependencyPin {
    type Err = ConfigurationFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DependencyPin::parse(s)
    }
}

impl fmt::Display for DependencyPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

impl Serialize for DependencyPin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("DependencyPin", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("version", &self.version)?;
        state.serialize_field("ref", &self.to_string())?;
        state.end()
    }
}

/// Ordered requirement list with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequirementList {
    pins: Vec<DependencyPin>,
}

impl RequirementList {
    /// Build a list from pins, rejecting duplicate names.
    pub fn from_pins(
        pins: impl IntoIterator<Item = DependencyPin>,
    ) -> Result<Self, ConfigurationFault> {
        let mut list = RequirementList::default();
        for pin in pins {
            list.push(pin)?;
        }
        Ok(list)
    }

    /// A list from pins whose names are known to be unique.
    pub(crate) fn from_unique(pins: Vec<DependencyPin>) -> Self {
        RequirementList { pins }
    }

    /// Parse a list of `name/version` references.
    pub fn parse<S: AsRef<str>>(
        references: impl IntoIterator<Item = S>,
    ) -> Result<Self, ConfigurationFault> {
        let pins = references
            .into_iter()
            .map(|r| DependencyPin::parse(r.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        RequirementList::from_pins(pins)
    }

    /// Append a pin, preserving declaration order.
    pub fn push(&mut self, pin: DependencyPin) -> Result<(), ConfigurationFault> {
        if let Some(existing) = self.get(pin.name()) {
            return Err(ConfigurationFault::DuplicateRequirement {
                name: pin.name().to_string(),
                first: existing.to_string(),
                second: pin.to_string(),
            });
        }
        self.pins.push(pin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DependencyPin> {
        self.pins.iter().find(|p| p.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyPin> {
        self.pins.iter()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn as_slice(&self) -> &[DependencyPin] {
        &self.pins
    }
}

impl<'a> IntoIterator for &'a RequirementList {
    type Item = &'a DependencyPin;
    type IntoIter = std::slice::Iter<'a, DependencyPin>;

    fn into_iter(self) -> Self::IntoIter {
        self.pins.iter()
    }
}
