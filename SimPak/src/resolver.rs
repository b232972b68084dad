//! Resource key resolution
//!
//! A [`KeyResolver`] lives for one build. Every tuning file is resolved first,
//! registering its name and instance; SimData files are resolved afterwards
//! against the tuning that was registered under their instance name.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use simmodels::enums::{BinaryResourceType, SimDataGroup, TuningResourceType};
use simmodels::key::ResourceKey;
use simmodels::xml::{SimDataDocument, TuningDocument};

use crate::error::{BuildError, Result};

/// `Name.G0000ABCD.xml` places a resource in group 0x0000ABCD
fn group_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\.G([0-9A-Fa-f]{8})\.[^.]+$").expect("group pattern is a valid regex")
    })
}

/// Group encoded in a source file name, or 0 when there is none
#[must_use]
pub fn group_from_path(path: &Path) -> u32 {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| group_pattern().captures(name))
        .and_then(|caps| u32::from_str_radix(&caps[1], 16).ok())
        .unwrap_or(0)
}

/// A tuning resolved earlier in the build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTuning {
    pub key: ResourceKey,
    pub tuning_type: TuningResourceType,
}

/// Name and instance registry for one build
#[derive(Debug, Default)]
pub struct KeyResolver {
    names_to_keys: HashMap<String, ResolvedTuning>,
    instances: HashSet<u64>,
}

impl KeyResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and register a parsed tuning file
    ///
    /// # Errors
    /// [`BuildError::DuplicateName`], [`BuildError::InvalidType`] or
    /// [`BuildError::DuplicateInstance`], checked in that order. Nothing is
    /// registered on failure.
    pub fn resolve_tuning_key(
        &mut self,
        path: &Path,
        tuning: &TuningDocument,
    ) -> Result<ResourceKey> {
        self.resolve_tuning_parts(path, tuning.name(), tuning.type_attr(), tuning.instance)
    }

    /// [`resolve_tuning_key`](Self::resolve_tuning_key) from the individual
    /// root attributes
    ///
    /// # Errors
    /// As [`resolve_tuning_key`](Self::resolve_tuning_key).
    pub fn resolve_tuning_parts(
        &mut self,
        path: &Path,
        name: &str,
        type_attr: Option<&str>,
        instance: u64,
    ) -> Result<ResourceKey> {
        self.check_name(name)?;

        let tuning_type = type_attr
            .and_then(TuningResourceType::parse_attr)
            .filter(|t| !t.is_generic())
            .ok_or_else(|| BuildError::InvalidType {
                attr: type_attr.map(str::to_string),
            })?;

        self.check_instance(instance)?;

        let key = ResourceKey::new(tuning_type.as_u32(), group_from_path(path), instance);
        self.register(name, key, tuning_type);
        Ok(key)
    }

    /// Register a tuning whose key came from the cache
    ///
    /// Runs the same uniqueness checks as a freshly parsed file, so a cached
    /// build reports the same conflicts as an uncached one.
    ///
    /// # Errors
    /// [`BuildError::DuplicateName`], [`BuildError::InvalidType`] if the
    /// cached type is not a concrete tuning type, or
    /// [`BuildError::DuplicateInstance`].
    pub fn register_cached_tuning(&mut self, name: &str, key: ResourceKey) -> Result<ResourceKey> {
        self.check_name(name)?;

        let tuning_type = TuningResourceType::from_u32(key.resource_type)
            .filter(|t| !t.is_generic())
            .ok_or_else(|| BuildError::InvalidType {
                attr: Some(format!("{:08X}", key.resource_type)),
            })?;

        self.check_instance(key.instance)?;

        self.register(name, key, tuning_type);
        Ok(key)
    }

    /// Resolve a parsed SimData file against the tunings registered so far
    ///
    /// # Errors
    /// [`BuildError::MissingTuning`] or [`BuildError::UnmappedGroup`].
    pub fn resolve_simdata_key(&self, simdata: &SimDataDocument) -> Result<ResourceKey> {
        self.simdata_key_for(&simdata.instance_name)
    }

    /// SimData key for the tuning registered as `referenced_name`
    ///
    /// # Errors
    /// [`BuildError::MissingTuning`] if no such tuning was registered, or
    /// [`BuildError::UnmappedGroup`] if its type has no SimData group.
    pub fn simdata_key_for(&self, referenced_name: &str) -> Result<ResourceKey> {
        let tuning = self
            .names_to_keys
            .get(referenced_name)
            .ok_or_else(|| BuildError::MissingTuning {
                name: referenced_name.to_string(),
            })?;

        let group = SimDataGroup::for_tuning(tuning.tuning_type).ok_or(BuildError::UnmappedGroup {
            resource_type: tuning.key.resource_type,
        })?;

        Ok(ResourceKey::new(
            BinaryResourceType::SimData.as_u32(),
            group,
            tuning.key.instance,
        ))
    }

    /// The tuning registered as `name`, if any
    #[must_use]
    pub fn tuning(&self, name: &str) -> Option<&ResolvedTuning> {
        self.names_to_keys.get(name)
    }

    /// Number of registered tunings
    #[must_use]
    pub fn len(&self) -> usize {
        self.names_to_keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names_to_keys.is_empty()
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if self.names_to_keys.contains_key(name) {
            return Err(BuildError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn check_instance(&self, instance: u64) -> Result<()> {
        if self.instances.contains(&instance) {
            return Err(BuildError::DuplicateInstance { instance });
        }
        Ok(())
    }

    fn register(&mut self, name: &str, key: ResourceKey, tuning_type: TuningResourceType) {
        self.instances.insert(key.instance);
        self.names_to_keys
            .insert(name.to_string(), ResolvedTuning { key, tuning_type });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use simmodels::xml::{parse_simdata_xml, parse_tuning_xml};

    const TRAIT: u32 = 0xCB5F_DDC7;

    fn tuning(name: &str, type_attr: &str, instance: u64) -> TuningDocument {
        let xml = format!(r#"<I c="X" i="{type_attr}" m="x" n="{name}" s="{instance}"/>"#);
        parse_tuning_xml(xml.as_bytes()).unwrap()
    }

    fn simdata(name: &str) -> SimDataDocument {
        let xml = format!(
            r#"<SimData><Instances><I name="{name}" schema="Trait"/></Instances></SimData>"#
        );
        parse_simdata_xml(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_trait_key_without_group_suffix() {
        let mut resolver = KeyResolver::new();
        let key = resolver
            .resolve_tuning_key(Path::new("src/my_trait.xml"), &tuning("my_trait", "trait", 12345))
            .unwrap();
        assert_eq!(key, ResourceKey::new(TRAIT, 0, 12345));
    }

    #[test]
    fn test_simdata_key_follows_tuning() {
        let mut resolver = KeyResolver::new();
        resolver
            .resolve_tuning_key(Path::new("my_trait.xml"), &tuning("my_trait", "trait", 12345))
            .unwrap();

        let key = resolver.resolve_simdata_key(&simdata("my_trait")).unwrap();
        let group = SimDataGroup::for_tuning(TuningResourceType::Trait).unwrap();
        assert_eq!(key, ResourceKey::new(0x545A_C67A, group, 12345));
    }

    #[test]
    fn test_group_suffix() {
        assert_eq!(group_from_path(Path::new("a/b/name.G0000ABCD.xml")), 0xABCD);
        assert_eq!(group_from_path(Path::new("name.G8000000f.xml")), 0x8000_000F);
        assert_eq!(group_from_path(Path::new("name.g80000000.xml")), 0);
        assert_eq!(group_from_path(Path::new("name.xml")), 0);
        assert_eq!(group_from_path(Path::new("name.G123.xml")), 0);
        assert_eq!(group_from_path(Path::new("nameG0000ABCD.xml")), 0);
        assert_eq!(group_from_path(Path::new("x.G0000ABCD.dir/name.xml")), 0);
    }

    #[test]
    fn test_group_suffix_flows_into_key() {
        let mut resolver = KeyResolver::new();
        let key = resolver
            .resolve_tuning_key(Path::new("buff.G00000001.xml"), &tuning("buff", "buff", 7))
            .unwrap();
        assert_eq!(key.group, 1);
    }

    #[test]
    fn test_duplicate_name() {
        let mut resolver = KeyResolver::new();
        resolver
            .resolve_tuning_key(Path::new("a.xml"), &tuning("same", "trait", 1))
            .unwrap();
        let err = resolver
            .resolve_tuning_key(Path::new("b.xml"), &tuning("same", "trait", 2))
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateName { ref name } if name == "same"));
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_duplicate_instance() {
        let mut resolver = KeyResolver::new();
        resolver
            .resolve_tuning_key(Path::new("a.xml"), &tuning("a", "trait", 99))
            .unwrap();
        let err = resolver
            .resolve_tuning_key(Path::new("b.xml"), &tuning("b", "buff", 99))
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateInstance { instance: 99 }));
        assert!(resolver.tuning("b").is_none());
    }

    #[test]
    fn test_duplicate_name_is_checked_before_type() {
        let mut resolver = KeyResolver::new();
        resolver
            .resolve_tuning_key(Path::new("a.xml"), &tuning("a", "trait", 1))
            .unwrap();
        let err = resolver
            .resolve_tuning_parts(Path::new("b.xml"), "a", Some("bogus"), 1)
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateName { .. }));
    }

    #[test]
    fn test_invalid_and_generic_types() {
        let mut resolver = KeyResolver::new();

        let err = resolver
            .resolve_tuning_key(Path::new("a.xml"), &tuning("a", "not_a_type", 1))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidType { attr: Some(ref a) } if a == "not_a_type"));

        let err = resolver
            .resolve_tuning_key(Path::new("b.xml"), &tuning("b", "tuning", 2))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidType { .. }));

        let err = resolver
            .resolve_tuning_parts(Path::new("c.xml"), "c", None, 3)
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidType { attr: None }));

        // failed resolutions register nothing
        assert!(resolver.is_empty());
        resolver
            .resolve_tuning_key(Path::new("d.xml"), &tuning("d", "trait", 1))
            .unwrap();
    }

    #[test]
    fn test_missing_tuning() {
        let resolver = KeyResolver::new();
        let err = resolver.resolve_simdata_key(&simdata("nobody")).unwrap_err();
        assert!(matches!(err, BuildError::MissingTuning { ref name } if name == "nobody"));
    }

    #[test]
    fn test_unmapped_group() {
        let mut resolver = KeyResolver::new();
        resolver
            .resolve_tuning_key(Path::new("i.xml"), &tuning("sit", "interaction", 5))
            .unwrap();
        let err = resolver.simdata_key_for("sit").unwrap_err();
        assert!(matches!(
            err,
            BuildError::UnmappedGroup { resource_type }
                if resource_type == TuningResourceType::Interaction.as_u32()
        ));
    }

    #[test]
    fn test_cached_tuning_matches_fresh_resolution() {
        let path = Path::new("my_trait.G00000002.xml");
        let doc = tuning("my_trait", "trait", 12345);

        let fresh = KeyResolver::new().resolve_tuning_key(path, &doc).unwrap();
        let cached = KeyResolver::new()
            .register_cached_tuning("my_trait", fresh)
            .unwrap();
        assert_eq!(cached, fresh);
    }

    #[test]
    fn test_cached_tuning_collides_with_fresh() {
        let mut resolver = KeyResolver::new();
        resolver
            .register_cached_tuning("cached", ResourceKey::new(TRAIT, 0, 10))
            .unwrap();

        let err = resolver
            .resolve_tuning_key(Path::new("new.xml"), &tuning("new", "trait", 10))
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateInstance { instance: 10 }));

        let err = resolver
            .register_cached_tuning("cached", ResourceKey::new(TRAIT, 0, 11))
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateName { .. }));
    }

    #[test]
    fn test_cached_tuning_rejects_unknown_type() {
        let mut resolver = KeyResolver::new();
        let err = resolver
            .register_cached_tuning("x", ResourceKey::new(0x0000_0001, 0, 1))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidType { .. }));
    }
}
