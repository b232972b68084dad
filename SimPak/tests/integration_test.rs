use simpak::prelude::*;
use simmodels::enums::{BinaryResourceType, SimDataGroup, TuningResourceType};
use simmodels::key::ResourceKey;
use simmodels::package::Package;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

use pretty_assertions::assert_eq;

const TRAIT: u32 = 0xCB5F_DDC7;
const BUFF: u32 = 0x6017_E896;

const CONFIG: &str = r#"{
    "buildName": "MyMod",
    "sourcePatterns": {
        "tuning": ["tuning/**/*.xml"],
        "simdata": ["simdata/**/*.xml"],
        "packages": ["packages/*.package"]
    },
    "buildFolders": ["build", "mods"]
}"#;

fn trait_xml(name: &str, instance: u64) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<I c="Trait" i="trait" m="traits.traits" n="{name}" s="{instance}">
  <T n="display_name">0x12345678</T>
</I>"#
    )
}

fn simdata_xml(name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<SimData version="0x00000101" u="0x00000000">
  <Instances>
    <I name="{name}" schema="Trait" type="Object"/>
  </Instances>
</SimData>"#
    )
}

struct Project {
    dir: TempDir,
}

impl Project {
    fn new(config: &str) -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("simpak-config.json"), config).unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join("src").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn options(&self) -> BuildOptions {
        BuildOptions::from_config_file(&self.root().join("simpak-config.json")).unwrap()
    }

    fn package_bytes(&self) -> Vec<u8> {
        fs::read(self.root().join("build/MyMod.package")).unwrap()
    }

    fn package_keys(&self) -> Vec<ResourceKey> {
        Package::from_bytes(&self.package_bytes())
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.key)
            .collect()
    }

    fn cache_json(&self) -> String {
        fs::read_to_string(self.root().join("cache/cache.json")).unwrap()
    }
}

fn simdata_key(instance: u64) -> ResourceKey {
    ResourceKey::new(
        BinaryResourceType::SimData.as_u32(),
        SimDataGroup::for_tuning(TuningResourceType::Trait).unwrap(),
        instance,
    )
}

fn trait_project() -> Project {
    let project = Project::new(CONFIG);
    project.write("tuning/traits/my_trait.xml", &trait_xml("creator:my_trait", 12345));
    project.write("simdata/traits/my_trait.xml", &simdata_xml("creator:my_trait"));
    project.write(
        "tuning/buffs/my_buff.G00000001.xml",
        r#"<I c="Buff" i="buff" m="buffs.buff" n="creator:my_buff" s="777"/>"#,
    );
    project
}

#[test]
fn test_build_resolves_keys_in_phase_order() {
    let project = trait_project();
    let report = build(&project.options()).unwrap();

    assert_eq!(report.tuning_count, 2);
    assert_eq!(report.simdata_count, 1);
    assert_eq!(
        project.package_keys(),
        vec![
            ResourceKey::new(BUFF, 1, 777),
            ResourceKey::new(TRAIT, 0, 12345),
            simdata_key(12345),
        ]
    );
}

#[test]
fn test_every_build_folder_gets_a_copy() {
    let project = trait_project();
    let report = build(&project.options()).unwrap();

    assert_eq!(report.written.len(), 2);
    assert_eq!(
        fs::read(project.root().join("mods/MyMod.package")).unwrap(),
        project.package_bytes()
    );
}

#[test]
fn test_rebuild_with_cache_is_byte_identical() {
    let project = trait_project();

    let first = build(&project.options()).unwrap();
    let first_bytes = project.package_bytes();
    assert_eq!(first.cached_count, 0);

    let second = build(&project.options()).unwrap();
    assert_eq!(second.cached_count, 3);
    assert_eq!(project.package_bytes(), first_bytes);
}

#[test]
fn test_disabling_cache_gives_identical_output() {
    let project = trait_project();

    build(&project.options()).unwrap();
    build(&project.options()).unwrap();
    let cached_bytes = project.package_bytes();
    let cache_before = project.cache_json();

    let report = build(&project.options().with_cache(false)).unwrap();
    assert_eq!(report.cached_count, 0);
    assert_eq!(project.package_bytes(), cached_bytes);
    assert_eq!(project.cache_json(), cache_before);
}

#[test]
fn test_cache_stores_decimal_instances() {
    let project = Project::new(CONFIG);
    project.write("tuning/big.xml", &trait_xml("big", u64::MAX));

    build(&project.options()).unwrap();

    let cache: serde_json::Value = serde_json::from_str(&project.cache_json()).unwrap();
    let record = &cache["keys"][0];
    assert_eq!(record["tuningName"], "big");
    assert_eq!(record["key"]["type"], TRAIT);
    assert_eq!(record["key"]["instance"], "18446744073709551615");
}

#[test]
fn test_deleted_source_is_pruned_from_cache() {
    let project = trait_project();
    build(&project.options()).unwrap();
    assert!(project.cache_json().contains("my_buff"));

    fs::remove_file(project.root().join("src/tuning/buffs/my_buff.G00000001.xml")).unwrap();
    build(&project.options()).unwrap();

    let cache = project.cache_json();
    assert!(!cache.contains("my_buff"));
    assert!(cache.contains("my_trait"));
}

#[test]
fn test_edited_tuning_is_reparsed_and_simdata_follows() {
    let project = trait_project();
    build(&project.options()).unwrap();

    project.write("tuning/traits/my_trait.xml", &trait_xml("creator:my_trait", 99999));
    let report = build(&project.options()).unwrap();

    // buff and SimData bytes are unchanged; the trait was edited
    assert_eq!(report.cached_count, 2);
    let keys = project.package_keys();
    assert!(keys.contains(&ResourceKey::new(TRAIT, 0, 99999)));
    assert!(keys.contains(&simdata_key(99999)));
    assert!(!keys.contains(&simdata_key(12345)));
}

#[test]
fn test_classification_conflict_aborts_before_writing() {
    let project = Project::new(
        r#"{
            "buildName": "MyMod",
            "sourcePatterns": { "tuning": ["**/*.xml"], "simdata": ["**/*.SimData.xml"] },
            "buildFolders": ["build"]
        }"#,
    );
    project.write("my_trait.xml", &trait_xml("my_trait", 1));
    let shared = project.write("my_trait.SimData.xml", &simdata_xml("my_trait"));

    let err = build(&project.options()).unwrap_err();
    match &err {
        BuildError::ClassificationConflict { path } => assert_eq!(path, &shared),
        other => panic!("expected a classification conflict, got {other:?}"),
    }
    assert!(err.is_fatal());
    assert!(!project.root().join("build").exists());
    assert!(!project.root().join("cache").exists());
}

#[test]
fn test_missing_build_folders_is_config_error() {
    let project = Project::new(r#"{ "buildName": "MyMod" }"#);
    let err = build(&project.options()).unwrap_err();
    assert!(matches!(err, BuildError::Config(_)));
}

#[test]
fn test_fail_fast_stops_at_duplicate_name() {
    let project = Project::new(CONFIG);
    project.write("tuning/a.xml", &trait_xml("same", 1));
    project.write("tuning/b.xml", &trait_xml("same", 2));

    let err = build(&project.options()).unwrap_err();
    assert!(matches!(err.root(), BuildError::DuplicateName { name } if name == "same"));
    assert!(err.to_string().contains("b.xml"));
    assert!(!project.root().join("build").exists());
}

#[test]
fn test_tolerant_mode_skips_tuning_and_its_simdata() {
    let project = Project::new(CONFIG);
    project.write("tuning/a.xml", &trait_xml("first", 1));
    let dup = project.write("tuning/b.xml", &trait_xml("second", 1));
    let orphan = project.write("simdata/second.xml", &simdata_xml("second"));
    project.write("simdata/first.xml", &simdata_xml("first"));

    let report = build(&project.options().with_fail_fast(false)).unwrap();

    assert_eq!(report.skipped, vec![dup, orphan]);
    assert_eq!(
        project.package_keys(),
        vec![ResourceKey::new(TRAIT, 0, 1), simdata_key(1)]
    );
}

#[test]
fn test_cached_tuning_still_detects_new_duplicate_instance() {
    let project = Project::new(CONFIG);
    project.write("tuning/a.xml", &trait_xml("a", 42));
    build(&project.options()).unwrap();

    project.write("tuning/b.xml", &trait_xml("b", 42));
    let err = build(&project.options()).unwrap_err();
    assert!(matches!(err.root(), BuildError::DuplicateInstance { instance: 42 }));
}

#[test]
fn test_prebuilt_package_entries_are_merged_verbatim() {
    let project = trait_project();

    let string_table = ResourceKey::new(BinaryResourceType::StringTable.as_u32(), 0x8000_0000, 5);
    let mut prebuilt = Package::new();
    prebuilt.add(string_table, vec![0xAB; 64]);
    let path = project.root().join("src/packages/strings.package");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, prebuilt.to_bytes().unwrap()).unwrap();

    let report = build(&project.options()).unwrap();
    assert_eq!(report.merged_packages, 1);
    assert_eq!(report.entry_count(), 4);

    let package = Package::from_bytes(&project.package_bytes()).unwrap();
    let merged = package.entries().last().unwrap();
    assert_eq!(merged.key, string_table);
    assert_eq!(merged.bytes().unwrap().as_ref(), &[0xAB; 64][..]);
}

#[test]
fn test_corrupt_prebuilt_package_is_a_per_file_error() {
    let project = trait_project();

    let mut bytes = Package::new().to_bytes().unwrap();
    bytes[36..40].copy_from_slice(&u32::MAX.to_le_bytes());
    let path = project.root().join("src/packages/corrupt.package");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, bytes).unwrap();

    let err = build(&project.options()).unwrap_err();
    assert!(err.to_string().contains("corrupt.package"));

    let report = build(&project.options().with_fail_fast(false)).unwrap();
    assert_eq!(report.skipped, vec![path]);
    assert_eq!(report.merged_packages, 0);
    assert_eq!(project.package_keys().len(), 3);
}

#[test]
fn test_extract_mirrors_source_layout() {
    let project = trait_project();

    let mut prebuilt = Package::new();
    prebuilt.add(ResourceKey::new(BinaryResourceType::StringTable.as_u32(), 0, 5), vec![1, 2, 3]);
    let path = project.root().join("src/packages/strings.package");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, prebuilt.to_bytes().unwrap()).unwrap();

    build(&project.options()).unwrap();

    let out = project.root().join("unpacked");
    let report = extract_package(&project.root().join("build/MyMod.package"), &out).unwrap();

    let trait_file = out.join("xml/trait/my_trait.xml");
    let buff_file = out.join("xml/buff/my_buff.G00000001.xml");
    let simdata_file = out.join("xml/trait/my_trait.SimData.xml");
    let leftovers = out.join("packages/MyMod.package");

    assert_eq!(report.tuning, vec![buff_file.clone(), trait_file.clone()]);
    assert_eq!(report.simdata, vec![simdata_file.clone()]);
    assert_eq!(report.other_count, 1);
    assert_eq!(report.package, Some(leftovers.clone()));

    assert_eq!(
        fs::read_to_string(trait_file).unwrap(),
        trait_xml("creator:my_trait", 12345)
    );
    assert_eq!(
        fs::read_to_string(simdata_file).unwrap(),
        simdata_xml("creator:my_trait")
    );
    assert!(buff_file.exists());
    assert_eq!(Package::from_bytes(&fs::read(leftovers).unwrap()).unwrap().len(), 1);
}

#[test]
fn test_extract_orphan_simdata_goes_to_misc() {
    let dir = tempdir().unwrap();
    let mut pkg = Package::new();
    pkg.add(simdata_key(7), simdata_xml("lonely").into_bytes());
    let path = dir.path().join("orphan.package");
    fs::write(&path, pkg.to_bytes().unwrap()).unwrap();

    let report = extract_package(&path, &dir.path().join("out")).unwrap();
    assert_eq!(report.simdata, vec![dir.path().join("out/xml/misc/lonely.SimData.xml")]);
    assert!(report.package.is_none());
}
