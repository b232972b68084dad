use simmodels::prelude::*;
use simmodels::enums::is_tuning_type;

#[test]
fn test_tuning_and_simdata_share_instance() {
    let tuning =
        parse_tuning_xml(br#"<I c="Trait" i="trait" m="traits.traits" n="my_trait" s="12345"/>"#)
            .unwrap();
    let simdata = parse_simdata_xml(
        br#"<SimData version="0x00000101">
            <Instances><I name="my_trait" schema="Trait"/></Instances>
        </SimData>"#,
    )
    .unwrap();
    assert_eq!(simdata.instance_name, tuning.name());

    let tuning_type = TuningResourceType::parse_attr(tuning.type_attr().unwrap()).unwrap();
    let tuning_key = ResourceKey::new(tuning_type.as_u32(), 0, tuning.instance);
    let simdata_key = ResourceKey::new(
        BinaryResourceType::SimData.as_u32(),
        SimDataGroup::for_tuning(tuning_type).unwrap(),
        tuning.instance,
    );

    let mut pkg = Package::new();
    pkg.add(tuning_key, tuning.into_bytes());
    pkg.add(simdata_key, simdata.into_bytes());

    let bytes = pkg.to_bytes().unwrap();
    let read = Package::from_bytes(&bytes).unwrap();

    let keys: Vec<_> = read.entries().iter().map(|e| e.key).collect();
    assert_eq!(keys, vec![tuning_key, simdata_key]);
    assert!(is_tuning_type(keys[0].resource_type));
    assert!(!is_tuning_type(keys[1].resource_type));
}

#[test]
fn test_merge_raw_entries_from_another_package() {
    let mut prebuilt = Package::new();
    prebuilt.add(ResourceKey::new(0x220557DA, 0, 1), vec![1, 2, 3]);
    let prebuilt_bytes = prebuilt.to_bytes().unwrap();

    let mut pkg = Package::new();
    pkg.add(ResourceKey::new(0xCB5FDDC7, 0, 5), b"<I n=\"x\" s=\"5\"/>".to_vec());
    pkg.add_all(Package::extract_entries(&prebuilt_bytes, ReadOptions { load_raw: true }).unwrap());

    let read = Package::from_bytes(&pkg.to_bytes().unwrap()).unwrap();
    assert_eq!(read.len(), 2);
    assert_eq!(read.entries()[1].bytes().unwrap().as_ref(), &[1, 2, 3]);
}
