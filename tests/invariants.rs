//! Contract Invariant Tests
//!
//! These tests verify the guarantees of a full pack build.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use fls_datapack::{
    archive::collect_files,
    config::BuildConfig,
    generators::{paths, AdvancementGenerator, Generator, RecipeGenerator, TagGenerator},
    hashing::md5_hex,
    palette::{Colour, Palette},
    BuildPipeline, BuildReport,
};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;

fn two_by_two_palette() -> Palette {
    Palette::new(
        vec![Colour::new("red"), Colour::with_extras("blue", &["lapis_lazuli"])],
        vec!["wool".to_string(), "candle".to_string()],
    )
    .unwrap()
}

fn build(root: &Path, palette: Palette) -> BuildReport {
    let config = BuildConfig::default().with_output_dir(root.join("output"));
    BuildPipeline::new(config, palette).run().unwrap()
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn values(path: &Path) -> Vec<String> {
    read_json(path)["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

fn files_under(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    pack_files(root)
        .into_iter()
        .map(|p| (p.strip_prefix(root).unwrap().to_path_buf(), fs::read(&p).unwrap()))
        .collect()
}

fn pack_files(root: &Path) -> Vec<PathBuf> {
    collect_files(root, None).unwrap()
}

/// Parses any JSON document, failing on an object with a repeated key.
struct UniqueKeys;

impl<'de> Deserialize<'de> for UniqueKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UniqueKeysVisitor)
    }
}

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = UniqueKeys;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<UniqueKeys, E> { Ok(UniqueKeys) }
    fn visit_i64<E: de::Error>(self, _: i64) -> Result<UniqueKeys, E> { Ok(UniqueKeys) }
    fn visit_u64<E: de::Error>(self, _: u64) -> Result<UniqueKeys, E> { Ok(UniqueKeys) }
    fn visit_f64<E: de::Error>(self, _: f64) -> Result<UniqueKeys, E> { Ok(UniqueKeys) }
    fn visit_str<E: de::Error>(self, _: &str) -> Result<UniqueKeys, E> { Ok(UniqueKeys) }
    fn visit_unit<E: de::Error>(self) -> Result<UniqueKeys, E> { Ok(UniqueKeys) }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<UniqueKeys, A::Error> {
        while seq.next_element::<UniqueKeys>()?.is_some() {}
        Ok(UniqueKeys)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<UniqueKeys, A::Error> {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            if !seen.insert(key.clone()) {
                return Err(de::Error::custom(format!("duplicate key {:?}", key)));
            }
            map.next_value::<UniqueKeys>()?;
        }
        Ok(UniqueKeys)
    }
}

/// Generated file for a `universal_dyeing:` tag reference, with or without `#`.
fn pack_tag_file(data: &Path, reference: &str) -> PathBuf {
    let name = reference
        .trim_start_matches('#')
        .strip_prefix("universal_dyeing:")
        .unwrap_or_else(|| panic!("{} is not a pack tag", reference));
    data.join(paths::ITEM_TAGS).join(format!("{}.json", name))
}

#[test]
fn invariant_one_recipe_per_pair() {
    let dir = tempfile::tempdir().unwrap();
    build(dir.path(), Palette::standard());

    let recipes = dir.path().join("output/data").join(paths::RECIPES);
    assert_eq!(fs::read_dir(&recipes).unwrap().count(), 8 * 16);
}

#[test]
fn invariant_recipe_key_order() {
    let dir = tempfile::tempdir().unwrap();
    build(dir.path(), Palette::standard());

    let path = dir.path().join("output/data").join(paths::RECIPES).join("red_wool.json");
    let doc = read_json(&path);
    let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["type", "pattern", "key", "result", "group"]);
    assert_eq!(doc["result"]["id"], "minecraft:red_wool");
    assert_eq!(doc["result"]["count"], 8);
    assert_eq!(doc["group"], "universal_dyeing_wool");
    assert_eq!(doc["key"]["O"]["tag"], "universal_dyeing:dyes/red_dye");
    assert_eq!(doc["key"]["#"].as_array().unwrap().len(), 16);
}

#[test]
fn invariant_every_document_is_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    build(dir.path(), Palette::standard());

    let output = dir.path().join("output");
    for (relative, bytes) in files_under(&output) {
        if relative.extension().map_or(false, |e| e == "zip") {
            continue;
        }
        let text = String::from_utf8(bytes).unwrap();
        let parsed: Result<UniqueKeys, _> = serde_json::from_str(&text);
        assert!(parsed.is_ok(), "{}: {:?}", relative.display(), parsed.err());
    }

    let manifest = read_json(&output.join("pack.mcmeta"));
    assert_eq!(manifest["pack"]["pack_format"], 48);
    assert_eq!(manifest["pack"]["supported_formats"]["min_inclusive"], 48);
    assert_eq!(manifest["pack"]["supported_formats"]["max_inclusive"], 48);
    assert_eq!(manifest["pack"]["description"], "FLS datapack");
}

#[test]
fn invariant_duplicate_keys_are_detected() {
    assert!(serde_json::from_str::<UniqueKeys>(r#"{"a": [{"b": 1, "c": 2}], "d": null}"#).is_ok());
    assert!(serde_json::from_str::<UniqueKeys>(r#"{"a": 1, "a": 2}"#).is_err());
    assert!(serde_json::from_str::<UniqueKeys>(r#"[{"values": {"x": 1, "x": 1}}]"#).is_err());
}

#[test]
fn invariant_build_is_idempotent() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let a = build(first.path(), Palette::standard());
    let b = build(second.path(), Palette::standard());

    assert_eq!(a.digest, b.digest);
    assert_eq!(a.archive.file_name(), b.archive.file_name());
    assert_eq!(
        files_under(&first.path().join("output")),
        files_under(&second.path().join("output"))
    );
}

#[test]
fn invariant_rebuild_in_place_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let a = build(dir.path(), Palette::standard());
    let b = build(dir.path(), Palette::standard());

    assert_eq!(a.archive, b.archive);
    let zips: Vec<_> = pack_files(&dir.path().join("output"))
        .into_iter()
        .filter(|p| p.extension().map_or(false, |e| e == "zip"))
        .collect();
    assert_eq!(zips.len(), 1);
}

#[test]
fn invariant_archive_named_by_content() {
    let dir = tempfile::tempdir().unwrap();
    let report = build(dir.path(), Palette::standard());

    let expected = format!("fls-datapack-{}.zip", &report.digest[..8]);
    assert_eq!(report.archive.file_name().unwrap().to_str().unwrap(), expected);

    // Digest covers the files in sorted walk order
    let mut files = pack_files(&dir.path().join("output"));
    files.retain(|p| p != &report.archive);
    let concatenated: Vec<u8> = files.iter().flat_map(|p| fs::read(p).unwrap()).collect();
    assert_eq!(report.digest, md5_hex(&concatenated));
}

#[test]
fn invariant_dye_union_matches_colour_tags() {
    let dir = tempfile::tempdir().unwrap();
    build(dir.path(), Palette::standard());
    let data = dir.path().join("output/data");

    let union = values(&data.join(paths::ITEM_TAGS).join("dyes.json"));
    let union_set: HashSet<_> = union.iter().cloned().collect();
    assert_eq!(union.len(), union_set.len());

    let mut expected = HashSet::new();
    for colour in Palette::standard().colours() {
        let tag = data.join(paths::DYE_TAGS).join(format!("{}_dye.json", colour.name));
        expected.extend(values(&tag));
    }
    assert_eq!(union_set, expected);
}

#[test]
fn invariant_no_dangling_references() {
    let dir = tempfile::tempdir().unwrap();
    let palette = Palette::standard();
    RecipeGenerator.generate(dir.path(), &palette).unwrap();
    TagGenerator.generate(dir.path(), &palette).unwrap();
    AdvancementGenerator.generate(dir.path(), &palette).unwrap();

    let variants: HashSet<String> = palette
        .categories()
        .iter()
        .flat_map(|c| palette.variants(c))
        .collect();

    for entry in fs::read_dir(dir.path().join(paths::RECIPES)).unwrap() {
        let doc = read_json(&entry.unwrap().path());
        for ingredient in doc["key"]["#"].as_array().unwrap() {
            assert!(variants.contains(ingredient["item"].as_str().unwrap()));
        }

        let tag = doc["key"]["O"]["tag"].as_str().unwrap();
        assert!(pack_tag_file(dir.path(), tag).exists(), "missing tag {}", tag);
    }

    for category in palette.categories() {
        let path = dir.path().join(paths::ADVANCEMENTS).join(format!("{}.json", category));
        let doc = read_json(&path);

        for (name, criterion) in doc["criteria"].as_object().unwrap() {
            for predicate in criterion["conditions"]["items"].as_array().unwrap() {
                let tag = predicate["items"].as_str().unwrap();
                assert!(pack_tag_file(dir.path(), tag).exists(), "{} in {}: missing tag {}", name, category, tag);
            }
        }
        assert_eq!(
            doc["criteria"]["has_block"]["conditions"]["items"][0]["items"],
            format!("#universal_dyeing:{}", category).as_str()
        );

        for recipe in doc["rewards"]["recipes"].as_array().unwrap() {
            let name = recipe.as_str().unwrap().strip_prefix("universal_dyeing:").unwrap();
            let recipe_file = dir.path().join(paths::RECIPES).join(format!("{}.json", name));
            assert!(recipe_file.exists(), "missing recipe {}", name);
        }
    }
}

#[test]
fn invariant_two_by_two_scenario() {
    let dir = tempfile::tempdir().unwrap();
    build(dir.path(), two_by_two_palette());
    let data = dir.path().join("output/data");

    assert_eq!(fs::read_dir(data.join(paths::RECIPES)).unwrap().count(), 4);

    let dye_tags = data.join(paths::DYE_TAGS);
    assert_eq!(fs::read_dir(&dye_tags).unwrap().count(), 2);
    assert_eq!(values(&dye_tags.join("red_dye.json")), vec!["minecraft:red_dye"]);
    assert_eq!(
        values(&dye_tags.join("blue_dye.json")),
        vec!["minecraft:blue_dye", "minecraft:lapis_lazuli"]
    );

    let tags = data.join(paths::ITEM_TAGS);
    for category in ["wool", "candle"] {
        assert_eq!(
            values(&tags.join(format!("{}.json", category))),
            vec![format!("minecraft:red_{}", category), format!("minecraft:blue_{}", category)]
        );
    }
    assert_eq!(
        values(&tags.join("dyes.json")),
        vec!["minecraft:red_dye", "minecraft:blue_dye", "minecraft:lapis_lazuli"]
    );

    let advancements = data.join(paths::ADVANCEMENTS);
    assert_eq!(fs::read_dir(&advancements).unwrap().count(), 2);
    let wool = read_json(&advancements.join("wool.json"));
    assert_eq!(
        wool["rewards"]["recipes"],
        serde_json::json!(["universal_dyeing:red_wool", "universal_dyeing:blue_wool"])
    );
    assert_eq!(wool["requirements"], serde_json::json!([["has_block"], ["has_dye"]]));
}

#[test]
fn invariant_missing_loot_table_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = BuildConfig::default().with_output_dir(dir.path().join("output"));
    config.loot_table_source = Some(dir.path().join("absent.json"));

    let result = BuildPipeline::new(config, Palette::standard()).run();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("absent.json"));
    // No archive is produced
    assert!(pack_files(&dir.path().join("output"))
        .iter()
        .all(|p| p.extension().map_or(true, |e| e != "zip")));
}
