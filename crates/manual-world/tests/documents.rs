// crates/manual-world/tests/documents.rs
// ============================================================================
// Test Module: World Documents
// Coverage: JSON shapes of every document, options declarations, inline
//           reachability, and writing documents to disk.
// ============================================================================
//! ## Overview
//! Integration tests for generated world documents.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use manual_logic::Comparator;
use manual_logic::Logic;
use manual_world::Category;
use manual_world::Game;
use manual_world::Item;
use manual_world::Location;
use manual_world::Priority;
use manual_world::Region;
use manual_world::StartingItemBlock;
use manual_world::WorldError;
use serde_json::json;
use support::TestResult;
use support::ensure;
use support::ensure_eq;
use support::expanding_world;
use support::strict_world;

// ========================================================================
// Entity Documents
// ========================================================================

/// Tests item flags, counts, and summed phantom values.
#[test]
fn test_items_document() -> TestResult {
    let mut world = strict_world();
    world.category(Category::new("Weapons"))?;
    world.item(
        Item::new("Sword")
            .in_category("Weapons")
            .with_count(3)
            .with_priority(Priority::PROGRESSION | Priority::SKIP_BALANCING | Priority::USEFUL)
            .gives("Power", 2)
            .gives("Power", 3)
            .with_early(1, 0)
            .with_id(40),
    )?;
    world.item(Item::new("Coin").with_priority(Priority::FILLER | Priority::SKIP_BALANCING))?;

    let documents = world.documents(&Game::new("Quest"))?;
    ensure_eq(
        &documents.items,
        &json!([
            {
                "name": "Sword",
                "count": 3,
                "id": 40,
                "early": 1,
                "category": ["Weapons"],
                "useful": true,
                "progression_skip_balancing": true,
                "value": {"Power": 5}
            },
            {"name": "Coin", "filler": true, "skip_balancing": true}
        ]),
        "items.json",
    )?;
    Ok(())
}

/// Tests location fields and rendered requirements.
#[test]
fn test_locations_document() -> TestResult {
    let mut world = strict_world();
    world.category(Category::new("Chests"))?;
    world.item(Item::new("Sword"))?;
    world.item(Item::new("Bow"))?;
    world.region(Region::new("Village").starting())?;
    world.location(
        Location::new("Boss")
            .in_category("Chests")
            .in_region("Village")
            .requires(Logic::item("Sword") | Logic::item("Bow"))
            .victory()
            .deny_item("Bow")
            .with_hint_entrance("Castle"),
    )?;

    let documents = world.documents(&Game::new("Quest"))?;
    ensure_eq(
        &documents.locations,
        &json!([{
            "name": "Boss",
            "category": ["Chests"],
            "requires": "|Bow| OR |Sword|",
            "hint_entrance": "Castle",
            "region": "Village",
            "victory": true,
            "dont_place_item": ["Bow"]
        }]),
        "locations.json",
    )?;
    Ok(())
}

/// Tests region entries and passage guards.
#[test]
fn test_regions_document() -> TestResult {
    let mut world = strict_world();
    world.item(Item::new("Key"))?;
    world.item(Item::new("Lamp"))?;
    world.region(Region::new("Cave").requires(Logic::item("Lamp")))?;
    world.region(Region::new("Start").starting().exit("Cave", Logic::item("Key")))?;
    world.region(Region::new("Lake").entrance("Start", None))?;

    let documents = world.documents(&Game::new("Quest"))?;
    ensure_eq(
        &documents.regions,
        &json!({
            "Cave": {"requires": "|Lamp|"},
            "Lake": {},
            "Start": {
                "starting": true,
                "connects_to": ["Cave"],
                "exit_requires": {"Cave": "|Key|"}
            }
        }),
        "regions.json",
    )?;
    Ok(())
}

/// Tests that only hidden or yaml-gated categories are listed.
#[test]
fn test_categories_document() -> TestResult {
    let mut world = strict_world();
    world.category(Category::new("Plain"))?;
    world.category(Category::new("Secret").hidden())?;
    world.category(Category::new("Hard").with_yaml("hard_mode"))?;

    let documents = world.documents(&Game::new("Quest"))?;
    ensure_eq(
        &documents.categories,
        &json!({
            "Hard": {"yaml_option": ["hard_mode"]},
            "Secret": {"hidden": true}
        }),
        "categories.json",
    )?;
    Ok(())
}

/// Tests the game document with defaults and starting items.
#[test]
fn test_game_document() -> TestResult {
    let mut world = strict_world();
    world.category(Category::new("Tools"))?;
    world.item(Item::new("Map"))?;
    let game = world.game(
        Game::new("Quest")
            .with_creator("Ada")
            .with_death_link()
            .with_starting_index(100)
            .with_starting_items(StartingItemBlock::items(["Map"]))
            .with_starting_items(StartingItemBlock::categories(["Tools"]).random(2).if_previous_item("Map")),
    )?;

    let documents = world.documents(&game)?;
    ensure_eq(
        &documents.game,
        &json!({
            "game": "Quest",
            "filler_item_name": "(filler)",
            "creator": "Ada",
            "death_link": true,
            "starting_index": 100,
            "starting_items": [
                {"items": ["Map"]},
                {"item_categories": ["Tools"], "random": 2, "if_previous_item": ["Map"]}
            ]
        }),
        "game.json",
    )?;

    let plain = world.documents(&Game::new("Quest"))?;
    ensure_eq(
        &plain.game,
        &json!({"game": "Quest", "filler_item_name": "(filler)", "creator": "Unknown"}),
        "defaults",
    )?;
    Ok(())
}

// ========================================================================
// Options
// ========================================================================

/// Tests toggle and range declarations, including toggle override.
#[test]
fn test_options_document() -> TestResult {
    let mut world = strict_world();
    world.region(Region::new("Start").starting().requires(Logic::yaml_enabled("easy")))?;
    world.location(
        Location::new("Gate").requires(Logic::yaml_compare("keys", Comparator::GreaterThanOrEqual, 3)),
    )?;
    world.location(
        Location::new("Vault").requires(Logic::yaml_compare("mode", Comparator::Equal, 1)),
    )?;
    world.location(Location::new("Door").requires(Logic::yaml_disabled("mode")))?;

    let documents = world.documents(&Game::new("Quest"))?;
    let toggle = json!({"description": [], "type": "Toggle", "default": false});
    let range = json!({
        "description": [],
        "type": "Range",
        "default": 0,
        "range_start": 0,
        "range_end": 10,
        "values": {}
    });
    ensure_eq(
        &documents.options,
        &Some(json!({"user": {"easy": toggle.clone(), "keys": range, "mode": toggle}})),
        "options.json",
    )?;

    let names: Vec<&str> = documents.files().iter().map(|(name, _)| *name).collect();
    ensure_eq(&names.last().copied(), &Some("options.json"), "options file listed")?;
    Ok(())
}

/// Tests that worlds without yaml settings have no options document.
#[test]
fn test_options_absent_without_settings() -> TestResult {
    let mut world = strict_world();
    world.item(Item::new("Sword"))?;
    world.location(Location::new("Chest").requires(Logic::item("Sword")))?;
    let documents = world.documents(&Game::new("Quest"))?;
    ensure_eq(&documents.options, &None, "no options")?;
    ensure_eq(&documents.files().len(), &5, "five files")?;
    Ok(())
}

// ========================================================================
// Inline Reachability
// ========================================================================

/// Tests that reachability leaves are inlined when configured.
#[test]
fn test_inline_reachability() -> TestResult {
    let mut world = expanding_world();
    world.item(Item::new("Sword"))?;
    world.item(Item::new("Shield"))?;
    world.item(Item::new("Torch"))?;
    world.region(Region::new("Dungeon").requires(Logic::item("Shield")))?;
    world.region(Region::new("Start").starting().exit("Dungeon", Logic::item("Sword")))?;
    world.location(Location::new("Boss").in_region("Dungeon"))?;
    world.location(Location::new("Reward").requires(Logic::location("Boss") | Logic::item("Torch")))?;
    world.location(Location::new("Plain").requires(Logic::item("Torch")))?;

    let documents = world.documents(&Game::new("Quest"))?;
    let requires: Vec<Option<&str>> = documents
        .locations
        .as_array()
        .map(|entries| entries.iter().map(|entry| entry["requires"].as_str()).collect())
        .unwrap_or_default();
    ensure_eq(
        &requires,
        &vec![None, Some("(|Shield| AND |Sword|) OR |Torch|"), Some("|Torch|")],
        "expanded requirements",
    )?;

    let mut world = strict_world();
    world.region(Region::new("Start").starting())?;
    world.location(Location::new("Boss").in_region("Start"))?;
    world.location(Location::new("Reward").requires(Logic::location("Boss")))?;
    let documents = world.documents(&Game::new("Quest"))?;
    ensure_eq(
        &documents.locations[1]["requires"],
        &json!("{canReachLocation(Boss)}"),
        "kept without inlining",
    )?;
    Ok(())
}

// ========================================================================
// Writing
// ========================================================================

/// Tests that documents are written as JSON files.
#[test]
fn test_write_to_directory() -> TestResult {
    let mut world = strict_world();
    world.region(Region::new("Start").starting().requires(Logic::yaml_enabled("easy")))?;
    let documents = world.documents(&Game::new("Quest"))?;

    let dir = tempfile::tempdir()?;
    let target = dir.path().join("data");
    documents.write_to(&target)?;

    for (name, document) in documents.files() {
        let text = std::fs::read_to_string(target.join(name))?;
        let parsed: serde_json::Value = serde_json::from_str(&text)?;
        ensure_eq(&&parsed, &document, name)?;
    }
    let leftovers = std::fs::read_dir(&target)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".tmp-"))
        .count();
    ensure(leftovers == 0, "no temporary files remain")?;
    Ok(())
}

/// Tests that a second write replaces existing documents.
#[test]
fn test_write_to_replaces_existing_files() -> TestResult {
    let mut world = strict_world();
    world.item(Item::new("Sword"))?;
    let dir = tempfile::tempdir()?;
    world.documents(&Game::new("Quest"))?.write_to(dir.path())?;

    world.item(Item::new("Bow"))?;
    let documents = world.documents(&Game::new("Quest"))?;
    documents.write_to(dir.path())?;
    let text = std::fs::read_to_string(dir.path().join("items.json"))?;
    let parsed: serde_json::Value = serde_json::from_str(&text)?;
    ensure_eq(&parsed, &documents.items, "items.json replaced")?;
    Ok(())
}

/// Tests that parent traversal in the output directory is rejected.
#[test]
fn test_write_to_rejects_parent_traversal() -> TestResult {
    let world = strict_world();
    let documents = world.documents(&Game::new("Quest"))?;
    let dir = tempfile::tempdir()?;
    let target = dir.path().join("data").join("..").join("escape");
    let error = documents.write_to(&target).unwrap_err();
    ensure(matches!(error, WorldError::OutputPath { .. }), "traversal rejected")?;
    ensure(!dir.path().join("escape").exists(), "nothing written")?;
    Ok(())
}

/// Tests that a symlinked output directory is not followed.
#[cfg(unix)]
#[test]
fn test_write_to_rejects_symlinked_directory() -> TestResult {
    let world = strict_world();
    let documents = world.documents(&Game::new("Quest"))?;
    let dir = tempfile::tempdir()?;
    let real = dir.path().join("real");
    std::fs::create_dir(&real)?;
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(&real, &link)?;
    let error = documents.write_to(&link).unwrap_err();
    ensure(matches!(error, WorldError::OutputPath { .. }), "symlink rejected")?;
    ensure(!real.join("game.json").exists(), "nothing written through the link")?;
    Ok(())
}
