use log::info;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use super::error::WorldError;
use super::model::{Action, Effect, Exit, Item, ItemLocation, Room, World};
use crate::GameState;

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    #[serde(default)]
    aliases: BTreeMap<String, OneOrMany>, // [aliases] root = "alias" | ["a", "b"]
    #[serde(default)]
    language: LanguageConfig,
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks
    #[serde(default)]
    item: Vec<ItemConfig>, // [[item]] blocks
}

#[derive(Deserialize)]
struct WorldHeader {
    id: String,
    name: String,
    start_room: String,
    #[serde(default)]
    prologue: String,
}

#[derive(Deserialize, Default)]
struct LanguageConfig {
    #[serde(default)]
    junk: Vec<String>,
    #[serde(default)]
    directions: BTreeMap<String, String>, // short = "full name"
}

#[derive(Deserialize)]
struct RoomConfig {
    id: String,
    name: String,
    #[serde(default)]
    desc: String,

    #[serde(default)]
    exit: Vec<ExitConfig>, // [[room.exit]]
    #[serde(default)]
    action: Vec<ActionConfig>, // [[room.action]]
    #[serde(default)]
    on_enter: Vec<EffectConfig>, // [[room.on_enter]]
}

#[derive(Deserialize)]
struct ExitConfig {
    direction: String,
    target: String,

    #[serde(default)]
    blocked: bool,
}

#[derive(Deserialize)]
struct ActionConfig {
    #[serde(default)]
    id: Option<String>,

    phrases: OneOrMany,

    #[serde(default)]
    requires: OneOrMany,

    #[serde(default)]
    missing_text: Option<String>,

    #[serde(flatten)]
    effect: EffectConfig,
}

#[derive(Deserialize, Default, Clone)]
struct EffectConfig {
    #[serde(default)]
    say: Option<String>,

    #[serde(default)]
    unblock: Vec<String>,

    #[serde(default)]
    block: Vec<String>,

    /// Teleport; does not fire move or enter hooks.
    #[serde(default)]
    go_to: Option<String>,

    #[serde(default)]
    give: Vec<String>,

    #[serde(default)]
    consume: Vec<String>,
}

#[derive(Deserialize)]
struct ItemConfig {
    name: String,

    #[serde(default)]
    desc: String,

    #[serde(default)]
    room_text: String,

    #[serde(default)]
    gettable: Option<bool>,

    /// "room:<id>" or "inventory"; omitted means the item starts nowhere.
    #[serde(default)]
    start_location: Option<String>,

    #[serde(default)]
    action: Vec<ActionConfig>, // [[item.action]]
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Public API: load a world from a .toml file on disk.
pub fn load_world_from_file(path: &Path) -> Result<World, WorldError> {
    let contents = fs::read_to_string(path)?;
    let world = load_world_from_str(&contents)?;
    info!("loaded world '{}' from {}", world.id, path.display());
    Ok(world)
}

/// Public API: load a world from TOML text. Cross-reference validation runs
/// when a session is built from the world.
pub fn load_world_from_str(contents: &str) -> Result<World, WorldError> {
    let world_file: WorldFile = toml::from_str(contents)?;

    if world_file.world.id.trim().is_empty() {
        return Err(WorldError::Invalid("world.id may not be empty".to_string()));
    }
    if world_file.world.start_room.trim().is_empty() {
        return Err(WorldError::Invalid(
            "world.start_room may not be empty".to_string(),
        ));
    }

    let refs = References {
        rooms: world_file
            .room
            .iter()
            .map(|r| (r.id.clone(), r.exit.iter().map(|e| e.direction.clone()).collect()))
            .collect(),
        items: world_file.item.iter().map(|i| i.name.clone()).collect(),
    };

    let mut rooms_map: HashMap<String, Room> = HashMap::new();

    for room_cfg in world_file.room {
        if rooms_map.contains_key(&room_cfg.id) {
            return Err(WorldError::Invalid(format!(
                "duplicate room id: {}",
                room_cfg.id
            )));
        }

        let scope = format!("room '{}'", room_cfg.id);
        let here = Some(room_cfg.id.as_str());

        let actions = room_cfg
            .action
            .into_iter()
            .map(|a| build_action(a, &refs, here, &scope))
            .collect::<Result<Vec<_>, _>>()?;

        let on_enter = room_cfg
            .on_enter
            .into_iter()
            .map(|e| build_effect(e, &refs, here, &scope))
            .collect::<Result<Vec<_>, _>>()?;

        let exits = room_cfg
            .exit
            .into_iter()
            .map(|e| Exit {
                direction: e.direction.trim().to_lowercase(),
                target: e.target,
                blocked: e.blocked,
            })
            .collect();

        rooms_map.insert(
            room_cfg.id.clone(),
            Room {
                id: room_cfg.id,
                name: room_cfg.name,
                desc: tidy_text(&room_cfg.desc),
                exits,
                actions,
                on_enter,
            },
        );
    }

    let mut items: Vec<Rc<Item>> = Vec::new();

    for ic in world_file.item {
        let name = ic.name.trim().to_lowercase();
        if name.is_empty() {
            return Err(WorldError::Invalid("item name may not be empty".to_string()));
        }

        let start_location = match ic.start_location.as_deref() {
            Some(s) => Some(parse_item_location(s).map_err(WorldError::Invalid)?),
            None => None,
        };

        let scope = format!("item '{}'", name);
        let actions = ic
            .action
            .into_iter()
            .map(|a| build_action(a, &refs, None, &scope))
            .collect::<Result<Vec<_>, _>>()?;

        items.push(Rc::new(Item {
            name,
            desc: tidy_text(&ic.desc),
            room_text: tidy_text(&ic.room_text),
            gettable: ic.gettable.unwrap_or(true),
            actions,
            start_location,
        }));
    }

    let aliases = world_file
        .aliases
        .into_iter()
        .map(|(root, words)| (root, words.into_vec()))
        .collect();

    Ok(World {
        id: world_file.world.id,
        name: world_file.world.name,
        prologue: tidy_text(&world_file.world.prologue),
        start_room: world_file.world.start_room,
        rooms: rooms_map,
        items,
        aliases,
        junk: world_file.language.junk,
        directions: world_file.language.directions.into_iter().collect(),
    })
}

/// Names declared in the file, used to reject effects that point nowhere.
struct References {
    rooms: HashMap<String, Vec<String>>,
    items: Vec<String>,
}

impl References {
    fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.trim().eq_ignore_ascii_case(name))
    }
}

fn build_action(
    cfg: ActionConfig,
    refs: &References,
    here: Option<&str>,
    scope: &str,
) -> Result<Action, WorldError> {
    let phrases = cfg.phrases.into_vec();
    if phrases.iter().all(|p| p.trim().is_empty()) {
        return Err(WorldError::Invalid(format!(
            "{} has an action without phrases",
            scope
        )));
    }

    Ok(Action {
        id: cfg.id,
        phrases,
        requires: cfg
            .requires
            .into_vec()
            .into_iter()
            .map(|r| r.trim().to_lowercase())
            .collect(),
        missing_text: cfg.missing_text.map(|s| tidy_text(&s)),
        effect: build_effect(cfg.effect, refs, here, scope)?,
    })
}

/// Compile a declarative effect into a closure. `here` is the room the effect
/// is declared on; item effects run wherever the player is, so their
/// directions can't be checked up front.
fn build_effect(
    cfg: EffectConfig,
    refs: &References,
    here: Option<&str>,
    scope: &str,
) -> Result<Effect, WorldError> {
    if let Some(target) = &cfg.go_to {
        if !refs.rooms.contains_key(target) {
            return Err(WorldError::Invalid(format!(
                "{} go_to references missing room '{}'",
                scope, target
            )));
        }
    }

    for name in cfg.give.iter().chain(cfg.consume.iter()) {
        if !refs.has_item(name) {
            return Err(WorldError::Invalid(format!(
                "{} references missing item '{}'",
                scope, name
            )));
        }
    }

    let unblock: Vec<String> = cfg.unblock.iter().map(|d| d.trim().to_lowercase()).collect();
    let block: Vec<String> = cfg.block.iter().map(|d| d.trim().to_lowercase()).collect();

    if let Some(exits) = here.and_then(|id| refs.rooms.get(id)) {
        for dir in unblock.iter().chain(block.iter()) {
            if !exits.iter().any(|d| d.trim().eq_ignore_ascii_case(dir)) {
                return Err(WorldError::Invalid(format!(
                    "{} toggles unknown exit '{}'",
                    scope, dir
                )));
            }
        }
    }

    let say = cfg.say.map(|s| tidy_text(&s));
    let give: Vec<String> = cfg.give.iter().map(|n| n.trim().to_lowercase()).collect();
    let consume: Vec<String> = cfg.consume.iter().map(|n| n.trim().to_lowercase()).collect();
    let go_to = cfg.go_to;

    let effect: Effect = Rc::new(move |state: &mut GameState, room: &Room| {
        if let Some(text) = &say {
            state.out.say(text.clone());
        }
        for dir in &unblock {
            state.set_exit_blocked(&room.id, dir, false);
        }
        for dir in &block {
            state.set_exit_blocked(&room.id, dir, true);
        }
        for name in &give {
            state.give_item(name);
        }
        for name in &consume {
            state.consume_item(name);
        }
        if let Some(target) = &go_to {
            state.go_to_room(target);
        }
    });
    Ok(effect)
}

/// Authors wrap long text freely in TOML. A single newline joins lines with a
/// space, one blank line keeps a line break and two or more start a new
/// paragraph. Indentation is dropped.
fn tidy_text(raw: &str) -> String {
    let mut result = String::new();
    let mut blanks = 0usize;

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            blanks += 1;
            continue;
        }

        if !result.is_empty() {
            result.push_str(match blanks {
                0 => " ",
                1 => "\n",
                _ => "\n\n",
            });
        }
        result.push_str(line);
        blanks = 0;
    }

    result
}

fn parse_item_location(s: &str) -> Result<ItemLocation, String> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("inventory") {
        return Ok(ItemLocation::Inventory);
    }

    if let Some(rest) = s.strip_prefix("room:") {
        let room_id = rest.trim();
        if room_id.is_empty() {
            return Err(format!("Invalid start_location '{}': empty room id", s));
        }
        return Ok(ItemLocation::Room(room_id.to_string()));
    }

    Err(format!(
        "Invalid start_location '{}': expected 'room:<id>' or 'inventory'",
        s
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tidy_text_joins_wrapped_lines_and_keeps_breaks() {
        let raw = "
            A low cellar.
            Damp walls.

            A stair leads up.


            Far away, water drips.
        ";
        assert_eq!(
            tidy_text(raw),
            "A low cellar. Damp walls.\nA stair leads up.\n\nFar away, water drips."
        );
        assert_eq!(tidy_text("   "), "");
    }

    #[test]
    fn parses_item_locations() {
        assert_eq!(parse_item_location("inventory"), Ok(ItemLocation::Inventory));
        assert_eq!(
            parse_item_location(" room:cellar "),
            Ok(ItemLocation::Room("cellar".to_string()))
        );
        assert!(parse_item_location("room:").is_err());
        assert!(parse_item_location("npc:bob").is_err());
    }

    #[test]
    fn aliases_accept_one_or_many() {
        let world = load_world_from_str(
            r#"
            [world]
            id = "w"
            name = "W"
            start_room = "a"

            [aliases]
            "" = ["go", "walk"]
            take = "nab"

            [[room]]
            id = "a"
            name = "A"
            "#,
        )
        .expect("world should load");

        assert_eq!(
            world.aliases,
            vec![
                ("".to_string(), vec!["go".to_string(), "walk".to_string()]),
                ("take".to_string(), vec!["nab".to_string()]),
            ]
        );
    }

    #[test]
    fn rejects_duplicate_rooms() {
        let err = load_world_from_str(
            r#"
            [world]
            id = "w"
            name = "W"
            start_room = "a"

            [[room]]
            id = "a"
            name = "A"

            [[room]]
            id = "a"
            name = "Again"
            "#,
        )
        .err()
        .expect("duplicate room must fail");
        assert!(matches!(err, WorldError::Invalid(msg) if msg.contains("duplicate room id")));
    }

    #[test]
    fn rejects_effects_pointing_nowhere() {
        let err = load_world_from_str(
            r#"
            [world]
            id = "w"
            name = "W"
            start_room = "a"

            [[room]]
            id = "a"
            name = "A"

            [[room.action]]
            phrases = "jump"
            go_to = "moon"
            "#,
        )
        .err()
        .expect("unknown go_to must fail");
        assert!(matches!(err, WorldError::Invalid(msg) if msg.contains("'moon'")));

        let err = load_world_from_str(
            r#"
            [world]
            id = "w"
            name = "W"
            start_room = "a"

            [[room]]
            id = "a"
            name = "A"

            [[room.action]]
            phrases = "open door"
            unblock = "north"
            "#,
        );
        // `unblock` must be a list
        assert!(matches!(err, Err(WorldError::Parse(_))));
    }

    #[test]
    fn syntax_errors_surface_as_parse_errors() {
        let err = load_world_from_str("[world\nid = ").err();
        assert!(matches!(err, Some(WorldError::Parse(_))));
    }
}
