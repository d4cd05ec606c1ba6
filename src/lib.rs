pub mod engine;
pub mod lang;
pub mod world;

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::{debug, info, warn};

use engine::{
    AliasTable, Character, Normalizer, Output, handle_drop, handle_examine, handle_inventory,
    handle_take, render_room, try_action, try_handle_movement,
};
use lang::{Directions, Language};
use world::{Effect, Exit, Item, ItemLocation, Room, World, WorldError, validate_world};

pub use world::{load_world_from_file, load_world_from_str};

/// One play session over a shared, immutable [`World`].
pub struct GameState {
    pub world: Rc<World>,
    pub current_room_id: String,
    pub normalizer: Normalizer,
    pub directions: Directions,
    pub character: Character,
    pub out: Output,
    room_items: HashMap<String, Vec<Rc<Item>>>,
    blocked_exits: HashSet<(String, String)>,
    on_move: Vec<Effect>,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<engine::OutputBlock>,
        quit: bool,
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        state: GameState,
        initialized: bool,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a new game from a TOML world string. Call `init()` to get the opening text.
        #[wasm_bindgen(constructor)]
        pub fn new(world_toml: &str) -> Result<WasmGame, JsValue> {
            let world =
                load_world_from_str(world_toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
            let mut state = GameState::new(world).map_err(|e| JsValue::from_str(&e.to_string()))?;
            state.on_move(render_room);
            Ok(WasmGame {
                state,
                initialized: false,
            })
        }

        /// Title, prologue and the first room.
        #[wasm_bindgen]
        pub fn init(&mut self) -> JsValue {
            self.initialized = true;
            let out = self.state.initialize();
            to_value(&WasmStepResult {
                blocks: out.blocks,
                quit: false,
            })
            .unwrap_or(JsValue::NULL)
        }

        /// Process a player command and return the resulting output blocks and quit flag.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            if !self.initialized {
                let _ = self.init();
            }
            let (out, quit) = self.state.step(input);
            to_value(&WasmStepResult {
                blocks: out.blocks,
                quit,
            })
            .unwrap_or(JsValue::NULL)
        }
    }
}

impl GameState {
    /// Start a session with the English language tables.
    pub fn new(world: World) -> Result<Self, WorldError> {
        Self::with_language(world, Language::english())
    }

    /// Validate `world` and set up a session. Any dangling reference (an exit
    /// to a missing room, for one) fails here, before a single command runs.
    pub fn with_language(world: World, language: Language) -> Result<Self, WorldError> {
        Self::with_shared_world(Rc::new(world), language)
    }

    /// Several sessions may play the same world definition; all per-session
    /// state lives here, never in the world.
    pub fn with_shared_world(world: Rc<World>, language: Language) -> Result<Self, WorldError> {
        let errors = validate_world(&world);
        if !errors.is_empty() {
            return Err(WorldError::Validation(errors));
        }

        let aliases = AliasTable::build(&language.aliases, &world.aliases);
        let normalizer = Normalizer::new(language.junk.iter().chain(world.junk.iter()), aliases);

        let mut directions = language.directions;
        for (short, full) in &world.directions {
            directions.insert(short.trim().to_lowercase(), full.trim().to_lowercase());
        }

        let mut character = Character::new();
        let mut room_items: HashMap<String, Vec<Rc<Item>>> = HashMap::new();
        for item in &world.items {
            match &item.start_location {
                Some(ItemLocation::Room(room_id)) => room_items
                    .entry(room_id.clone())
                    .or_default()
                    .push(Rc::clone(item)),
                Some(ItemLocation::Inventory) => character.take(Rc::clone(item)),
                None => {}
            }
        }

        let mut blocked_exits = HashSet::new();
        for room in world.rooms.values() {
            for exit in room.exits.iter().filter(|e| e.blocked) {
                blocked_exits.insert((room.id.clone(), exit.direction.clone()));
            }
        }

        info!(
            "session for world '{}' starts in '{}' ({} aliases)",
            world.id,
            world.start_room,
            normalizer.aliases().len()
        );

        Ok(GameState {
            current_room_id: world.start_room.clone(),
            world,
            normalizer,
            directions,
            character,
            out: Output::new(),
            room_items,
            blocked_exits,
            on_move: Vec::new(),
        })
    }

    /// Register a hook fired after every successful move, before the new
    /// room's own enter hooks.
    pub fn on_move(&mut self, hook: impl Fn(&mut GameState, &Room) + 'static) {
        self.on_move.push(Rc::new(hook));
    }

    pub(crate) fn move_hooks(&self) -> Vec<Effect> {
        self.on_move.clone()
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.world.room(&self.current_room_id)
    }

    /// Opening text: title, prologue and the starting room.
    pub fn initialize(&mut self) -> Output {
        let world = Rc::clone(&self.world);
        self.out.title(world.name.clone());
        self.out.say(world.prologue.clone());
        if let Some(room) = world.room(&self.current_room_id) {
            render_room(self, room);
        }
        self.take_output()
    }

    /// Process a single player input; returns (output, quit?)
    pub fn step(&mut self, input: &str) -> (Output, bool) {
        let quit = self.handle_command(input);
        (self.take_output(), quit)
    }

    pub fn take_output(&mut self) -> Output {
        std::mem::take(&mut self.out)
    }

    /// Resolve one command against the current room. Resolvers run in a
    /// fixed order and the first one that claims the input ends the command:
    /// movement, room actions, carried items' actions, then the built-ins.
    /// `quit` and `exit` only end the session when nothing in the world
    /// claims them first; the return value says whether they did.
    pub fn handle_command(&mut self, raw: &str) -> bool {
        let input = self.normalizer.normalize(raw);

        let world = Rc::clone(&self.world);
        let Some(room) = world.room(&self.current_room_id) else {
            self.out.say(format!(
                "Error: you are in an unknown room '{}'",
                self.current_room_id
            ));
            return false;
        };

        debug!("'{}' -> '{}' in room '{}'", raw, input, room.id);

        // a trapped room swallows everything else, but never the way out of the game
        if room.exits.is_empty() && is_quit(&input) {
            self.out.say("Goodbye.");
            return true;
        }

        if try_handle_movement(self, room, &input).handled() {
            return false;
        }

        for action in &room.actions {
            if try_action(action, &input, self, room) {
                return false;
            }
        }

        let carried: Vec<Rc<Item>> = self.character.items().cloned().collect();
        for item in &carried {
            for action in &item.actions {
                if try_action(action, &input, self, room) {
                    return false;
                }
            }
        }

        if is_quit(&input) {
            self.out.say("Goodbye.");
            return true;
        }

        if input == "i" || input == "inventory" {
            handle_inventory(&mut self.out, &self.character);
            return false;
        }

        if input == "look" {
            render_room(self, room);
            return false;
        }

        let (verb, rest) = input.split_once(' ').unwrap_or((input.as_str(), ""));
        match verb {
            "examine" => handle_examine(self, room, rest),
            "take" => handle_take(self, room, rest),
            "drop" => handle_drop(self, room, rest),
            _ => {
                debug!("no resolver claimed '{}'", input);
                self.out.say("You can't do that.");
            }
        }
        false
    }

    pub fn items_in_room(&self, room_id: &str) -> &[Rc<Item>] {
        self.room_items
            .get(room_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn exit_blocked(&self, room_id: &str, exit: &Exit) -> bool {
        self.blocked_exits
            .contains(&(room_id.to_string(), exit.direction.clone()))
    }

    /// Game logic hook for doors and the like. The resolver itself never
    /// changes this.
    pub fn set_exit_blocked(&mut self, room_id: &str, direction: &str, blocked: bool) {
        if self.world.room(room_id).and_then(|r| r.exit(direction)).is_none() {
            warn!("set_exit_blocked: '{}' has no exit '{}'", room_id, direction);
            return;
        }
        let key = (room_id.to_string(), direction.to_string());
        if blocked {
            self.blocked_exits.insert(key);
        } else {
            self.blocked_exits.remove(&key);
        }
        debug!(
            "exit '{}' of '{}' is now {}",
            direction,
            room_id,
            if blocked { "blocked" } else { "open" }
        );
    }

    /// Place the player somewhere else without firing any hooks.
    pub fn go_to_room(&mut self, room_id: &str) {
        if self.world.rooms.contains_key(room_id) {
            self.current_room_id = room_id.to_string();
        } else {
            warn!("go_to_room: no room '{}'", room_id);
        }
    }

    /// Put a world item into the inventory, wherever it currently is.
    pub fn give_item(&mut self, name: &str) {
        let Some(item) = self.world.item(name).cloned() else {
            warn!("give_item: no item '{}'", name);
            return;
        };
        for items in self.room_items.values_mut() {
            items.retain(|i| i.name != name);
        }
        self.character.take(item);
    }

    /// Remove an item from the inventory for good.
    pub fn consume_item(&mut self, name: &str) {
        if self.character.drop(name).is_none() {
            debug!("consume_item: '{}' was not carried", name);
        }
    }

    pub(crate) fn remove_from_room(&mut self, room_id: &str, name: &str) -> Option<Rc<Item>> {
        let items = self.room_items.get_mut(room_id)?;
        let idx = items.iter().position(|i| i.name == name)?;
        Some(items.remove(idx))
    }

    pub(crate) fn put_in_room(&mut self, room_id: &str, item: Rc<Item>) {
        self.room_items
            .entry(room_id.to_string())
            .or_default()
            .push(item);
    }
}

fn is_quit(input: &str) -> bool {
    input == "quit" || input == "exit"
}
