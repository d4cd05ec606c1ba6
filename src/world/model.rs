use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::GameState;
use crate::engine::AliasData;

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Side effect run by an action or a hook. Gets the session and the room it
/// fires in (the current room for actions, the new room for move/enter hooks).
pub type Effect = Rc<dyn Fn(&mut GameState, &Room)>;

/// Immutable world definition. Everything that changes during play (player
/// position, room contents, blocked exits) lives in [`GameState`].
pub struct World {
    pub id: String,
    pub name: String,
    pub prologue: String,
    pub start_room: String,
    pub rooms: HashMap<String, Room>,
    pub items: Vec<Rc<Item>>,
    pub aliases: AliasData,
    pub junk: Vec<String>,
    pub directions: Vec<(String, String)>,
}

pub struct Room {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub exits: Vec<Exit>,
    pub actions: Vec<Action>,
    pub on_enter: Vec<Effect>,
}

#[derive(Debug, Clone)]
pub struct Exit {
    pub direction: String,
    pub target: String,
    /// Initial state; the live flag is tracked per session.
    pub blocked: bool,
}

pub struct Action {
    pub id: Option<String>,
    pub phrases: Vec<String>,
    pub requires: Vec<String>,
    pub missing_text: Option<String>,
    pub effect: Effect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLocation {
    Room(String),
    Inventory,
}

pub struct Item {
    pub name: String,
    pub desc: String,
    pub room_text: String,
    pub gettable: bool,
    pub actions: Vec<Action>,
    pub start_location: Option<ItemLocation>,
}

/// Item names and exit directions are compared with normalized player input,
/// so they are stored trimmed and lowercased.
fn player_word(s: impl Into<String>) -> String {
    s.into().trim().to_lowercase()
}

impl World {
    pub fn new(id: impl Into<String>, start_room: impl Into<String>) -> Self {
        World {
            id: id.into(),
            name: String::new(),
            prologue: String::new(),
            start_room: start_room.into(),
            rooms: HashMap::new(),
            items: Vec::new(),
            aliases: Vec::new(),
            junk: Vec::new(),
            directions: Vec::new(),
        }
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.insert(room.id.clone(), room);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(Rc::new(item));
        self
    }

    pub fn with_alias(mut self, root: impl Into<String>, aliases: &[&str]) -> Self {
        self.aliases
            .push((root.into(), aliases.iter().map(|a| a.to_string()).collect()));
        self
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn item(&self, name: &str) -> Option<&Rc<Item>> {
        self.items.iter().find(|i| i.name == name)
    }
}

impl Room {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Room {
            name: id.clone(),
            id,
            desc: String::new(),
            exits: Vec::new(),
            actions: Vec::new(),
            on_enter: Vec::new(),
        }
    }

    pub fn with_exit(mut self, direction: impl Into<String>, target: impl Into<String>) -> Self {
        self.exits.push(Exit {
            direction: player_word(direction),
            target: target.into(),
            blocked: false,
        });
        self
    }

    pub fn with_blocked_exit(
        mut self,
        direction: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.exits.push(Exit {
            direction: player_word(direction),
            target: target.into(),
            blocked: true,
        });
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn on_enter(mut self, hook: impl Fn(&mut GameState, &Room) + 'static) -> Self {
        self.on_enter.push(Rc::new(hook));
        self
    }

    pub fn exit(&self, direction: &str) -> Option<&Exit> {
        self.exits.iter().find(|e| e.direction == direction)
    }
}

impl Action {
    pub fn new<I, S>(phrases: I, effect: impl Fn(&mut GameState, &Room) + 'static) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Action {
            id: None,
            phrases: phrases.into_iter().map(Into::into).collect(),
            requires: Vec::new(),
            missing_text: None,
            effect: Rc::new(effect),
        }
    }

    pub fn requires<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.extend(items.into_iter().map(player_word));
        self
    }

    pub fn label(&self) -> &str {
        match &self.id {
            Some(id) => id,
            None => self.phrases.first().map(|p| p.as_str()).unwrap_or("?"),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("phrases", &self.phrases)
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Item {
            name: player_word(name),
            desc: String::new(),
            room_text: String::new(),
            gettable: true,
            actions: Vec::new(),
            start_location: None,
        }
    }

    pub fn in_room(mut self, room_id: impl Into<String>) -> Self {
        self.start_location = Some(ItemLocation::Room(room_id.into()));
        self
    }

    pub fn in_inventory(mut self) -> Self {
        self.start_location = Some(ItemLocation::Inventory);
        self
    }

    pub fn fixed(mut self) -> Self {
        self.gettable = false;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}
