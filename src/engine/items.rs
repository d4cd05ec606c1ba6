use crate::GameState;
use crate::engine::character::Character;
use crate::engine::output::Output;
use crate::world;

pub fn handle_inventory(out: &mut Output, character: &Character) {
    if character.is_empty() {
        out.say("You are carrying nothing.");
        return;
    }

    out.say("You are carrying:");
    for item in character.items() {
        out.say(format!("  {}", item.name));
    }
}

/// `take <name>`: exact name match against what is lying in `room`.
pub fn handle_take(state: &mut GameState, room: &world::Room, target_name: &str) {
    if target_name.is_empty() {
        state.out.say("Take what?");
        return;
    }

    let found = state
        .items_in_room(&room.id)
        .iter()
        .find(|item| item.name == target_name)
        .cloned();

    let item = match found {
        None => {
            state.out.say("You can't take that.");
            return;
        }
        Some(item) => item,
    };

    if !item.gettable {
        state.out.say(format!("You can't take the {}.", item.name));
        return;
    }

    state.remove_from_room(&room.id, &item.name);
    state.out.say(format!("You take the {}.", item.name));
    state.character.take(item);
}

/// `drop <name>`: the item leaves the inventory and lands in `room`.
pub fn handle_drop(state: &mut GameState, room: &world::Room, target_name: &str) {
    if target_name.is_empty() {
        state.out.say("Drop what?");
        return;
    }

    match state.character.drop(target_name) {
        Some(item) => {
            state.out.say(format!("You drop the {}.", item.name));
            state.put_in_room(&room.id, item);
        }
        None => state.out.say(format!("You have no {}.", target_name)),
    }
}

/// `examine <name>`: carried items first, then whatever lies in `room`.
pub fn handle_examine(state: &mut GameState, room: &world::Room, target_name: &str) {
    if target_name.is_empty() {
        state.out.say("Examine what?");
        return;
    }

    let item = state.character.get(target_name).cloned().or_else(|| {
        state
            .items_in_room(&room.id)
            .iter()
            .find(|item| item.name == target_name)
            .cloned()
    });

    let Some(item) = item else {
        state.out.say("You don't see that here.");
        return;
    };

    let txt = item.desc.trim();
    if txt.is_empty() {
        state
            .out
            .say(format!("You see nothing special about the {}.", item.name));
    } else {
        state.out.say(txt);
    }
}
