use crate::GameState;
use crate::world;

/// Describe `room` as the player sees it now: name, description, loose items
/// and the exits that are currently open.
///
/// Has the same shape as a move hook so front ends can register it directly.
pub fn render_room(state: &mut GameState, room: &world::Room) {
    let mut room_desc = String::new();
    room_desc.push_str(room.desc.trim());

    for item in state.items_in_room(&room.id) {
        let txt = item.room_text.trim();
        let line = if txt.is_empty() {
            format!("There is a {} here.", item.name)
        } else {
            txt.to_string()
        };
        if !room_desc.is_empty() {
            room_desc.push(' ');
        }
        room_desc.push_str(&line);
    }

    let mut dirs: Vec<&str> = room
        .exits
        .iter()
        .filter(|e| !state.exit_blocked(&room.id, e))
        .map(|e| e.direction.as_str())
        .collect();
    dirs.sort();
    dirs.dedup();

    let exits = if dirs.is_empty() {
        "Exits: (none)".to_string()
    } else {
        format!("Exits: {}", dirs.join(", "))
    };

    state.out.title(room.name.clone());
    state.out.say(room_desc);
    state.out.set_exits(exits);
}
