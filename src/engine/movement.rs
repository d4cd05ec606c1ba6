use std::rc::Rc;

use log::{debug, warn};

use crate::GameState;
use crate::world;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player changed rooms and all hooks ran.
    Moved,
    /// The room has no exits at all; the command is over.
    Trapped,
    /// An exit matched but its target room is missing. Only reachable for
    /// worlds that skipped validation.
    Broken,
    /// Not a movement command here.
    NotAMove,
}

impl MoveOutcome {
    /// Whether the dispatcher should stop resolving this command.
    pub fn handled(self) -> bool {
        !matches!(self, MoveOutcome::NotAMove)
    }
}

/// Exits are tried in declaration order; the first unblocked one whose
/// direction or full direction name equals the command wins.
pub fn try_handle_movement(state: &mut GameState, room: &world::Room, cmd: &str) -> MoveOutcome {
    if room.exits.is_empty() {
        state.out.say("You are trapped!");
        return MoveOutcome::Trapped;
    }

    let exit = room.exits.iter().find(|e| {
        !state.exit_blocked(&room.id, e)
            && (cmd == e.direction || state.directions.full_name(&e.direction) == Some(cmd))
    });

    let Some(exit) = exit else {
        return MoveOutcome::NotAMove;
    };

    let world = Rc::clone(&state.world);
    let Some(next) = world.room(&exit.target) else {
        warn!(
            "room '{}' exit '{}' targets missing room '{}'",
            room.id, exit.direction, exit.target
        );
        state.out.say(format!(
            "You try to go {}, but something feels wrong (room not found).",
            exit.direction
        ));
        return MoveOutcome::Broken;
    };

    debug!("moving {} from '{}' to '{}'", exit.direction, room.id, next.id);
    enter_room(state, next);
    MoveOutcome::Moved
}

/// Make `next` current, then run move hooks (registration order) followed by
/// the room's enter hooks (declaration order).
pub fn enter_room(state: &mut GameState, next: &world::Room) {
    state.current_room_id = next.id.clone();

    for hook in state.move_hooks() {
        hook(state, next);
    }
    for hook in &next.on_enter {
        hook(state, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Room, World};

    fn session() -> GameState {
        let world = World::new("t", "a")
            .with_room(Room::new("a").with_exit("n", "b"))
            .with_room(Room::new("b").with_exit("s", "a"))
            .with_room(Room::new("pit"));
        GameState::new(world).expect("valid world")
    }

    #[test]
    fn room_without_exits_traps() {
        let mut state = session();
        let pit = Room::new("pit");

        assert_eq!(try_handle_movement(&mut state, &pit, "n"), MoveOutcome::Trapped);
        assert!(state.out.contains("You are trapped!"));
        assert_eq!(state.current_room_id, "a");
    }

    #[test]
    fn non_direction_is_not_a_move() {
        let mut state = session();
        let world = Rc::clone(&state.world);
        let room = world.room("a").expect("room a");

        assert_eq!(try_handle_movement(&mut state, room, "dance"), MoveOutcome::NotAMove);
        assert!(!MoveOutcome::NotAMove.handled());
        assert!(state.out.is_empty());
        assert_eq!(state.current_room_id, "a");
    }

    #[test]
    fn short_and_full_names_both_move() {
        let mut state = session();
        let world = Rc::clone(&state.world);

        let a = world.room("a").expect("room a");
        assert_eq!(try_handle_movement(&mut state, a, "north"), MoveOutcome::Moved);
        assert_eq!(state.current_room_id, "b");

        let b = world.room("b").expect("room b");
        assert_eq!(try_handle_movement(&mut state, b, "s"), MoveOutcome::Moved);
        assert_eq!(state.current_room_id, "a");
    }

    #[test]
    fn missing_target_is_reported_not_followed() {
        let mut state = session();
        let stray = Room::new("a").with_exit("w", "nowhere");

        assert_eq!(try_handle_movement(&mut state, &stray, "w"), MoveOutcome::Broken);
        assert!(MoveOutcome::Broken.handled());
        assert_eq!(state.current_room_id, "a");
    }
}
