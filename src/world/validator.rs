use std::collections::HashSet;

use thiserror::Error;

use super::model::{Action, ItemLocation, World};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("world has no rooms")]
    NoRooms,

    #[error("start_room '{0}' not found among rooms")]
    MissingStartRoom(String),

    #[error("room '{room}' has an exit '{direction}' to nonexistent room '{target}'")]
    MissingExitTarget {
        room: String,
        direction: String,
        target: String,
    },

    #[error("item '{item}' start_location room '{room}' not found")]
    MissingItemRoom { item: String, room: String },

    #[error("item name '{0}' is declared more than once")]
    DuplicateItem(String),

    #[error("{scope} action '{action}' requires unknown item '{item}'")]
    UnknownRequirement {
        scope: String,
        action: String,
        item: String,
    },

    #[error("{scope} action has no trigger phrases")]
    NoPhrases { scope: String },
}

/// Checks cross-references that the engine relies on at play time. Returns
/// every problem found rather than stopping at the first one.
pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if world.rooms.is_empty() {
        errors.push(ValidationError::NoRooms);
    }

    if !world.rooms.contains_key(&world.start_room) {
        errors.push(ValidationError::MissingStartRoom(world.start_room.clone()));
    }

    // Sorted so the report is stable across runs
    let mut room_ids: Vec<&String> = world.rooms.keys().collect();
    room_ids.sort();

    for room_id in &room_ids {
        let room = &world.rooms[*room_id];
        for exit in &room.exits {
            if !world.rooms.contains_key(&exit.target) {
                errors.push(ValidationError::MissingExitTarget {
                    room: room.id.clone(),
                    direction: exit.direction.clone(),
                    target: exit.target.clone(),
                });
            }
        }
    }

    let mut item_names: HashSet<&str> = HashSet::new();
    for item in &world.items {
        if !item_names.insert(item.name.as_str()) {
            errors.push(ValidationError::DuplicateItem(item.name.clone()));
        }

        if let Some(ItemLocation::Room(r)) = &item.start_location {
            if !world.rooms.contains_key(r) {
                errors.push(ValidationError::MissingItemRoom {
                    item: item.name.clone(),
                    room: r.clone(),
                });
            }
        }
    }

    for room_id in &room_ids {
        validate_actions(
            &world.rooms[*room_id].actions,
            &item_names,
            &mut errors,
            format!("room '{}'", room_id),
        );
    }

    for item in &world.items {
        validate_actions(
            &item.actions,
            &item_names,
            &mut errors,
            format!("item '{}'", item.name),
        );
    }

    errors
}

fn validate_actions(
    actions: &[Action],
    item_names: &HashSet<&str>,
    errors: &mut Vec<ValidationError>,
    scope: String,
) {
    for action in actions {
        if action.phrases.is_empty() {
            errors.push(ValidationError::NoPhrases {
                scope: scope.clone(),
            });
        }

        for req in &action.requires {
            if !item_names.contains(req.as_str()) {
                errors.push(ValidationError::UnknownRequirement {
                    scope: scope.clone(),
                    action: action.label().to_string(),
                    item: req.clone(),
                });
            }
        }
    }
}
