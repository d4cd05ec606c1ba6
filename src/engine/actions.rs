use log::debug;

use crate::GameState;
use crate::world;

pub const MISSING_ITEM_TEXT: &str = "You don't have that.";

/// Fire `action` if one of its phrases, normalized like the player's input,
/// equals `input` exactly.
///
/// A phrase hit always consumes the command, even when a required item is
/// missing; in that case the effect is skipped and the player is told so.
/// Returns false only when no phrase matched, and then nothing is touched.
pub fn try_action(
    action: &world::Action,
    input: &str,
    state: &mut GameState,
    room: &world::Room,
) -> bool {
    let matched = action
        .phrases
        .iter()
        .any(|phrase| state.normalizer.normalize(phrase) == input);

    if !matched {
        return false;
    }

    if let Some(missing) = action
        .requires
        .iter()
        .find(|name| !state.character.has(name))
    {
        debug!(
            "action '{}' matched but '{}' is not carried",
            action.label(),
            missing
        );
        let text = action.missing_text.as_deref().unwrap_or(MISSING_ITEM_TEXT);
        state.out.say(text);
        return true;
    }

    debug!("action '{}' fired in room '{}'", action.label(), room.id);
    (action.effect)(state, room);
    true
}
