// Keyboard commands for the arena

use winit::keyboard::KeyCode;

use crate::engine::input::KeyBindings;

use super::characters::{ActorId, ActorRoster, FIGHTERS};

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play a fighter's one-shot move
    Trigger {
        actor: ActorId,
        action: &'static str,
    },
    Quit,
}

/// Key map for every spawned fighter's moves plus Escape to quit
pub fn default_bindings(actors: &ActorRoster) -> KeyBindings<Command> {
    let moves = FIGHTERS.iter().flat_map(|fighter| {
        let actor = actors.find(fighter.name).map(|a| a.id);
        fighter.moves.iter().filter_map(move |m| {
            actor.map(|actor| {
                (
                    m.key,
                    Command::Trigger {
                        actor,
                        action: m.name,
                    },
                )
            })
        })
    });

    KeyBindings::from_bindings(moves.chain([(KeyCode::Escape, Command::Quit)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> ActorRoster {
        let mut roster = ActorRoster::new();
        for fighter in FIGHTERS {
            roster.spawn(fighter.name, &fighter.move_names());
        }
        roster
    }

    #[test]
    fn test_default_keys() {
        let roster = roster();
        let adam = roster.find("Adam").unwrap().id;
        let james = roster.find("James").unwrap().id;
        let bindings = default_bindings(&roster);

        assert_eq!(
            bindings.command(KeyCode::KeyP),
            Some(Command::Trigger {
                actor: adam,
                action: "combo"
            })
        );
        assert_eq!(
            bindings.command(KeyCode::KeyU),
            Some(Command::Trigger {
                actor: james,
                action: "uppercut"
            })
        );
        assert_eq!(
            bindings.command(KeyCode::KeyD),
            Some(Command::Trigger {
                actor: james,
                action: "dying"
            })
        );
        assert_eq!(bindings.command(KeyCode::Escape), Some(Command::Quit));
        assert_eq!(bindings.len(), 4);
    }

    #[test]
    fn test_unbound_key() {
        let bindings = default_bindings(&roster());
        assert_eq!(bindings.command(KeyCode::KeyX), None);
    }

    #[test]
    fn test_missing_fighter_gets_no_keys() {
        let mut roster = ActorRoster::new();
        roster.spawn("Adam", &["combo"]);
        let bindings = default_bindings(&roster);

        assert!(bindings.command(KeyCode::KeyP).is_some());
        assert!(bindings.command(KeyCode::KeyU).is_none());
        assert!(bindings.command(KeyCode::KeyD).is_none());
        assert_eq!(bindings.len(), 2);
    }
}
