use taskwizard::event::{ArmId, Command, Event};
use taskwizard::keys::Key;
use taskwizard::tasks::{Item, Task, Transition};

/// Feed `keys` one by one, returning the last transition.
pub fn press(task: &mut dyn Task, keys: &[Key]) -> Option<Transition> {
    let mut last = None;
    for key in keys {
        last = Some(task.handle_event(Event::Key(*key)));
    }
    last
}

/// Type `text` character by character.
pub fn type_text(task: &mut dyn Task, text: &str) {
    for c in text.chars() {
        task.handle_event(Event::Key(Key::Char(c)));
    }
}

/// Arm-cycle of the deadline among `commands`.
pub fn deadline_arm(commands: &[Command]) -> ArmId {
    commands
        .iter()
        .find(|command| command.is_deadline())
        .and_then(Command::arm)
        .expect("no deadline command")
}

pub fn items(keys: &[&str]) -> Vec<Item> {
    keys.iter().map(|key| Item::simple(*key)).collect()
}

/// Deterministic pseudo-random sequence for property-style tests.
pub struct Lcg(pub u64);

impl Lcg {
    pub fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}
