//! The seam between subsystems and whatever loop schedules their commands.

pub trait Command {
    fn name(&self) -> &str;

    /// Called once before the first `execute`.
    fn initialize(&mut self) {}

    fn execute(&mut self);

    fn is_finished(&self) -> bool {
        false
    }
}

pub trait Subsystem {
    fn name(&self) -> &str;

    /// The command to run while no other command has claimed this subsystem.
    fn default_command(&mut self) -> Option<&mut dyn Command>;
}

/// A command that runs its action on every tick and never finishes.
pub struct RunCommand<F> {
    name: String,
    action: F,
}

impl<F: FnMut()> RunCommand<F> {
    pub fn new(name: &str, action: F) -> Self {
        RunCommand {
            name: String::from(name),
            action: action,
        }
    }
}

impl<F: FnMut()> Command for RunCommand<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self) {
        (self.action)()
    }
}

/// Runs a subsystem's default command once per tick, initializing it before
/// the first `execute`.
pub struct DefaultRunner {
    initialized: bool,
}

impl DefaultRunner {
    pub fn new() -> DefaultRunner {
        DefaultRunner { initialized: false }
    }

    /// Returns whether a command ran.
    pub fn tick(&mut self, subsystem: &mut dyn Subsystem) -> bool {
        match subsystem.default_command() {
            Some(command) => {
                if !self.initialized {
                    command.initialize();
                    self.initialized = true;
                }
                command.execute();
                true
            }
            None => false,
        }
    }
}
