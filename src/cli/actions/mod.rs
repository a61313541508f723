pub mod check;

#[derive(Debug)]
pub enum Action {
    Check(check::Args),
}

impl Action {
    /// Execute the action. Returns `true` when every form passed.
    /// # Errors
    /// Returns an error if the input cannot be read or parsed.
    pub fn execute(self) -> anyhow::Result<bool> {
        match self {
            Self::Check(args) => check::execute(&args),
        }
    }
}
