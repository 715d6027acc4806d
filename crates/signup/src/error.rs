use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("could not read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("'{0}' is not a file")]
    NotAFile(String),

    #[error("wizard setup failed: {0}")]
    Wizard(#[from] openmeal_wizard::WizardError),
}
