//! Diner sign-up for OpenMeal.
//!
//! [`diner_wizard`] assembles the three-step form on top of
//! `openmeal-wizard`; [`DinerSignUpHandler`] is its final submit, which
//! uploads the photo ID and creates the account through `openmeal-client`.

pub mod error;
pub mod form;
pub mod rules;
pub mod submit;
pub mod upload;

pub use error::SignupError;
pub use form::{diner_steps, diner_wizard, initial_values, EXTRA_DISPLAY_STEPS, TERMS_STEP, UPLOAD_STEP};
pub use rules::{BasicInfoRules, UploadRules};
pub use submit::{DinerSignUpHandler, SignUpResult, SUCCESS_TOAST, UPLOAD_REQUIRED};
pub use upload::{UploadedFile, ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES};
