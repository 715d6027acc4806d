//! Remote-call client for the OpenMeal REST backend.
//!
//! Each backend operation is a method on [`ApiClient`] returning an
//! [`Outcome`]: `Success` for 200/201 responses, `Failure` carrying the
//! server's payload otherwise, and the generic failure payload when no
//! response arrived. Callers hold the [`Session`] and pass it in.

pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod outcome;
pub mod request;
pub mod session;
pub mod token;
pub mod transport;

pub use api::{
    ApiClient, Credentials, CustomerSignUp, DinerSignUp, ImageUpload, MenuItem, OrderRequest,
    OtpConfirmation, PasswordUpdate, Payment, PickupTime, RecipientApproval, RecipientEdit,
    RecipientResponses, AUTH_HEADER,
};
pub use config::{ClientConfig, API_URL_ENV, DEFAULT_API_URL};
pub use endpoint::{Endpoint, OrderFilter, UploadImageKind};
pub use error::{ClientError, TokenError, TransportError};
pub use outcome::{
    classify, generic_failure_payload, LoadingStage, Outcome, CONTACT_SUPPORT_MESSAGE,
};
pub use request::{Body, ContentType, Method, MultipartForm, RequestDescriptor};
pub use session::{Session, TOKEN_LIFETIME};
pub use token::{decode_identity, Identity};
pub use transport::{HttpRequest, RawResponse, ScriptedTransport, Transport, UreqTransport};
