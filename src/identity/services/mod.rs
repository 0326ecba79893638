//! Application services for identity workflows.

mod accounts;
mod profiles;
mod registration;

pub use accounts::{AccountService, AccountServiceError, AccountServiceResult, UserChanges};
pub use profiles::{ProfileService, ProfileServiceError, ProfileServiceResult};
pub use registration::{
    AuthenticationError, RegisterRequest, RegistrationError, RegistrationResult,
    RegistrationService,
};
