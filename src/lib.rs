//! Loads a JSON credentials file whose path is supplied through an environment
//! variable. The crate stays small so the whole path from variable to parsed
//! document can be read in one sitting.

pub mod config;
pub mod credentials;
pub mod error;
pub mod integrity;
pub mod redact;

pub use config::LoaderSettings;
pub use credentials::{
    load_from_env, load_from_path, resolve_path, CredentialsDocument, LoadedCredentials,
};
pub use error::LoadError;
