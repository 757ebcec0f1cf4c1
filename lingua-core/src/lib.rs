//! Resolution of display strings from multi-provider, multi-language content.
//!
//! Content is stored per provider and per language in a [`ProviderMap`]. A
//! provider chain folds it into one [`Translation`], and the language chain
//! picks the string to show:
//!
//! ```
//! use lingua_core::ProviderMap;
//!
//! let mut content = ProviderMap::new();
//! content.set_value("altipla", "es", "Hola");
//! content.set_value("hotelbeds", "en", "Hello");
//!
//! let merged = content.custom_chain(&["altipla", "hotelbeds"]);
//! assert_eq!(merged.lang_chain("it"), "Hello");
//! ```

pub mod chain;
pub mod codec;
pub mod column;
pub mod config;
pub mod error;
pub mod provider;
pub mod translation;

pub use chain::{global_provider_chain, set_global_provider_chain};
pub use column::ColumnValue;
pub use error::CodecError;
pub use provider::ProviderMap;
pub use translation::{Translation, lang_chain};

pub type Result<T> = std::result::Result<T, CodecError>;
