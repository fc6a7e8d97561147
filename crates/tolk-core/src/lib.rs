pub mod cache;
pub mod error;
pub mod facade;
pub mod language;
pub mod progress;
pub mod types;

pub use cache::ModelCache;
pub use error::FacadeError;
pub use facade::TranslationFacade;
pub use language::{LanguageCode, supported_languages};
pub use progress::DownloadObserver;
pub use types::TranslationRequest;

#[cfg(test)]
mod tests;
