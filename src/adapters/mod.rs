// Adapters layer: concrete implementations of the domain ports
// (documents, extraction, persistence, notifications).

pub mod documents;
pub mod extractor;
pub mod notifier;
pub mod repository;
