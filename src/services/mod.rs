//! Services for turning contract listings into event decoders.

pub mod decoder;
pub mod extractor;
pub mod listing;
pub mod type_mapper;
