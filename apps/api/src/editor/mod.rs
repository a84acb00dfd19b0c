// Editor: normalization of stored/imported documents, user edits, the owned session
// and its persistence.

pub mod edits;
pub mod handlers;
pub mod normalizer;
pub mod sample;
pub mod session;
pub mod store;
