pub mod classifier;
pub mod conversation;
pub mod entities;
pub mod library;
pub mod picker;
pub mod profile;
pub mod responder;
