// Handlers module - API endpoint handlers

pub mod media;
pub mod veo;
