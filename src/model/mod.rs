pub mod color;
pub mod profile;
pub mod record;
