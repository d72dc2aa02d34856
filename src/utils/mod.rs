pub mod geo;
pub mod timefmt;
