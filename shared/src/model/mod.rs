pub mod player_model;

pub use player_model::PlayerRecord;
