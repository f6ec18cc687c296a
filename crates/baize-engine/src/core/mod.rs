pub mod body;
pub mod collision;
pub mod pocket;
pub mod rack;
pub mod simulation;
pub mod table;
pub mod time;
