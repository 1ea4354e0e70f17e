mod player;
mod player_info;

pub use player::Player;
pub use player_info::PlayerInfo;
