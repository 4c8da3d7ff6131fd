pub mod coach;
pub mod coach_team;
pub mod credential;
pub mod join_request;
pub mod player;
pub mod player_team;
pub mod team;
