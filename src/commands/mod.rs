pub mod activity;
pub mod board;
pub mod comment;
pub mod create;
pub mod delete;
pub mod export;
pub mod favorite;
pub mod filter;
pub mod live;
pub mod moves;
pub mod notify;
pub mod shell;
pub mod show;
pub mod subtask;
pub mod team;
pub mod update;
