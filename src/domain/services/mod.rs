pub mod actions;
mod app_state;
mod chat_log;
mod chat_session;
pub mod events;
mod scroll;
mod task_board;
mod ticker;

pub use app_state::*;
pub use chat_log::*;
pub use chat_session::*;
pub use scroll::*;
pub use task_board::*;
pub use ticker::*;
