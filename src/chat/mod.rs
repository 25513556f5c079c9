//! Group chat: in-memory message lists with reactions and reply quotes.

pub mod model;
pub mod room;
pub mod routes;

pub use model::{Message, MessageView, NewMessage, ReplyPreview};
pub use room::ChatHub;
pub use routes::{chat_routes, ChatRouteState};
