mod alert;
mod button;
mod messages;
mod spinner;

pub use alert::{Alert, AlertKind};
pub use button::Button;
pub use messages::Messages;
pub use spinner::Spinner;
