//! Domain-level frontend features (flow transport, session) shared by the
//! routes. Keeps network and security handling out of view code.

pub mod kratos;
pub mod session;
