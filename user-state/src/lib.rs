pub mod chat;
pub mod directory;
pub mod gate;
pub mod session;
pub mod theme;

pub use directory::{login, register, LoginError, RegisterError, UserRecord};
pub use gate::{evaluate_gate, GateOutcome, Redirect, RouteClass};
pub use session::{current_username, logout, sign_in, Profile};
pub use theme::Theme;
