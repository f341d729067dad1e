pub mod player_service;
pub mod prize_service;
pub mod session_service;
pub mod wheel_service;

pub use player_service::*;
pub use prize_service::*;
pub use session_service::*;
pub use wheel_service::*;
