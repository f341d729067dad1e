pub mod admin_key;
pub mod quota;
pub mod weighted;

pub use admin_key::verify_admin_key;
pub use quota::{QuotaState, can_spin, record_spin, remaining_spins};
pub use weighted::choose_prize;
