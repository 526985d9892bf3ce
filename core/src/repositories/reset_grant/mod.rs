pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockResetGrantRepository;
pub use r#trait::ResetGrantRepository;
