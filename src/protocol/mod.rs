pub mod input;
pub mod output;

pub use input::HookRequest;
pub use output::HookResponse;
