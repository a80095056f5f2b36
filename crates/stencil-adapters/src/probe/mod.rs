//! Tool probe adapters.

mod scripted;
mod system;

pub use scripted::StaticToolProbe;
pub use system::SystemToolProbe;
