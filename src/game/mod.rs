pub mod entities;
pub mod session;
pub mod surface;

pub use session::{Key, Phase, Session};
pub use surface::FrameBuffer;
