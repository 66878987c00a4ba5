pub mod camera;
pub mod contacts;
pub mod pinch;

pub use camera::Camera;
pub use contacts::{Contact, ContactTracker};
pub use pinch::{PinchMode, PinchSession};
