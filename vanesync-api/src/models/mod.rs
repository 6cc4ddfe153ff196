mod device;
mod options;

pub use device::*;
pub use options::*;
