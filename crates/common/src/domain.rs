mod config_entry;
mod device;
mod fleet;
mod key_material;
mod provision;
mod registry;
mod registry_id;
mod result;

pub use config_entry::*;
pub use device::*;
pub use fleet::*;
pub use key_material::*;
pub use provision::*;
pub use registry::*;
pub use registry_id::*;
pub use result::*;
