pub mod args;
pub mod enums;
pub mod id;
pub mod identity;
pub mod metadata;

pub use args::{Argument, Arguments};
pub use enums::ProjectStatus;
pub use id::InstanceId;
pub use identity::Identity;
pub use metadata::{Attribute, AttributesGroup, Metadata};
