//! Domain types: verbs, outbound commands and the client state snapshot.

pub mod command;
pub mod group_policy;
pub mod snapshot;
pub mod verb;

pub use command::StateCommand;
pub use group_policy::GroupPolicy;
pub use snapshot::StateSnapshot;
pub use verb::Verb;
