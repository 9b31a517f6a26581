pub mod cname_resolver;
pub mod failover_dispatcher;
pub mod local_delegation;
pub mod nameserver_extractor;
pub mod root_delegation;
pub mod system_fallback;

pub use cname_resolver::{CnameResolver, RecordTarget, ResolutionState};
pub use failover_dispatcher::{Dispatch, FailoverDispatcher, ServedResponse};
pub use local_delegation::LocalDelegationWalker;
pub use nameserver_extractor::NameserverExtractor;
pub use root_delegation::RootDelegationWalker;
pub use system_fallback::SystemFallback;
