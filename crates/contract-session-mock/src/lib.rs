pub mod assertions;
pub mod builder;
pub mod gateway;
pub mod mock;
pub mod rpc_stub;

pub use assertions::CallAssertions;
pub use builder::MockProviderBuilder;
pub use gateway::MockGateway;
pub use mock::{MockProvider, RecordedCall};
pub use rpc_stub::{RpcReply, RpcStub};
