mod network_synchronizer;
mod standalone;

pub use network_synchronizer::NetworkSynchronizer;
pub use standalone::Standalone;
