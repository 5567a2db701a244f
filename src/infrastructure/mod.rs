pub mod keychain;
pub mod memory;

pub use keychain::KeychainBackend;
pub use memory::MemoryBackend;
