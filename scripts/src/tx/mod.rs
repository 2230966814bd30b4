//! Chain access: RPC client, contract interfaces & read calls

pub mod abi;
pub mod client;
pub mod reader;
