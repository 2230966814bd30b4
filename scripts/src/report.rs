//! Text printed for the manual hand-off of the addresses to the front-end

use alloy::primitives::Address;

use crate::constants::MERCHANT_PLACEHOLDER;

/// Printed before the first deployment
pub const DEPLOYMENT_STARTED: &str = "--- Deployment Started ---";

/// Header of the block to copy into the front-end
pub const COPY_HEADER: &str = "--- COPY THESE ADDRESSES TO index.html ---";

/// Progress line printed once a contract is deployed
pub fn deployed_line(label: &str, address: Address) -> String {
    format!("{label} deployed to: {address}")
}

/// A `NAME = "value"` assignment, as read by the front-end config
pub fn assignment_line(name: &str, value: &str) -> String {
    format!("{name} = \"{value}\"")
}

/// The addresses block to copy into `index.html`
///
/// The merchant address isn't deployed by us, the placeholder is printed when it's unknown.
pub fn address_block(token: Address, relay: Address, merchant: Option<Address>) -> String {
    let merchant = merchant
        .map(|merchant| merchant.to_string())
        .unwrap_or_else(|| MERCHANT_PLACEHOLDER.to_string());

    [
        String::new(),
        COPY_HEADER.to_string(),
        assignment_line("MNEE_ADDRESS", &token.to_string()),
        assignment_line("RELAY_ADDRESS", &relay.to_string()),
        assignment_line("MERCHANT_ADDRESS", &merchant),
    ]
    .join("\n")
}
