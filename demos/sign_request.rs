//! Signs a status update the way the Ads API expects and prints the resulting header.
//!
//! The first signature uses a fixed nonce and timestamp, so it can be compared against a
//! known-good value. The second uses the default signer, which draws a fresh nonce per call.

// crates.io
use color_eyre::Result;
// self
use oauth1_signer::{
	auth::Credentials,
	sign::{FixedNonceSource, Oauth1Signer, SignatureRequest},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let credentials = Credentials::new(
		"xvz1evFS4wEEPTGEFPHBog",
		"kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
		"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
		"LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
	);
	let request =
		SignatureRequest::new("POST", "https://example.com/1.1/statuses/update.json", credentials)
			.body("Hello Twitter");
	let fixed = Oauth1Signer::with_nonce_source(FixedNonceSource::new(
		"abc123def456ghi789jkl012mno345pq",
		"1318622958",
	))
	.sign(&request)?;

	println!("Deterministic signature: {}.", fixed.signature);
	println!("Authorization: {}", fixed.authorization);

	let live = Oauth1Signer::default().sign(&request)?;

	println!("Fresh nonce {} at {}.", live.nonce, live.timestamp);
	println!("Authorization: {}", live.authorization);

	Ok(())
}
