mod identity_key;

pub use identity_key::IdentityKey;
