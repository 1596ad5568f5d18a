pub(crate) mod buffer;
pub(crate) mod fingerprint;
pub(crate) mod packer;
pub(crate) mod session;
