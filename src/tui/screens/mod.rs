pub(crate) mod audio;
pub(crate) mod bench;
pub(crate) mod display;
pub(crate) mod error;
pub(crate) mod home;
pub(crate) mod keyboard;
pub(crate) mod metrics;
pub(crate) mod mouse;
