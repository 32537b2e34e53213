//! Privilege probe for the system-wide operations.

/// Set by `sudo` to the invoking user.
const SUDO_ENV: &str = "SUDO_USER";

/// True when running as effective root or under `sudo`.
pub fn is_elevated() -> bool {
    is_root() || std::env::var_os(SUDO_ENV).is_some()
}

/// True when the effective user id is 0.
#[allow(unsafe_code)]
pub fn is_root() -> bool {
    // SAFETY: geteuid(2) takes no arguments, cannot fail and touches no memory.
    unsafe { libc::geteuid() == 0 }
}
