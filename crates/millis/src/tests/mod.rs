use std::sync::{Mutex, MutexGuard};

mod config;
mod delay;
mod interval;

/// Serializes tests that drive `SYSTEM_MILLIS`.
static SYSTEM_MILLIS_LOCK: Mutex<()> = Mutex::new(());

fn lock_system_millis() -> MutexGuard<'static, ()> {
    SYSTEM_MILLIS_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
