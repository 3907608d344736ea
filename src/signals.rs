use std::sync::atomic::{AtomicBool, Ordering};

use nix::libc;
use nix::sys::signal::{self, SigHandler, Signal};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static PROMPTING: AtomicBool = AtomicBool::new(false);

const CANCELLED: &[u8] = b"\n\nCleanup cancelled by user\n";

/// Install SIGINT/SIGTERM handlers for operator cancellation
///
/// Outside a prompt the handler only raises [`interrupt_flag`], which the
/// orchestrator polls between candidates. Inside a prompt the blocked read
/// would be restarted, so the handler reports and exits on its own.
pub fn install_interrupt_handlers() -> nix::Result<()> {
    unsafe {
        signal::signal(Signal::SIGINT, SigHandler::Handler(handle_interrupt))?;
        signal::signal(Signal::SIGTERM, SigHandler::Handler(handle_interrupt))?;
    }

    Ok(())
}

extern "C" fn handle_interrupt(_: i32) {
    INTERRUPTED.store(true, Ordering::SeqCst);

    if PROMPTING.load(Ordering::SeqCst) {
        // only async-signal-safe calls from here on
        unsafe {
            libc::write(
                libc::STDERR_FILENO,
                CANCELLED.as_ptr().cast(),
                CANCELLED.len(),
            );
            libc::_exit(1);
        }
    }
}

/// Process-wide cancellation flag raised by the signal handlers
pub fn interrupt_flag() -> &'static AtomicBool {
    &INTERRUPTED
}

/// Marks the span during which the process is blocked on operator input
pub struct PromptGuard(());

impl PromptGuard {
    pub fn enter() -> Self {
        PROMPTING.store(true, Ordering::SeqCst);
        Self(())
    }
}

impl Drop for PromptGuard {
    fn drop(&mut self) {
        PROMPTING.store(false, Ordering::SeqCst);
    }
}
