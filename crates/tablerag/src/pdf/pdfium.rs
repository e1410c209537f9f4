use std::sync::Mutex;

use once_cell::sync::Lazy;
use pdfium_render::prelude::*;

use super::error::PdfError;

/// Cached state for lazy pdfium initialization: only the error (if any) needs
/// caching, since a successful system-library binding can be recreated cheaply.
enum InitializationState {
    Uninitialized,
    Initialized,
    Failed(String),
}

/// Guards one-time pdfium initialization so that non-PDF requests never pay
/// the system-library lookup cost.
static PDFIUM_STATE: Lazy<Mutex<InitializationState>> = Lazy::new(|| Mutex::new(InitializationState::Uninitialized));

/// Binds to the system pdfium shared library, initializing it on first call
/// and reusing the cached outcome on every call after.
pub fn bind_pdfium() -> Result<Box<dyn PdfiumLibraryBindings>, PdfError> {
    let mut state = PDFIUM_STATE
        .lock()
        .map_err(|e| PdfError::BindingFailed(format!("lock poisoned: {e}")))?;

    match &*state {
        InitializationState::Uninitialized => match Pdfium::bind_to_system_library() {
            Ok(bindings) => {
                *state = InitializationState::Initialized;
                Ok(bindings)
            }
            Err(err) => {
                let msg = err.to_string();
                *state = InitializationState::Failed(msg.clone());
                Err(PdfError::BindingFailed(msg))
            }
        },
        InitializationState::Failed(msg) => Err(PdfError::BindingFailed(msg.clone())),
        InitializationState::Initialized => Pdfium::bind_to_system_library()
            .map_err(|e| PdfError::BindingFailed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_pdfium_is_idempotent_on_failure() {
        // Without a system pdfium library present in the test sandbox, both
        // calls should fail identically rather than panicking or deadlocking.
        let first = bind_pdfium();
        let second = bind_pdfium();
        assert_eq!(first.is_ok(), second.is_ok());
    }
}
