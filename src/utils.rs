pub fn set_panic_hook() {
    // Logs panics to the browser console instead of the opaque
    // "unreachable executed" wasm trap. Needs the `console_error_panic_hook`
    // feature, which is on by default.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
