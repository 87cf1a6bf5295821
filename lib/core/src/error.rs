//! Error handling foundation for the tradebeat dispatcher.
//!
//! Only the `Result` alias lives here. Each crate defines its own
//! domain-specific error enums in its own `error` module; rootcause's
//! `.context()` adds layer-appropriate context as errors cross crate
//! boundaries (primarily at the binary seam).

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_type_works() {
        let ok: Result<u16> = Ok(200);
        assert_eq!(ok.expect("should be ok"), 200);
    }
}
