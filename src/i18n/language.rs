//! Active language: the language context of a single read.
//!
//! Reads take the active language as an explicit argument. Hosts that prefer
//! to carry it implicitly can run a unit of work inside [`ActiveLanguage::scope`],
//! which sets a thread-local value for the duration of the closure only.

use crate::i18n::locale::{base_language, to_locale};
use crate::i18n::LanguageRegistry;
use std::cell::RefCell;
use std::fmt;

thread_local! {
    static SCOPED: RefCell<Option<ActiveLanguage>> = const { RefCell::new(None) };
}

/// The language a read should resolve to, stored as a locale token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveLanguage {
    locale: String,
}

impl ActiveLanguage {
    /// Create an active language from any tag spelling (`pt-br`, `pt_BR`, `PT-BR`).
    pub fn new(tag: &str) -> Self {
        Self {
            locale: to_locale(tag),
        }
    }

    /// The registry's default language.
    pub fn default_for(registry: &LanguageRegistry) -> Self {
        Self::new(registry.default_language())
    }

    /// Full locale token (e.g. "pt_BR").
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Language portion of the locale token (e.g. "pt").
    pub fn base(&self) -> &str {
        base_language(&self.locale)
    }

    /// Run `f` with `self` as the scoped language of the current thread.
    ///
    /// The previous value is restored when `f` returns or unwinds.
    pub fn scope<R>(self, f: impl FnOnce() -> R) -> R {
        struct Restore(Option<ActiveLanguage>);

        impl Drop for Restore {
            fn drop(&mut self) {
                let previous = self.0.take();
                SCOPED.with(|cell| *cell.borrow_mut() = previous);
            }
        }

        let previous = SCOPED.with(|cell| cell.borrow_mut().replace(self));
        let _restore = Restore(previous);
        f()
    }

    /// The scoped language of the current thread, if any.
    pub fn scoped() -> Option<Self> {
        SCOPED.with(|cell| cell.borrow().clone())
    }

    /// The scoped language, or the registry default outside any scope.
    pub fn current(registry: &LanguageRegistry) -> Self {
        Self::scoped().unwrap_or_else(|| Self::default_for(registry))
    }
}

impl fmt::Display for ActiveLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.locale)
    }
}
