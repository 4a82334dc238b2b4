//! Process-wide light/dark theme flag.
//!
//! A tiny piece of app state that lives beside the query cache: consumers
//! read the current mode, toggle it, and subscribe to changes through a
//! `tokio::sync::watch` channel.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Rendering theme selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    pub fn toggled(&self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Shared theme state with change notification.
///
/// Cloning shares the flag; all clones observe the same mode.
#[derive(Debug, Clone)]
pub struct ThemeFlag {
    tx: watch::Sender<ThemeMode>,
}

impl ThemeFlag {
    pub fn new(initial: ThemeMode) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn get(&self) -> ThemeMode {
        *self.tx.borrow()
    }

    pub fn set(&self, mode: ThemeMode) {
        // send_replace never fails; the sender keeps its own receiver alive.
        self.tx.send_replace(mode);
    }

    /// Flip between light and dark, returning the new mode.
    pub fn toggle(&self) -> ThemeMode {
        let mut next = ThemeMode::Light;
        self.tx.send_modify(|mode| {
            *mode = mode.toggled();
            next = *mode;
        });
        next
    }

    /// Receiver that observes every subsequent mode change.
    pub fn watch(&self) -> watch::Receiver<ThemeMode> {
        self.tx.subscribe()
    }
}

impl Default for ThemeFlag {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}
