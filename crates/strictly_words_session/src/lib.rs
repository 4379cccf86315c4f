//! Strictly Words session layer.
//!
//! Hosts many games at once on top of the `strictly_words` rules engine.
//!
//! # Architecture
//!
//! - **Config**: TOML session settings, including the rules for new games
//! - **Loader**: dictionary files (JSON or plain word lists) into a shared registry
//! - **Session**: one serialized command stream per game, parallel across games
//! - **Script**: command scripts replayed against a fresh session
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strictly_words::DictionaryRegistry;
//! use strictly_words_session::{SessionConfig, SessionManager};
//!
//! let registry = DictionaryRegistry::new();
//! registry.load("fr", "Français", ["vendre", "rêve"]);
//!
//! let manager = SessionManager::new(Arc::new(registry), SessionConfig::default());
//! manager
//!     .create_session("table-1".to_string(), None, vec!["ana".into(), "bob".into()], 42)
//!     .unwrap();
//! manager.execute("table-1", "ana", "pass").unwrap();
//! assert_eq!(manager.history("table-1").unwrap().len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod loader;
mod script;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, SessionConfig};

// Crate-level exports - Dictionary loading
pub use loader::{LoadError, load_dir, load_file};

// Crate-level exports - Scripts
pub use script::{Script, ScriptError, ScriptStep, StepReport};

// Crate-level exports - Session management
pub use session::{GameSession, MoveRecord, SessionError, SessionId, SessionManager};
