//! Themes with a root palette and named color modes.
//!
//! A theme's root color tokens form the implicit default mode. Every other
//! mode is a partial override declared under `colors.modes`; tokens a mode
//! does not mention keep their root value:
//!
//! ```yaml
//! colors:
//!   text: "#000"
//!   background: "#fff"
//!   primary: "#07c"
//!   modes:
//!     dark:
//!       text: "#fff"
//!       background: "#000"
//! ```
//!
//! Here `dark` resolves to `text: #fff`, `background: #000` and
//! `primary: #07c`.
//!
//! ## Naming the Root Mode
//!
//! The root mode is called `default` unless `initialColorModeName` renames
//! it. If the theme also declares a mode under that same name, the two are
//! one mode: the declared tokens are applied over the root tokens and the
//! name is listed once.
//!
//! ## See Also
//!
//! - [`crate::palette`]: resolving a mode to its token values
//! - [`crate::config`]: the keys accepted in the `config` section

mod tokens;
#[allow(clippy::module_inception)]
mod theme;

pub use theme::{Theme, ThemeFormat};
pub use tokens::{custom_property_name, TokenMap};
